//! The ECC 200 symbol sizes and the selection of the smallest fitting one.

/// The symbol sizes defined for Data Matrix ECC 200.
///
/// The numbers in a variant name are the dimensions of the symbol in
/// modules, e.g. [Square22](Self::Square22) is 22 modules tall and wide.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SymbolSize {
    Square10,
    Square12,
    Square14,
    Square16,
    Square18,
    Square20,
    Square22,
    Square24,
    Square26,
    Square32,
    Square36,
    Square40,
    Square44,
    Square48,
    Square52,
    Square64,
    Square72,
    Square80,
    Square88,
    Square96,
    Square104,
    Square120,
    Square132,
    Square144,
    Rect8x18,
    Rect8x32,
    Rect12x26,
    Rect12x36,
    Rect16x36,
    Rect16x48,
}

// All sizes ordered by data capacity, squares and rectangles interleaved.
// The first entry passing the shape and dimension filters wins.
#[rustfmt::skip]
const SYMBOL_SIZES: [SymbolSize; 30] = [
    SymbolSize::Square10, SymbolSize::Square12, SymbolSize::Rect8x18,
    SymbolSize::Square14, SymbolSize::Rect8x32, SymbolSize::Square16,
    SymbolSize::Rect12x26, SymbolSize::Square18, SymbolSize::Square20,
    SymbolSize::Rect12x36, SymbolSize::Square22, SymbolSize::Rect16x36,
    SymbolSize::Square24, SymbolSize::Square26, SymbolSize::Rect16x48,
    SymbolSize::Square32, SymbolSize::Square36, SymbolSize::Square40,
    SymbolSize::Square44, SymbolSize::Square48, SymbolSize::Square52,
    SymbolSize::Square64, SymbolSize::Square72, SymbolSize::Square80,
    SymbolSize::Square88, SymbolSize::Square96, SymbolSize::Square104,
    SymbolSize::Square120, SymbolSize::Square132, SymbolSize::Square144,
];

impl SymbolSize {
    /// Number of data codewords the symbol holds, before error correction.
    pub fn num_data_codewords(&self) -> usize {
        match self {
            Self::Square10 => 3,
            Self::Square12 => 5,
            Self::Square14 => 8,
            Self::Square16 => 12,
            Self::Square18 => 18,
            Self::Square20 => 22,
            Self::Square22 => 30,
            Self::Square24 => 36,
            Self::Square26 => 44,
            Self::Square32 => 62,
            Self::Square36 => 86,
            Self::Square40 => 114,
            Self::Square44 => 144,
            Self::Square48 => 174,
            Self::Square52 => 204,
            Self::Square64 => 280,
            Self::Square72 => 368,
            Self::Square80 => 456,
            Self::Square88 => 576,
            Self::Square96 => 696,
            Self::Square104 => 816,
            Self::Square120 => 1050,
            Self::Square132 => 1304,
            Self::Square144 => 1558,
            Self::Rect8x18 => 5,
            Self::Rect8x32 => 10,
            Self::Rect12x26 => 16,
            Self::Rect12x36 => 22,
            Self::Rect16x36 => 32,
            Self::Rect16x48 => 49,
        }
    }

    /// Symbol height in modules.
    pub fn height(&self) -> usize {
        match self {
            Self::Rect8x18 | Self::Rect8x32 => 8,
            Self::Rect12x26 | Self::Rect12x36 => 12,
            Self::Rect16x36 | Self::Rect16x48 => 16,
            _ => self.width(),
        }
    }

    /// Symbol width in modules.
    pub fn width(&self) -> usize {
        match self {
            Self::Square10 => 10,
            Self::Square12 => 12,
            Self::Square14 => 14,
            Self::Square16 => 16,
            Self::Square18 | Self::Rect8x18 => 18,
            Self::Square20 => 20,
            Self::Square22 => 22,
            Self::Square24 => 24,
            Self::Square26 | Self::Rect12x26 => 26,
            Self::Square32 | Self::Rect8x32 => 32,
            Self::Square36 | Self::Rect12x36 | Self::Rect16x36 => 36,
            Self::Square40 => 40,
            Self::Square44 => 44,
            Self::Square48 | Self::Rect16x48 => 48,
            Self::Square52 => 52,
            Self::Square64 => 64,
            Self::Square72 => 72,
            Self::Square80 => 80,
            Self::Square88 => 88,
            Self::Square96 => 96,
            Self::Square104 => 104,
            Self::Square120 => 120,
            Self::Square132 => 132,
            Self::Square144 => 144,
        }
    }

    pub fn is_square(&self) -> bool {
        self.height() == self.width()
    }
}

/// Shape restriction for the automatic symbol size choice.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SymbolShape {
    /// Squares and rectangles, whichever fits first.
    #[default]
    Any,
    /// Square symbols only.
    Square,
    /// Rectangular symbols only.
    Rectangle,
}

/// The set of symbol sizes the encoder may choose from.
///
/// A list is a shape restriction plus optional bounds on the symbol
/// dimensions in modules. A bound of `0` means "no bound". The default
/// list allows every size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolList {
    shape: SymbolShape,
    min_width: usize,
    min_height: usize,
    max_width: usize,
    max_height: usize,
}

impl SymbolList {
    pub fn new(shape: SymbolShape) -> Self {
        Self {
            shape,
            min_width: 0,
            min_height: 0,
            max_width: 0,
            max_height: 0,
        }
    }

    /// Only consider symbols at least `width` x `height` modules.
    pub fn with_min_size(mut self, width: usize, height: usize) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    /// Only consider symbols at most `width` x `height` modules.
    pub fn with_max_size(mut self, width: usize, height: usize) -> Self {
        self.max_width = width;
        self.max_height = height;
        self
    }

    /// Does the list rule out every symbol size?
    pub fn is_empty(&self) -> bool {
        self.candidates().next().is_none()
    }

    fn admits(&self, symbol: SymbolSize) -> bool {
        let shape_ok = match self.shape {
            SymbolShape::Any => true,
            SymbolShape::Square => symbol.is_square(),
            SymbolShape::Rectangle => !symbol.is_square(),
        };
        shape_ok
            && (self.min_width == 0 || symbol.width() >= self.min_width)
            && (self.min_height == 0 || symbol.height() >= self.min_height)
            && (self.max_width == 0 || symbol.width() <= self.max_width)
            && (self.max_height == 0 || symbol.height() <= self.max_height)
    }

    pub(crate) fn candidates(&self) -> impl Iterator<Item = SymbolSize> + '_ {
        SYMBOL_SIZES.iter().copied().filter(|s| self.admits(*s))
    }

    /// The first (smallest) allowed symbol with capacity for `size_needed`
    /// data codewords.
    pub(crate) fn first_big_enough_for(&self, size_needed: usize) -> Option<SymbolSize> {
        self.candidates()
            .find(|s| s.num_data_codewords() >= size_needed)
    }
}

impl Default for SymbolList {
    fn default() -> Self {
        Self::new(SymbolShape::Any)
    }
}

#[test]
fn symbol_size_order() {
    let mut last = 0;
    for size in SYMBOL_SIZES.iter() {
        let new = size.num_data_codewords();
        assert!(new >= last);
        last = new;
    }
}

#[test]
fn test_default_list_lookup() {
    let list = SymbolList::default();
    assert_eq!(list.first_big_enough_for(0), Some(SymbolSize::Square10));
    assert_eq!(list.first_big_enough_for(4), Some(SymbolSize::Square12));
    assert_eq!(list.first_big_enough_for(9), Some(SymbolSize::Rect8x32));
    assert_eq!(list.first_big_enough_for(1558), Some(SymbolSize::Square144));
    assert_eq!(list.first_big_enough_for(1559), None);
}

#[test]
fn test_shape_filter() {
    let squares = SymbolList::new(SymbolShape::Square);
    assert_eq!(squares.first_big_enough_for(9), Some(SymbolSize::Square16));
    let rects = SymbolList::new(SymbolShape::Rectangle);
    assert_eq!(rects.first_big_enough_for(9), Some(SymbolSize::Rect8x32));
    assert_eq!(rects.first_big_enough_for(50), None);
}

#[test]
fn test_dimension_bounds() {
    let list = SymbolList::default().with_min_size(12, 12);
    assert_eq!(list.first_big_enough_for(1), Some(SymbolSize::Square12));
    let list = SymbolList::default().with_max_size(18, 8);
    assert_eq!(list.first_big_enough_for(5), Some(SymbolSize::Rect8x18));
    assert_eq!(list.first_big_enough_for(6), None);
}

#[test]
fn test_empty_list() {
    let list = SymbolList::new(SymbolShape::Rectangle).with_min_size(20, 20);
    assert!(list.is_empty());
    assert!(!SymbolList::default().is_empty());
}
