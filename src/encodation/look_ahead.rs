//! The annex P look-ahead test.
//!
//! Starting from the current position, every mode accumulates the
//! fractional number of codewords it would spend per character. Once
//! four characters are in, a set of precedence rules picks the winner as
//! soon as one mode is clearly ahead; hitting the end of the message
//! forces a decision. Staying in the current mode is free, every other
//! mode starts with the cost of the latch it would need.
use super::{base256, c40, edifact, text, x12, EncodationType};

type C = u32;

const DENOM: C = 12;

/// Cost fraction with fixed denominator 12, the least common multiple of
/// the per-character costs (thirds, quarters, halves). Keeping the exact
/// value in scaled integer form makes the comparisons deterministic.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Frac(C);

impl Frac {
    fn new(num: C, denom: C) -> Self {
        debug_assert!(denom > 0 && DENOM % denom == 0);
        Frac(num * (DENOM / denom))
    }

    fn add(&mut self, num: C, denom: C) {
        debug_assert!(denom > 0 && DENOM % denom == 0);
        self.0 += num * (DENOM / denom);
    }

    /// Round up to a whole codeword in place.
    fn round_up(&mut self) {
        let rest = self.0 % DENOM;
        if rest != 0 {
            self.0 += DENOM - rest;
        }
    }

    /// Whole codewords needed, rounding up.
    fn ceil(self) -> C {
        let rest = self.0 % DENOM;
        if rest != 0 {
            (self.0 + DENOM - rest) / DENOM
        } else {
            self.0 / DENOM
        }
    }
}

/// Accumulated cost per mode, indexed by [`EncodationType::index`].
struct CharCosts([Frac; 6]);

impl core::ops::Index<EncodationType> for CharCosts {
    type Output = Frac;

    fn index(&self, mode: EncodationType) -> &Frac {
        &self.0[mode.index()]
    }
}

impl core::ops::IndexMut<EncodationType> for CharCosts {
    fn index_mut(&mut self, mode: EncodationType) -> &mut Frac {
        &mut self.0[mode.index()]
    }
}

impl CharCosts {
    fn new(current: EncodationType) -> Self {
        let mut costs = if current == EncodationType::Ascii {
            Self([
                Frac::new(1, 2),
                Frac::new(1, 1),
                Frac::new(1, 1),
                Frac::new(1, 1),
                Frac::new(1, 1),
                Frac::new(5, 4),
            ])
        } else {
            // leaving the current mode costs an unlatch, so every other
            // mode starts at double weight
            Self([
                Frac::new(1, 1),
                Frac::new(2, 1),
                Frac::new(2, 1),
                Frac::new(2, 1),
                Frac::new(2, 1),
                Frac::new(5, 2),
            ])
        };
        costs[current] = Frac::new(0, 1);
        costs
    }

    fn count(&mut self, ch: u8) {
        use EncodationType::*;
        let extended = ch >= 128;

        if ch.is_ascii_digit() {
            self[Ascii].add(1, 2);
        } else {
            // a digit run ends, open codewords are committed
            self[Ascii].round_up();
            self[Ascii].add(if extended { 2 } else { 1 }, 1);
        }

        if c40::is_native(ch) {
            self[C40].add(2, 3);
        } else if extended {
            self[C40].add(8, 3);
        } else {
            self[C40].add(4, 3);
        }

        if text::is_native(ch) {
            self[Text].add(2, 3);
        } else if extended {
            self[Text].add(8, 3);
        } else {
            self[Text].add(4, 3);
        }

        if x12::is_native(ch) {
            self[X12].add(2, 3);
        } else if extended {
            self[X12].add(13, 3);
        } else {
            self[X12].add(10, 3);
        }

        if edifact::is_native(ch) {
            self[Edifact].add(3, 4);
        } else if extended {
            self[Edifact].add(17, 4);
        } else {
            self[Edifact].add(13, 4);
        }

        if base256::is_special(ch) {
            self[Base256].add(4, 1);
        } else {
            self[Base256].add(1, 1);
        }
    }

    fn ceiled(&self) -> [C; 6] {
        let mut counts = [0; 6];
        for (count, frac) in counts.iter_mut().zip(self.0.iter()) {
            *count = frac.ceil();
        }
        counts
    }

    /// Mid-stream precedence rules; `None` keeps accumulating.
    fn decide(&self, msg: &[u8], next: usize) -> Option<EncodationType> {
        use EncodationType::*;
        let counts = self.ceiled();
        let (_, at_min) = minimums(&counts);
        let min_count = at_min.iter().filter(|at| **at).count();
        let [ascii, c40, text, x12, edifact, base256] = counts;

        if ascii < c40 && ascii < text && ascii < x12 && ascii < edifact && ascii < base256 {
            return Some(Ascii);
        }
        let compaction_at_min =
            at_min[C40.index()] || at_min[Text.index()] || at_min[X12.index()] || at_min[Edifact.index()];
        if base256 < ascii || !compaction_at_min {
            return Some(Base256);
        }
        if min_count == 1 && at_min[Edifact.index()] {
            return Some(Edifact);
        }
        if min_count == 1 && at_min[Text.index()] {
            return Some(Text);
        }
        if min_count == 1 && at_min[X12.index()] {
            return Some(X12);
        }
        if c40 + 1 < ascii && c40 + 1 < base256 && c40 + 1 < edifact && c40 + 1 < text {
            if c40 < x12 {
                return Some(C40);
            }
            if c40 == x12 {
                // the tie goes to X12 when a separator shows up before
                // the run of native X12 characters ends
                for &ch in msg.iter().skip(next + 1) {
                    if x12::is_separator(ch) {
                        return Some(X12);
                    }
                    if !x12::is_native(ch) {
                        break;
                    }
                }
                return Some(C40);
            }
        }
        None
    }

    /// Forced decision at the end of the message.
    fn decide_at_end(&self) -> EncodationType {
        use EncodationType::*;
        let counts = self.ceiled();
        let (min, at_min) = minimums(&counts);
        let min_count = at_min.iter().filter(|at| **at).count();

        if counts[Ascii.index()] == min {
            return Ascii;
        }
        if min_count == 1 && at_min[Base256.index()] {
            return Base256;
        }
        if min_count == 1 && at_min[Edifact.index()] {
            return Edifact;
        }
        if min_count == 1 && at_min[Text.index()] {
            return Text;
        }
        if min_count == 1 && at_min[X12.index()] {
            return X12;
        }
        C40
    }
}

fn minimums(counts: &[C; 6]) -> (C, [bool; 6]) {
    let mut min = C::MAX;
    for count in counts {
        min = min.min(*count);
    }
    let mut at_min = [false; 6];
    for (at, count) in at_min.iter_mut().zip(counts) {
        *at = *count == min;
    }
    (min, at_min)
}

/// Pick the best mode for the input starting at `startpos`.
///
/// Note that this scans the raw message: a macro trailer excluded from
/// encoding still participates in the cost estimate, exactly like the
/// characters the current stretch will not reach.
pub(super) fn look_ahead(msg: &[u8], startpos: usize, current: EncodationType) -> EncodationType {
    if startpos >= msg.len() {
        return current;
    }
    let mut costs = CharCosts::new(current);
    let mut processed = 0;
    loop {
        if startpos + processed == msg.len() {
            return costs.decide_at_end();
        }
        let ch = msg[startpos + processed];
        processed += 1;
        costs.count(ch);

        if processed >= 4 {
            if let Some(mode) = costs.decide(msg, startpos + processed) {
                return mode;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use EncodationType::*;

    #[test]
    fn test_frac_new() {
        assert_eq!(Frac::new(0, 1).0, 0);
        assert_eq!(Frac::new(1, 2).0, 6);
        assert_eq!(Frac::new(1, 1).0, 12);
        assert_eq!(Frac::new(5, 4).0, 15);
    }

    #[test]
    fn test_frac_add() {
        let mut frac = Frac::new(1, 2);
        frac.add(3, 4);
        assert_eq!(frac.0, 15);
    }

    #[test]
    fn test_frac_round_up() {
        let mut frac = Frac::new(1, 2);
        frac.round_up();
        assert_eq!(frac.0, 12);
        frac.round_up();
        assert_eq!(frac.0, 12);
        assert_eq!(Frac::new(7, 3).ceil(), 3);
        assert_eq!(Frac::new(6, 3).ceil(), 2);
    }

    #[test]
    fn test_digits_stay_ascii() {
        assert_eq!(look_ahead(b"123456", 0, Ascii), Ascii);
    }

    #[test]
    fn test_binary_run_switches_to_base256() {
        assert_eq!(look_ahead(b"\xAB\xE4\xF6\xFC\xE9\xBB", 0, Ascii), Base256);
    }

    #[test]
    fn test_upper_case_run_switches_to_x12() {
        assert_eq!(look_ahead(b"ABC>ABC123>AB", 0, Ascii), X12);
    }

    #[test]
    fn test_edifact_leaves_on_binary() {
        assert_eq!(look_ahead(b".\xFCXX.XXX.XXX.XXX", 0, Edifact), Ascii);
    }

    #[test]
    fn test_c40_keeps_native_run() {
        assert_eq!(look_ahead(b"AIMAIMAIM", 0, C40), C40);
    }

    #[test]
    fn test_c40_moves_to_text_on_case_flip() {
        // the lower case tail eventually gives TEXT the unique minimum
        assert_eq!(look_ahead(b"AIMaimaimaim", 0, C40), Text);
    }

    #[test]
    fn test_c40_x12_tie_break() {
        // same costs for C40 and X12; a separator behind the window
        // decides for X12, a plain alphanumeric tail for C40
        assert_eq!(look_ahead(b"A1B2C3D4E5F6G7H**", 0, Ascii), X12);
        assert_eq!(look_ahead(b"A1B2C3D4E5F6G7H8I9J0K1L2", 0, Ascii), C40);
    }

    #[test]
    fn test_past_end_keeps_mode() {
        assert_eq!(look_ahead(b"", 0, Edifact), Edifact);
        assert_eq!(look_ahead(b"AB", 2, Base256), Base256);
    }
}
