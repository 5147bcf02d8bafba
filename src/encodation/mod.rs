//! Compaction of a byte message into data codewords.
//!
//! A top-level driver starts in ASCII mode and dispatches to one mode
//! encoder at a time. Each encoder consumes characters and emits
//! codewords until the look-ahead test tells it to hand control back,
//! then the driver adopts the requested mode. At the end of the message
//! the codeword stream is padded to the capacity of the selected symbol.
use alloc::vec::Vec;

use crate::symbol_size::{SymbolList, SymbolSize};

mod ascii;
mod base256;
mod c40;
mod edifact;
mod encodation_type;
mod look_ahead;
mod text;
mod x12;

#[cfg(test)]
mod tests;

use encodation_type::EncodationType;

pub(crate) const MACRO05: u8 = 236;
pub(crate) const MACRO06: u8 = 237;
pub(crate) const MACRO05_HEAD: &[u8] = b"[)>\x1E05\x1D";
pub(crate) const MACRO06_HEAD: &[u8] = b"[)>\x1E06\x1D";
pub(crate) const MACRO_TRAIL: &[u8] = b"\x1E\x04";

// 232 (FNC1), 233 (structured append) and 234 (reader programming)
// are never emitted by this encoder.

pub(crate) const UNLATCH: u8 = 254;

/// Error when generating the data codewords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataEncodingError {
    /// The symbol list admits no symbol size at all.
    SymbolListEmpty,
    /// No allowed symbol size can hold the encoded message.
    NotEnoughSpace,
    /// A byte was handed to a mode that has no encoding for it.
    IllegalCharacter(u8),
    /// `encode_str` input contained a character outside ISO-8859-1.
    UnsupportedCharacter(char),
}

impl core::fmt::Display for DataEncodingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::SymbolListEmpty => write!(f, "the symbol list admits no symbol size"),
            Self::NotEnoughSpace => {
                write!(f, "the data does not fit into any allowed symbol size")
            }
            Self::IllegalCharacter(ch) => {
                write!(f, "byte {ch:#04x} has no encoding in the selected mode")
            }
            Self::UnsupportedCharacter(ch) => {
                write!(f, "character {ch:?} is outside ISO-8859-1")
            }
        }
    }
}

/// Shared state of one `encode` call.
///
/// The cursor only moves forward, except for the bounded rewinds the
/// C40/TEXT, X12 and EDIFACT end-of-data rules perform over characters
/// they already consumed. The selected symbol size is cached and only
/// re-resolved when the codeword count outgrows it, or after a rewind
/// invalidated it.
pub(crate) struct EncoderContext<'a> {
    msg: &'a [u8],
    symbols: &'a SymbolList,
    pos: usize,
    skip_at_end: usize,
    codewords: Vec<u8>,
    symbol: Option<SymbolSize>,
    new_mode: Option<EncodationType>,
}

impl<'a> EncoderContext<'a> {
    fn new(msg: &'a [u8], symbols: &'a SymbolList) -> Self {
        Self {
            msg,
            symbols,
            pos: 0,
            skip_at_end: 0,
            codewords: Vec::new(),
            symbol: None,
            new_mode: None,
        }
    }

    /// The full message, including a macro trailer excluded from encoding.
    fn message(&self) -> &[u8] {
        self.msg
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn current_char(&self) -> u8 {
        self.msg[self.pos]
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn rewind(&mut self, n: usize) {
        self.pos -= n;
    }

    fn has_more_characters(&self) -> bool {
        self.pos < self.msg.len() - self.skip_at_end
    }

    fn remaining_characters(&self) -> usize {
        self.msg.len() - self.skip_at_end - self.pos
    }

    fn push(&mut self, codeword: u8) {
        self.codewords.push(codeword);
    }

    fn codeword_count(&self) -> usize {
        self.codewords.len()
    }

    /// Request a mode switch; the driver picks it up after the current
    /// encoder returns.
    fn signal_mode_change(&mut self, mode: EncodationType) {
        self.new_mode = Some(mode);
    }

    fn new_mode(&self) -> Option<EncodationType> {
        self.new_mode
    }

    fn take_new_mode(&mut self) -> Option<EncodationType> {
        self.new_mode.take()
    }

    /// Resolve the smallest symbol holding at least `min_codewords`.
    ///
    /// A cached symbol is kept as long as it is big enough; the selection
    /// never shrinks without [`reset_symbol_info`](Self::reset_symbol_info).
    fn update_symbol_info(
        &mut self,
        min_codewords: usize,
    ) -> Result<SymbolSize, DataEncodingError> {
        match self.symbol {
            Some(symbol) if symbol.num_data_codewords() >= min_codewords => Ok(symbol),
            _ => {
                let symbol = self
                    .symbols
                    .first_big_enough_for(min_codewords)
                    .ok_or(DataEncodingError::NotEnoughSpace)?;
                self.symbol = Some(symbol);
                Ok(symbol)
            }
        }
    }

    /// Drop the cached symbol size so the next lookup may shrink it again.
    fn reset_symbol_info(&mut self) {
        self.symbol = None;
    }
}

/// Generate the data codewords for `data` and pick a symbol size from
/// `symbols`.
///
/// `data` must already be in ISO-8859-1; the returned codeword vector
/// has exactly the data capacity of the returned symbol size.
pub fn encode(
    data: &[u8],
    symbols: &SymbolList,
) -> Result<(Vec<u8>, SymbolSize), DataEncodingError> {
    if symbols.is_empty() {
        return Err(DataEncodingError::SymbolListEmpty);
    }

    let mut ctx = EncoderContext::new(data, symbols);
    apply_macro_shorthand(&mut ctx);

    let mut mode = EncodationType::Ascii;
    while ctx.has_more_characters() {
        mode.encode(&mut ctx)?;
        if let Some(next) = ctx.take_new_mode() {
            mode = next;
        }
    }

    let len = ctx.codeword_count();
    let symbol = ctx.update_symbol_info(len)?;
    let capacity = symbol.num_data_codewords();
    if len < capacity && mode != EncodationType::Ascii && mode != EncodationType::Base256 {
        ctx.push(UNLATCH);
    }
    if ctx.codeword_count() < capacity {
        ctx.push(ascii::PAD);
    }
    while ctx.codeword_count() < capacity {
        let position = ctx.codeword_count() + 1;
        ctx.push(randomize_253_state(ascii::PAD, position));
    }

    Ok((ctx.codewords, symbol))
}

/// Like [`encode`], for a string transcoded to ISO-8859-1 first.
pub fn encode_str(
    text: &str,
    symbols: &SymbolList,
) -> Result<(Vec<u8>, SymbolSize), DataEncodingError> {
    let mut data = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let cp = ch as u32;
        if cp > 0xFF {
            return Err(DataEncodingError::UnsupportedCharacter(ch));
        }
        data.push(cp as u8);
    }
    encode(&data, symbols)
}

/// Replace a `[)>` RS `05`/`06` GS header plus RS EOT trailer with the
/// single codeword the standard reserves for it.
fn apply_macro_shorthand(ctx: &mut EncoderContext) {
    for (head, codeword) in [(MACRO05_HEAD, MACRO05), (MACRO06_HEAD, MACRO06)] {
        if starts_with(ctx.msg, head) && ends_with(ctx.msg, MACRO_TRAIL) {
            ctx.push(codeword);
            ctx.skip_at_end = MACRO_TRAIL.len();
            ctx.pos = head.len();
            return;
        }
    }
}

// A message consisting of nothing but the header or trailer is ordinary
// data, hence the strict comparison.
fn starts_with(msg: &[u8], pattern: &[u8]) -> bool {
    msg.len() > pattern.len() && msg.starts_with(pattern)
}

fn ends_with(msg: &[u8], pattern: &[u8]) -> bool {
    msg.len() > pattern.len() && msg.ends_with(pattern)
}

/// The 253-state randomisation applied to every pad codeword after the
/// first. `position` is the 1-based index in the codeword stream.
fn randomize_253_state(ch: u8, position: usize) -> u8 {
    let pseudo_random = ((149 * position) % 253) + 1;
    let tmp = ch as usize + pseudo_random;
    if tmp <= 254 {
        tmp as u8
    } else {
        (tmp - 254) as u8
    }
}

#[test]
fn test_randomize_253_state() {
    // pad fill of an otherwise empty symbol: 129 at position 1, then
    // whitened pads
    assert_eq!(randomize_253_state(ascii::PAD, 2), 175);
    assert_eq!(randomize_253_state(ascii::PAD, 3), 70);
}
