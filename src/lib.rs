//! Data codeword generation for Data Matrix (ECC 200) symbols.
//!
//! This crate implements the high-level encoding step of ISO/IEC 16022:
//! a byte message is compacted into 8-bit data codewords using the six
//! encodation modes (ASCII, C40, TEXT, X12, EDIFACT, Base 256) and the
//! look-ahead mode selection algorithm from annex P of the standard.
//! The result has exactly the data capacity of the automatically chosen
//! symbol size and is ready for error correction and module placement,
//! which are not part of this crate.
//!
//! ```
//! use datamatrix_codewords::{encode, SymbolList};
//!
//! let (codewords, symbol) = encode(b"A1B2C3D4E5F6G7H8I9J0K1L2", &SymbolList::default())?;
//! assert_eq!(codewords.len(), symbol.num_data_codewords());
//! # Ok::<(), datamatrix_codewords::DataEncodingError>(())
//! ```
//!
//! The symbol size is picked as the smallest one that fits the data.
//! [`SymbolList`] narrows the choice down to squares, rectangles, or a
//! module dimension range:
//!
//! ```
//! use datamatrix_codewords::{encode, SymbolList, SymbolShape};
//!
//! let squares = SymbolList::new(SymbolShape::Square).with_min_size(16, 16);
//! let (_, symbol) = encode(b"123456", &squares)?;
//! assert_eq!(symbol.width(), 16);
//! # Ok::<(), datamatrix_codewords::DataEncodingError>(())
//! ```
#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod encodation;
mod symbol_size;

pub use encodation::{encode, encode_str, DataEncodingError};
pub use symbol_size::{SymbolList, SymbolShape, SymbolSize};
