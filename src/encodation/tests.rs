//! End-to-end codeword tests against hand-checked expected vectors.
use alloc::{vec, vec::Vec};

use pretty_assertions::assert_eq;

use super::{encode, encode_str, DataEncodingError};
use crate::symbol_size::{SymbolList, SymbolShape, SymbolSize};

fn enc(data: &[u8]) -> Vec<u8> {
    encode(data, &SymbolList::default()).unwrap().0
}

// ASCII mode

#[test]
fn test_ascii_digit_pairs() {
    assert_eq!(enc(b"123456"), vec![142, 164, 186]);
}

#[test]
fn test_ascii_digit_pairs_with_upper_shift() {
    assert_eq!(enc(b"123456\xa3"), vec![142, 164, 186, 235, 36]);
}

#[test]
fn test_ascii_mixed_content() {
    assert_eq!(
        enc(b"30Q324343430794<OQQ"),
        vec![160, 82, 162, 173, 173, 173, 137, 224, 61, 80, 82, 82]
    );
}

#[test]
fn test_ascii_single_letter() {
    assert_eq!(enc(b"A"), vec![66, 129, 70]);
}

#[test]
fn test_ascii_single_digit() {
    assert_eq!(enc(b"1"), vec![50, 129, 70]);
}

#[test]
fn test_ascii_single_extended() {
    assert_eq!(enc(b"\xa3"), vec![235, 36, 129]);
}

#[test]
fn test_ascii_even_digit_run() {
    // one codeword per digit pair, then pad
    assert_eq!(enc(b"12345678"), vec![142, 164, 186, 208, 129]);
}

#[test]
fn test_empty_message() {
    // smallest symbol, all pad
    assert_eq!(enc(b""), vec![129, 175, 70]);
}

// C40

#[test]
fn test_c40_run() {
    assert_eq!(enc(b"AIMAIMAIM"), vec![230, 91, 11, 91, 11, 91, 11, 254]);
}

#[test]
fn test_c40_with_upper_shift_tail() {
    // the look-ahead bails out to ASCII for the trailing extended byte
    assert_eq!(
        enc(b"AIMAIMAIM\xcb"),
        vec![230, 91, 11, 91, 11, 91, 11, 254, 235, 76]
    );
}

#[test]
fn test_c40_alternating_upper_digit() {
    assert_eq!(
        enc(b"A1B2C3D4E5F6G7H8I9J0K1L2"),
        vec![230, 88, 88, 40, 8, 107, 147, 59, 67, 126, 206, 78, 126, 144, 121, 35, 47, 254]
    );
}

#[test]
fn test_c40_end_of_data_backtracks_one() {
    // seven characters leave a lone value in the last triplet; the
    // seventh goes back to ASCII
    assert_eq!(enc(b"AIMAIMA"), vec![230, 91, 11, 91, 11, 254, 66, 129]);
}

#[test]
fn test_c40_end_of_data_backtracks_twice() {
    assert_eq!(enc(b"AIMAIMAB"), vec![230, 91, 11, 91, 11, 254, 66, 67]);
}

// TEXT

#[test]
fn test_text_run() {
    assert_eq!(enc(b"aimaimaim"), vec![239, 91, 11, 91, 11, 91, 11, 254]);
}

#[test]
fn test_text_run_with_punctuation_tail() {
    assert_eq!(
        enc(b"aimaimaim'"),
        vec![239, 91, 11, 91, 11, 91, 11, 254, 40, 129]
    );
}

#[test]
fn test_text_shift_and_triplet_padding() {
    // 'W' and '!' need shifts; the open triplet is padded with Shift 1
    // and the last character is re-routed through ASCII
    assert_eq!(
        enc(b"Hello World!"),
        vec![73, 239, 116, 130, 175, 123, 148, 64, 158, 233, 254, 34]
    );
}

// X12

#[test]
fn test_x12_run_with_ascii_tail() {
    assert_eq!(
        enc(b"ABC>ABC123>AB"),
        vec![238, 89, 233, 14, 192, 100, 207, 44, 31, 67]
    );
}

#[test]
fn test_x12_two_leftover_characters() {
    assert_eq!(
        enc(b"ABC>ABC123>ABC"),
        vec![238, 89, 233, 14, 192, 100, 207, 44, 31, 254, 67, 68]
    );
}

#[test]
fn test_x12_unlatch_with_symbol_space_left() {
    assert_eq!(
        enc(b"ABC>ABC123>ABCD"),
        vec![238, 89, 233, 14, 192, 100, 207, 44, 31, 96, 82, 254]
    );
}

#[test]
fn test_x12_implicit_unlatch_at_symbol_end() {
    // one character and one codeword left: no unlatch
    assert_eq!(
        enc(b"ABC>ABC123>ABCDE"),
        vec![238, 89, 233, 14, 192, 100, 207, 44, 31, 96, 82, 70]
    );
}

// EDIFACT

#[test]
fn test_edifact_run() {
    assert_eq!(
        enc(b".A.C1.3.DATA.123DATA.123DATA"),
        vec![
            240, 184, 27, 131, 198, 236, 238, 16, 21, 1, 187, 28, 179, 16, 21, 1, 187, 28, 179,
            16, 21, 1
        ]
    );
}

#[test]
fn test_edifact_one_leftover_value() {
    // the ninth character is re-routed through ASCII
    assert_eq!(
        enc(b".A.C1.3.X"),
        vec![240, 184, 27, 131, 198, 236, 238, 89]
    );
}

#[test]
fn test_edifact_partial_group_with_unlatch() {
    assert_eq!(
        enc(b".A.C1.3.X."),
        vec![240, 184, 27, 131, 198, 236, 238, 98, 231, 192]
    );
}

#[test]
fn test_edifact_three_leftover_values() {
    assert_eq!(
        enc(b".A.C1.3.X.X"),
        vec![240, 184, 27, 131, 198, 236, 238, 98, 230, 31]
    );
}

#[test]
fn test_edifact_implicit_unlatch_at_symbol_end() {
    assert_eq!(
        enc(b".A.C1.3.X.X2"),
        vec![240, 184, 27, 131, 198, 236, 238, 98, 230, 50]
    );
}

#[test]
fn test_edifact_ascii_tail_of_one() {
    assert_eq!(
        enc(b".A.C1.3.X.X2."),
        vec![240, 184, 27, 131, 198, 236, 238, 98, 230, 50, 47, 129]
    );
}

#[test]
fn test_edifact_ascii_tail_of_two() {
    assert_eq!(
        enc(b".A.C1.3.X.X2.."),
        vec![240, 184, 27, 131, 198, 236, 238, 98, 230, 50, 47, 47]
    );
}

// Base 256

#[test]
fn test_base256_fills_symbol() {
    // length field 0: the stretch runs to the end of the symbol
    assert_eq!(
        enc(b"\xab\xe4\xf6\xfc\xe9\xbb"),
        vec![231, 44, 108, 59, 226, 126, 1, 104]
    );
}

#[test]
fn test_base256_with_padding() {
    assert_eq!(
        enc(b"\xab\xe4\xf6\xfc\xe9\xe0\xbb"),
        vec![231, 51, 108, 59, 226, 126, 1, 141, 254, 129]
    );
}

#[test]
fn test_base256_fills_larger_symbol() {
    assert_eq!(
        enc(b"\xab\xe4\xf6\xfc\xe9\xe0\xe1\xbb"),
        vec![231, 44, 108, 59, 226, 126, 1, 141, 36, 147]
    );
}

#[test]
fn test_base256_with_ascii_tail() {
    assert_eq!(
        enc(b"\xab\xe4\xf6\xfc\xe9\xbb 234"),
        vec![231, 51, 108, 59, 226, 126, 1, 104, 99, 153, 53, 129]
    );
}

#[test]
fn test_base256_two_byte_length_field() {
    // 1555 data bytes need the largest symbol and the split length field
    let (codewords, symbol) = encode(&[0x80; 1555], &SymbolList::default()).unwrap();
    assert_eq!(symbol, SymbolSize::Square144);
    assert_eq!(codewords.len(), 1558);
    assert_eq!(codewords[0], 231);
    // 255 and 55 after whitening
    assert_eq!(codewords[1], 43);
    assert_eq!(codewords[2], 248);
}

#[test]
fn test_base256_length_field_zero_at_max_capacity() {
    // 1556 bytes still fit because the length field stays 0
    let (codewords, _) = encode(&[0x80; 1556], &SymbolList::default()).unwrap();
    assert_eq!(codewords.len(), 1558);
    assert_eq!(codewords[0], 231);
    assert_eq!(codewords[1], 44);
}

// Macro headers

#[test]
fn test_macro05() {
    assert_eq!(enc(b"[)>\x1E05\x1DA\x1E\x04"), vec![236, 66, 129]);
}

#[test]
fn test_macro06() {
    assert_eq!(
        enc(b"[)>\x1E06\x1D123456\x1E\x04"),
        vec![237, 142, 164, 186, 129]
    );
}

#[test]
fn test_macro_header_alone_is_plain_data() {
    // no trailer, no shorthand
    assert_eq!(
        enc(b"[)>\x1E05\x1D"),
        vec![92, 42, 63, 31, 135, 30, 129, 56]
    );
}

// Symbol constraints

#[test]
fn test_rectangle_symbols() {
    let rects = SymbolList::new(SymbolShape::Rectangle);
    let (codewords, symbol) = encode(b"AIMAI", &rects).unwrap();
    assert_eq!(codewords, vec![66, 74, 78, 66, 74]);
    assert_eq!(symbol, SymbolSize::Rect8x18);
}

#[test]
fn test_square_symbols() {
    let squares = SymbolList::new(SymbolShape::Square);
    let (codewords, symbol) = encode(b"AIMAI", &squares).unwrap();
    assert_eq!(codewords, vec![66, 74, 78, 66, 74]);
    assert_eq!(symbol, SymbolSize::Square12);
}

#[test]
fn test_min_size_forces_larger_symbol() {
    let list = SymbolList::default().with_min_size(12, 12);
    let (codewords, symbol) = encode(b"A", &list).unwrap();
    assert_eq!(codewords, vec![66, 129, 70, 220, 115]);
    assert_eq!(symbol, SymbolSize::Square12);
}

#[test]
fn test_empty_symbol_list() {
    let list = SymbolList::new(SymbolShape::Rectangle).with_min_size(20, 20);
    assert_eq!(
        encode(b"A", &list),
        Err(DataEncodingError::SymbolListEmpty)
    );
}

#[test]
fn test_data_too_long() {
    assert_eq!(
        encode(&[0x80; 1600], &SymbolList::default()),
        Err(DataEncodingError::NotEnoughSpace)
    );
}

// String front end

#[test]
fn test_encode_str_maps_to_latin1() {
    let symbols = SymbolList::default();
    assert_eq!(
        encode_str("ÄA", &symbols).unwrap().0,
        encode(b"\xC4A", &symbols).unwrap().0
    );
    assert_eq!(
        encode_str("€", &symbols),
        Err(DataEncodingError::UnsupportedCharacter('€'))
    );
}

// Universal properties

#[test]
fn test_output_always_fills_symbol() {
    let symbols = SymbolList::default();
    let inputs: &[&[u8]] = &[
        b"",
        b"1",
        b"Hello World!",
        b"AIMAIMAIM",
        b"aimaimaim",
        b"ABC>ABC123>ABCDE",
        b".A.C1.3.DATA.123DATA.123DATA",
        b"\xab\xe4\xf6\xfc\xe9\xbb 234",
        b"[)>\x1E05\x1DA\x1E\x04",
        b"30Q324343430794<OQQ",
    ];
    for input in inputs {
        let (codewords, symbol) = encode(input, &symbols).unwrap();
        assert_eq!(codewords.len(), symbol.num_data_codewords());
    }
}

#[test]
fn test_digit_pairs_use_numeric_range() {
    let (codewords, _) = encode(b"0123456789", &SymbolList::default()).unwrap();
    // five pairs, no padding: every codeword is in the 130..=229 band
    assert_eq!(codewords.len(), 5);
    assert!(codewords.iter().all(|cw| (130..=229).contains(cw)));
}
