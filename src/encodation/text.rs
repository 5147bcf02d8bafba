use super::{c40, DataEncodingError, EncodationType, EncoderContext};

/// The TEXT table is the C40 table with the letter cases swapped: lower
/// case occupies the basic set, upper case moves to shift 3.
#[rustfmt::skip]
static TEXT_VALUES: [(u8, u8); 128] = [
    (0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6), (0, 7), // 0x00
    (0, 8), (0, 9), (0, 10), (0, 11), (0, 12), (0, 13), (0, 14), (0, 15), // 0x08
    (0, 16), (0, 17), (0, 18), (0, 19), (0, 20), (0, 21), (0, 22), (0, 23), // 0x10
    (0, 24), (0, 25), (0, 26), (0, 27), (0, 28), (0, 29), (0, 30), (0, 31), // 0x18
    (3, 3), (1, 0), (1, 1), (1, 2), (1, 3), (1, 4), (1, 5), (1, 6), // 0x20
    (1, 7), (1, 8), (1, 9), (1, 10), (1, 11), (1, 12), (1, 13), (1, 14), // 0x28
    (3, 4), (3, 5), (3, 6), (3, 7), (3, 8), (3, 9), (3, 10), (3, 11), // 0x30
    (3, 12), (3, 13), (1, 15), (1, 16), (1, 17), (1, 18), (1, 19), (1, 20), // 0x38
    (1, 21), (2, 1), (2, 2), (2, 3), (2, 4), (2, 5), (2, 6), (2, 7), // 0x40
    (2, 8), (2, 9), (2, 10), (2, 11), (2, 12), (2, 13), (2, 14), (2, 15), // 0x48
    (2, 16), (2, 17), (2, 18), (2, 19), (2, 20), (2, 21), (2, 22), (2, 23), // 0x50
    (2, 24), (2, 25), (2, 26), (1, 22), (1, 23), (1, 24), (1, 25), (1, 26), // 0x58
    (2, 0), (3, 14), (3, 15), (3, 16), (3, 17), (3, 18), (3, 19), (3, 20), // 0x60
    (3, 21), (3, 22), (3, 23), (3, 24), (3, 25), (3, 26), (3, 27), (3, 28), // 0x68
    (3, 29), (3, 30), (3, 31), (3, 32), (3, 33), (3, 34), (3, 35), (3, 36), // 0x70
    (3, 37), (3, 38), (3, 39), (2, 27), (2, 28), (2, 29), (2, 30), (2, 31), // 0x78
];

/// Space, digits and lower case letters encode as a single TEXT value.
pub(super) fn is_native(ch: u8) -> bool {
    ch < 128 && TEXT_VALUES[ch as usize].0 == c40::BASIC
}

pub(super) fn encode(ctx: &mut EncoderContext) -> Result<(), DataEncodingError> {
    c40::encode_with(ctx, &TEXT_VALUES, EncodationType::Text)
}

#[test]
fn test_case_swap() {
    let values = c40::values_for(&TEXT_VALUES, b"abcxyz");
    assert_eq!(values, alloc::vec![14, 15, 16, 37, 38, 39]);
    let values = c40::values_for(&TEXT_VALUES, b"AZ");
    assert_eq!(values, alloc::vec![2, 1, 2, 26]);
}

#[test]
fn test_shift3_specials() {
    let values = c40::values_for(&TEXT_VALUES, b"`{|}~\x7f");
    assert_eq!(
        values,
        alloc::vec![2, 0, 2, 27, 2, 28, 2, 29, 2, 30, 2, 31]
    );
}

#[test]
fn test_digits_and_space_match_c40() {
    let values = c40::values_for(&TEXT_VALUES, b" 0129");
    assert_eq!(values, alloc::vec![3, 4, 5, 6, 13]);
}
