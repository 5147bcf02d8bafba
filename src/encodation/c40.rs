use alloc::vec::Vec;

use super::{look_ahead, DataEncodingError, EncodationType, EncoderContext, UNLATCH};

// Shift prefixes of the auxiliary character sets are the values 0 to 2.
// BASIC marks values of the basic set, written without a prefix.
const SHIFT1: u8 = 0;
const SHIFT2: u8 = 1;
pub(super) const BASIC: u8 = 3;

// Value 30 of the shift 2 set; prefixes the encoding of `byte - 128`.
const UPPER_SHIFT: u8 = 30;

/// `(shift set, value)` for the lower half of the byte range. Bytes with
/// the high bit set are written as Shift 2 + Upper Shift followed by the
/// entry for `byte - 128`.
#[rustfmt::skip]
static C40_VALUES: [(u8, u8); 128] = [
    (0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6), (0, 7), // 0x00
    (0, 8), (0, 9), (0, 10), (0, 11), (0, 12), (0, 13), (0, 14), (0, 15), // 0x08
    (0, 16), (0, 17), (0, 18), (0, 19), (0, 20), (0, 21), (0, 22), (0, 23), // 0x10
    (0, 24), (0, 25), (0, 26), (0, 27), (0, 28), (0, 29), (0, 30), (0, 31), // 0x18
    (3, 3), (1, 0), (1, 1), (1, 2), (1, 3), (1, 4), (1, 5), (1, 6), // 0x20
    (1, 7), (1, 8), (1, 9), (1, 10), (1, 11), (1, 12), (1, 13), (1, 14), // 0x28
    (3, 4), (3, 5), (3, 6), (3, 7), (3, 8), (3, 9), (3, 10), (3, 11), // 0x30
    (3, 12), (3, 13), (1, 15), (1, 16), (1, 17), (1, 18), (1, 19), (1, 20), // 0x38
    (1, 21), (3, 14), (3, 15), (3, 16), (3, 17), (3, 18), (3, 19), (3, 20), // 0x40
    (3, 21), (3, 22), (3, 23), (3, 24), (3, 25), (3, 26), (3, 27), (3, 28), // 0x48
    (3, 29), (3, 30), (3, 31), (3, 32), (3, 33), (3, 34), (3, 35), (3, 36), // 0x50
    (3, 37), (3, 38), (3, 39), (1, 22), (1, 23), (1, 24), (1, 25), (1, 26), // 0x58
    (2, 0), (2, 1), (2, 2), (2, 3), (2, 4), (2, 5), (2, 6), (2, 7), // 0x60
    (2, 8), (2, 9), (2, 10), (2, 11), (2, 12), (2, 13), (2, 14), (2, 15), // 0x68
    (2, 16), (2, 17), (2, 18), (2, 19), (2, 20), (2, 21), (2, 22), (2, 23), // 0x70
    (2, 24), (2, 25), (2, 26), (2, 27), (2, 28), (2, 29), (2, 30), (2, 31), // 0x78
];

/// Space, digits and upper case letters encode as a single C40 value.
pub(super) fn is_native(ch: u8) -> bool {
    ch < 128 && C40_VALUES[ch as usize].0 == BASIC
}

/// Append the C40 values for `ch` to `buf`, returning how many were added.
pub(super) fn encode_char(table: &[(u8, u8); 128], ch: u8, buf: &mut Vec<u8>) -> usize {
    if ch >= 128 {
        buf.push(SHIFT2);
        buf.push(UPPER_SHIFT);
        return 2 + encode_char(table, ch - 128, buf);
    }
    let (set, value) = table[ch as usize];
    if set == BASIC {
        buf.push(value);
        1
    } else {
        buf.push(set);
        buf.push(value);
        2
    }
}

/// Pack three values into two codewords.
pub(super) fn write_three_values(ctx: &mut EncoderContext, c1: u8, c2: u8, c3: u8) {
    let v = 1600 * c1 as u16 + 40 * c2 as u16 + c3 as u16 + 1;
    ctx.push((v >> 8) as u8);
    ctx.push((v & 0xFF) as u8);
}

fn write_next_triplet(ctx: &mut EncoderContext, buf: &mut Vec<u8>) {
    write_three_values(ctx, buf[0], buf[1], buf[2]);
    buf.drain(..3);
}

/// Undo the last character: drop its values, rewind the cursor and
/// report the size of the character now under the cursor. The symbol
/// size cache is reset because the requirement may have shrunk.
fn backtrack_one_character(
    ctx: &mut EncoderContext,
    table: &[(u8, u8); 128],
    buf: &mut Vec<u8>,
    last_char_size: usize,
) -> usize {
    buf.truncate(buf.len() - last_char_size);
    ctx.rewind(1);
    let mut removed = Vec::new();
    let size = encode_char(table, ctx.current_char(), &mut removed);
    ctx.reset_symbol_info();
    size
}

pub(super) fn encode(ctx: &mut EncoderContext) -> Result<(), DataEncodingError> {
    encode_with(ctx, &C40_VALUES, EncodationType::C40)
}

/// The shared C40/TEXT loop; the two modes differ only in `table`.
///
/// Values accumulate in `buf` and are only written out as triplets at
/// the end of the stretch, because the final triplet may need to be
/// rearranged to end the symbol on a codeword boundary.
pub(super) fn encode_with(
    ctx: &mut EncoderContext,
    table: &'static [(u8, u8); 128],
    mode: EncodationType,
) -> Result<(), DataEncodingError> {
    let mut buf = Vec::new();
    while ctx.has_more_characters() {
        let ch = ctx.current_char();
        ctx.advance(1);
        let mut last_char_size = encode_char(table, ch, &mut buf);

        let unwritten = (buf.len() / 3) * 2;
        let used = ctx.codeword_count() + unwritten;
        let capacity = ctx.update_symbol_info(used)?.num_data_codewords();
        let available = capacity - used;

        if !ctx.has_more_characters() {
            // A triplet must not end with a lone value unless the symbol
            // leaves exactly the right room; push characters back into
            // the input until the split works out.
            if buf.len() % 3 == 2 && available != 2 {
                last_char_size = backtrack_one_character(ctx, table, &mut buf, last_char_size);
            }
            while buf.len() % 3 == 1 && (last_char_size > 3 || available != 1) {
                last_char_size = backtrack_one_character(ctx, table, &mut buf, last_char_size);
            }
            break;
        }

        if buf.len() % 3 == 0 {
            let new_mode = look_ahead::look_ahead(ctx.message(), ctx.pos(), mode);
            if new_mode != mode {
                ctx.signal_mode_change(new_mode);
                break;
            }
        }
    }
    handle_end_of_data(ctx, &mut buf)
}

fn handle_end_of_data(
    ctx: &mut EncoderContext,
    buf: &mut Vec<u8>,
) -> Result<(), DataEncodingError> {
    let unwritten = (buf.len() / 3) * 2;
    let rest = buf.len() % 3;
    let used = ctx.codeword_count() + unwritten;
    let capacity = ctx.update_symbol_info(used)?.num_data_codewords();
    let available = capacity - used;

    if rest == 2 {
        // pad the open triplet with a shift
        buf.push(SHIFT1);
        while buf.len() >= 3 {
            write_next_triplet(ctx, buf);
        }
        if ctx.has_more_characters() {
            ctx.push(UNLATCH);
        }
    } else if available == 1 && rest == 1 {
        while buf.len() >= 3 {
            write_next_triplet(ctx, buf);
        }
        if ctx.has_more_characters() {
            ctx.push(UNLATCH);
        }
        // the lone value is dropped; its character goes out as ASCII
        ctx.rewind(1);
    } else if rest == 0 {
        while buf.len() >= 3 {
            write_next_triplet(ctx, buf);
        }
        if available > 0 || ctx.has_more_characters() {
            ctx.push(UNLATCH);
        }
    } else {
        panic!("{rest} values left after backtracking, this is a bug");
    }
    ctx.signal_mode_change(EncodationType::Ascii);
    Ok(())
}

#[cfg(test)]
pub(super) fn values_for(table: &[(u8, u8); 128], data: &[u8]) -> Vec<u8> {
    let mut values = Vec::new();
    for ch in data.iter().copied() {
        encode_char(table, ch, &mut values);
    }
    values
}

#[test]
fn test_basic_set() {
    let values = values_for(&C40_VALUES, b" 0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    let expected: Vec<u8> = (3..=39).collect();
    assert_eq!(values, expected);
}

#[test]
fn test_shift1_set() {
    let input: Vec<u8> = (0..=31).collect();
    let values = values_for(&C40_VALUES, &input);
    let expected: Vec<u8> = input.iter().flat_map(|v| [0, *v]).collect();
    assert_eq!(values, expected);
}

#[test]
fn test_shift2_set() {
    let values = values_for(&C40_VALUES, b"!\"#$%&'()*+,-./:;<=>?@[\\]^_");
    let expected: Vec<u8> = (0..=26).flat_map(|v| [1, v]).collect();
    assert_eq!(values, expected);
}

#[test]
fn test_shift3_set() {
    let values = values_for(&C40_VALUES, b"`abcdefghijklmnopqrstuvwxyz{|}~\x7f");
    let expected: Vec<u8> = (0..=31).flat_map(|v| [2, v]).collect();
    assert_eq!(values, expected);
}

#[test]
fn test_upper_shift() {
    let values = values_for(&C40_VALUES, b"\x80\xFF\xA0");
    assert_eq!(
        values,
        [
            [1, 30, 0, 0].as_slice(),     // NUL after upper shift
            [1, 30, 2, 31].as_slice(),    // DEL after upper shift
            [1, 30, 3].as_slice(),        // space after upper shift
        ]
        .concat()
    );
}
