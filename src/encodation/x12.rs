use arrayvec::ArrayVec;

use super::{c40, look_ahead, DataEncodingError, EncodationType, EncoderContext, UNLATCH};

/// The X12 alphabet: the three EDI separators plus space, digits and
/// upper case letters.
pub(super) fn is_native(ch: u8) -> bool {
    is_separator(ch) || matches!(ch, b' ' | b'0'..=b'9' | b'A'..=b'Z')
}

/// Segment terminator and separators of an ANSI X12 message.
pub(super) fn is_separator(ch: u8) -> bool {
    matches!(ch, b'\r' | b'*' | b'>')
}

fn encode_char(ch: u8) -> Result<u8, DataEncodingError> {
    match ch {
        b'\r' => Ok(0),
        b'*' => Ok(1),
        b'>' => Ok(2),
        b' ' => Ok(3),
        b'0'..=b'9' => Ok(ch - b'0' + 4),
        b'A'..=b'Z' => Ok(ch - b'A' + 14),
        _ => Err(DataEncodingError::IllegalCharacter(ch)),
    }
}

/// X12 shares the triplet packing of C40, but every character is exactly
/// one value, so triplets are written as soon as they complete.
pub(super) fn encode(ctx: &mut EncoderContext) -> Result<(), DataEncodingError> {
    let mut buf = ArrayVec::<u8, 3>::new();
    while ctx.has_more_characters() {
        let ch = ctx.current_char();
        ctx.advance(1);
        buf.push(encode_char(ch)?);

        if buf.len() == 3 {
            c40::write_three_values(ctx, buf[0], buf[1], buf[2]);
            buf.clear();

            let new_mode = look_ahead::look_ahead(ctx.message(), ctx.pos(), EncodationType::X12);
            if new_mode != EncodationType::X12 {
                ctx.signal_mode_change(new_mode);
                break;
            }
        }
    }
    handle_end_of_data(ctx, buf.len())
}

fn handle_end_of_data(ctx: &mut EncoderContext, leftover: usize) -> Result<(), DataEncodingError> {
    let capacity = ctx
        .update_symbol_info(ctx.codeword_count())?
        .num_data_codewords();
    let available = capacity - ctx.codeword_count();
    // values of an incomplete triplet go back into the input
    ctx.rewind(leftover);
    let remaining = ctx.remaining_characters();
    if remaining > 1 || available > 1 || remaining != available {
        ctx.push(UNLATCH);
    }
    if ctx.new_mode().is_none() {
        ctx.signal_mode_change(EncodationType::Ascii);
    }
    Ok(())
}

#[test]
fn test_alphabet_values() {
    assert_eq!(encode_char(b'\r'), Ok(0));
    assert_eq!(encode_char(b'*'), Ok(1));
    assert_eq!(encode_char(b'>'), Ok(2));
    assert_eq!(encode_char(b' '), Ok(3));
    assert_eq!(encode_char(b'0'), Ok(4));
    assert_eq!(encode_char(b'9'), Ok(13));
    assert_eq!(encode_char(b'A'), Ok(14));
    assert_eq!(encode_char(b'Z'), Ok(39));
}

#[test]
fn test_rejects_foreign_characters() {
    assert_eq!(
        encode_char(b'a'),
        Err(DataEncodingError::IllegalCharacter(b'a'))
    );
    assert_eq!(
        encode_char(0x81),
        Err(DataEncodingError::IllegalCharacter(0x81))
    );
}
