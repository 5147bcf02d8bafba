use super::{look_ahead, DataEncodingError, EncodationType, EncoderContext};

pub(super) const LATCH_C40: u8 = 230;
pub(super) const LATCH_BASE256: u8 = 231;
pub(super) const LATCH_X12: u8 = 238;
pub(super) const LATCH_TEXT: u8 = 239;
pub(super) const LATCH_EDIFACT: u8 = 240;
pub(super) const PAD: u8 = 129;

const UPPER_SHIFT: u8 = 235;

/// Encode one digit pair or one character, or emit a latch.
///
/// ASCII is the default mode and the hub for all mode switches: the
/// look-ahead test runs before every single character, and a switch
/// emits the latch codeword without consuming anything.
pub(super) fn encode(ctx: &mut EncoderContext) -> Result<(), DataEncodingError> {
    if consecutive_digits(ctx.message(), ctx.pos()) >= 2 {
        let a = ctx.current_char() - b'0';
        ctx.advance(1);
        let b = ctx.current_char() - b'0';
        ctx.advance(1);
        ctx.push(a * 10 + b + 130);
        return Ok(());
    }

    let new_mode = look_ahead::look_ahead(ctx.message(), ctx.pos(), EncodationType::Ascii);
    if new_mode != EncodationType::Ascii {
        ctx.push(new_mode.latch_from_ascii());
        ctx.signal_mode_change(new_mode);
        return Ok(());
    }

    let ch = ctx.current_char();
    if ch >= 128 {
        ctx.push(UPPER_SHIFT);
        ctx.push(ch - 128 + 1);
    } else {
        ctx.push(ch + 1);
    }
    ctx.advance(1);
    Ok(())
}

fn consecutive_digits(msg: &[u8], from: usize) -> usize {
    msg[from..]
        .iter()
        .take_while(|ch| ch.is_ascii_digit())
        .count()
}

#[test]
fn test_consecutive_digits() {
    assert_eq!(consecutive_digits(b"12a34", 0), 2);
    assert_eq!(consecutive_digits(b"12a34", 2), 0);
    assert_eq!(consecutive_digits(b"12a34", 3), 2);
    assert_eq!(consecutive_digits(b"", 0), 0);
}
