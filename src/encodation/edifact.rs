use arrayvec::ArrayVec;

use super::{look_ahead, DataEncodingError, EncodationType, EncoderContext};

/// Value 31 ends an EDIFACT stretch from within a group.
pub(super) const UNLATCH_VALUE: u8 = 0b01_1111;

/// EDIFACT covers ASCII 0x20 through 0x5E.
pub(super) fn is_native(ch: u8) -> bool {
    matches!(ch, 0x20..=0x5E)
}

fn encode_char(ch: u8, buf: &mut ArrayVec<u8, 4>) -> Result<(), DataEncodingError> {
    match ch {
        0x20..=0x3F => buf.push(ch),
        0x40..=0x5E => buf.push(ch - 64),
        _ => return Err(DataEncodingError::IllegalCharacter(ch)),
    }
    Ok(())
}

/// Pack one to four 6-bit values into one to three codewords, filling
/// from the high bits down.
fn write_values(ctx: &mut EncoderContext, values: &[u8]) {
    debug_assert!(!values.is_empty() && values.len() <= 4);
    let value = |i: usize| values.get(i).copied().unwrap_or(0) as u32;
    let v = (value(0) << 18) | (value(1) << 12) | (value(2) << 6) | value(3);
    ctx.push((v >> 16) as u8);
    if values.len() >= 2 {
        ctx.push((v >> 8) as u8);
    }
    if values.len() >= 3 {
        ctx.push(v as u8);
    }
}

pub(super) fn encode(ctx: &mut EncoderContext) -> Result<(), DataEncodingError> {
    let mut buf = ArrayVec::<u8, 4>::new();
    while ctx.has_more_characters() {
        encode_char(ctx.current_char(), &mut buf)?;
        ctx.advance(1);

        if buf.len() == 4 {
            write_values(ctx, &buf);
            buf.clear();

            let new_mode =
                look_ahead::look_ahead(ctx.message(), ctx.pos(), EncodationType::Edifact);
            if new_mode != EncodationType::Edifact {
                // ASCII emits the latch into whatever comes next
                ctx.signal_mode_change(EncodationType::Ascii);
                break;
            }
        }
    }
    buf.push(UNLATCH_VALUE);
    handle_end_of_data(ctx, buf)
}

fn handle_end_of_data(
    ctx: &mut EncoderContext,
    buf: ArrayVec<u8, 4>,
) -> Result<(), DataEncodingError> {
    let count = buf.len();

    if count == 1 {
        // Nothing left but the unlatch value. If the data also ends
        // within the last two codewords of the symbol, the stretch ends
        // implicitly and the unlatch is dropped altogether.
        let capacity = ctx
            .update_symbol_info(ctx.codeword_count())?
            .num_data_codewords();
        let available = capacity - ctx.codeword_count();
        if ctx.remaining_characters() == 0 && available <= 2 {
            ctx.signal_mode_change(EncodationType::Ascii);
            return Ok(());
        }
    }

    let rest_chars = count - 1;
    let mut rest_in_ascii = !ctx.has_more_characters() && rest_chars <= 2;
    if rest_chars <= 2 {
        let capacity = ctx
            .update_symbol_info(ctx.codeword_count() + rest_chars)?
            .num_data_codewords();
        let available = capacity - ctx.codeword_count();
        if available >= 3 {
            rest_in_ascii = false;
            let encoded_len = count.min(3);
            ctx.update_symbol_info(ctx.codeword_count() + encoded_len)?;
        }
    }

    if rest_in_ascii {
        // a tail of up to two characters fits the remaining codewords
        // as plain ASCII, without the partial group
        ctx.reset_symbol_info();
        ctx.rewind(rest_chars);
    } else {
        write_values(ctx, &buf);
    }
    ctx.signal_mode_change(EncodationType::Ascii);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::super::EncoderContext;
    use super::*;
    use crate::symbol_size::SymbolList;
    use alloc::vec;

    fn written(values: &[u8]) -> alloc::vec::Vec<u8> {
        let symbols = SymbolList::default();
        let mut ctx = EncoderContext::new(b"", &symbols);
        write_values(&mut ctx, values);
        ctx.codewords
    }

    #[test]
    fn test_write_four_values() {
        assert_eq!(
            written(&[0b10_01_00, 0b11_01_10, 0b01_10_10, 1]),
            vec![0b10_01_00_11, 0b01_10_01_10, 0b10_00_00_01]
        );
    }

    #[test]
    fn test_write_three_values() {
        assert_eq!(
            written(&[0b10_01_00, 0b11_01_10, 0b01_10_10]),
            vec![0b10_01_00_11, 0b01_10_01_10, 0b10_00_00_00]
        );
    }

    #[test]
    fn test_write_two_values() {
        assert_eq!(
            written(&[0b10_01_00, 0b11_01_10]),
            vec![0b10_01_00_11, 0b01_10_00_00]
        );
    }

    #[test]
    fn test_write_one_value() {
        assert_eq!(written(&[0b10_01_00]), vec![0b10_01_00_00]);
    }

    #[test]
    fn test_char_range() {
        let mut buf = ArrayVec::new();
        encode_char(b' ', &mut buf).unwrap();
        encode_char(b'?', &mut buf).unwrap();
        encode_char(b'@', &mut buf).unwrap();
        encode_char(b'^', &mut buf).unwrap();
        assert_eq!(buf.as_slice(), &[32, 63, 0, 30]);
        let mut buf = ArrayVec::new();
        assert_eq!(
            encode_char(b'_', &mut buf),
            Err(DataEncodingError::IllegalCharacter(b'_'))
        );
        assert_eq!(
            encode_char(0x1F, &mut buf),
            Err(DataEncodingError::IllegalCharacter(0x1F))
        );
    }
}
