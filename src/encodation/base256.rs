use alloc::vec;

use super::{look_ahead, DataEncodingError, EncodationType, EncoderContext};

/// Whether a byte carries the reserved "special" look-ahead weight of 4
/// codewords in Base 256.
///
/// Annex P reserves this for function characters (FNC1, structured
/// append, reader programming); none of them is generated here, so the
/// test never fires. Populating it would shift mode selection around
/// such bytes.
pub(super) fn is_special(_ch: u8) -> bool {
    false
}

/// The 255-state randomisation applied to the length field and data of
/// a Base 256 stretch. `position` is the 1-based index in the codeword
/// stream.
fn randomize_255_state(ch: u8, position: usize) -> u8 {
    let pseudo_random = ((149 * position) % 255) + 1;
    let tmp = ch as usize + pseudo_random;
    if tmp <= 255 {
        tmp as u8
    } else {
        (tmp - 256) as u8
    }
}

/// Byte-literal mode: a length field, then the data, all whitened.
pub(super) fn encode(ctx: &mut EncoderContext) -> Result<(), DataEncodingError> {
    // index 0 is the length field, patched below
    let mut buf = vec![0u8];
    while ctx.has_more_characters() {
        buf.push(ctx.current_char());
        ctx.advance(1);

        let new_mode = look_ahead::look_ahead(ctx.message(), ctx.pos(), EncodationType::Base256);
        if new_mode != EncodationType::Base256 {
            ctx.signal_mode_change(new_mode);
            break;
        }
    }

    let data_count = buf.len() - 1;
    let used = ctx.codeword_count() + data_count + 1;
    let capacity = ctx.update_symbol_info(used)?.num_data_codewords();
    let must_pad = capacity > used;
    if ctx.has_more_characters() || must_pad {
        // A length field of 0 means "runs to the end of the symbol" and
        // is only valid when neither padding nor other data follows.
        match data_count {
            0..=249 => buf[0] = data_count as u8,
            250..=1555 => {
                buf[0] = (data_count / 250 + 249) as u8;
                buf.insert(1, (data_count % 250) as u8);
            }
            _ => return Err(DataEncodingError::NotEnoughSpace),
        }
    }

    for ch in buf {
        let position = ctx.codeword_count() + 1;
        ctx.push(randomize_255_state(ch, position));
    }
    Ok(())
}

#[test]
fn test_randomize_255_state() {
    // position 2 adds 44
    assert_eq!(randomize_255_state(0, 2), 44);
    assert_eq!(randomize_255_state(6, 2), 50);
    // wrap around
    assert_eq!(randomize_255_state(255, 2), 43);
    // position 3 adds 193
    assert_eq!(randomize_255_state(171, 3), 108);
}
