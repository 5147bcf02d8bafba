use super::{ascii, base256, c40, edifact, text, x12, DataEncodingError, EncoderContext};

/// The six encodation modes a Data Matrix symbol can switch between.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum EncodationType {
    Ascii,
    C40,
    Text,
    X12,
    Edifact,
    Base256,
}

impl EncodationType {
    /// Fixed index between 0 and 5, also used by the look-ahead cost
    /// bookkeeping.
    pub(super) fn index(self) -> usize {
        match self {
            Self::Ascii => 0,
            Self::C40 => 1,
            Self::Text => 2,
            Self::X12 => 3,
            Self::Edifact => 4,
            Self::Base256 => 5,
        }
    }

    /// The codeword that switches a decoder from ASCII into this mode.
    pub(super) fn latch_from_ascii(self) -> u8 {
        match self {
            Self::Ascii => panic!("no latch from ascii to ascii, this is a bug"),
            Self::C40 => ascii::LATCH_C40,
            Self::Text => ascii::LATCH_TEXT,
            Self::X12 => ascii::LATCH_X12,
            Self::Edifact => ascii::LATCH_EDIFACT,
            Self::Base256 => ascii::LATCH_BASE256,
        }
    }

    /// Run the mode encoder for one stretch of input.
    pub(super) fn encode(self, ctx: &mut EncoderContext) -> Result<(), DataEncodingError> {
        match self {
            Self::Ascii => ascii::encode(ctx),
            Self::C40 => c40::encode(ctx),
            Self::Text => text::encode(ctx),
            Self::X12 => x12::encode(ctx),
            Self::Edifact => edifact::encode(ctx),
            Self::Base256 => base256::encode(ctx),
        }
    }
}
