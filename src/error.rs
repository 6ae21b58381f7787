//! Error types for Bech32X encoding, decoding and correction

use thiserror::Error;

/// Errors that can occur while encoding, decoding or correcting a Bech32X string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Character outside the printable ASCII range 33..=126
    #[error("Invalid character {0:?}: outside ASCII range 33..=126")]
    InvalidCharacterRange(char),

    /// String mixes upper and lower case
    #[error("String mixes upper and lower case")]
    MixedCase,

    /// No separator found
    #[error("Missing separator '1'")]
    MissingSeparator,

    /// Separator at position 0
    #[error("Human-readable prefix is empty")]
    EmptyHrp,

    /// Encoded string is longer than allowed
    #[error("String is {0} characters long, maximum is 1023")]
    TooLong(usize),

    /// Fewer than 27 characters after the separator
    #[error("Checksum too short: {0} characters after separator, need at least 27")]
    ChecksumTooShort(usize),

    /// Character after the separator that is not in the alphabet
    #[error("Invalid data character {0:?}")]
    InvalidDataCharacter(char),

    /// Prefix differs from the expected one
    #[error("Human-readable prefix mismatch: expected {expected:?}, found {found:?}")]
    HrpMismatch { expected: String, found: String },

    /// Well-formed string whose checksum does not verify
    #[error("Invalid checksum")]
    InvalidChecksum,

    /// Well-formed string with errors beyond the correction capability
    #[error("Uncorrectable: errors exceed the correction capability")]
    Uncorrectable,

    /// Freshly encoded string failed to decode
    #[error("Encoder self-check failed for {0:?}")]
    EncoderSelfCheck(String),

    /// Value does not fit the source bit width
    #[error("Value {value} does not fit in {bits} bits")]
    ValueOutOfRange { value: u32, bits: u32 },

    /// Leftover bits after regrouping without padding
    #[error("Invalid padding: leftover bits are too many or nonzero")]
    InvalidPadding,

    /// Symbol value not in 0..32
    #[error("Invalid symbol value {0}")]
    InvalidSymbol(u8),
}

impl Error {
    /// True for structural violations detected before any checksum computation
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::InvalidCharacterRange(_)
                | Error::MixedCase
                | Error::MissingSeparator
                | Error::EmptyHrp
                | Error::TooLong(_)
                | Error::ChecksumTooShort(_)
                | Error::InvalidDataCharacter(_)
                | Error::HrpMismatch { .. }
        )
    }
}

/// Type alias for Result with Error
pub type Result<T> = std::result::Result<T, Error>;
