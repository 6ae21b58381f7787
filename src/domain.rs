//! Core domain types for Bech32X strings
//!
//! - **Hrp**: a validated, lowercase human-readable prefix
//! - **HrpFilter**: what prefix a decoder accepts (`*` for any)
//!
//! Data symbols are [`bech32::Fe32`] values; positions are plain `usize`
//! character indices.

use crate::error::{Error, Result};
use std::fmt;

/// Longest prefix that still leaves room for the separator and checksum
pub const MAX_HRP_LENGTH: usize = crate::MAX_LENGTH - 1 - crate::CHECKSUM_LENGTH;

/// Validated human-readable prefix
///
/// Non-empty, printable ASCII (33..=126), not mixed case. Stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hrp(String);

impl Hrp {
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::EmptyHrp);
        }
        if s.len() > MAX_HRP_LENGTH {
            return Err(Error::TooLong(s.len() + 1 + crate::CHECKSUM_LENGTH));
        }

        let mut has_lower = false;
        let mut has_upper = false;
        for c in s.chars() {
            if !is_printable(c) {
                return Err(Error::InvalidCharacterRange(c));
            }
            has_lower |= c.is_ascii_lowercase();
            has_upper |= c.is_ascii_uppercase();
        }
        if has_lower && has_upper {
            return Err(Error::MixedCase);
        }

        Ok(Hrp(s.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// ASCII bytes of the prefix
    pub fn bytes(&self) -> std::str::Bytes<'_> {
        self.0.bytes()
    }
}

impl fmt::Display for Hrp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Hrp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Hrp::parse(s)
    }
}

/// Which prefixes a decoder accepts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HrpFilter {
    /// Any prefix (written `*`)
    #[default]
    Any,
    /// Exactly this prefix
    Exact(Hrp),
}

impl HrpFilter {
    pub fn parse(s: &str) -> Result<Self> {
        if s == "*" {
            Ok(HrpFilter::Any)
        } else {
            Hrp::parse(s).map(HrpFilter::Exact)
        }
    }

    pub fn check(&self, found: &Hrp) -> Result<()> {
        match self {
            HrpFilter::Exact(expected) if expected != found => Err(Error::HrpMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl From<Hrp> for HrpFilter {
    fn from(hrp: Hrp) -> Self {
        HrpFilter::Exact(hrp)
    }
}

#[inline]
pub(crate) fn is_printable(c: char) -> bool {
    matches!(c as u32, 33..=126)
}
