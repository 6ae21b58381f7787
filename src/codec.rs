//! Encoding, strict decoding and correcting decoding of Bech32X strings
//!
//! A Bech32X string is `<hrp>` + `'1'` + data characters + 27 checksum
//! characters, at most 1023 characters, all one case.
//!
//! - [`encode_symbols`] / [`encode`]: append a checksum and self-verify
//! - [`decode_symbols`] / [`decode`]: structural checks, then the checksum must verify
//! - [`correct`]: structural checks, then repair up to 7 corrupted characters

use crate::checksum::{self, CHECKSUM_LENGTH};
use crate::config::{CorrectionConfig, Parallelism};
use crate::convert;
use crate::decoder;
use crate::domain::{is_printable, Hrp, HrpFilter};
use crate::error::{Error, Result};
use bech32::Fe32;
use log::debug;
use rayon::prelude::*;

/// Separator between the prefix and the data
pub const SEPARATOR: char = '1';

/// Longest valid encoded string
pub const MAX_LENGTH: usize = 1023;

/// A string split into prefix and codeword, not yet checksum-verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncheckedHrpstring {
    hrp: Hrp,
    /// Data symbols followed by the checksum
    codeword: Vec<Fe32>,
}

impl UncheckedHrpstring {
    /// Run every structural check on `s`
    ///
    /// Characters must be in 33..=126 and of one case, the last `'1'` must
    /// follow a non-empty prefix and precede at least 27 alphabet characters,
    /// and the whole string must fit in 1023 characters.
    pub fn parse(s: &str) -> Result<Self> {
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

        // All characters are ASCII from here, so byte and char indices agree
        let s = s.to_ascii_lowercase();
        let pos = s.rfind(SEPARATOR).ok_or(Error::MissingSeparator)?;
        if pos == 0 {
            return Err(Error::EmptyHrp);
        }
        if s.len() > MAX_LENGTH {
            return Err(Error::TooLong(s.len()));
        }
        let data_len = s.len() - pos - 1;
        if data_len < CHECKSUM_LENGTH {
            return Err(Error::ChecksumTooShort(data_len));
        }

        let codeword = s[pos + 1..]
            .chars()
            .map(|c| Fe32::from_char(c).map_err(|_| Error::InvalidDataCharacter(c)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            hrp: Hrp::parse(&s[..pos])?,
            codeword,
        })
    }

    pub fn hrp(&self) -> &Hrp {
        &self.hrp
    }

    pub fn codeword(&self) -> &[Fe32] {
        &self.codeword
    }

    pub fn has_valid_checksum(&self) -> bool {
        checksum::verify_checksum(&self.hrp, &self.codeword)
    }

    /// Data symbols with the checksum removed
    pub fn data(&self) -> &[Fe32] {
        &self.codeword[..self.codeword.len() - CHECKSUM_LENGTH]
    }
}

/// Result of a strict decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub hrp: Hrp,
    /// Data symbols without the checksum
    pub data: Vec<Fe32>,
}

impl Decoded {
    /// Regroup the data symbols into bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        convert::symbols_to_bytes(&self.data)
    }
}

/// Result of a correcting decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corrected {
    pub hrp: Hrp,
    /// Corrected data symbols without the checksum
    pub data: Vec<Fe32>,
    /// Full corrected string, lowercase
    pub encoded: String,
    /// Character indices into `encoded` that were repaired, ascending
    pub positions: Vec<usize>,
}

impl Corrected {
    /// True if the input needed no correction
    pub fn is_valid(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        convert::symbols_to_bytes(&self.data)
    }

    /// The corrected string with `?` at every repaired position
    pub fn masked(&self) -> String {
        self.encoded
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if self.positions.binary_search(&i).is_ok() {
                    '?'
                } else {
                    c
                }
            })
            .collect()
    }
}

fn render(hrp: &Hrp, codeword: &[Fe32]) -> String {
    let mut ret = String::with_capacity(hrp.len() + 1 + codeword.len());
    ret.push_str(hrp.as_str());
    ret.push(SEPARATOR);
    ret.extend(codeword.iter().map(|fe| fe.to_char()));
    ret
}

/// Encode data symbols under `hrp`
///
/// The result is decoded again before returning; a mismatch is reported as
/// [`Error::EncoderSelfCheck`] and indicates a bug, not bad input.
pub fn encode_symbols(hrp: &Hrp, data: &[Fe32]) -> Result<String> {
    let length = hrp.len() + 1 + data.len() + CHECKSUM_LENGTH;
    if length > MAX_LENGTH {
        return Err(Error::TooLong(length));
    }

    let mut codeword = Vec::with_capacity(data.len() + CHECKSUM_LENGTH);
    codeword.extend_from_slice(data);
    codeword.extend_from_slice(&checksum::create_checksum(hrp, data));
    let encoded = render(hrp, &codeword);

    match decode_symbols(&HrpFilter::Exact(hrp.clone()), &encoded) {
        Ok(decoded) if decoded.data == data => Ok(encoded),
        _ => Err(Error::EncoderSelfCheck(encoded)),
    }
}

/// Strictly decode `s`: any checksum error is rejected, nothing is corrected
pub fn decode_symbols(expected: &HrpFilter, s: &str) -> Result<Decoded> {
    let unchecked = UncheckedHrpstring::parse(s)?;
    expected.check(unchecked.hrp())?;

    if !unchecked.has_valid_checksum() {
        return Err(Error::InvalidChecksum);
    }

    Ok(Decoded {
        data: unchecked.data().to_vec(),
        hrp: unchecked.hrp,
    })
}

/// Decode `s`, repairing up to 7 corrupted characters
pub fn correct(expected: &HrpFilter, s: &str) -> Result<Corrected> {
    let unchecked = UncheckedHrpstring::parse(s)?;
    expected.check(unchecked.hrp())?;

    let correction = decoder::decode_and_correct(unchecked.hrp(), unchecked.codeword())?;
    let offset = unchecked.hrp().len() + 1;
    let data_len = correction.codeword.len() - CHECKSUM_LENGTH;

    let corrected = Corrected {
        encoded: render(unchecked.hrp(), &correction.codeword),
        positions: correction.positions.iter().map(|p| p + offset).collect(),
        data: correction.codeword[..data_len].to_vec(),
        hrp: unchecked.hrp,
    };
    if !corrected.is_valid() {
        debug!("{} -> {}", corrected.masked(), corrected.encoded);
    }
    Ok(corrected)
}

/// Encode bytes: regroup 8→5 bits, then [`encode_symbols`]
pub fn encode(hrp: &str, bytes: &[u8]) -> Result<String> {
    let hrp = Hrp::parse(hrp)?;
    encode_symbols(&hrp, &convert::bytes_to_symbols(bytes))
}

/// Strictly decode to bytes; `hrp` may be `*`
pub fn decode(hrp: &str, s: &str) -> Result<Vec<u8>> {
    decode_symbols(&HrpFilter::parse(hrp)?, s)?.to_bytes()
}

/// Correct many strings independently, preserving input order
pub fn correct_batch<S>(
    expected: &HrpFilter,
    inputs: &[S],
    config: &CorrectionConfig,
) -> Vec<Result<Corrected>>
where
    S: AsRef<str> + Sync,
{
    let correct_one = |s: &S| correct(expected, s.as_ref());
    let run_parallel = || -> Vec<Result<Corrected>> { inputs.par_iter().map(correct_one).collect() };

    match config.parallelism {
        _ if inputs.len() < 2 => inputs.iter().map(correct_one).collect(),
        Parallelism::Sequential => inputs.iter().map(correct_one).collect(),
        Parallelism::Global => run_parallel(),
        Parallelism::Threads(n) => {
            match rayon::ThreadPoolBuilder::new().num_threads(n.get()).build() {
                Ok(pool) => pool.install(run_parallel),
                Err(e) => {
                    debug!("could not build a {}-thread pool ({}), using global pool", n, e);
                    run_parallel()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TX: &str = "tx1lll0ml8mltul3acn567dm2c4u9p0ddvhwen8z6pgj6";
    const TX_BYTES: [u8; 9] = [255, 254, 253, 252, 251, 250, 249, 248, 247];

    #[test]
    fn test_encode_concrete() {
        assert_eq!(encode("tx", &TX_BYTES).unwrap(), TX);
    }

    #[test]
    fn test_decode_concrete() {
        assert_eq!(decode("tx", TX).unwrap(), TX_BYTES.to_vec());
        assert_eq!(decode("*", TX).unwrap(), TX_BYTES.to_vec());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            UncheckedHrpstring::parse("tx1LLL0ml8mltul3acn567dm2c4u9p0ddvhwen8z6pgj6"),
            Err(Error::MixedCase)
        );
        assert_eq!(
            UncheckedHrpstring::parse("1lll0ml8mltul3acn567dm2c4u9p0ddvhwen8z6pgj6"),
            Err(Error::EmptyHrp)
        );
        assert_eq!(
            UncheckedHrpstring::parse("txlll0ml8mltu"),
            Err(Error::MissingSeparator)
        );
        assert_eq!(
            UncheckedHrpstring::parse("tx1qqqqq"),
            Err(Error::ChecksumTooShort(5))
        );
        assert_eq!(
            UncheckedHrpstring::parse("tx1lll0ml8mltul3acn567dm2c4u9p0ddvhwen8z6pgjb"),
            Err(Error::InvalidDataCharacter('b'))
        );
    }

    #[test]
    fn test_masked() {
        let corrected = correct(
            &HrpFilter::Any,
            "tx1lll0ml8sltul3acn567dm2c4u9p0ddvhwen8z6pgj6",
        )
        .unwrap();
        assert_eq!(corrected.positions, vec![10]);
        assert_eq!(
            corrected.masked(),
            "tx1lll0ml8?ltul3acn567dm2c4u9p0ddvhwen8z6pgj6"
        );
    }
}
