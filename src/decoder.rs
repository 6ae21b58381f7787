//! Syndrome decoding for the Bech32X checksum
//!
//! The 27-digit checksum residue of a received codeword is folded into 14
//! syndromes over GF(1024). For each hypothesised error count `t`, from 7 down
//! to 1, the decoder:
//!
//! 1. Solves the `t × (t+1)` Hankel system for the error-locator polynomial
//! 2. Searches every codeword position for locator roots
//! 3. Computes each magnitude with Forney's formula
//!
//! A singular system moves on to the next smaller `t`. A root count that does
//! not match `t` is final: the decoder stops and reports the codeword
//! uncorrectable rather than trying fewer errors.

use crate::checksum::{self, Residue, CHECKSUM_LENGTH, TARGET_RESIDUE};
use crate::domain::Hrp;
use crate::error::{Error, Result};
use crate::field::{poly_eval, poly_mul, Fe1024, Polynomial};
use crate::matrix::AugmentedMatrix;
use bech32::Fe32;
use log::{debug, trace};
use smallvec::SmallVec;

/// Number of syndromes (twice the correction capability)
pub const SYNDROME_COUNT: usize = 14;

/// Most symbol errors the code can correct
pub const MAX_CORRECTABLE: usize = 7;

/// Syndrome `i` evaluates the residue at `69^(20 + i)`
const FIRST_ROOT_EXPONENT: i64 = 20;

/// Coefficients of the error evaluator kept after multiplication
const EVALUATOR_LENGTH: usize = SYNDROME_COUNT - 1;

/// Syndrome vector of a received codeword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syndromes([Fe1024; SYNDROME_COUNT]);

impl Syndromes {
    /// Fold the 27 residue digits into 14 syndromes
    ///
    /// `residue` is the register XORed with the target, so a valid codeword
    /// gives all zeros.
    pub fn from_residue(residue: &Residue) -> Self {
        let mut syndromes = [Fe1024::ZERO; SYNDROME_COUNT];
        for digit in residue.digits() {
            let digit = Fe1024::from(digit);
            for (i, s) in syndromes.iter_mut().enumerate() {
                *s = s.shift(FIRST_ROOT_EXPONENT + i as i64) + digit;
            }
        }
        Self(syndromes)
    }

    /// Syndromes of `codeword` under `hrp`
    pub fn compute(hrp: &Hrp, codeword: &[Fe32]) -> Self {
        Self::from_residue(&(checksum::residue(hrp, codeword) ^ TARGET_RESIDUE))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|s| s.is_zero())
    }

    pub fn as_slice(&self) -> &[Fe1024] {
        &self.0
    }
}

/// A located error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorLocation {
    /// Position counted from the end of the codeword (0 = last symbol)
    pub offset: usize,
    /// Value to XOR into the symbol
    pub magnitude: Fe1024,
}

/// Result of testing one error-count hypothesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hypothesis {
    /// The locator system has no unique solution
    Singular,
    /// Roots found by the position search, with their magnitudes
    Located(SmallVec<[ErrorLocation; MAX_CORRECTABLE]>),
}

/// Solve for exactly `errors` errors in a codeword of `codeword_len` symbols
pub fn locate_errors(
    syndromes: &Syndromes,
    codeword_len: usize,
    errors: usize,
) -> Result<Hypothesis> {
    debug_assert!(errors <= MAX_CORRECTABLE);
    let s = syndromes.as_slice();

    let mut matrix = AugmentedMatrix::from_syndromes(s, errors);
    if let Err(e) = matrix.solve() {
        trace!("t={}: {}", errors, e);
        return Ok(Hypothesis::Singular);
    }

    // Locator: leading 1, then the solution read bottom-up
    let mut locator = Polynomial::with_capacity(errors + 1);
    locator.push(Fe1024::ONE);
    locator.extend((0..errors).map(|i| matrix.solution(errors - 1 - i)));

    // Formal derivative: even-indexed terms of the shifted locator survive
    let derivative: Polynomial = (0..errors)
        .map(|i| {
            if i & 1 == 1 {
                Fe1024::ZERO
            } else {
                locator[i + 1]
            }
        })
        .collect();

    let mut evaluator = poly_mul(s, &locator);
    evaluator.truncate(EVALUATOR_LENGTH);

    let mut found = SmallVec::new();
    for p in 0..codeword_len {
        let x = -(p as i64);
        if !poly_eval(&locator, x).is_zero() {
            continue;
        }

        let Some(derivative_log) = poly_eval(&derivative, x).log() else {
            debug!("t={}: repeated locator root at offset {}", errors, p);
            return Err(Error::Uncorrectable);
        };
        let exponent = (FIRST_ROOT_EXPONENT - 1) * p as i64 + derivative_log as i64;
        let magnitude = poly_eval(&evaluator, x).shift(-exponent);
        found.push(ErrorLocation {
            offset: p,
            magnitude,
        });
    }

    Ok(Hypothesis::Located(found))
}

/// A codeword after correction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Corrected codeword (data followed by checksum)
    pub codeword: Vec<Fe32>,
    /// Indices into `codeword` that were changed, ascending
    pub positions: Vec<usize>,
}

impl Correction {
    pub fn is_valid(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Check `received` and repair up to 7 symbol errors
///
/// `received` is the full codeword including the checksum and must hold at
/// least 27 symbols.
pub fn decode_and_correct(hrp: &Hrp, received: &[Fe32]) -> Result<Correction> {
    debug_assert!(received.len() >= CHECKSUM_LENGTH);

    let syndromes = Syndromes::compute(hrp, received);
    trace!("syndromes: {:?}", syndromes.as_slice());

    if syndromes.is_zero() {
        return Ok(Correction {
            codeword: received.to_vec(),
            positions: Vec::new(),
        });
    }

    for errors in (1..=MAX_CORRECTABLE).rev() {
        let located = match locate_errors(&syndromes, received.len(), errors)? {
            Hypothesis::Singular => continue,
            Hypothesis::Located(located) => located,
        };

        if located.len() != errors {
            debug!(
                "t={}: found {} locator roots, giving up",
                errors,
                located.len()
            );
            return Err(Error::Uncorrectable);
        }

        return apply_corrections(hrp, received, &located);
    }

    debug!("no error count up to {} fits", MAX_CORRECTABLE);
    Err(Error::Uncorrectable)
}

fn apply_corrections(
    hrp: &Hrp,
    received: &[Fe32],
    located: &[ErrorLocation],
) -> Result<Correction> {
    let mut codeword = received.to_vec();
    let mut positions = Vec::with_capacity(located.len());

    for location in located {
        let index = codeword.len() - 1 - location.offset;
        let magnitude = location.magnitude.to_gf32().ok_or(Error::Uncorrectable)?;
        codeword[index] =
            Fe32::try_from(codeword[index].to_u8() ^ magnitude).map_err(|_| Error::Uncorrectable)?;
        positions.push(index);
    }

    if !checksum::verify_checksum(hrp, &codeword) {
        debug!("corrected codeword does not verify");
        return Err(Error::Uncorrectable);
    }

    positions.sort_unstable();
    debug!("corrected {} symbols at {:?}", positions.len(), positions);
    Ok(Correction {
        codeword,
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fes(s: &str) -> Vec<Fe32> {
        s.chars().map(|c| Fe32::from_char(c).unwrap()).collect()
    }

    const VALID: &str = "lll0ml8mltul3acn567dm2c4u9p0ddvhwen8z6pgj6";

    #[test]
    fn test_valid_codeword_has_zero_syndromes() {
        let hrp = Hrp::parse("tx").unwrap();
        assert!(Syndromes::compute(&hrp, &fes(VALID)).is_zero());
    }

    #[test]
    fn test_single_error_syndromes_nonzero() {
        let hrp = Hrp::parse("tx").unwrap();
        let mut codeword = fes(VALID);
        codeword[4] = Fe32::try_from(codeword[4].to_u8() ^ 1).unwrap();
        assert!(!Syndromes::compute(&hrp, &codeword).is_zero());
    }

    #[test]
    fn test_locate_single_error() {
        let hrp = Hrp::parse("tx").unwrap();
        let mut codeword = fes(VALID);
        let index = 7;
        codeword[index] = Fe32::try_from(codeword[index].to_u8() ^ 9).unwrap();

        let syndromes = Syndromes::compute(&hrp, &codeword);
        match locate_errors(&syndromes, codeword.len(), 1).unwrap() {
            Hypothesis::Located(found) => {
                assert_eq!(found.len(), 1);
                assert_eq!(found[0].offset, codeword.len() - 1 - index);
                assert_eq!(found[0].magnitude, Fe1024::new(9));
            }
            Hypothesis::Singular => panic!("single error should be locatable"),
        }
    }

    #[test]
    fn test_decode_and_correct_valid() {
        let hrp = Hrp::parse("tx").unwrap();
        let correction = decode_and_correct(&hrp, &fes(VALID)).unwrap();
        assert!(correction.is_valid());
        assert_eq!(correction.codeword, fes(VALID));
    }

    #[test]
    fn test_decode_and_correct_three_errors() {
        let hrp = Hrp::parse("tx").unwrap();
        let mut codeword = fes(VALID);
        for (index, flip) in [(0usize, 3u8), (20, 17), (41, 31)] {
            codeword[index] = Fe32::try_from(codeword[index].to_u8() ^ flip).unwrap();
        }
        let correction = decode_and_correct(&hrp, &codeword).unwrap();
        assert_eq!(correction.positions, vec![0, 20, 41]);
        assert_eq!(correction.codeword, fes(VALID));
    }

    /// Syndromes of one error of `magnitude` at `offset` from the end
    fn single_error_syndromes(offset: usize, magnitude: Fe1024) -> Syndromes {
        Syndromes(std::array::from_fn(|i| {
            magnitude.shift((FIRST_ROOT_EXPONENT + i as i64) * offset as i64)
        }))
    }

    #[test]
    fn test_every_hypothesis_singular_is_uncorrectable() {
        // Checksum XORed with a multiple of all but one of the 14 minimal
        // polynomials: no t from 7 down to 1 gives a solvable system
        let hrp = Hrp::parse("tx").unwrap();
        let codeword = fes("lll0ml8mltul3acju3kvh37gygvcgzj9g55t3hc9w2");
        let syndromes = Syndromes::from_residue(
            &(checksum::residue(&hrp, &codeword) ^ TARGET_RESIDUE),
        );
        assert!(!syndromes.is_zero());

        for errors in 1..=MAX_CORRECTABLE {
            assert_eq!(
                locate_errors(&syndromes, codeword.len(), errors),
                Ok(Hypothesis::Singular),
                "t={} should be singular",
                errors
            );
        }
        assert_eq!(
            decode_and_correct(&hrp, &codeword),
            Err(Error::Uncorrectable)
        );
    }

    #[test]
    fn test_repeated_locator_root_is_uncorrectable() {
        // Locator (1 + X·x)^2 with X = 69^5: the derivative vanishes at its root
        let mut values = [Fe1024::ZERO; SYNDROME_COUNT];
        values[0] = Fe1024::ONE;
        values[2] = Fe1024::exp(10);
        let syndromes = Syndromes(values);

        assert_eq!(
            locate_errors(&syndromes, VALID.len(), 2),
            Err(Error::Uncorrectable)
        );
    }

    #[test]
    fn test_magnitude_outside_gf32_is_uncorrectable() {
        let hrp = Hrp::parse("tx").unwrap();
        let syndromes = single_error_syndromes(3, Fe1024::new(32));

        let found = match locate_errors(&syndromes, VALID.len(), 1).unwrap() {
            Hypothesis::Located(found) => found,
            Hypothesis::Singular => panic!("single error should be locatable"),
        };
        assert_eq!(
            found.as_slice(),
            &[ErrorLocation {
                offset: 3,
                magnitude: Fe1024::new(32),
            }]
        );
        assert_eq!(found[0].magnitude.to_gf32(), None);

        assert_eq!(
            apply_corrections(&hrp, &fes(VALID), &found),
            Err(Error::Uncorrectable)
        );
    }

    #[test]
    fn test_gf32_magnitude_from_crafted_syndromes() {
        let syndromes = single_error_syndromes(7, Fe1024::new(9));
        assert_eq!(
            locate_errors(&syndromes, VALID.len(), 1),
            Ok(Hypothesis::Located(smallvec::smallvec![ErrorLocation {
                offset: 7,
                magnitude: Fe1024::new(9),
            }]))
        );
    }
}
