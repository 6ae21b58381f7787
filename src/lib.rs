//! Bech32X: checksummed base32 strings that correct their own errors
//!
//! A Bech32X string looks like a bech32 address (`<hrp>1<data><checksum>`) but
//! carries a 27-character BCH checksum. Besides detecting damage, the checksum
//! lets the decoder locate and repair up to 7 corrupted characters.
//!
//! ```
//! use bech32x::{correct, encode, HrpFilter};
//!
//! let s = encode("tx", &[255, 254, 253, 252, 251, 250, 249, 248, 247]).unwrap();
//! assert!(s.starts_with("tx1"));
//!
//! // Damage one character and repair it
//! let mut damaged: Vec<char> = s.chars().collect();
//! damaged[5] = if damaged[5] == 'q' { 'p' } else { 'q' };
//! let damaged: String = damaged.into_iter().collect();
//!
//! let fixed = correct(&HrpFilter::Any, &damaged).unwrap();
//! assert_eq!(fixed.encoded, s);
//! assert_eq!(fixed.positions, vec![5]);
//! ```

pub mod checksum;
pub mod codec;
pub mod config;
pub mod convert;
pub mod decoder;
pub mod domain;
pub mod error;
pub mod field;
pub mod matrix;
pub mod reporters;

pub use checksum::CHECKSUM_LENGTH;
pub use codec::{
    correct, correct_batch, decode, decode_symbols, encode, encode_symbols, Corrected, Decoded,
    UncheckedHrpstring, MAX_LENGTH, SEPARATOR,
};
pub use config::{CorrectionConfig, Parallelism};
pub use decoder::MAX_CORRECTABLE;
pub use domain::{Hrp, HrpFilter};
pub use error::{Error, Result};

pub use bech32::Fe32;
