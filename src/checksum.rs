//! The Bech32X checksum: a 27-symbol binary BCH code
//!
//! The checksum is the remainder of the HRP-expanded message divided by a
//! degree-27 generator over GF(32), computed 5 bits at a time in a 135-bit
//! shift register. A codeword is valid when the register ends at 1.
//!
//! ## Design
//!
//! - **Fixed width**: the register is a [`Residue`] of a `u128` plus a `u8` for the
//!   top 7 bits, so no arbitrary-precision arithmetic is involved
//! - **Incremental**: [`ChecksumEngine`] takes the prefix and symbols as they come

use crate::convert::fe32_from_low_bits;
use crate::domain::Hrp;
use bech32::Fe32;
use std::ops::{BitXor, BitXorAssign};

/// Number of checksum symbols appended to the data
pub const CHECKSUM_LENGTH: usize = 27;

/// Width of the shift register in bits
pub const RESIDUE_BITS: u32 = 5 * CHECKSUM_LENGTH as u32;

/// Bits of the register held in `Residue::hi`
const HI_BITS: u32 = RESIDUE_BITS - 128;

/// Generator words, XORed in for each set bit of the symbol shifted out
const GENERATOR: [Residue; 5] = [
    Residue::from_parts(0x48, 0xad7d_a5f5_dffe_2565_cb2f_7406_b4a2_bcbc),
    Residue::from_parts(0x05, 0x5af2_43bb_2f79_43c3_d4da_6d04_6345_795d),
    Residue::from_parts(0x0a, 0x91cc_8534_da77_8785_f924_7a01_ceda_669f),
    Residue::from_parts(0x11, 0xa7b8_4839_246b_2e49_b0c8_d103_9da6_ddbb),
    Residue::from_parts(0x23, 0x4e58_9060_c8d6_55d1_3105_8707_391d_2f53),
];

/// Residue of a valid codeword
pub const TARGET_RESIDUE: Residue = Residue::ONE;

/// 135-bit checksum register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Residue {
    /// Bits 128..135
    hi: u8,
    /// Bits 0..128
    lo: u128,
}

impl Residue {
    pub const ZERO: Residue = Residue::from_parts(0, 0);
    pub const ONE: Residue = Residue::from_parts(0, 1);

    pub const fn from_parts(hi: u8, lo: u128) -> Self {
        Self {
            hi: hi & ((1 << HI_BITS) - 1),
            lo,
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    /// Shift one symbol in, reducing by the generator
    #[inline]
    fn shift_in(&mut self, value: u8) {
        let top = self.hi >> (HI_BITS - 5);
        self.hi = ((self.hi & ((1 << (HI_BITS - 5)) - 1)) << 5) | (self.lo >> 123) as u8;
        self.lo = (self.lo << 5) ^ u128::from(value & 31);

        for (i, generator) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                *self ^= *generator;
            }
        }
    }

    /// Base-32 digit `index`, most significant first (`index < 27`)
    pub fn digit(&self, index: usize) -> u8 {
        debug_assert!(index < CHECKSUM_LENGTH);
        let shift = 5 * (CHECKSUM_LENGTH - 1 - index) as u32;

        let low_part = if shift < 128 {
            (self.lo >> shift) as u8
        } else {
            0
        };
        let high_part = if shift >= 128 {
            self.hi >> (shift - 128)
        } else if shift > 120 {
            self.hi << (128 - shift)
        } else {
            0
        };
        (low_part | high_part) & 31
    }

    /// All 27 digits, most significant first
    pub fn digits(&self) -> [u8; CHECKSUM_LENGTH] {
        std::array::from_fn(|i| self.digit(i))
    }
}

impl BitXor for Residue {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self {
            hi: self.hi ^ rhs.hi,
            lo: self.lo ^ rhs.lo,
        }
    }
}

impl BitXorAssign for Residue {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.hi ^= rhs.hi;
        self.lo ^= rhs.lo;
    }
}

impl std::fmt::LowerHex for Residue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02x}{:032x}", self.hi, self.lo)
    }
}

/// Expand a prefix into checksum input: high 3 bits of each character, a zero,
/// then the low 5 bits of each character
pub fn hrp_expand(hrp: &Hrp) -> Vec<u8> {
    let mut v = Vec::with_capacity(hrp.len() * 2 + 1);
    v.extend(hrp.bytes().map(|b| b >> 5));
    v.push(0);
    v.extend(hrp.bytes().map(|b| b & 31));
    v
}

/// Run raw 5-bit values through the register, starting from 1
pub fn polymod(values: &[u8]) -> Residue {
    let mut engine = ChecksumEngine::new();
    for &value in values {
        engine.input_value(value);
    }
    *engine.residue()
}

/// Incremental checksum computation
#[derive(Debug, Clone)]
pub struct ChecksumEngine {
    residue: Residue,
}

impl Default for ChecksumEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ChecksumEngine {
    pub fn new() -> Self {
        Self {
            residue: Residue::ONE,
        }
    }

    #[inline]
    pub fn input_value(&mut self, value: u8) {
        self.residue.shift_in(value);
    }

    pub fn input_hrp(&mut self, hrp: &Hrp) {
        for b in hrp.bytes() {
            self.input_value(b >> 5);
        }
        self.input_value(0);
        for b in hrp.bytes() {
            self.input_value(b & 31);
        }
    }

    #[inline]
    pub fn input_fe(&mut self, fe: Fe32) {
        self.input_value(fe.to_u8());
    }

    /// Feed the 27 zero symbols a checksum occupies
    pub fn input_target_residue(&mut self) {
        for _ in 0..CHECKSUM_LENGTH {
            self.input_value(0);
        }
    }

    pub fn residue(&self) -> &Residue {
        &self.residue
    }
}

/// Register contents after the prefix and codeword
pub fn residue(hrp: &Hrp, codeword: &[Fe32]) -> Residue {
    let mut engine = ChecksumEngine::new();
    engine.input_hrp(hrp);
    for &fe in codeword {
        engine.input_fe(fe);
    }
    *engine.residue()
}

/// Compute the 27 checksum symbols for `data`
pub fn create_checksum(hrp: &Hrp, data: &[Fe32]) -> [Fe32; CHECKSUM_LENGTH] {
    let mut engine = ChecksumEngine::new();
    engine.input_hrp(hrp);
    for &fe in data {
        engine.input_fe(fe);
    }
    engine.input_target_residue();

    let checksum = *engine.residue() ^ TARGET_RESIDUE;
    checksum.digits().map(fe32_from_low_bits)
}

/// True if `codeword` (data followed by checksum) is valid under `hrp`
pub fn verify_checksum(hrp: &Hrp, codeword: &[Fe32]) -> bool {
    residue(hrp, codeword) == TARGET_RESIDUE
}
