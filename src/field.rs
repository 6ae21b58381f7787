//! Galois Field GF(1024) arithmetic for the Bech32X error-correcting layer
//!
//! ## Field Construction
//!
//! GF(1024) is built as a quadratic extension of GF(32):
//!
//! - **GF(32)**: GF(2)\[x\] / (x⁵ + x² + 1)
//! - **GF(1024)**: GF(32)\[ζ\] / (ζ² + 26ζ + 5)
//!
//! An element `v` in `0..1024` stands for `(v >> 5)·ζ + (v & 31)`, so the values
//! `0..32` are exactly the GF(32) subfield. Every 5-bit symbol is therefore a field
//! element as-is, and an error magnitude found by the decoder can be XORed straight
//! into a symbol.
//!
//! All nonzero elements are powers of the primitive element `69` (2ζ + 5). The
//! exponential and logarithm tables are built once, on first use, and shared
//! read-only by every thread afterwards.

use smallvec::SmallVec;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};
use std::sync::OnceLock;

/// Number of elements in the field
pub const FIELD_SIZE: usize = 1024;

/// Order of the multiplicative group
pub const GROUP_ORDER: usize = FIELD_SIZE - 1;

/// GF(32) reduction polynomial x⁵ + x² + 1
const GF32_MODULUS: u16 = 0x25;

/// ζ² = 26ζ + 5 (the high and low GF(32) halves)
const ZETA_SQUARED_HI: u8 = 26;
const ZETA_SQUARED_LO: u8 = 5;

/// Primitive element generating the multiplicative group
const PRIMITIVE: u16 = 69;

/// Polynomial over GF(1024), lowest-degree coefficient first
pub type Polynomial = SmallVec<[Fe1024; 24]>;

/// Exponential/logarithm lookup tables, shared through [`tables`]
struct FieldTables {
    log: [u16; FIELD_SIZE],
    exp: [u16; FIELD_SIZE],
}

impl FieldTables {
    fn new() -> Self {
        let mut table = FieldTables {
            log: [0; FIELD_SIZE],
            exp: [0; FIELD_SIZE],
        };
        table.build_tables();
        table
    }

    fn build_tables(&mut self) {
        let mut b = 1u16;

        for l in 0..GROUP_ORDER {
            self.log[b as usize] = l as u16;
            self.exp[l] = b;
            b = mul_slow(b, PRIMITIVE);
        }

        // log(0) is undefined; the sentinel is never a valid exponent
        self.log[0] = GROUP_ORDER as u16;
        self.exp[GROUP_ORDER] = 0;
    }
}

fn tables() -> &'static FieldTables {
    static TABLES: OnceLock<FieldTables> = OnceLock::new();
    TABLES.get_or_init(FieldTables::new)
}

/// Carry-less multiply in GF(32), reduced by x⁵ + x² + 1
fn gf32_mul(a: u8, b: u8) -> u8 {
    let mut product = 0u16;
    for i in 0..5 {
        if (b >> i) & 1 == 1 {
            product ^= (a as u16) << i;
        }
    }
    for i in (5..9).rev() {
        if (product >> i) & 1 == 1 {
            product ^= GF32_MODULUS << (i - 5);
        }
    }
    product as u8
}

/// Table-free GF(1024) multiply, used only to build the tables
fn mul_slow(a: u16, b: u16) -> u16 {
    let (a_hi, a_lo) = ((a >> 5) as u8, (a & 31) as u8);
    let (b_hi, b_lo) = ((b >> 5) as u8, (b & 31) as u8);

    let hh = gf32_mul(a_hi, b_hi);
    let hi = gf32_mul(a_hi, b_lo) ^ gf32_mul(a_lo, b_hi) ^ gf32_mul(hh, ZETA_SQUARED_HI);
    let lo = gf32_mul(a_lo, b_lo) ^ gf32_mul(hh, ZETA_SQUARED_LO);
    ((hi as u16) << 5) | lo as u16
}

/// Reduce an exponent into `0..1023`, handling negative values
#[inline]
fn reduce(exponent: i64) -> usize {
    exponent.rem_euclid(GROUP_ORDER as i64) as usize
}

/// GF(1024) field element
///
/// Kept distinct from symbol values and positions, which share the same numeric
/// range but are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fe1024(u16);

impl Fe1024 {
    pub const ZERO: Fe1024 = Fe1024(0);
    pub const ONE: Fe1024 = Fe1024(1);

    /// Only the low 10 bits of `value` are kept
    pub const fn new(value: u16) -> Self {
        Self(value & (FIELD_SIZE as u16 - 1))
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `69^exponent`; negative exponents are allowed
    pub fn exp(exponent: i64) -> Self {
        Self(tables().exp[reduce(exponent)])
    }

    /// Discrete logarithm, `None` for zero
    pub fn log(self) -> Option<u16> {
        if self.is_zero() {
            None
        } else {
            Some(tables().log[self.0 as usize])
        }
    }

    /// Multiply by `69^exponent`
    ///
    /// Zero stays zero. Otherwise the result is `exp(log(self) + exponent)`.
    #[inline]
    pub fn shift(self, exponent: i64) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        let table = tables();
        Self(table.exp[reduce(table.log[self.0 as usize] as i64 + exponent)])
    }

    /// Multiplicative inverse, `None` for zero
    pub fn inverse(self) -> Option<Self> {
        self.log().map(|l| Self::exp(-(l as i64)))
    }

    /// The value as a GF(32) symbol, if it lies in the subfield
    pub fn to_gf32(self) -> Option<u8> {
        if self.0 < 32 {
            Some(self.0 as u8)
        } else {
            None
        }
    }
}

// Addition (XOR in characteristic 2)
impl Add for Fe1024 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for Fe1024 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

// Subtraction (same as addition)
impl Sub for Fe1024 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl SubAssign for Fe1024 {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

// Multiplication using log tables
impl Mul for Fe1024 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match rhs.log() {
            Some(l) => self.shift(l as i64),
            None => Self::ZERO,
        }
    }
}

impl MulAssign for Fe1024 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl From<u8> for Fe1024 {
    fn from(value: u8) -> Self {
        Self(value as u16)
    }
}

impl From<Fe1024> for u16 {
    fn from(val: Fe1024) -> Self {
        val.0
    }
}

impl std::fmt::Display for Fe1024 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product of two polynomials; the result has `a.len() + b.len() - 1` coefficients
pub fn poly_mul(a: &[Fe1024], b: &[Fe1024]) -> Polynomial {
    if a.is_empty() || b.is_empty() {
        return Polynomial::new();
    }

    let mut ret: Polynomial = SmallVec::from_elem(Fe1024::ZERO, a.len() + b.len() - 1);
    for (x, &ax) in a.iter().enumerate() {
        if let Some(l) = ax.log() {
            for (y, &by) in b.iter().enumerate() {
                ret[x + y] += by.shift(l as i64);
            }
        }
    }
    ret
}

/// Evaluate `p` at `69^exponent` with Horner's rule
pub fn poly_eval(p: &[Fe1024], exponent: i64) -> Fe1024 {
    p.iter()
        .rev()
        .fold(Fe1024::ZERO, |acc, &coefficient| acc.shift(exponent) + coefficient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exp_table_prefix() {
        let prefix: Vec<u16> = (0..8).map(|e| Fe1024::exp(e).value()).collect();
        assert_eq!(prefix, vec![1, 69, 229, 290, 58, 183, 166, 89]);
        assert_eq!(Fe1024::exp(1022).value(), 489);
    }

    #[test]
    fn test_log_table_values() {
        assert_eq!(Fe1024::new(1).log(), Some(0));
        assert_eq!(Fe1024::new(2).log(), Some(231));
        assert_eq!(Fe1024::new(3).log(), Some(66));
        assert_eq!(Fe1024::new(1023).log(), Some(812));
        assert_eq!(Fe1024::ZERO.log(), None);
    }

    #[test]
    fn test_tables_form_a_bijection() {
        let mut seen = vec![false; FIELD_SIZE];
        for e in 0..GROUP_ORDER as i64 {
            let v = Fe1024::exp(e);
            assert!(!v.is_zero());
            assert!(!seen[v.value() as usize], "69^{} repeats", e);
            seen[v.value() as usize] = true;
        }
    }

    #[test]
    fn test_single_shared_table_instance() {
        let table = tables();
        assert!(std::ptr::eq(table, tables()));
        assert_eq!(table.log[0], GROUP_ORDER as u16);
        assert_eq!(table.exp[GROUP_ORDER], 0);
        for v in 1..FIELD_SIZE {
            assert_eq!(table.exp[table.log[v] as usize] as usize, v);
        }
    }

    #[test]
    fn test_shift_negative_exponent() {
        let a = Fe1024::new(123);
        assert_eq!(a.shift(-5).shift(5), a);
        assert_eq!(a.shift(-1023), a);
        assert_eq!(Fe1024::ZERO.shift(-7), Fe1024::ZERO);
    }

    #[test]
    fn test_gf32_subfield_closed() {
        for a in 0u8..32 {
            for b in 0u8..32 {
                let product = Fe1024::from(a) * Fe1024::from(b);
                assert!(product.to_gf32().is_some(), "{} * {} left GF(32)", a, b);
            }
        }
    }

    #[test]
    fn test_poly_mul_length_and_identity() {
        let p = [Fe1024::new(5), Fe1024::new(700), Fe1024::new(1)];
        let product = poly_mul(&p, &[Fe1024::ONE]);
        assert_eq!(product.as_slice(), &p);
        assert_eq!(poly_mul(&p, &p).len(), 5);
        assert!(poly_mul(&p, &[]).is_empty());
    }

    #[test]
    fn test_poly_eval_root() {
        // (x + 69^3) vanishes at 69^3
        let p = [Fe1024::exp(3), Fe1024::ONE];
        assert!(poly_eval(&p, 3).is_zero());
        assert!(!poly_eval(&p, 4).is_zero());
    }
}
