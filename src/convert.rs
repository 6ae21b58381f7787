//! Power-of-two base conversion between bytes and 5-bit symbols

use crate::error::{Error, Result};
use bech32::Fe32;

/// Regroup `values` of `from_bits` width into values of `to_bits` width
///
/// With `pad`, leftover bits are zero-padded into one final value. Without it,
/// leftover bits must be fewer than `from_bits` and all zero.
pub fn convert_bits(values: &[u32], from_bits: u32, to_bits: u32, pad: bool) -> Result<Vec<u32>> {
    debug_assert!((1..=16).contains(&from_bits) && (1..=16).contains(&to_bits));

    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut ret = Vec::with_capacity(values.len() * from_bits as usize / to_bits as usize + 1);
    let maxv: u32 = (1 << to_bits) - 1;
    let max_acc: u32 = (1 << (from_bits + to_bits - 1)) - 1;

    for &value in values {
        if value >> from_bits != 0 {
            return Err(Error::ValueOutOfRange {
                value,
                bits: from_bits,
            });
        }
        acc = ((acc << from_bits) | value) & max_acc;
        bits += from_bits;
        while bits >= to_bits {
            bits -= to_bits;
            ret.push((acc >> bits) & maxv);
        }
    }

    if pad {
        if bits > 0 {
            ret.push((acc << (to_bits - bits)) & maxv);
        }
    } else if bits >= from_bits || (acc << (to_bits - bits)) & maxv != 0 {
        return Err(Error::InvalidPadding);
    }

    Ok(ret)
}

/// The symbol for the low 5 bits of `value`
pub(crate) fn fe32_from_low_bits(value: u8) -> Fe32 {
    Fe32::try_from(value & 31).expect("a 5-bit value is always a valid symbol")
}

/// 8-bit bytes to 5-bit symbols, zero-padded
pub fn bytes_to_symbols(bytes: &[u8]) -> Vec<Fe32> {
    let values: Vec<u32> = bytes.iter().map(|&b| u32::from(b)).collect();
    convert_bits(&values, 8, 5, true)
        .expect("bytes fit in 8 bits and padded conversion never rejects")
        .into_iter()
        .map(|v| fe32_from_low_bits(v as u8))
        .collect()
}

/// 5-bit symbols back to bytes, rejecting nonzero or excess padding
pub fn symbols_to_bytes(symbols: &[Fe32]) -> Result<Vec<u8>> {
    let values: Vec<u32> = symbols.iter().map(|fe| u32::from(fe.to_u8())).collect();
    Ok(convert_bits(&values, 5, 8, false)?
        .into_iter()
        .map(|v| v as u8)
        .collect())
}
