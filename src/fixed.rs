/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Unsigned fixed-point helpers shared by the gain ladder and the ISP gain interface.
//!
//! A value with `F` fractional bits represents `value / 2^F`. Linear gains use
//! [`GAIN_FIXED_POINT`] fractional bits; the ISP's logarithmic gains use [`LOG2_GAIN_SHIFT`].
//! Every routine here rounds toward zero, so conversions never report more gain
//! than was actually computed.

/// Fractional bits of a linear gain value
pub const GAIN_FIXED_POINT: u32 = 16;

/// Fractional bits of a log2-domain gain value exchanged with the ISP
pub const LOG2_GAIN_SHIFT: u32 = 16;

/// The value 1.0 with `frac_bits` fractional bits
pub const fn one(frac_bits: u32) -> u32 {
    1 << frac_bits
}

/// Build `int + hundredths / 100` with `frac_bits` fractional bits,
/// e.g. `fix_from_hundredths(1, 42, 16)` for a gain of 1.42
pub const fn fix_from_hundredths(int: u32, hundredths: u32, frac_bits: u32) -> u32 {
    (int << frac_bits) | (((hundredths as u64) << frac_bits) / 100) as u32
}

/// Multiply two values sharing `frac_bits` fractional bits.
///
/// The result is exactly `floor(a * b / 2^frac_bits)`, truncated to 32 bits.
/// There is no overflow check: callers keep their operands well under the width ceiling.
pub const fn fix_mul(a: u32, b: u32, frac_bits: u32) -> u32 {
    ((a as u64 * b as u64) >> frac_bits) as u32
}

const fn frac_mask(frac_bits: u32) -> u32 {
    ((1u64 << frac_bits) - 1) as u32
}

/// Q30 mantissa precision used by the exp2 / log2 conversions
const MANTISSA_BITS: u32 = 30;

/// `floor(2^(2^-k) * 2^30)` for k = 1..=30
const EXP2_ROOTS: [u32; 30] = [
    0x5a82_7999, 0x4c1b_f828, 0x45ca_e0f1, 0x42d5_61b3, 0x4166_c34c, 0x40b2_68f9,
    0x4058_f6a7, 0x402c_6be9, 0x4016_321b, 0x400b_1817, 0x4005_8bce, 0x4002_c5d7,
    0x4001_62e8, 0x4000_b173, 0x4000_58b9, 0x4000_2c5c, 0x4000_162e, 0x4000_0b17,
    0x4000_058b, 0x4000_02c5, 0x4000_0162, 0x4000_00b1, 0x4000_0058, 0x4000_002c,
    0x4000_0016, 0x4000_000b, 0x4000_0005, 0x4000_0002, 0x4000_0001, 0x4000_0000,
];

/// Convert a log2-domain value to the linear domain:
/// `2^(value / 2^in_frac)` expressed with `out_frac` fractional bits.
///
/// Results too large for a `u32` saturate at `u32::MAX`.
pub fn exp2_fixed(value: u32, in_frac: u32, out_frac: u32) -> u32 {
    debug_assert!(in_frac <= 31 && out_frac <= 31);
    let int_part = value >> in_frac;
    let frac = value & frac_mask(in_frac);

    let mut mantissa: u64 = 1 << MANTISSA_BITS;
    for (k, root) in EXP2_ROOTS.iter().enumerate().take(in_frac as usize) {
        if frac & (1 << (in_frac - 1 - k as u32)) != 0 {
            mantissa = (mantissa * u64::from(*root)) >> MANTISSA_BITS;
        }
    }

    let shift = i64::from(int_part) + i64::from(out_frac) - i64::from(MANTISSA_BITS);
    if shift < 0 {
        (mantissa >> (-shift) as u32) as u32
    } else if shift > 32 {
        u32::MAX
    } else {
        let scaled = mantissa << shift as u32;
        if scaled > u64::from(u32::MAX) {
            u32::MAX
        } else {
            scaled as u32
        }
    }
}

/// Convert a linear value with `in_frac` fractional bits to the log2 domain,
/// expressed with `out_frac` fractional bits.
///
/// Inputs below 1.0 (including zero) report 0.
pub fn log2_fixed(value: u32, in_frac: u32, out_frac: u32) -> u32 {
    debug_assert!(in_frac <= 31 && out_frac <= 26);
    if value >> in_frac == 0 {
        return 0;
    }
    let msb = 31 - value.leading_zeros();
    let int_part = msb - in_frac;

    // normalize into [1, 2)
    let mut mantissa: u64 = if msb >= MANTISSA_BITS {
        u64::from(value) >> (msb - MANTISSA_BITS)
    } else {
        u64::from(value) << (MANTISSA_BITS - msb)
    };

    let mut frac = 0u32;
    for _ in 0..out_frac {
        mantissa = (mantissa * mantissa) >> MANTISSA_BITS;
        frac <<= 1;
        if mantissa >= 2 << MANTISSA_BITS {
            mantissa >>= 1;
            frac |= 1;
        }
    }

    (int_part << out_frac) | frac
}
