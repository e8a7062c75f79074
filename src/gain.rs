/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Analog gain ladder resolution.
//!
//! The sensor's analog gain is selected in two stages: a band picks one of nine
//! reference gains ("knees"), and a coarse/fine pair multiplies that knee by
//! `coarse + fine / 64`. The achievable gains therefore form a non-uniform staircase;
//! [`GainLadder::resolve`] picks the highest step that does not exceed the request.

use crate::fixed::{exp2_fixed, fix_from_hundredths, fix_mul, log2_fixed, GAIN_FIXED_POINT};

/// Number of gain bands (knees) in a ladder
pub const BAND_COUNT: usize = 9;
/// Largest coarse multiplier
pub const COARSE_MAX: u8 = 0x0f;
/// Largest fine step, in 1/64ths
pub const FINE_MAX: u8 = 0x3f;
/// Fractional bits of the fine step
const FINE_BITS: u32 = 6;
/// Widest log2-domain format the ISP conversions accept
pub const MAX_LOG2_SHIFT: u32 = 26;

/// One analog gain register setting
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AnalogGain {
    /// Index of the knee this setting multiplies
    pub band: u8,
    /// Integer part of the multiplier, 0..=15
    pub coarse: u8,
    /// Fractional part of the multiplier in 1/64ths, 0..=63
    pub fine: u8,
}

impl AnalogGain {
    /// Pack into the `band << 12 | coarse << 8 | fine` word the register writer consumes
    pub const fn packed(&self) -> u32 {
        ((self.band as u32) << 12) | ((self.coarse as u32) << 8) | self.fine as u32
    }

    /// Whether every field is in range for a ladder.
    /// [`AnalogGain::from_packed`] keeps all four band bits, so bands 9..=15 are possible.
    pub const fn is_valid(&self) -> bool {
        (self.band as usize) < BAND_COUNT && self.coarse <= COARSE_MAX && self.fine <= FINE_MAX
    }

    /// Unpack a word produced by [`AnalogGain::packed`]
    pub const fn from_packed(word: u32) -> Self {
        Self {
            band: ((word >> 12) & 0x0f) as u8,
            coarse: ((word >> 8) & 0x0f) as u8,
            fine: (word & 0x3f) as u8,
        }
    }

    /// The knee multiplier `coarse + fine / 64` with `frac_bits` fractional bits
    pub const fn factor(&self, frac_bits: u32) -> u32 {
        ((self.coarse as u32) << frac_bits) + ((self.fine as u32) << (frac_bits - FINE_BITS))
    }
}

/// Outcome of a gain request
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Linear gain the register setting actually produces
    pub gain: u32,
    pub setting: AnalogGain,
}

impl Resolution {
    pub const fn packed(&self) -> u32 {
        self.setting.packed()
    }
}

/// A sensor's gain staircase: nine strictly increasing knees sharing one fixed-point format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GainLadder {
    frac_bits: u32,
    knees: [u32; BAND_COUNT],
}

/// GC1054 characterization data
pub const GC1054_LADDER: GainLadder = GainLadder::new(
    [
        fix_from_hundredths(1, 0, GAIN_FIXED_POINT),
        fix_from_hundredths(1, 42, GAIN_FIXED_POINT),
        fix_from_hundredths(1, 99, GAIN_FIXED_POINT),
        fix_from_hundredths(2, 85, GAIN_FIXED_POINT),
        fix_from_hundredths(4, 3, GAIN_FIXED_POINT),
        fix_from_hundredths(5, 77, GAIN_FIXED_POINT),
        fix_from_hundredths(8, 6, GAIN_FIXED_POINT),
        fix_from_hundredths(11, 53, GAIN_FIXED_POINT),
        fix_from_hundredths(16, 12, GAIN_FIXED_POINT),
    ],
    GAIN_FIXED_POINT,
);

impl GainLadder {
    /// Build a ladder from its knees.
    ///
    /// # Panics
    /// If the knees are not strictly increasing, `frac_bits` is outside `6..=24`,
    /// or the top setting of the last knee does not fit in a `u32`.
    /// For `const` ladders this is reported at compile time.
    pub const fn new(knees: [u32; BAND_COUNT], frac_bits: u32) -> Self {
        assert!(frac_bits >= FINE_BITS && frac_bits <= 24, "unsupported fixed-point width");
        let mut i = 1;
        while i < BAND_COUNT {
            assert!(knees[i - 1] < knees[i], "gain knees must be strictly increasing");
            i += 1;
        }
        let top = (knees[BAND_COUNT - 1] as u64 * Self::max_setting().factor(frac_bits) as u64)
            >> frac_bits;
        assert!(top <= u32::MAX as u64, "maximum gain overflows the fixed-point width");
        Self { frac_bits, knees }
    }

    pub const fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    pub const fn knees(&self) -> &[u32; BAND_COUNT] {
        &self.knees
    }

    /// Smallest achievable gain: the first knee at unity multiplier
    pub const fn min_setting() -> AnalogGain {
        AnalogGain {
            band: 0,
            coarse: 1,
            fine: 0,
        }
    }

    /// Largest achievable gain setting: last knee at full coarse/fine
    pub const fn max_setting() -> AnalogGain {
        AnalogGain {
            band: (BAND_COUNT - 1) as u8,
            coarse: COARSE_MAX,
            fine: FINE_MAX,
        }
    }

    /// The linear gain a register setting produces on this ladder
    ///
    /// # Panics
    /// If `setting.band` is not below [`BAND_COUNT`]; see [`AnalogGain::is_valid`].
    pub const fn gain_of(&self, setting: &AnalogGain) -> u32 {
        fix_mul(
            self.knees[setting.band as usize],
            setting.factor(self.frac_bits),
            self.frac_bits,
        )
    }

    /// [`GainLadder::gain_of`] for settings that may not be valid, such as decoded words
    pub const fn checked_gain_of(&self, setting: &AnalogGain) -> Option<u32> {
        if setting.is_valid() {
            Some(self.gain_of(setting))
        } else {
            None
        }
    }

    /// Largest achievable linear gain
    pub const fn max_gain(&self) -> u32 {
        self.gain_of(&Self::max_setting())
    }

    /// Find the largest achievable gain that does not exceed `requested`.
    ///
    /// Requests below the first knee clamp up to it; requests at or above
    /// [`GainLadder::max_gain`] clamp down to the maximum setting.
    pub fn resolve(&self, requested: u32) -> Resolution {
        if requested < self.knees[0] {
            return Resolution {
                gain: self.knees[0],
                setting: Self::min_setting(),
            };
        }
        let max_gain = self.max_gain();
        if requested >= max_gain {
            return Resolution {
                gain: max_gain,
                setting: Self::max_setting(),
            };
        }

        let band = self
            .knees
            .iter()
            .rposition(|&knee| knee <= requested)
            .unwrap_or(0);
        self.search_band(band as u8, requested)
    }

    /// Sweep coarse then fine upward until a candidate overshoots `requested`.
    /// Every candidate is recomputed from the knee so truncation matches the register model.
    fn search_band(&self, band: u8, requested: u32) -> Resolution {
        let mut best = Resolution {
            gain: self.knees[band as usize],
            setting: AnalogGain {
                band,
                coarse: 1,
                fine: 0,
            },
        };
        for coarse in 1..=COARSE_MAX {
            for fine in 0..=FINE_MAX {
                let setting = AnalogGain { band, coarse, fine };
                let candidate = self.gain_of(&setting);
                if requested < candidate {
                    return best;
                }
                best = Resolution {
                    gain: candidate,
                    setting,
                };
            }
        }
        best
    }

    /// Resolve a log2-domain ISP gain with `shift` fractional bits.
    ///
    /// Returns the gain actually applied, in the same log2 format, and the register setting.
    /// `shift` is clamped to [`MAX_LOG2_SHIFT`].
    pub fn resolve_log(&self, isp_gain: u32, shift: u32) -> (u32, AnalogGain) {
        let shift = shift.min(MAX_LOG2_SHIFT);
        let requested = exp2_fixed(isp_gain, shift, self.frac_bits);
        let resolution = self.resolve(requested);
        (
            log2_fixed(resolution.gain, self.frac_bits, shift),
            resolution.setting,
        )
    }

    /// [`GainLadder::max_gain`] in the ISP's log2 format
    pub fn max_gain_log(&self, shift: u32) -> u32 {
        let shift = shift.min(MAX_LOG2_SHIFT);
        log2_fixed(self.max_gain(), self.frac_bits, shift)
    }
}
