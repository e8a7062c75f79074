/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! GC1054 register map and startup register tables

/// Registers visible from every page
#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum GeneralRegisters {
    ChipIdHigh = 0xf0,
    ChipIdLow = 0xf1,
    /// Selects which register page 0x00..=0xef addresses
    PageSelect = 0xfe,
}

/// Page 0: sensor timing (CISCTL)
#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum Page0Registers {
    /// Exposure in lines, bits 8..=12
    ExposureHigh = 0x03,
    /// Exposure in lines, bits 0..=7
    ExposureLow = 0x04,
    HBlankHigh = 0x05,
    HBlankLow = 0x06,
    VBlankHigh = 0x07,
    VBlankLow = 0x08,
    WinHeightHigh = 0x0d,
    WinHeightLow = 0x0e,
    WinWidthHigh = 0x0f,
    WinWidthLow = 0x10,
    ShDelay = 0x2c,
}

/// Page 1: analog gain
#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum Page1Registers {
    /// Coarse multiplier
    GainCoarse = 0xb1,
    /// Fine multiplier, stored as `fine << 2`
    GainFine = 0xb2,
    /// Gain band
    GainBand = 0xb6,
}

/// Register pages
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Timing = 0x00,
    Gain = 0x01,
}

/// One step of a register table
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegVal {
    /// Write `value` to register `reg` on the current page
    Write(u8, u8),
    /// Pause for this many milliseconds
    Delay(u8),
}

/// 1280x720 @ 25 fps, single-lane MIPI RAW10
pub const INIT_1280X720_MIPI: &[RegVal] = &[
    RegVal::Write(0xf2, 0x00), RegVal::Write(0xf6, 0x00), RegVal::Write(0xfc, 0x04), RegVal::Write(0xf7, 0x01),
    RegVal::Write(0xf8, 0x0c), RegVal::Write(0xf9, 0x06), RegVal::Write(0xfa, 0x80), RegVal::Write(0xfc, 0x0e),
    RegVal::Write(0xfe, 0x00), RegVal::Write(0x03, 0x02), RegVal::Write(0x04, 0xa6), RegVal::Write(0x05, 0x02),
    RegVal::Write(0x06, 0x07), RegVal::Write(0x07, 0x00), RegVal::Write(0x08, 0xa4), RegVal::Write(0x09, 0x00),
    RegVal::Write(0x0a, 0x04), RegVal::Write(0x0b, 0x00), RegVal::Write(0x0c, 0x00), RegVal::Write(0x0d, 0x02),
    RegVal::Write(0x0e, 0xd4), RegVal::Write(0x0f, 0x05), RegVal::Write(0x10, 0x08), RegVal::Write(0x17, 0xc0),
    RegVal::Write(0x18, 0x02), RegVal::Write(0x19, 0x08), RegVal::Write(0x1a, 0x18), RegVal::Write(0x1d, 0x12),
    RegVal::Write(0x1e, 0x50), RegVal::Write(0x1f, 0x80), RegVal::Write(0x21, 0x30), RegVal::Write(0x23, 0xf8),
    RegVal::Write(0x25, 0x10), RegVal::Write(0x28, 0x20), RegVal::Write(0x34, 0x08), RegVal::Write(0x3c, 0x10),
    RegVal::Write(0x3d, 0x0e), RegVal::Write(0xcc, 0x8e), RegVal::Write(0xcd, 0x9a), RegVal::Write(0xcf, 0x70),
    RegVal::Write(0xd0, 0xa9), RegVal::Write(0xd1, 0xc5), RegVal::Write(0xd2, 0xed), RegVal::Write(0xd8, 0x3c),
    RegVal::Write(0xd9, 0x7a), RegVal::Write(0xda, 0x12), RegVal::Write(0xdb, 0x50), RegVal::Write(0xde, 0x0c),
    RegVal::Write(0xe3, 0x60), RegVal::Write(0xe4, 0x78), RegVal::Write(0xfe, 0x01), RegVal::Write(0xe3, 0x01),
    RegVal::Write(0xe6, 0x10), RegVal::Write(0xfe, 0x01), RegVal::Write(0x80, 0x50), RegVal::Write(0x88, 0x73),
    RegVal::Write(0x89, 0x03), RegVal::Write(0x90, 0x01), RegVal::Write(0x92, 0x02), RegVal::Write(0x94, 0x03),
    RegVal::Write(0x95, 0x02), RegVal::Write(0x96, 0xd0), RegVal::Write(0x97, 0x05), RegVal::Write(0x98, 0x00),
    RegVal::Write(0xfe, 0x01), RegVal::Write(0x40, 0x22), RegVal::Write(0x43, 0x03), RegVal::Write(0x4e, 0x3c),
    RegVal::Write(0x4f, 0x00), RegVal::Write(0x60, 0x00), RegVal::Write(0x61, 0x80), RegVal::Write(0xfe, 0x01),
    RegVal::Write(0xb0, 0x48), RegVal::Write(0xb1, 0x01), RegVal::Write(0xb2, 0x00), RegVal::Write(0xb6, 0x00),
    RegVal::Write(0xfe, 0x02), RegVal::Write(0x01, 0x00), RegVal::Write(0x02, 0x01), RegVal::Write(0x03, 0x02),
    RegVal::Write(0x04, 0x03), RegVal::Write(0x05, 0x04), RegVal::Write(0x06, 0x05), RegVal::Write(0x07, 0x06),
    RegVal::Write(0x08, 0x0e), RegVal::Write(0x09, 0x16), RegVal::Write(0x0a, 0x1e), RegVal::Write(0x0b, 0x36),
    RegVal::Write(0x0c, 0x3e), RegVal::Write(0x0d, 0x56), RegVal::Write(0xfe, 0x02), RegVal::Write(0xb0, 0x00),
    RegVal::Write(0xb1, 0x00), RegVal::Write(0xb2, 0x00), RegVal::Write(0xb3, 0x11), RegVal::Write(0xb4, 0x22),
    RegVal::Write(0xb5, 0x54), RegVal::Write(0xb6, 0xb8), RegVal::Write(0xb7, 0x60), RegVal::Write(0xb9, 0x00),
    RegVal::Write(0xba, 0xc0), RegVal::Write(0xc0, 0x20), RegVal::Write(0xc1, 0x2d), RegVal::Write(0xc2, 0x40),
    RegVal::Write(0xc3, 0x5b), RegVal::Write(0xc4, 0x80), RegVal::Write(0xc5, 0xb5), RegVal::Write(0xc6, 0x00),
    RegVal::Write(0xc7, 0x6a), RegVal::Write(0xc8, 0x00), RegVal::Write(0xc9, 0xd4), RegVal::Write(0xca, 0x00),
    RegVal::Write(0xcb, 0xa8), RegVal::Write(0xcc, 0x00), RegVal::Write(0xcd, 0x50), RegVal::Write(0xce, 0x00),
    RegVal::Write(0xcf, 0xa1), RegVal::Write(0xfe, 0x02), RegVal::Write(0x54, 0xf7), RegVal::Write(0x55, 0xf0),
    RegVal::Write(0x56, 0x00), RegVal::Write(0x57, 0x00), RegVal::Write(0x58, 0x00), RegVal::Write(0x5a, 0x04),
    RegVal::Write(0xfe, 0x04), RegVal::Write(0x81, 0x8a), RegVal::Write(0xfe, 0x03), RegVal::Write(0x01, 0x03),
    RegVal::Write(0x02, 0x11), RegVal::Write(0x03, 0x90), RegVal::Write(0x10, 0x90), RegVal::Write(0x11, 0x2b),
    RegVal::Write(0x12, 0x40), RegVal::Write(0x13, 0x06), RegVal::Write(0x15, 0x06), RegVal::Write(0x21, 0x02),
    RegVal::Write(0x22, 0x02), RegVal::Write(0x23, 0x08), RegVal::Write(0x24, 0x02), RegVal::Write(0x25, 0x10),
    RegVal::Write(0x26, 0x04), RegVal::Write(0x29, 0x06), RegVal::Write(0x2a, 0x04), RegVal::Write(0x2b, 0x04),
    RegVal::Write(0xfe, 0x00),
];

/// 1280x720 @ 25 fps, parallel DVP RAW10
pub const INIT_1280X720_DVP: &[RegVal] = &[
    RegVal::Write(0xf2, 0x00), RegVal::Write(0xf6, 0x00), RegVal::Write(0xfc, 0x04), RegVal::Write(0xf7, 0x01),
    RegVal::Write(0xf8, 0x0c), RegVal::Write(0xf9, 0x00), RegVal::Write(0xfa, 0x80), RegVal::Write(0xfc, 0x0e),
    RegVal::Write(0xfe, 0x00), RegVal::Write(0x03, 0x02), RegVal::Write(0x04, 0xa6), RegVal::Write(0x05, 0x02),
    RegVal::Write(0x06, 0x07), RegVal::Write(0x07, 0x00), RegVal::Write(0x08, 0x0a), RegVal::Write(0x09, 0x00),
    RegVal::Write(0x0a, 0x04), RegVal::Write(0x0b, 0x00), RegVal::Write(0x0c, 0x00), RegVal::Write(0x0d, 0x02),
    RegVal::Write(0x0e, 0xd4), RegVal::Write(0x0f, 0x05), RegVal::Write(0x10, 0x08), RegVal::Write(0x17, 0xc0),
    RegVal::Write(0x18, 0x02), RegVal::Write(0x19, 0x08), RegVal::Write(0x1a, 0x18), RegVal::Write(0x1d, 0x12),
    RegVal::Write(0x1e, 0x50), RegVal::Write(0x1f, 0x80), RegVal::Write(0x21, 0x30), RegVal::Write(0x23, 0xf8),
    RegVal::Write(0x25, 0x10), RegVal::Write(0x28, 0x20), RegVal::Write(0x34, 0x08), RegVal::Write(0x3c, 0x10),
    RegVal::Write(0x3d, 0x0e), RegVal::Write(0xcc, 0x8e), RegVal::Write(0xcd, 0x9a), RegVal::Write(0xcf, 0x70),
    RegVal::Write(0xd0, 0xa9), RegVal::Write(0xd1, 0xc5), RegVal::Write(0xd2, 0xed), RegVal::Write(0xd8, 0x3c),
    RegVal::Write(0xd9, 0x7a), RegVal::Write(0xda, 0x12), RegVal::Write(0xdb, 0x50), RegVal::Write(0xde, 0x0c),
    RegVal::Write(0xe3, 0x60), RegVal::Write(0xe4, 0x78), RegVal::Write(0xfe, 0x01), RegVal::Write(0xe3, 0x01),
    RegVal::Write(0xe6, 0x10), RegVal::Write(0xfe, 0x01), RegVal::Write(0x80, 0x50), RegVal::Write(0x88, 0x23),
    RegVal::Write(0x89, 0x03), RegVal::Write(0x90, 0x01), RegVal::Write(0x92, 0x02), RegVal::Write(0x94, 0x03),
    RegVal::Write(0x95, 0x02), RegVal::Write(0x96, 0xd0), RegVal::Write(0x97, 0x05), RegVal::Write(0x98, 0x00),
    RegVal::Write(0xfe, 0x01), RegVal::Write(0x40, 0x22), RegVal::Write(0x43, 0x03), RegVal::Write(0x4e, 0x3c),
    RegVal::Write(0x4f, 0x00), RegVal::Write(0x60, 0x00), RegVal::Write(0x61, 0x80), RegVal::Write(0xfe, 0x01),
    RegVal::Write(0xb0, 0x48), RegVal::Write(0xb1, 0x01), RegVal::Write(0xb2, 0x00), RegVal::Write(0xb6, 0x00),
    RegVal::Write(0xfe, 0x02), RegVal::Write(0x01, 0x00), RegVal::Write(0x02, 0x01), RegVal::Write(0x03, 0x02),
    RegVal::Write(0x04, 0x03), RegVal::Write(0x05, 0x04), RegVal::Write(0x06, 0x05), RegVal::Write(0x07, 0x06),
    RegVal::Write(0x08, 0x0e), RegVal::Write(0x09, 0x16), RegVal::Write(0x0a, 0x1e), RegVal::Write(0x0b, 0x36),
    RegVal::Write(0x0c, 0x3e), RegVal::Write(0x0d, 0x56), RegVal::Write(0xfe, 0x02), RegVal::Write(0xb0, 0x00),
    RegVal::Write(0xb1, 0x00), RegVal::Write(0xb2, 0x00), RegVal::Write(0xb3, 0x11), RegVal::Write(0xb4, 0x22),
    RegVal::Write(0xb5, 0x54), RegVal::Write(0xb6, 0xb8), RegVal::Write(0xb7, 0x60), RegVal::Write(0xb9, 0x00),
    RegVal::Write(0xba, 0xc0), RegVal::Write(0xc0, 0x20), RegVal::Write(0xc1, 0x2d), RegVal::Write(0xc2, 0x40),
    RegVal::Write(0xc3, 0x5b), RegVal::Write(0xc4, 0x80), RegVal::Write(0xc5, 0xb5), RegVal::Write(0xc6, 0x00),
    RegVal::Write(0xc7, 0x6a), RegVal::Write(0xc8, 0x00), RegVal::Write(0xc9, 0xd4), RegVal::Write(0xca, 0x00),
    RegVal::Write(0xcb, 0xa8), RegVal::Write(0xcc, 0x00), RegVal::Write(0xcd, 0x50), RegVal::Write(0xce, 0x00),
    RegVal::Write(0xcf, 0xa1), RegVal::Write(0xfe, 0x02), RegVal::Write(0x54, 0xf7), RegVal::Write(0x55, 0xf0),
    RegVal::Write(0x56, 0x00), RegVal::Write(0x57, 0x00), RegVal::Write(0x58, 0x00), RegVal::Write(0x5a, 0x04),
    RegVal::Write(0xfe, 0x04), RegVal::Write(0x81, 0x8a), RegVal::Write(0xfe, 0x03), RegVal::Write(0x01, 0x00),
    RegVal::Write(0x02, 0x00), RegVal::Write(0x03, 0x00), RegVal::Write(0x10, 0x11), RegVal::Write(0x15, 0x00),
    RegVal::Write(0x40, 0x01), RegVal::Write(0x41, 0x00), RegVal::Write(0xfe, 0x00), RegVal::Write(0xf2, 0x0f),
];
