/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Frame timing arithmetic for frame rate changes.
//!
//! Frame rates are exchanged as `numerator << 16 | denominator`, so `25 << 16 | 2`
//! is 12.5 fps.

/// Pixel clock for both DVP and MIPI output
pub const PIXEL_CLOCK_HZ: u32 = 39_000_000;
pub const MAX_FPS: u32 = 30;
pub const MIN_FPS: u32 = 5;
/// Rate programmed by the startup tables
pub const DEFAULT_FPS: u32 = 25 << 16 | 1;

/// Lines of vertical overhead outside the window and blanking
const FRAME_OVERHEAD_LINES: u32 = 16;
/// Lines at the end of a frame that cannot be integrated
const INTEGRATION_MARGIN_LINES: u16 = 4;

/// Frame geometry the exposure loop needs to know about
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SensorTiming {
    /// Line length in pixel clocks
    pub total_width: u16,
    /// Frame length in lines
    pub total_height: u16,
    pub max_integration_time: u16,
    pub min_integration_time: u16,
    /// Frame rate, `num << 16 | den`
    pub fps: u32,
}

impl Default for SensorTiming {
    fn default() -> Self {
        Self {
            total_width: 1726,
            total_height: 903,
            max_integration_time: 903 - INTEGRATION_MARGIN_LINES,
            min_integration_time: 1,
            fps: DEFAULT_FPS,
        }
    }
}

impl SensorTiming {
    /// Timing after the frame length changed to `frame_length` lines
    pub fn with_frame_length(self, frame_length: u16, fps: u32) -> Self {
        Self {
            total_height: frame_length,
            max_integration_time: frame_length.saturating_sub(INTEGRATION_MARGIN_LINES),
            fps,
            ..self
        }
    }
}

/// Convert a `num << 16 | den` rate to 24.8 fixed point. `None` when the denominator is 0.
pub fn fps_to_q8(fps: u32) -> Option<u32> {
    let num = fps >> 16;
    let den = fps & 0xffff;
    if den == 0 {
        return None;
    }
    Some(((num / den) << 8) + (((num % den) << 8) / den))
}

/// Whether a rate lies within what the sensor can produce
pub fn fps_supported(fps: u32) -> bool {
    match fps_to_q8(fps) {
        Some(q8) => q8 >= MIN_FPS << 8 && q8 <= MAX_FPS << 8,
        None => false,
    }
}

/// Line length in pixel clocks from the blanking and window registers
pub fn line_length(hblank: u16, win_width: u16, sh_delay: u8) -> u32 {
    2 * (u32::from(hblank) + 16) + (u32::from(win_width) + u32::from(sh_delay)) / 2
}

/// Frame length in lines that yields `fps` at the given line length
pub fn frame_length(pixel_clock: u32, fps: u32, line_length: u32) -> Option<u32> {
    let num = u64::from(fps >> 16);
    let den = u64::from(fps & 0xffff);
    if num == 0 || line_length == 0 {
        return None;
    }
    let lines = u64::from(pixel_clock) * den / u64::from(line_length) / num;
    if lines > u64::from(u16::MAX) {
        None
    } else {
        Some(lines as u32)
    }
}

/// Vertical blanking that pads a window of `win_height` lines out to `frame_length`
pub fn vertical_blank(frame_length: u32, win_height: u16) -> Option<u16> {
    frame_length
        .checked_sub(u32::from(win_height) + FRAME_OVERHEAD_LINES)
        .map(|vb| vb as u16)
}
