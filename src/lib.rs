/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/
#![no_std]

//! Configuration driver for the GalaxyCore GC1054 image sensor
//! This 1280x720 imaging sensor has multiple interfaces:
//! - Two-wire i2c for configuration registers (i2c)
//! - pixel data out, either parallel (DVP) or single-lane MIPI
//! - reset and power-down pins
//! This driver is concerned with the i2c interface and the control pins.
//!
//! Exposure control arrives from an ISP as a log2-domain gain; the [`gain`] module
//! maps that onto the sensor's banded analog gain registers.

#[cfg(feature = "rttdebug")]
use panic_rtt_core::rprintln;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

pub mod fixed;
pub mod gain;
pub mod regs;
pub mod timing;


pub use gain::{AnalogGain, GainLadder, Resolution, GC1054_LADDER};
pub use timing::SensorTiming;

use regs::{GeneralRegisters, Page, Page0Registers, Page1Registers, RegVal};

/// Errors in this crate
#[derive(Debug)]
pub enum Error<CommE> {
    /// Sensor communication error
    Comm(CommE),

    /// Reset or power-down pin could not be driven
    Pin,

    /// The device at this address is not a GC1054
    UnknownChipId,

    /// Requested frame rate is outside what the sensor can produce
    UnsupportedFps,
}

/// 7-bit i2c address of the sensor
pub const DEFAULT_I2C_ADDRESS: u8 = 0x21;

/// Value of the chip id registers
pub const CHIP_ID: u16 = 0x1054;

// Active window as programmed by the startup tables
pub const MAX_FRAME_HEIGHT: u16 = 720;
pub const MAX_FRAME_WIDTH: u16 = 1280;

/// Pixel data interface, which selects the startup register table
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DataInterface {
    Dvp,
    Mipi,
}

impl DataInterface {
    pub fn init_table(self) -> &'static [RegVal] {
        match self {
            DataInterface::Dvp => regs::INIT_1280X720_DVP,
            DataInterface::Mipi => regs::INIT_1280X720_MIPI,
        }
    }
}

/// Main driver struct
pub struct Gc1054<I2C> {
    base_address: u8,
    i2c: I2C,
    interface: DataInterface,
    timing: SensorTiming,
}

impl<I2C, CommE> Gc1054<I2C>
where
    I2C: embedded_hal::blocking::i2c::Write<Error = CommE>
        + embedded_hal::blocking::i2c::Read<Error = CommE>
        + embedded_hal::blocking::i2c::WriteRead<Error = CommE>,
{
    /// Create a new instance with an i2c address:
    /// May use DEFAULT_I2C_ADDRESS if in doubt.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            base_address: address,
            i2c,
            interface: DataInterface::Mipi,
            timing: SensorTiming::default(),
        }
    }

    pub fn default(i2c: I2C) -> Self {
        Self::new(i2c, DEFAULT_I2C_ADDRESS)
    }

    /// Give back the i2c bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Frame geometry as of the last setup or frame rate change
    pub fn timing(&self) -> SensorTiming {
        self.timing
    }

    pub fn interface(&self) -> DataInterface {
        self.interface
    }

    /// Pulse the active-low reset pin: high 20 ms, low 20 ms, then high and settle 10 ms
    pub fn hard_reset<P>(
        &mut self,
        reset: &mut P,
        delay: &mut impl DelayMs<u32>,
    ) -> Result<(), crate::Error<CommE>>
    where
        P: OutputPin,
    {
        reset.set_high().map_err(|_| Error::Pin)?;
        delay.delay_ms(20);
        reset.set_low().map_err(|_| Error::Pin)?;
        delay.delay_ms(20);
        reset.set_high().map_err(|_| Error::Pin)?;
        delay.delay_ms(10);
        Ok(())
    }

    /// Bring the sensor out of power-down: pwdn high 10 ms, then low and settle 10 ms
    pub fn power_up<P>(
        &mut self,
        pwdn: &mut P,
        delay: &mut impl DelayMs<u32>,
    ) -> Result<(), crate::Error<CommE>>
    where
        P: OutputPin,
    {
        pwdn.set_high().map_err(|_| Error::Pin)?;
        delay.delay_ms(10);
        pwdn.set_low().map_err(|_| Error::Pin)?;
        delay.delay_ms(10);
        Ok(())
    }

    /// Verify the chip id. Returns the id on success.
    pub fn probe(&mut self) -> Result<u16, crate::Error<CommE>> {
        let high = self.read_reg_u8(GeneralRegisters::ChipIdHigh as u8)?;
        #[cfg(feature = "rttdebug")]
        rprintln!("gc1054 chip id high 0x{:02x}", high);
        if high != (CHIP_ID >> 8) as u8 {
            return Err(Error::UnknownChipId);
        }
        let low = self.read_reg_u8(GeneralRegisters::ChipIdLow as u8)?;
        #[cfg(feature = "rttdebug")]
        rprintln!("gc1054 chip id low 0x{:02x}", low);
        if low != (CHIP_ID & 0xff) as u8 {
            return Err(Error::UnknownChipId);
        }
        Ok(CHIP_ID)
    }

    /// Load the startup registers for the given data interface.
    /// Leaves the sensor at 1280x720, 25 fps.
    pub fn setup(
        &mut self,
        interface: DataInterface,
        delay: &mut impl DelayMs<u32>,
    ) -> Result<(), crate::Error<CommE>> {
        #[cfg(feature = "rttdebug")]
        rprintln!("gc1054-i2c setup start {:?}", interface);

        self.write_table(interface.init_table(), delay)?;
        self.interface = interface;
        self.timing = SensorTiming::default();

        #[cfg(feature = "rttdebug")]
        rprintln!("gc1054-i2c setup done");
        Ok(())
    }

    /// Write a register table in order
    pub fn write_table(
        &mut self,
        table: &[RegVal],
        delay: &mut impl DelayMs<u32>,
    ) -> Result<(), crate::Error<CommE>> {
        for entry in table {
            match *entry {
                RegVal::Write(reg, val) => self.write_reg_u8(reg, val)?,
                RegVal::Delay(ms) => delay.delay_ms(u32::from(ms)),
            }
        }
        Ok(())
    }

    /// Select which page registers below 0xf0 address
    pub fn select_page(&mut self, page: Page) -> Result<(), crate::Error<CommE>> {
        self.write_reg_u8(GeneralRegisters::PageSelect as u8, page as u8)
    }

    /// Exposure time in lines
    pub fn set_integration_time(
        &mut self,
        lines: u16,
    ) -> Result<(), crate::Error<CommE>> {
        self.write_reg_u8(Page0Registers::ExposureLow as u8, (lines & 0xff) as u8)?;
        self.write_reg_u8(
            Page0Registers::ExposureHigh as u8,
            ((lines & 0x1f00) >> 8) as u8,
        )?;
        Ok(())
    }

    /// Program an analog gain setting, then return to the timing page
    pub fn set_analog_gain(
        &mut self,
        setting: AnalogGain,
    ) -> Result<(), crate::Error<CommE>> {
        #[cfg(feature = "rttdebug")]
        rprintln!("gc1054 again 0x{:04x}", setting.packed());

        self.select_page(Page::Gain)?;
        self.write_reg_u8(Page1Registers::GainBand as u8, setting.band & 0x0f)?;
        self.write_reg_u8(Page1Registers::GainCoarse as u8, setting.coarse & 0x0f)?;
        self.write_reg_u8(Page1Registers::GainFine as u8, (setting.fine & 0x3f) << 2)?;
        self.select_page(Page::Timing)
    }

    /// Apply an ISP log2-domain gain with `shift` fractional bits.
    /// Returns the gain actually applied, in the same format.
    /// Shifts above [`gain::MAX_LOG2_SHIFT`] are treated as that maximum.
    pub fn apply_isp_gain(
        &mut self,
        isp_gain: u32,
        shift: u32,
    ) -> Result<u32, crate::Error<CommE>> {
        let (applied, setting) = GC1054_LADDER.resolve_log(isp_gain, shift);
        self.set_analog_gain(setting)?;
        Ok(applied)
    }

    /// Change the frame rate by stretching vertical blanking.
    /// `fps` is `numerator << 16 | denominator`.
    pub fn set_fps(&mut self, fps: u32) -> Result<(), crate::Error<CommE>> {
        if !timing::fps_supported(fps) {
            #[cfg(feature = "rttdebug")]
            rprintln!("gc1054 fps 0x{:08x} outside {}..={}", fps, timing::MIN_FPS, timing::MAX_FPS);
            return Err(Error::UnsupportedFps);
        }

        let hblank = self.read_reg_u16(Page0Registers::HBlankHigh as u8)?;
        let win_width = self.read_reg_u16(Page0Registers::WinWidthHigh as u8)?;
        let sh_delay = self.read_reg_u8(Page0Registers::ShDelay as u8)?;
        let win_height = self.read_reg_u16(Page0Registers::WinHeightHigh as u8)?;

        let line_length = timing::line_length(hblank, win_width, sh_delay);
        let frame_length = timing::frame_length(timing::PIXEL_CLOCK_HZ, fps, line_length)
            .ok_or(Error::UnsupportedFps)?;
        let vblank =
            timing::vertical_blank(frame_length, win_height).ok_or(Error::UnsupportedFps)?;

        self.write_reg_u8(Page0Registers::VBlankLow as u8, (vblank & 0xff) as u8)?;
        self.write_reg_u8(Page0Registers::VBlankHigh as u8, (vblank >> 8) as u8)?;

        self.timing = self.timing.with_frame_length(frame_length as u16, fps);
        #[cfg(feature = "rttdebug")]
        rprintln!("gc1054 vts {} vb {}", frame_length, vblank);
        Ok(())
    }

    /// Read a u8 from an 8-bit address
    pub fn read_reg_u8(&mut self, reg: u8) -> Result<u8, crate::Error<CommE>> {
        let cmd_buf = [reg];
        let mut recv_buf = [0u8];
        self.i2c
            .write_read(self.base_address, &cmd_buf, &mut recv_buf)
            .map_err(Error::Comm)?;
        Ok(recv_buf[0])
    }

    /// Read a u16 stored high byte first in `reg` and `reg + 1`
    pub fn read_reg_u16(
        &mut self,
        reg: u8,
    ) -> Result<u16, crate::Error<CommE>> {
        let upper = (self.read_reg_u8(reg)? as u16) << 8;
        let lower = self.read_reg_u8(reg.wrapping_add(1))? as u16;
        Ok(upper | lower)
    }

    /// Write a u8 to an 8-bit address
    pub fn write_reg_u8(
        &mut self,
        reg: u8,
        val: u8,
    ) -> Result<(), crate::Error<CommE>> {
        let write_buf = [reg, val];
        self.i2c
            .write(self.base_address, &write_buf)
            .map_err(Error::Comm)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use crate::fixed::LOG2_GAIN_SHIFT;
    use crate::test::*;
    use crate::*;

    fn create_gc1054() -> Gc1054<MockSensorBus> {
        // non default address, so nothing relies on the constant
        let address = 0x37;
        Gc1054::new(MockSensorBus::gc1054_at_address(address), address)
    }

    fn setup_gc1054(interface: DataInterface) -> Gc1054<MockSensorBus> {
        let mut cam = create_gc1054();
        let mut delay = MockDelay::default();
        cam.setup(interface, &mut delay).unwrap();
        cam
    }

    #[test]
    fn probe_accepts_gc1054() {
        let mut cam = create_gc1054();
        assert_eq!(cam.probe().unwrap(), CHIP_ID);
    }

    #[test]
    fn probe_rejects_other_chips() {
        let mut bus = MockSensorBus::gc1054_at_address(0x37);
        bus.set_reg(0, GeneralRegisters::ChipIdLow as u8, 0x64);
        let mut cam = Gc1054::new(bus, 0x37);
        assert!(matches!(cam.probe(), Err(Error::UnknownChipId)));
    }

    #[test]
    fn bus_errors_surface_as_comm() {
        let mut cam = Gc1054::new(MockSensorBus::gc1054_at_address(0x37), 0x21);
        assert!(matches!(cam.probe(), Err(Error::Comm(MockBusError::Nack))));
        assert!(matches!(
            cam.set_analog_gain(GainLadder::min_setting()),
            Err(Error::Comm(MockBusError::Nack))
        ));
    }

    #[test]
    fn reset_sequence() {
        let mut cam = create_gc1054();
        let mut pin = MockPin::default();
        let mut delay = MockDelay::default();
        cam.hard_reset(&mut pin, &mut delay).unwrap();
        assert_eq!(pin.levels, [true, false, true]);
        assert_eq!(delay.delays, [20, 20, 10]);

        let mut pwdn = MockPin::default();
        let mut delay = MockDelay::default();
        cam.power_up(&mut pwdn, &mut delay).unwrap();
        assert_eq!(pwdn.levels, [true, false]);
        assert_eq!(delay.delays, [10, 10]);
    }

    #[test]
    fn broken_pin_is_reported() {
        let mut cam = create_gc1054();
        let mut pin = MockPin {
            broken: true,
            ..MockPin::default()
        };
        let mut delay = MockDelay::default();
        assert!(matches!(
            cam.hard_reset(&mut pin, &mut delay),
            Err(Error::Pin)
        ));
    }

    #[test]
    fn setup_writes_whole_table() {
        for &interface in [DataInterface::Mipi, DataInterface::Dvp].iter() {
            let cam = setup_gc1054(interface);
            assert_eq!(cam.interface(), interface);
            assert_eq!(cam.timing(), SensorTiming::default());
            let bus = cam.release();
            assert_eq!(bus.writes().len(), interface.init_table().len());
            assert_eq!(bus.current_page(), Page::Timing as u8);
            // window height and width
            assert_eq!(bus.reg(0, Page0Registers::WinHeightHigh as u8), 0x02);
            assert_eq!(bus.reg(0, Page0Registers::WinHeightLow as u8), 0xd4);
            assert_eq!(bus.reg(0, Page0Registers::WinWidthHigh as u8), 0x05);
            assert_eq!(bus.reg(0, Page0Registers::WinWidthLow as u8), 0x08);
        }
    }

    #[test]
    fn table_delays_use_delay_source() {
        let mut cam = create_gc1054();
        let mut delay = MockDelay::default();
        let table = [
            RegVal::Write(0xfe, 0x80),
            RegVal::Delay(5),
            RegVal::Write(0xfe, 0x00),
        ];
        cam.write_table(&table, &mut delay).unwrap();
        assert_eq!(delay.delays, [5]);
        assert_eq!(cam.release().writes(), &[(0, 0xfe, 0x80), (0, 0xfe, 0x00)]);
    }

    #[test]
    fn integration_time_split_across_registers() {
        let mut cam = create_gc1054();
        cam.set_integration_time(0x1234).unwrap();
        let bus = cam.release();
        assert_eq!(bus.writes(), &[(0, 0x04, 0x34), (0, 0x03, 0x12)]);
    }

    #[test]
    fn analog_gain_register_sequence() {
        let mut cam = create_gc1054();
        let setting = AnalogGain {
            band: 8,
            coarse: 3,
            fine: 50,
        };
        cam.set_analog_gain(setting).unwrap();
        let bus = cam.release();
        assert_eq!(
            bus.writes(),
            &[
                (0, 0xfe, 0x01),
                (1, 0xb6, 0x08),
                (1, 0xb1, 0x03),
                (1, 0xb2, 50 << 2),
                (1, 0xfe, 0x00),
            ]
        );
        assert_eq!(bus.current_page(), 0);
    }

    #[test]
    fn isp_gain_applies_resolved_setting() {
        let mut cam = setup_gc1054(DataInterface::Mipi);
        // 2.0x lands in the 1.99x band
        let applied = cam.apply_isp_gain(1 << LOG2_GAIN_SHIFT, LOG2_GAIN_SHIFT).unwrap();
        assert!(applied <= 1 << LOG2_GAIN_SHIFT);
        let (expected, setting) = GC1054_LADDER.resolve_log(1 << LOG2_GAIN_SHIFT, LOG2_GAIN_SHIFT);
        assert_eq!(applied, expected);
        let bus = cam.release();
        assert_eq!(bus.reg(1, Page1Registers::GainBand as u8), 2);
        assert_eq!(bus.reg(1, Page1Registers::GainCoarse as u8), setting.coarse);
        assert_eq!(bus.reg(1, Page1Registers::GainFine as u8), setting.fine << 2);
    }

    #[test]
    fn isp_gain_above_range_clamps() {
        let mut cam = create_gc1054();
        let applied = cam.apply_isp_gain(12 << LOG2_GAIN_SHIFT, LOG2_GAIN_SHIFT).unwrap();
        assert_eq!(applied, GC1054_LADDER.max_gain_log(LOG2_GAIN_SHIFT));
        let bus = cam.release();
        assert_eq!(bus.reg(1, Page1Registers::GainBand as u8), 8);
        assert_eq!(bus.reg(1, Page1Registers::GainCoarse as u8), 0x0f);
        assert_eq!(bus.reg(1, Page1Registers::GainFine as u8), 0x3f << 2);
    }

    #[test]
    fn isp_gain_with_oversized_shift_is_clamped() {
        let mut cam = create_gc1054();
        let applied = cam.apply_isp_gain(1 << 30, 40).unwrap();
        assert_eq!(applied, GC1054_LADDER.max_gain_log(gain::MAX_LOG2_SHIFT));
        let bus = cam.release();
        assert_eq!(bus.reg(1, Page1Registers::GainBand as u8), 8);
        assert_eq!(bus.reg(1, Page1Registers::GainCoarse as u8), 0x0f);
    }

    #[test]
    fn fps_change_rewrites_vertical_blank() {
        let cam = setup_gc1054(DataInterface::Mipi);
        let mut bus = cam.release();
        bus.set_reg(0, Page0Registers::ShDelay as u8, 24);
        bus.clear_writes();
        let mut cam = Gc1054::new(bus, 0x37);

        cam.set_fps(15 << 16 | 1).unwrap();
        let timing = cam.timing();
        assert_eq!(timing.total_height, 1506);
        assert_eq!(timing.max_integration_time, 1502);
        assert_eq!(timing.fps, 15 << 16 | 1);

        // 1506 - 724 - 16
        let bus = cam.release();
        assert_eq!(bus.writes(), &[(0, 0x08, 0xfe), (0, 0x07, 0x02)]);
    }

    #[test]
    fn fps_out_of_range_is_rejected() {
        let mut cam = setup_gc1054(DataInterface::Dvp);
        assert!(matches!(cam.set_fps(31 << 16 | 1), Err(Error::UnsupportedFps)));
        assert!(matches!(cam.set_fps(4 << 16 | 1), Err(Error::UnsupportedFps)));
        assert!(matches!(cam.set_fps(25 << 16), Err(Error::UnsupportedFps)));
        assert_eq!(cam.timing(), SensorTiming::default());
    }
}
