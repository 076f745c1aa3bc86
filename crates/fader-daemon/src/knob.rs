//! ADS1015 volume knob driver
//!
//! The pot is read single-ended through an ADS1015 on the I2C bus: write
//! the config register to kick off a one-shot conversion, wait out the
//! conversion time, read the result back. Register words are big-endian on
//! the wire while Linux SMBus word transfers are little-endian, hence the
//! byte swaps.

use std::thread;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;

use fader_core::config::{CalibrationConfig, KnobConfig};
use fader_core::normalize::{percent_from_volts, volts_from_raw};

const REG_POINTER_CONVERT: u8 = 0x00;
const REG_POINTER_CONFIG: u8 = 0x01;

/// Start a single conversion
const CONFIG_OS_SINGLE: u16 = 0x8000;
/// Single-ended AIN0; channels 1-3 step by 0x1000
const CONFIG_MUX_SINGLE_0: u16 = 0x4000;
/// +/-4.096V range (gain 1)
const CONFIG_PGA_4_096V: u16 = 0x0200;
/// Power-down single-shot mode
const CONFIG_MODE_SINGLE: u16 = 0x0100;
/// 1600 samples per second
const CONFIG_DR_1600SPS: u16 = 0x0080;
/// Comparator disabled, non-latching, active-low, traditional
const CONFIG_COMP_DISABLED: u16 = 0x0003;

/// Worst-case single-shot conversion time at 1600 SPS, with margin.
const CONVERSION_DELAY: Duration = Duration::from_millis(8);

/// Build the config word for a one-shot single-ended read of `channel`.
fn single_ended_config(channel: u8) -> u16 {
    CONFIG_OS_SINGLE
        | (CONFIG_MUX_SINGLE_0 + (channel as u16) * 0x1000)
        | CONFIG_PGA_4_096V
        | CONFIG_MODE_SINGLE
        | CONFIG_DR_1600SPS
        | CONFIG_COMP_DISABLED
}

/// The physical volume knob.
pub struct Ads1015Knob {
    device: LinuxI2CDevice,
    config_word: u16,
    calibration: CalibrationConfig,
}

impl Ads1015Knob {
    /// Open the I2C bus. Fatal at startup if the bus or address is missing;
    /// once open, reads are expected to keep working for the process
    /// lifetime.
    pub fn open(knob: &KnobConfig, calibration: CalibrationConfig) -> Result<Self> {
        ensure!(
            knob.channel < 4,
            "ADS1015 input channel must be 0-3, got {}",
            knob.channel
        );

        let device = LinuxI2CDevice::new(&knob.i2c_bus, knob.address)
            .with_context(|| format!("cannot open {} at 0x{:02x}", knob.i2c_bus, knob.address))?;

        log::info!(
            "knob on {} address 0x{:02x} channel {}",
            knob.i2c_bus,
            knob.address,
            knob.channel
        );

        Ok(Self {
            device,
            config_word: single_ended_config(knob.channel),
            calibration,
        })
    }

    /// One blocking conversion, returned as a calibrated volume percent.
    pub fn read_percent(&mut self) -> Result<u8> {
        self.device
            .smbus_write_word_data(REG_POINTER_CONFIG, self.config_word.swap_bytes())
            .context("ADC config write failed")?;

        thread::sleep(CONVERSION_DELAY);

        let raw = self
            .device
            .smbus_read_word_data(REG_POINTER_CONVERT)
            .context("ADC conversion read failed")?
            .swap_bytes();

        let volts = volts_from_raw(raw, &self.calibration);
        Ok(percent_from_volts(volts, &self.calibration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_word_channel_zero() {
        // OS | MUX0 | PGA 4.096 | single-shot | 1600SPS | comparator off
        assert_eq!(single_ended_config(0), 0xC383);
    }

    #[test]
    fn test_config_word_steps_per_channel() {
        assert_eq!(single_ended_config(1), 0xD383);
        assert_eq!(single_ended_config(2), 0xE383);
        assert_eq!(single_ended_config(3), 0xF383);
    }
}
