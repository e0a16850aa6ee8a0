//! Driver for the NXP/Freescale MPL3115A2 barometric pressure sensor
//!
//! The sensor measures barometric pressure and die temperature, and can
//! convert pressure to altitude on-chip. This driver runs it in altimeter
//! mode: samples carry a signed 16-bit altitude with a 4-bit fraction and
//! a signed 8-bit temperature with a 4-bit fraction.

use device_driver::RegisterInterface;

use crate::interface::BusFault;
use crate::registers::Mpl3115a2 as RegisterDevice;
use crate::{BAROMETER_ID, Error};

/// Oversample ratio for the internal ADC
///
/// The discriminants are the oversample field codes (CTRL_REG1 bits 3..6);
/// each step doubles the sample count and the conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversample {
    /// 1 sample, 6 ms conversion
    X1 = 0,
    /// 2 samples
    X2 = 1,
    /// 4 samples
    X4 = 2,
    /// 8 samples
    X8 = 3,
    /// 16 samples
    X16 = 4,
    /// 32 samples
    X32 = 5,
    /// 64 samples
    X64 = 6,
    /// 128 samples, 512 ms conversion
    X128 = 7,
}

/// One complete altitude and temperature sample
///
/// The fractional bytes are 4-bit fixed point, already aligned to the low
/// nibble: a count of 1 is 1/16th of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaroSample {
    /// Altitude integer part in metres
    pub altitude: i16,
    /// Altitude fraction in 1/16 m
    pub altitude_frac: u8,
    /// Temperature integer part in °C
    pub temperature: i8,
    /// Temperature fraction in 1/16 °C
    pub temperature_frac: u8,
}

impl BaroSample {
    /// Decode the five output register bytes
    ///
    /// The altitude integer arrives big-endian (MSB, CSB); the fractional
    /// bytes carry their four bits in the high nibble and are shifted down
    /// here.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn decode(raw: [u8; 5]) -> Self {
        Self {
            altitude: i16::from_be_bytes([raw[0], raw[1]]),
            altitude_frac: raw[2] >> 4,
            temperature: raw[3] as i8,
            temperature_frac: raw[4] >> 4,
        }
    }

    /// The byte image shipped to the host: altitude low byte, high byte,
    /// altitude fraction, temperature, temperature fraction
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn wire_bytes(&self) -> [u8; 5] {
        let [alt_l, alt_h] = self.altitude.to_le_bytes();
        [
            alt_l,
            alt_h,
            self.altitude_frac,
            self.temperature as u8,
            self.temperature_frac,
        ]
    }

    /// Altitude in metres, fraction included
    #[must_use]
    pub fn altitude_meters(&self) -> f32 {
        f32::from(self.altitude) + f32::from(self.altitude_frac) / 16.0
    }

    /// Temperature in °C, fraction included
    #[must_use]
    pub fn temperature_celsius(&self) -> f32 {
        f32::from(self.temperature) + f32::from(self.temperature_frac) / 16.0
    }
}

/// Driver for the MPL3115A2
pub struct Mpl3115a2Driver<I> {
    device: RegisterDevice<I>,
}

impl<I> Mpl3115a2Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new driver instance
    ///
    /// Reads the identity register and refuses to construct a driver for
    /// anything that is not an MPL3115A2; no write reaches the bus before
    /// the identity check passes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] with the value actually read if the
    /// identity does not match, or the bus error if communication fails.
    pub fn new(interface: I) -> Result<Self, Error<I::Error>> {
        let mut driver = Self {
            device: RegisterDevice::new(interface),
        };

        let who_am_i = driver.device.who_am_i().read()?.who_am_i();
        if who_am_i != BAROMETER_ID {
            return Err(Error::InvalidDevice(who_am_i));
        }

        Ok(driver)
    }

    /// Initialize the sensor: reset, switch to altimeter mode and start
    /// sampling
    ///
    /// The part needs a settle time after reset; the reset bit is polled
    /// until it self-clears.
    ///
    /// # Errors
    ///
    /// Returns the first bus error, or [`Error::Timeout`] if the device
    /// does not come out of reset; the remaining steps are not attempted.
    pub fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
        I::Error: embedded_hal::i2c::Error,
    {
        self.reset(delay)?;

        self.standby()?;

        // Altitude output instead of raw pressure; applied in standby
        self.device.ctrl_reg_1().modify(|w| {
            w.set_altimeter_mode(true);
        })?;

        self.resume()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("MPL3115A2 up, altimeter mode");

        Ok(())
    }

    /// Set the ADC oversample ratio
    ///
    /// The device must be in [`standby()`](Self::standby) for the change to
    /// take effect.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_oversampling(&mut self, ratio: Oversample) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_oversample(ratio as u8);
        })?;
        Ok(())
    }

    /// Power down the sampling hardware
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn standby(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_active(false);
        })?;
        Ok(())
    }

    /// Resume sampling
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn resume(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_active(true);
        })?;
        Ok(())
    }

    /// Whether a complete new sample is waiting in the output registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn data_ready(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self
            .device
            .status()
            .read()?
            .pressure_temperature_data_ready())
    }

    /// Read altitude and temperature
    ///
    /// # Errors
    ///
    /// Aborts on the first failed byte and returns that error; no further
    /// bytes are attempted and no partial sample is returned.
    pub fn read_sample(&mut self) -> Result<BaroSample, Error<I::Error>> {
        const OUT_P_MSB: u8 = 0x01;

        // Sequential single-byte reads. The register auto-increment of this
        // part does not cooperate with buffered multi-byte reads, so each
        // byte is its own addressed transaction.
        let mut raw = [0u8; 5];
        for offset in 0..5u8 {
            let mut byte = [0u8; 1];
            self.device
                .interface
                .read_register(OUT_P_MSB + offset, 8, &mut byte)?;
            raw[usize::from(offset)] = byte[0];
        }

        Ok(BaroSample::decode(raw))
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }

    fn reset<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
        I::Error: embedded_hal::i2c::Error,
    {
        const MAX_WAIT_MS: u32 = 10;

        // The part reboots before it finishes acknowledging this write, so
        // a data-phase NACK from exactly this transaction means the reset
        // took. Anything else is a real fault. This quirk is specific to
        // the MPL3115A2; do not copy it to the other drivers.
        match self.device.ctrl_reg_1().modify(|w| {
            w.set_reset(true);
        }) {
            Ok(()) => {}
            Err(error) if BusFault::classify(&error) == BusFault::DataNotAcknowledged => {
                #[cfg(feature = "defmt")]
                defmt::debug!("MPL3115A2 reset NACK, expected");
            }
            Err(error) => return Err(Error::Bus(error)),
        }

        // The reset bit self-clears once the reboot finished. Reads inside
        // the settle window may fail while the part is still rebooting.
        for _ in 0..MAX_WAIT_MS {
            delay.delay_ms(1);
            if self.device.ctrl_reg_1().read().is_ok_and(|reg| !reg.reset()) {
                return Ok(());
            }
        }

        Err(Error::Timeout)
    }
}
