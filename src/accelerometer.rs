//! Driver for the NXP/Freescale MMA8452Q three-axis accelerometer
//!
//! The sensor provides 12-bit acceleration on three axes with selectable
//! range, output high-pass filtering, programmable axis offsets and an
//! auto-sleep power mode. After [`init()`] it samples at 800 Hz in the
//! high-resolution power scheme.
//!
//! [`init()`]: Mma8452qDriver::init

use device_driver::RegisterInterface;

use crate::registers::Mma8452q as RegisterDevice;
use crate::{ACCELEROMETER_ID, Error};

/// Measurement range of the acceleration output
///
/// The discriminants are the full-scale field codes from the data sheet
/// (XYZ_DATA_CFG bits 0..2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2 g
    G2 = 0,
    /// ±4 g
    G4 = 1,
    /// ±8 g
    G8 = 2,
}

impl AccelRange {
    /// Counts per g of the 12-bit output
    #[must_use]
    pub const fn counts_per_g(self) -> f32 {
        match self {
            Self::G2 => 1024.0,
            Self::G4 => 512.0,
            Self::G8 => 256.0,
        }
    }
}

/// High-pass filter cutoff frequency at the 800 Hz output data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelCutoff {
    /// 16 Hz
    Hz16 = 0,
    /// 8 Hz
    Hz8 = 1,
    /// 4 Hz
    Hz4 = 2,
    /// 2 Hz
    Hz2 = 3,
}

/// One complete acceleration sample, right-aligned 12-bit counts per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

impl AccelSample {
    /// Decode the six output register bytes (MSB first per axis)
    ///
    /// The output registers hold a 12-bit value left-justified in 16 bits
    /// so that byte-starved hosts can use the MSB alone. Recovering the
    /// true value takes a sign-extending shift of the MSB merged with the
    /// top nibble of the LSB.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn decode(raw: [u8; 6]) -> Self {
        let axis = |msb: u8, lsb: u8| (i16::from(msb as i8) << 4) | i16::from(lsb >> 4);
        Self {
            x: axis(raw[0], raw[1]),
            y: axis(raw[2], raw[3]),
            z: axis(raw[4], raw[5]),
        }
    }

    /// The byte image shipped to the host: low byte then high byte of the
    /// right-aligned value, per axis
    #[must_use]
    pub fn wire_bytes(&self) -> [u8; 6] {
        let [x_l, x_h] = self.x.to_le_bytes();
        let [y_l, y_h] = self.y.to_le_bytes();
        let [z_l, z_h] = self.z.to_le_bytes();
        [x_l, x_h, y_l, y_h, z_l, z_h]
    }

    /// Convert to gravities for the configured range
    #[must_use]
    pub fn to_g(&self, range: AccelRange) -> AccelG {
        let counts = range.counts_per_g();
        AccelG {
            x: f32::from(self.x) / counts,
            y: f32::from(self.y) / counts,
            z: f32::from(self.z) / counts,
        }
    }
}

/// Acceleration in gravities
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelG {
    /// X-axis acceleration in g
    pub x: f32,
    /// Y-axis acceleration in g
    pub y: f32,
    /// Z-axis acceleration in g
    pub z: f32,
}

impl AccelG {
    /// Magnitude of the acceleration vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Driver for the MMA8452Q
pub struct Mma8452qDriver<I> {
    device: RegisterDevice<I>,
}

impl<I> Mma8452qDriver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new driver instance
    ///
    /// Reads the identity register and refuses to construct a driver for
    /// anything that is not an MMA8452Q; no write reaches the bus before
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
        if who_am_i != ACCELEROMETER_ID {
            return Err(Error::InvalidDevice(who_am_i));
        }

        Ok(driver)
    }

    /// Initialize the sensor: reset, configure the default range and power
    /// schemes, and start sampling
    ///
    /// The part needs a short settle time after reset before registers can
    /// be accessed again; the reset bit is polled until it self-clears.
    ///
    /// # Errors
    ///
    /// Returns the first bus error, or [`Error::Timeout`] if the device
    /// does not come out of reset; the remaining steps are not attempted.
    pub fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.reset(delay)?;

        // Configuration registers only accept writes in standby
        self.standby()?;

        self.set_range(AccelRange::G2)?;

        // High resolution while awake, low power while asleep
        self.device.ctrl_reg_2().write(|w| {
            w.set_active_power_mode(0b10);
            w.set_sleep_power_mode(0b11);
        })?;

        self.resume()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("MMA8452Q up, ±2 g, high-resolution scheme");

        Ok(())
    }

    /// Set the measurement range
    ///
    /// The reduced-noise mode is only valid up to ±4 g, so it is coupled to
    /// the range here: enabled for ±2 g and ±4 g, disabled for ±8 g.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_range(&mut self, range: AccelRange) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_low_noise(!matches!(range, AccelRange::G8));
        })?;

        self.device.xyz_data_cfg().modify(|w| {
            w.set_full_scale(range as u8);
        })?;
        Ok(())
    }

    /// Drop into the sleep power scheme when no motion is seen for a while
    ///
    /// Independent of the active/standby transition; cleared by
    /// [`disable_sleep_on_inactivity()`](Self::disable_sleep_on_inactivity).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn enable_sleep_on_inactivity(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_2().modify(|w| {
            w.set_auto_sleep(true);
        })?;
        Ok(())
    }

    /// Stay in the active power scheme regardless of inactivity
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn disable_sleep_on_inactivity(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_2().modify(|w| {
            w.set_auto_sleep(false);
        })?;
        Ok(())
    }

    /// Output high-pass filtered data instead of raw data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn enable_high_pass_filter(&mut self) -> Result<(), Error<I::Error>> {
        self.device.xyz_data_cfg().modify(|w| {
            w.set_high_pass_output(true);
        })?;
        Ok(())
    }

    /// Output raw data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn disable_high_pass_filter(&mut self) -> Result<(), Error<I::Error>> {
        self.device.xyz_data_cfg().modify(|w| {
            w.set_high_pass_output(false);
        })?;
        Ok(())
    }

    /// Set the high-pass filter cutoff frequency
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_high_pass_cutoff(&mut self, cutoff: AccelCutoff) -> Result<(), Error<I::Error>> {
        self.device.hp_filter_cutoff().modify(|w| {
            w.set_cutoff(cutoff as u8);
        })?;
        Ok(())
    }

    /// Program the factory-trim correction offsets, one count per axis
    ///
    /// One multi-byte write covers all three offset registers. The device
    /// must be in [`standby()`](Self::standby) for the write to stick.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    #[allow(clippy::cast_sign_loss)]
    pub fn set_axis_offsets(&mut self, x: i8, y: i8, z: i8) -> Result<(), Error<I::Error>> {
        const OFF_X: u8 = 0x30;

        let offsets = [x as u8, y as u8, z as u8];
        self.device.interface.write_register(OFF_X, 24, &offsets)?;
        Ok(())
    }

    /// Power down the sampling hardware
    ///
    /// Required before range or offset changes; see the configuration
    /// mutators for which ones need it.
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
        Ok(self.device.status().read()?.xyz_data_ready())
    }

    /// Read the acceleration of all three axes
    ///
    /// All six bytes come from one burst transaction so every axis belongs
    /// to the same sample.
    ///
    /// # Errors
    ///
    /// Returns the bus error of the burst read; no partial sample is
    /// returned.
    pub fn read_sample(&mut self) -> Result<AccelSample, Error<I::Error>> {
        const OUT_X_MSB: u8 = 0x01;

        let mut raw = [0u8; 6];
        self.device
            .interface
            .read_register(OUT_X_MSB, 48, &mut raw)?;

        Ok(AccelSample::decode(raw))
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }

    fn reset<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        const MAX_WAIT_MS: u32 = 10;

        self.device.ctrl_reg_2().modify(|w| {
            w.set_reset(true);
        })?;

        // The reset bit self-clears once the reboot finished. Reads inside
        // the settle window may fail while the part is still rebooting.
        for _ in 0..MAX_WAIT_MS {
            delay.delay_ms(1);
            if self.device.ctrl_reg_2().read().is_ok_and(|reg| !reg.reset()) {
                return Ok(());
            }
        }

        Err(Error::Timeout)
    }
}
