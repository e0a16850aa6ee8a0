//! Driver for the ST L3G4200D three-axis gyroscope
//!
//! The sensor hosts high- and low-pass output filtering, power management
//! and a selectable measurement range. Output is the angular rate around
//! each of its three axes, sampled at 800 Hz after [`init()`].
//!
//! [`init()`]: L3g4200dDriver::init

use device_driver::RegisterInterface;

use crate::registers::L3g4200d as RegisterDevice;
use crate::{Error, GYROSCOPE_ID};

/// Measurement range of the rate output
///
/// The discriminants are the full-scale field codes from the data sheet;
/// they land in CTRL_REG4 bits 4..6 (register bytes 0x00, 0x10, 0x20).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    /// ±200 °/s
    Dps200 = 0,
    /// ±500 °/s
    Dps500 = 1,
    /// ±2000 °/s
    Dps2000 = 2,
}

impl GyroRange {
    /// Typical sensitivity in °/s per LSB
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Dps200 => 0.00875,
            Self::Dps500 => 0.0175,
            Self::Dps2000 => 0.07,
        }
    }
}

/// Low-pass bandwidth relative to the high-pass cutoff
///
/// The bandwidth is the difference between the low-pass and high-pass
/// cutoff frequencies at the 800 Hz output data rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroBandwidth {
    /// 30 Hz
    Hz30 = 0,
    /// 35 Hz
    Hz35 = 1,
    /// 50 Hz
    Hz50 = 2,
    /// 110 Hz
    Hz110 = 3,
}

/// High-pass filter cutoff frequency at the 800 Hz output data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroCutoff {
    /// 56 Hz
    Hz56 = 0,
    /// 30 Hz
    Hz30 = 1,
    /// 15 Hz
    Hz15 = 2,
    /// 8 Hz
    Hz8 = 3,
    /// 4 Hz
    Hz4 = 4,
    /// 2 Hz
    Hz2 = 5,
    /// 1 Hz
    Hz1 = 6,
    /// 0.5 Hz
    Hz0_5 = 7,
    /// 0.2 Hz
    Hz0_2 = 8,
    /// 0.1 Hz
    Hz0_1 = 9,
}

/// One complete rate sample, raw counts per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroSample {
    /// X-axis rate (raw)
    pub x: i16,
    /// Y-axis rate (raw)
    pub y: i16,
    /// Z-axis rate (raw)
    pub z: i16,
}

impl GyroSample {
    /// Decode the six output register bytes (low byte first per axis)
    #[must_use]
    pub fn decode(raw: [u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([raw[0], raw[1]]),
            y: i16::from_le_bytes([raw[2], raw[3]]),
            z: i16::from_le_bytes([raw[4], raw[5]]),
        }
    }

    /// The byte image shipped to the host: low byte then high byte per axis
    #[must_use]
    pub fn wire_bytes(&self) -> [u8; 6] {
        let [x_l, x_h] = self.x.to_le_bytes();
        let [y_l, y_h] = self.y.to_le_bytes();
        let [z_l, z_h] = self.z.to_le_bytes();
        [x_l, x_h, y_l, y_h, z_l, z_h]
    }

    /// Convert to degrees per second for the configured range
    #[must_use]
    pub fn to_dps(&self, range: GyroRange) -> GyroRateDps {
        let sensitivity = range.sensitivity();
        GyroRateDps {
            x: f32::from(self.x) * sensitivity,
            y: f32::from(self.y) * sensitivity,
            z: f32::from(self.z) * sensitivity,
        }
    }
}

/// Angular rate in degrees per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroRateDps {
    /// X-axis rate in °/s
    pub x: f32,
    /// Y-axis rate in °/s
    pub y: f32,
    /// Z-axis rate in °/s
    pub z: f32,
}

impl GyroRateDps {
    /// Magnitude of the rate vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Driver for the L3G4200D
pub struct L3g4200dDriver<I> {
    device: RegisterDevice<I>,
}

impl<I> L3g4200dDriver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new driver instance
    ///
    /// Reads the identity register and refuses to construct a driver for
    /// anything that is not an L3G4200D; no write reaches the bus before
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
        if who_am_i != GYROSCOPE_ID {
            return Err(Error::InvalidDevice(who_am_i));
        }

        Ok(driver)
    }

    /// Initialize the sensor: reboot, configure the 800 Hz data rate and
    /// start sampling
    ///
    /// The part needs no settle time after a reboot; the register readback
    /// that applies the data rate synchronizes with it naturally.
    ///
    /// # Errors
    ///
    /// Returns the first bus error; the remaining steps are not attempted.
    pub fn init(&mut self) -> Result<(), Error<I::Error>> {
        self.standby()?;

        // Reboot memory content; the bit clears itself
        self.device.ctrl_reg_5().write(|w| {
            w.set_reboot(true);
        })?;

        // Maximum output data rate, other CTRL_REG1 bits preserved
        self.device.ctrl_reg_1().modify(|w| {
            w.set_output_data_rate(0b11);
        })?;

        self.resume()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("L3G4200D up, 800 Hz output data rate");

        Ok(())
    }

    /// Set the measurement range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_range(&mut self, range: GyroRange) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_4().modify(|w| {
            w.set_full_scale(range as u8);
        })?;
        Ok(())
    }

    /// Power down the sampling hardware when no data is requested for a
    /// short period
    ///
    /// Independent of the active/standby transition; cleared by
    /// [`disable_sleep()`](Self::disable_sleep).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn enable_sleep(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_x_enable(false);
            w.set_y_enable(false);
            w.set_z_enable(false);
        })?;
        Ok(())
    }

    /// Keep all axes sampling for responsive output at the cost of power
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn disable_sleep(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_x_enable(true);
            w.set_y_enable(true);
            w.set_z_enable(true);
        })?;
        Ok(())
    }

    /// Route the high-pass filter into the output chain
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn enable_high_pass_filter(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_5().modify(|w| {
            w.set_high_pass_enable(true);
            w.set_out_sel_high_pass(true);
        })?;
        Ok(())
    }

    /// Take the high-pass filter out of the output chain
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn disable_high_pass_filter(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_5().modify(|w| {
            w.set_high_pass_enable(false);
            w.set_out_sel_high_pass(false);
        })?;
        Ok(())
    }

    /// Set the high-pass filter cutoff frequency
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_high_pass_cutoff(&mut self, cutoff: GyroCutoff) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_2().modify(|w| {
            w.set_high_pass_cutoff(cutoff as u8);
        })?;
        Ok(())
    }

    /// Route the second low-pass filter into the output chain
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn enable_low_pass_filter(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_5().modify(|w| {
            w.set_out_sel_low_pass(true);
        })?;
        Ok(())
    }

    /// Take the second low-pass filter out of the output chain
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn disable_low_pass_filter(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_5().modify(|w| {
            w.set_out_sel_low_pass(false);
        })?;
        Ok(())
    }

    /// Set the low-pass bandwidth relative to the high-pass cutoff
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_low_pass_bandwidth(
        &mut self,
        bandwidth: GyroBandwidth,
    ) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_bandwidth(bandwidth as u8);
        })?;
        Ok(())
    }

    /// Whether a complete new sample is waiting in the output registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn data_ready(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.status_reg().read()?.xyz_data_ready())
    }

    /// Read the rotational rate of all three axes
    ///
    /// # Errors
    ///
    /// Aborts on the first failed byte and returns that error; no further
    /// bytes are attempted and no partial sample is returned.
    pub fn read_sample(&mut self) -> Result<GyroSample, Error<I::Error>> {
        const OUT_X_L: u8 = 0x28;

        // Sequential single-byte reads. The register auto-increment of this
        // part does not cooperate with buffered multi-byte reads, so each
        // byte is its own addressed transaction.
        let mut raw = [0u8; 6];
        for offset in 0..6u8 {
            let mut byte = [0u8; 1];
            self.device
                .interface
                .read_register(OUT_X_L + offset, 8, &mut byte)?;
            raw[usize::from(offset)] = byte[0];
        }

        Ok(GyroSample::decode(raw))
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }

    fn standby(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_power_up(false);
        })?;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_power_up(true);
        })?;
        Ok(())
    }
}
