//! Bus interface implementation shared by the three drivers
//!
//! This module provides the `device-driver` register interface over an
//! `embedded-hal` 1.0 I2C peripheral, plus the classification of transport
//! errors into the acknowledge phases the drivers care about.

use device_driver::RegisterInterface;
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use crate::{ACCELEROMETER_ADDRESS, BAROMETER_ADDRESS, GYROSCOPE_ADDRESS};

/// I2C interface bound to one device address on the shared bus
///
/// Every register transaction is a complete addressed transfer: reads issue
/// the register pointer and the read phase in one `write_read` call (the bus
/// is not released between the two), writes send the pointer and payload in
/// one write. The interface performs no locking; give each driver its own
/// shared-bus handle (e.g. `embedded_hal_bus::i2c::RefCellDevice`) and let
/// one caller poll the devices in sequence.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create an interface for the L3G4200D gyroscope (address 0x69)
    pub const fn gyroscope(i2c: I2C) -> Self {
        Self {
            i2c,
            address: GYROSCOPE_ADDRESS,
        }
    }

    /// Create an interface for the MMA8452Q accelerometer (address 0x1D)
    pub const fn accelerometer(i2c: I2C) -> Self {
        Self {
            i2c,
            address: ACCELEROMETER_ADDRESS,
        }
    }

    /// Create an interface for the MPL3115A2 barometer (address 0x60)
    pub const fn barometer(i2c: I2C) -> Self {
        Self {
            i2c,
            address: BAROMETER_ADDRESS,
        }
    }

    /// Create an interface with a custom device address
    ///
    /// For the standard deck wiring prefer [`gyroscope()`](Self::gyroscope),
    /// [`accelerometer()`](Self::accelerometer) or
    /// [`barometer()`](Self::barometer).
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The device address this interface talks to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        // Register pointer + payload in one transaction
        let mut buffer = [0u8; 9]; // 1 address + up to 8 data bytes
        buffer[0] = address;
        let len = write_data.len().min(8);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}

/// Which phase of a transaction the bus fault occurred in
///
/// The drivers mostly propagate transport errors untouched, but the
/// MPL3115A2 reset path needs to tell a data-phase NACK apart from an
/// absent device, and the distinction is worth having in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusFault {
    /// The device did not acknowledge its address
    AddressNotAcknowledged,
    /// The device stopped acknowledging during the data phase
    DataNotAcknowledged,
    /// Any other transport-level failure
    Other,
}

impl BusFault {
    /// Classify a HAL error by its acknowledge phase
    ///
    /// A `NoAcknowledge` with an unknown source is treated as a data-phase
    /// NACK: an addressed device that stops responding mid-transfer is the
    /// only case the drivers single out.
    pub fn classify<E: embedded_hal::i2c::Error>(error: &E) -> Self {
        match error.kind() {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => Self::AddressNotAcknowledged,
            ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Data | NoAcknowledgeSource::Unknown,
            ) => Self::DataNotAcknowledged,
            _ => Self::Other,
        }
    }
}
