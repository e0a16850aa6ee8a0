//! Unit tests for read-modify-write field updates
//!
//! Every configuration mutator must leave the bits outside its field
//! untouched, and the code bytes it produces must match the data sheets
//! bit for bit.

use crate::common::{accelerometer_driver, barometer_driver, gyroscope_driver};
use sensor_deck::{AccelCutoff, AccelRange, GyroBandwidth, GyroCutoff, GyroRange, Oversample};

const GYRO_CTRL_REG1: u8 = 0x20;
const GYRO_CTRL_REG2: u8 = 0x21;
const GYRO_CTRL_REG4: u8 = 0x23;
const GYRO_CTRL_REG5: u8 = 0x24;
const ACCEL_XYZ_DATA_CFG: u8 = 0x0E;
const ACCEL_HP_FILTER_CUTOFF: u8 = 0x0F;
const ACCEL_CTRL_REG1: u8 = 0x2A;
const ACCEL_CTRL_REG2: u8 = 0x2B;
const BARO_CTRL_REG1: u8 = 0x26;

#[test]
fn test_gyro_range_preserves_untouched_bits() {
    let (mut driver, interface) = gyroscope_driver();

    // Junk in every bit outside the full-scale field (bits 4..6)
    interface.set_register(GYRO_CTRL_REG4, 0b1000_1111);
    driver.set_range(GyroRange::Dps500).unwrap();

    assert_eq!(
        interface.get_register(GYRO_CTRL_REG4),
        (0b1000_1111 & !0x30) | 0x10
    );
}

#[test]
fn test_gyro_range_code_bytes() {
    let (mut driver, interface) = gyroscope_driver();

    for (range, byte) in [
        (GyroRange::Dps200, 0x00),
        (GyroRange::Dps500, 0x10),
        (GyroRange::Dps2000, 0x20),
    ] {
        interface.set_register(GYRO_CTRL_REG4, 0x00);
        driver.set_range(range).unwrap();
        assert_eq!(interface.get_register(GYRO_CTRL_REG4), byte);
    }
}

#[test]
fn test_gyro_bandwidth_code_bytes() {
    let (mut driver, interface) = gyroscope_driver();

    for (bandwidth, byte) in [
        (GyroBandwidth::Hz110, 0x30),
        (GyroBandwidth::Hz50, 0x20),
        (GyroBandwidth::Hz35, 0x10),
        (GyroBandwidth::Hz30, 0x00),
    ] {
        interface.set_register(GYRO_CTRL_REG1, 0x00);
        driver.set_low_pass_bandwidth(bandwidth).unwrap();
        assert_eq!(interface.get_register(GYRO_CTRL_REG1), byte);
    }
}

#[test]
fn test_gyro_bandwidth_preserves_rate_and_power_bits() {
    let (mut driver, interface) = gyroscope_driver();

    // 800 Hz rate + power-up + all axes, bandwidth zeroed
    interface.set_register(GYRO_CTRL_REG1, 0xCF);
    driver.set_low_pass_bandwidth(GyroBandwidth::Hz110).unwrap();
    assert_eq!(interface.get_register(GYRO_CTRL_REG1), 0xFF);
}

#[test]
fn test_gyro_cutoff_preserves_mode_bits() {
    let (mut driver, interface) = gyroscope_driver();

    interface.set_register(GYRO_CTRL_REG2, 0b0010_0000);
    driver.set_high_pass_cutoff(GyroCutoff::Hz0_1).unwrap();
    assert_eq!(interface.get_register(GYRO_CTRL_REG2), 0b0010_1001);
}

#[test]
fn test_gyro_filter_routing_bit_patterns() {
    let (mut driver, interface) = gyroscope_driver();

    interface.set_register(GYRO_CTRL_REG5, 0x00);
    driver.enable_high_pass_filter().unwrap();
    assert_eq!(interface.get_register(GYRO_CTRL_REG5), 0x11);

    driver.enable_low_pass_filter().unwrap();
    assert_eq!(interface.get_register(GYRO_CTRL_REG5), 0x13);

    driver.disable_high_pass_filter().unwrap();
    assert_eq!(interface.get_register(GYRO_CTRL_REG5), 0x02);

    driver.disable_low_pass_filter().unwrap();
    assert_eq!(interface.get_register(GYRO_CTRL_REG5), 0x00);
}

#[test]
fn test_gyro_sleep_clears_only_axis_enables() {
    let (mut driver, interface) = gyroscope_driver();

    interface.set_register(GYRO_CTRL_REG1, 0xCF);
    driver.enable_sleep().unwrap();
    assert_eq!(interface.get_register(GYRO_CTRL_REG1), 0xC8);

    driver.disable_sleep().unwrap();
    assert_eq!(interface.get_register(GYRO_CTRL_REG1), 0xCF);
}

#[test]
fn test_accel_range_code_bytes() {
    let (mut driver, interface) = accelerometer_driver();

    for (range, byte) in [
        (AccelRange::G2, 0x00),
        (AccelRange::G4, 0x01),
        (AccelRange::G8, 0x02),
    ] {
        interface.set_register(ACCEL_XYZ_DATA_CFG, 0x00);
        driver.set_range(range).unwrap();
        assert_eq!(interface.get_register(ACCEL_XYZ_DATA_CFG), byte);
    }
}

#[test]
fn test_accel_range_keeps_filter_routing() {
    let (mut driver, interface) = accelerometer_driver();

    interface.set_register(ACCEL_XYZ_DATA_CFG, 0x10);
    driver.set_range(AccelRange::G4).unwrap();
    assert_eq!(interface.get_register(ACCEL_XYZ_DATA_CFG), 0x11);
}

#[test]
fn test_accel_range_couples_low_noise() {
    let (mut driver, interface) = accelerometer_driver();

    driver.set_range(AccelRange::G2).unwrap();
    assert_eq!(interface.get_register(ACCEL_CTRL_REG1) & 0x04, 0x04);

    driver.set_range(AccelRange::G8).unwrap();
    assert_eq!(interface.get_register(ACCEL_CTRL_REG1) & 0x04, 0x00);
}

#[test]
fn test_accel_cutoff_code_bytes() {
    let (mut driver, interface) = accelerometer_driver();

    for (cutoff, byte) in [
        (AccelCutoff::Hz16, 0x00),
        (AccelCutoff::Hz8, 0x01),
        (AccelCutoff::Hz4, 0x02),
        (AccelCutoff::Hz2, 0x03),
    ] {
        interface.set_register(ACCEL_HP_FILTER_CUTOFF, 0x00);
        driver.set_high_pass_cutoff(cutoff).unwrap();
        assert_eq!(interface.get_register(ACCEL_HP_FILTER_CUTOFF), byte);
    }
}

#[test]
fn test_accel_sleep_bit() {
    let (mut driver, interface) = accelerometer_driver();

    interface.set_register(ACCEL_CTRL_REG2, 0x1A);
    driver.enable_sleep_on_inactivity().unwrap();
    assert_eq!(interface.get_register(ACCEL_CTRL_REG2), 0x1E);

    driver.disable_sleep_on_inactivity().unwrap();
    assert_eq!(interface.get_register(ACCEL_CTRL_REG2), 0x1A);
}

#[test]
fn test_accel_axis_offsets_single_transaction() {
    let (mut driver, interface) = accelerometer_driver();

    driver.set_axis_offsets(1, -2, 16).unwrap();

    assert_eq!(interface.get_register(0x30), 0x01);
    assert_eq!(interface.get_register(0x31), 0xFE);
    assert_eq!(interface.get_register(0x32), 0x10);

    let writes = interface
        .operations()
        .iter()
        .filter(|op| matches!(op, crate::common::Operation::Write { address: 0x30, len: 3 }))
        .count();
    assert_eq!(writes, 1);
}

#[test]
fn test_baro_oversample_preserves_mode_bits() {
    let (mut driver, interface) = barometer_driver();

    interface.set_register(BARO_CTRL_REG1, 0x81);
    driver.set_oversampling(Oversample::X128).unwrap();
    assert_eq!(interface.get_register(BARO_CTRL_REG1), 0xB9);

    interface.set_register(BARO_CTRL_REG1, 0x81);
    driver.set_oversampling(Oversample::X1).unwrap();
    assert_eq!(interface.get_register(BARO_CTRL_REG1), 0x81);
}
