//! Unit tests for sample acquisition strategies and abort behavior

use crate::common::{
    MockDelay, Operation, accelerometer_driver, barometer_driver, gyroscope_driver,
};

const GYRO_OUT_X_L: u8 = 0x28;
const ACCEL_OUT_X_MSB: u8 = 0x01;
const BARO_OUT_P_MSB: u8 = 0x01;

#[test]
fn test_gyro_reads_each_byte_separately() {
    let (mut driver, interface) = gyroscope_driver();
    driver.init().unwrap();

    interface.set_registers(GYRO_OUT_X_L, &[0x10, 0x00, 0xFF, 0xFF, 0x00, 0x80]);
    interface.clear_operations();

    let sample = driver.read_sample().unwrap();

    assert_eq!(sample.x, 16);
    assert_eq!(sample.y, -1);
    assert_eq!(sample.z, i16::MIN);

    let expected: Vec<Operation> = (0..6)
        .map(|i| Operation::Read {
            address: GYRO_OUT_X_L + i,
            len: 1,
        })
        .collect();
    assert_eq!(interface.operations(), expected);
}

#[test]
fn test_gyro_aborts_on_fourth_byte() {
    let (mut driver, interface) = gyroscope_driver();
    driver.init().unwrap();

    interface.fail_read_at(GYRO_OUT_X_L + 3);
    interface.clear_operations();

    let result = driver.read_sample();

    assert!(result.is_err());
    // Exactly three bytes were read; nothing past the failure was attempted
    assert_eq!(interface.reads_in_range(GYRO_OUT_X_L, GYRO_OUT_X_L + 5), 3);
    assert_eq!(
        interface.reads_in_range(GYRO_OUT_X_L + 3, GYRO_OUT_X_L + 5),
        0
    );
}

#[test]
fn test_accel_reads_one_burst() {
    let (mut driver, interface) = accelerometer_driver();
    driver.init(&mut MockDelay).unwrap();

    interface.set_registers(ACCEL_OUT_X_MSB, &[0x01, 0x00, 0xFF, 0xF0, 0x80, 0x00]);
    interface.clear_operations();

    let sample = driver.read_sample().unwrap();

    assert_eq!(sample.x, 16);
    assert_eq!(sample.y, -1);
    assert_eq!(sample.z, -2048);

    assert_eq!(
        interface.operations(),
        vec![Operation::Read {
            address: ACCEL_OUT_X_MSB,
            len: 6,
        }]
    );
}

#[test]
fn test_accel_burst_failure_returns_error() {
    let (mut driver, interface) = accelerometer_driver();
    driver.init(&mut MockDelay).unwrap();

    interface.fail_next_read();

    assert!(driver.read_sample().is_err());

    // A later read succeeds without any driver-side recovery
    interface.set_registers(ACCEL_OUT_X_MSB, &[0x01, 0x00, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(driver.read_sample().unwrap().x, 16);
}

#[test]
fn test_baro_reads_each_byte_separately() {
    let (mut driver, interface) = barometer_driver();
    driver.init(&mut MockDelay).unwrap();

    // MSB, CSB, fraction, temperature, temperature fraction
    interface.set_registers(BARO_OUT_P_MSB, &[0x01, 0x02, 0xF0, 0x15, 0x80]);
    interface.clear_operations();

    let sample = driver.read_sample().unwrap();

    assert_eq!(sample.altitude, 0x0102);
    assert_eq!(sample.altitude_frac, 0x0F);
    assert_eq!(sample.temperature, 0x15);
    assert_eq!(sample.temperature_frac, 0x08);

    let expected: Vec<Operation> = (0..5)
        .map(|i| Operation::Read {
            address: BARO_OUT_P_MSB + i,
            len: 1,
        })
        .collect();
    assert_eq!(interface.operations(), expected);
}

#[test]
fn test_baro_aborts_on_third_byte() {
    let (mut driver, interface) = barometer_driver();
    driver.init(&mut MockDelay).unwrap();

    interface.fail_read_at(BARO_OUT_P_MSB + 2);
    interface.clear_operations();

    let result = driver.read_sample();

    assert!(result.is_err());
    assert_eq!(interface.reads_in_range(BARO_OUT_P_MSB, BARO_OUT_P_MSB + 4), 2);
}

#[test]
fn test_data_ready_flags() {
    let (mut gyro, gyro_bus) = gyroscope_driver();
    gyro.init().unwrap();
    assert!(!gyro.data_ready().unwrap());
    gyro_bus.set_register(0x27, 0x08);
    assert!(gyro.data_ready().unwrap());

    let (mut accel, accel_bus) = accelerometer_driver();
    accel.init(&mut MockDelay).unwrap();
    assert!(!accel.data_ready().unwrap());
    accel_bus.set_register(0x00, 0x08);
    assert!(accel.data_ready().unwrap());

    let (mut baro, baro_bus) = barometer_driver();
    baro.init(&mut MockDelay).unwrap();
    assert!(!baro.data_ready().unwrap());
    baro_bus.set_register(0x00, 0x08);
    assert!(baro.data_ready().unwrap());
}
