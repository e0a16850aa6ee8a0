//! Register map of the NXP/Freescale MPL3115A2 barometer

device_driver::create_device!(
    device_name: Mpl3115a2,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// DR_STATUS - Data ready flags (0x00)
        register Status {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// New temperature data available
            temperature_data_ready: bool = 1,
            /// New pressure/altitude data available
            pressure_data_ready: bool = 2,
            /// New pressure/altitude and temperature data available
            pressure_temperature_data_ready: bool = 3,
            reserved_4: uint = 4..5,
            /// Temperature data overwritten before it was read
            temperature_overwrite: bool = 5,
            /// Pressure/altitude data overwritten before it was read
            pressure_overwrite: bool = 6,
            /// Overwrite of a complete sample
            pressure_temperature_overwrite: bool = 7,
        },

        /// WHO_AM_I - Device identity (0x0C)
        /// Expected value: 0xC4
        register WhoAmI {
            const ADDRESS = 0x0C;
            const SIZE_BITS = 8;

            /// Device signature (should read 0xC4)
            who_am_i: uint = 0..8,
        },

        /// CTRL_REG1 - Mode, oversampling and reset (0x26)
        register CtrlReg1 {
            const ADDRESS = 0x26;
            const SIZE_BITS = 8;

            /// Active when set, standby when clear
            active: bool = 0,
            /// Trigger an immediate measurement
            one_shot: bool = 1,
            /// Software reset, self-clearing
            reset: bool = 2,
            /// Oversample ratio code (2^code samples, 0..=7)
            oversample: uint = 3..6,
            /// Raw ADC output mode
            raw_output: bool = 6,
            /// Altimeter mode when set, barometer mode when clear
            altimeter_mode: bool = 7,
        },
    }
);
