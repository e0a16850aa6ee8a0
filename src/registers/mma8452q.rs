//! Register map of the NXP/Freescale MMA8452Q accelerometer

device_driver::create_device!(
    device_name: Mma8452q,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// STATUS - Data ready and overwrite flags (0x00)
        register Status {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// New X axis data available
            x_data_ready: bool = 0,
            /// New Y axis data available
            y_data_ready: bool = 1,
            /// New Z axis data available
            z_data_ready: bool = 2,
            /// New data available on all three axes
            xyz_data_ready: bool = 3,
            /// X axis data overwritten before it was read
            x_overwrite: bool = 4,
            /// Y axis data overwritten before it was read
            y_overwrite: bool = 5,
            /// Z axis data overwritten before it was read
            z_overwrite: bool = 6,
            /// Overwrite on all three axes
            xyz_overwrite: bool = 7,
        },

        /// WHO_AM_I - Device identity (0x0D)
        /// Expected value: 0x2A
        register WhoAmI {
            const ADDRESS = 0x0D;
            const SIZE_BITS = 8;

            /// Device signature (should read 0x2A)
            who_am_i: uint = 0..8,
        },

        /// XYZ_DATA_CFG - Full scale and high-pass output routing (0x0E)
        register XyzDataCfg {
            const ADDRESS = 0x0E;
            const SIZE_BITS = 8;

            /// Full scale code (0 = ±2 g, 1 = ±4 g, 2 = ±8 g)
            full_scale: uint = 0..2,
            reserved_3_2: uint = 2..4,
            /// Output high-pass filtered data instead of raw data
            high_pass_output: bool = 4,
            reserved_7_5: uint = 5..8,
        },

        /// HP_FILTER_CUTOFF - High-pass filter cutoff selection (0x0F)
        register HpFilterCutoff {
            const ADDRESS = 0x0F;
            const SIZE_BITS = 8;

            /// Cutoff frequency code (0 = 16 Hz .. 3 = 2 Hz at 800 Hz ODR)
            cutoff: uint = 0..2,
            reserved_3_2: uint = 2..4,
            /// Bypass the low-pass stage of the pulse channel
            pulse_low_pass_bypass: bool = 4,
            /// Enable the high-pass stage of the pulse channel
            pulse_high_pass_enable: bool = 5,
            reserved_7_6: uint = 6..8,
        },

        /// CTRL_REG1 - Active mode, data rate and noise mode (0x2A)
        register CtrlReg1 {
            const ADDRESS = 0x2A;
            const SIZE_BITS = 8;

            /// Active when set, standby when clear
            active: bool = 0,
            /// 8-bit fast read mode
            fast_read: bool = 1,
            /// Reduced noise mode (±2 g and ±4 g only)
            low_noise: bool = 2,
            /// Output data rate code (0 = 800 Hz)
            data_rate: uint = 3..6,
            /// Auto-sleep sample rate code
            auto_sleep_rate: uint = 6..8,
        },

        /// CTRL_REG2 - Power schemes, auto-sleep and reset (0x2B)
        register CtrlReg2 {
            const ADDRESS = 0x2B;
            const SIZE_BITS = 8;

            /// Active mode power scheme code (0b10 = high resolution)
            active_power_mode: uint = 0..2,
            /// Auto-sleep on inactivity enable
            auto_sleep: bool = 2,
            /// Sleep mode power scheme code (0b11 = low power)
            sleep_power_mode: uint = 3..5,
            reserved_5: uint = 5..6,
            /// Software reset, self-clearing
            reset: bool = 6,
            /// Self-test enable
            self_test: bool = 7,
        },
    }
);
