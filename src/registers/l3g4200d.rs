//! Register map of the ST L3G4200D gyroscope

device_driver::create_device!(
    device_name: L3g4200d,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// WHO_AM_I - Device identity (0x0F)
        /// Expected value: 0xD3
        register WhoAmI {
            const ADDRESS = 0x0F;
            const SIZE_BITS = 8;

            /// Device signature (should read 0xD3)
            who_am_i: uint = 0..8,
        },

        /// CTRL_REG1 - Data rate, bandwidth, power mode and axis enables (0x20)
        register CtrlReg1 {
            const ADDRESS = 0x20;
            const SIZE_BITS = 8;

            /// X axis enable
            x_enable: bool = 0,
            /// Y axis enable
            y_enable: bool = 1,
            /// Z axis enable
            z_enable: bool = 2,
            /// Normal mode when set, power-down when clear
            power_up: bool = 3,
            /// Low-pass bandwidth code (meaning depends on the data rate)
            bandwidth: uint = 4..6,
            /// Output data rate code (0b11 = 800 Hz)
            output_data_rate: uint = 6..8,
        },

        /// CTRL_REG2 - High-pass filter mode and cutoff (0x21)
        register CtrlReg2 {
            const ADDRESS = 0x21;
            const SIZE_BITS = 8;

            /// High-pass cutoff frequency code (0x00..=0x09)
            high_pass_cutoff: uint = 0..4,
            /// High-pass filter mode
            high_pass_mode: uint = 4..6,
            reserved_7_6: uint = 6..8,
        },

        /// CTRL_REG4 - Full scale and data format (0x23)
        register CtrlReg4 {
            const ADDRESS = 0x23;
            const SIZE_BITS = 8;

            /// SPI 3-wire mode select (unused on I2C)
            spi_3wire: bool = 0,
            /// Self-test code
            self_test: uint = 1..3,
            reserved_3: uint = 3..4,
            /// Full scale code (0 = 200 dps, 1 = 500 dps, 2 = 2000 dps)
            full_scale: uint = 4..6,
            /// Data byte order select
            big_endian: bool = 6,
            /// Block data update until both bytes of an axis are read
            block_data_update: bool = 7,
        },

        /// CTRL_REG5 - Reboot and output filter routing (0x24)
        register CtrlReg5 {
            const ADDRESS = 0x24;
            const SIZE_BITS = 8;

            /// Route the high-pass filter into the output chain
            out_sel_high_pass: bool = 0,
            /// Route the second low-pass filter into the output chain
            out_sel_low_pass: bool = 1,
            /// Interrupt generator source selection
            int1_sel: uint = 2..4,
            /// High-pass filter enable
            high_pass_enable: bool = 4,
            reserved_5: uint = 5..6,
            /// FIFO enable
            fifo_enable: bool = 6,
            /// Reboot memory content, self-clearing
            reboot: bool = 7,
        },

        /// STATUS_REG - Data ready and overrun flags (0x27)
        register StatusReg {
            const ADDRESS = 0x27;
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
            x_overrun: bool = 4,
            /// Y axis data overwritten before it was read
            y_overrun: bool = 5,
            /// Z axis data overwritten before it was read
            z_overrun: bool = 6,
            /// Overrun on all three axes
            xyz_overrun: bool = 7,
        },
    }
);
