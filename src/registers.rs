//! Register definitions for the three devices
//!
//! One typed register map per chip, generated with `device_driver`. Field
//! layouts and code values come straight from the ST and NXP/Freescale data
//! sheets; the drivers never touch a raw mask.
//!
//! The output data windows (`OUT_X_L`.., `OUT_X_MSB`.., `OUT_P_MSB`..) are
//! deliberately not modeled here: sample acquisition goes through the raw
//! interface so each driver can keep its own read strategy (see
//! `read_sample()` on the drivers).

pub mod l3g4200d;
pub mod mma8452q;
pub mod mpl3115a2;

pub use l3g4200d::L3g4200d;
pub use mma8452q::Mma8452q;
pub use mpl3115a2::Mpl3115a2;
