//! Chip identification for Espressif devices
//!
//! Once a connection to a device in download mode has been established and
//! the chip family has been detected, [Chip] decodes the identity of the
//! connected device from its eFuses: package and revision, feature list,
//! crystal frequency and factory MAC address. It also carries the constant
//! per-chip parameters (register addresses, flash geometry, flash size
//! encodings) needed to flash the device.
//!
//! All register reads go through the [Loader] trait, which is implemented by
//! the connection layer.

pub use self::{
    config::Config,
    error::{ConnectionError, Error, StubError},
    loader::{Loader, DEFAULT_RAM_BLOCK_SIZE, USB_RAM_BLOCK_SIZE},
    stubs::FlashStub,
    target::{Chip, ChipParams, MacAddress, SpiRegisters, XtalFrequency},
};

pub mod config;
pub mod error;
pub mod loader;
pub mod stubs;
pub mod target;
