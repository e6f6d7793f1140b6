//! Library errors

use std::io;

use miette::Diagnostic;
use strum::VariantNames;
use thiserror::Error;

use crate::target::Chip;

/// All possible errors returned by espident
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Unrecognized chip ID: {0}")]
    #[diagnostic(
        code(espident::chip_detect_error),
        help("Supported chips are: {}", Chip::VARIANTS.join(", "))
    )]
    ChipDetectError(u16),

    #[error("Error while communicating with the device")]
    #[diagnostic(transparent)]
    Connection(#[source] ConnectionError),

    #[error("Failed to open file: {0}")]
    #[diagnostic(code(espident::file_open))]
    FileOpenError(String, #[source] io::Error),

    #[error("Failed to parse configuration file")]
    #[diagnostic(
        code(espident::invalid_config),
        help("Check the syntax of the configuration file")
    )]
    InvalidConfig(#[source] toml::de::Error),

    #[error("The flash size '{label}' is invalid for the {chip}")]
    #[diagnostic(code(espident::invalid_flash_size))]
    InvalidFlashSize {
        chip: Chip,
        label: String,
        #[help]
        accepted: String,
    },

    #[error("The flash stub for the {0} is invalid")]
    #[diagnostic(
        code(espident::invalid_stub),
        help("Make sure the stub file was converted from the `esptool` JSON stubs")
    )]
    InvalidStub(Chip, #[source] StubError),

    #[error("The {chip} does not support {feature}")]
    #[diagnostic(code(espident::unsupported_feature))]
    UnsupportedFeature { chip: Chip, feature: String },
}

impl From<ConnectionError> for Error {
    fn from(err: ConnectionError) -> Self {
        Self::Connection(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Connection(err.into())
    }
}

/// Connection-related errors
///
/// These are produced by the [Loader](crate::Loader) implementation and are
/// passed through unmodified.
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ConnectionError {
    #[error("Failed to connect to the device")]
    #[diagnostic(
        code(espident::connection_failed),
        help("Ensure that the device is connected and the reset and boot pins are not being held down")
    )]
    ConnectionFailed,

    #[error("Timeout while reading register {addr:#010x}")]
    #[diagnostic(code(espident::timeout))]
    Timeout { addr: u32 },

    #[error("The device failed to read register {addr:#010x} (status {status:#04x})")]
    #[diagnostic(code(espident::read_reg_failed))]
    ReadRegFailed { addr: u32, status: u8 },

    #[error("IO error while using serial port: {0}")]
    #[diagnostic(code(espident::serial_error))]
    Serial(#[source] io::Error),
}

impl From<io::Error> for ConnectionError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotConnected | io::ErrorKind::BrokenPipe => Self::ConnectionFailed,
            _ => Self::Serial(err),
        }
    }
}

/// Errors raised while decoding a flash stub description
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum StubError {
    #[error("Stub description is not valid TOML")]
    Toml(#[from] toml::de::Error),

    #[error("Stub payload is not valid base64")]
    Base64(#[from] base64::DecodeError),
}
