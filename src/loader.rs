//! The register-reading side of an established device connection
//!
//! Everything in this crate talks to the device through a [Loader]. The
//! connection layer that owns the serial port, the SLIP framing and the
//! command timeouts implements this trait; the chip-identity code only ever
//! issues register reads and emits log messages through it.

use crate::Error;

/// Default block size for RAM downloads over UART.
pub const DEFAULT_RAM_BLOCK_SIZE: usize = 0x1800;

/// Block size for RAM downloads when the ROM talks over USB-OTG.
pub const USB_RAM_BLOCK_SIZE: usize = 0x800;

/// A connected device running the ROM or stub loader
///
/// Reads are strictly sequential: the `&mut self` receiver guarantees that a
/// read has completed before the next one can be issued on the same session.
///
/// Every message emitted while decoding a chip's identity, from debug traces
/// to user-visible errors, goes through the logging methods. By default they
/// forward to the [log] facade.
#[allow(async_fn_in_trait)]
pub trait Loader {
    /// Read a 32-bit register at `addr`
    ///
    /// Transport failures and timeouts are reported as
    /// [Error::Connection](crate::Error::Connection).
    async fn read_reg(&mut self, addr: u32) -> Result<u32, Error>;

    /// Baud rate of the active transport
    fn baud(&self) -> u32;

    /// Override the block size used for subsequent RAM downloads
    fn set_ram_block_size(&mut self, size: usize);

    fn debug(&mut self, message: &str) {
        log::debug!("{message}");
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn warn(&mut self, message: &str) {
        log::warn!("{message}");
    }

    fn error(&mut self, message: &str) {
        log::error!("{message}");
    }
}
