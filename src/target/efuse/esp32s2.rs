//! ESP32-S2 eFuse fields

use super::EfuseField;

pub(crate) const EFUSE_BASE: u32 = 0x3f41_a000;

/// Read address of BLOCK1 (MAC_SPI_8M_0)
pub(crate) const BLOCK1: u32 = EFUSE_BASE + 0x044;
/// Read address of BLOCK2 (SYS_DATA_PART0_0)
pub(crate) const BLOCK2: u32 = EFUSE_BASE + 0x05c;

/// Factory MAC address, low word
pub(crate) const MAC0: EfuseField = EfuseField::new(BLOCK1, 0, 0, 32);
/// Wafer version major
pub(crate) const WAFER_VERSION_MAJOR: EfuseField = EfuseField::new(BLOCK1, 3, 18, 2);
/// Package version, doubles as the embedded flash version
pub(crate) const PKG_VERSION: EfuseField = EfuseField::new(BLOCK1, 3, 21, 4);
/// Embedded PSRAM version
pub(crate) const PSRAM_VERSION: EfuseField = EfuseField::new(BLOCK1, 3, 28, 4);
/// Version of the calibration data in BLOCK2
pub(crate) const BLK_VERSION_MINOR: EfuseField = EfuseField::new(BLOCK2, 4, 4, 3);

/// ROM variable telling which peripheral the download mode is served on
pub(crate) const UARTDEV_BUF_NO: u32 = 0x3fff_fd14;
/// Value of [UARTDEV_BUF_NO] when downloading over USB-OTG
pub(crate) const UARTDEV_BUF_NO_USB_OTG: u32 = 2;
