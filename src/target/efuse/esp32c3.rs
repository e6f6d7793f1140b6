//! ESP32-C3 eFuse fields

use super::EfuseField;

pub(crate) const EFUSE_BASE: u32 = 0x6000_8800;

/// Read address of BLOCK1 (MAC_SPI_8M_0)
pub(crate) const BLOCK1: u32 = EFUSE_BASE + 0x044;

/// Factory MAC address, low word
pub(crate) const MAC0: EfuseField = EfuseField::new(BLOCK1, 0, 0, 32);
/// Wafer version
pub(crate) const WAFER_VERSION: EfuseField = EfuseField::new(BLOCK1, 3, 18, 3);
/// Package version
pub(crate) const PKG_VERSION: EfuseField = EfuseField::new(BLOCK1, 3, 21, 3);
