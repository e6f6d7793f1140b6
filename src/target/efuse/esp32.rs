//! ESP32 eFuse fields
//!
//! The ESP32 has a single flat read region; BLOCK0 starts at the eFuse base.

use super::EfuseField;

pub(crate) const EFUSE_BASE: u32 = 0x3ff5_a000;

/// Disables the APP CPU
pub(crate) const DISABLE_APP_CPU: EfuseField = EfuseField::new(EFUSE_BASE, 3, 0, 1);
/// Disables Bluetooth
pub(crate) const DISABLE_BT: EfuseField = EfuseField::new(EFUSE_BASE, 3, 1, 1);
/// Package version, extended by [PKG_VERSION_4BIT]
pub(crate) const PKG_VERSION: EfuseField = EfuseField::new(EFUSE_BASE, 3, 9, 3);
/// Most significant bit of the package version
pub(crate) const PKG_VERSION_4BIT: EfuseField = EfuseField::new(EFUSE_BASE, 3, 2, 1);
/// CPU is rated for 160 MHz only
pub(crate) const CHIP_CPU_FREQ_LOW: EfuseField = EfuseField::new(EFUSE_BASE, 3, 12, 1);
/// CPU frequency rating is burned
pub(crate) const CHIP_CPU_FREQ_RATED: EfuseField = EfuseField::new(EFUSE_BASE, 3, 13, 1);
/// BLOCK3 partially served for ADC calibration data
pub(crate) const BLK3_PART_RESERVE: EfuseField = EfuseField::new(EFUSE_BASE, 3, 14, 1);
/// Bit 0 of the chip revision
pub(crate) const CHIP_VER_REV1: EfuseField = EfuseField::new(EFUSE_BASE, 3, 15, 1);
/// Voltage reference calibration
pub(crate) const ADC_VREF: EfuseField = EfuseField::new(EFUSE_BASE, 4, 8, 5);
/// Bit 1 of the chip revision
pub(crate) const CHIP_VER_REV2: EfuseField = EfuseField::new(EFUSE_BASE, 5, 20, 1);
/// Efuse variable block length scheme
pub(crate) const CODING_SCHEME: EfuseField = EfuseField::new(EFUSE_BASE, 6, 0, 2);

/// Base of the APB control registers
const DR_REG_SYSCON_BASE: u32 = 0x3ff6_6000;

/// Bit 2 of the chip revision lives in `APB_CTL_DATE`, outside the eFuses
pub(crate) const APB_CTL_DATE_REV: EfuseField = EfuseField::new(DR_REG_SYSCON_BASE, 0x1f, 31, 1);
