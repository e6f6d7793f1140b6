//! ESP8266 eFuse fields

use super::EfuseField;

pub(crate) const EFUSE_BASE: u32 = 0x3ff0_0050;

/// Set on ESP8285 parts (embedded flash)
pub(crate) const IS_ESP8285_0: EfuseField = EfuseField::new(EFUSE_BASE, 0, 4, 1);
/// Set on later ESP8285 parts
pub(crate) const IS_ESP8285_2: EfuseField = EfuseField::new(EFUSE_BASE, 2, 16, 1);

/// Word holding the last MAC octet in its top byte
pub(crate) const MAC_WORD0: EfuseField = EfuseField::new(EFUSE_BASE, 0, 0, 32);
/// Word holding the OUI selector and the fourth and fifth MAC octets
pub(crate) const MAC_WORD1: EfuseField = EfuseField::new(EFUSE_BASE, 1, 0, 32);
/// Word holding a burned OUI, zero if none
pub(crate) const MAC_WORD3: EfuseField = EfuseField::new(EFUSE_BASE, 3, 0, 32);
