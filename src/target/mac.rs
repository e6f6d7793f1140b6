//! MAC address reconstruction from eFuse words

use std::fmt::{self, Display, Formatter};

/// Espressif OUI used when the ESP8266 selector byte is 0
pub const DEFAULT_OUI: [u8; 3] = [0x18, 0xfe, 0x34];
/// Espressif OUI used when the ESP8266 selector byte is 1
pub const ALTERNATE_OUI: [u8; 3] = [0xac, 0xd0, 0x74];

/// How the eFuse words of a chip encode its MAC address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacLayout {
    /// Low word at `MAC_EFUSE_REG`, top two octets in the low half of the
    /// following word
    TwoWord,
    /// ESP8266 layout spread over eFuse words 0, 1 and 3
    Scattered,
}

/// Where the first three octets of a scattered MAC address came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OuiSource {
    /// Burned into eFuse word 3
    Efuse,
    /// [DEFAULT_OUI]
    Default,
    /// [ALTERNATE_OUI]
    Alternate,
    /// Unrecognized selector byte; the OUI octets are left zeroed
    Unknown(u8),
}

/// A six octet MAC address
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Build the address from the two-word layout.
    ///
    /// Octets, most significant first: `high[15:8]`, `high[7:0]`,
    /// `low[31:24]`, `low[23:16]`, `low[15:8]`, `low[7:0]`.
    pub fn from_two_words(low: u32, high: u32) -> Self {
        let high = high & 0xffff;

        let bytes = ((high as u64) << 32) | low as u64;
        let bytes = bytes.to_be_bytes();

        let mut octets = [0u8; 6];
        octets.copy_from_slice(&bytes[2..]);

        Self(octets)
    }

    /// Build the address from the ESP8266 layout.
    pub fn from_scattered_words(word0: u32, word1: u32, word3: u32) -> (Self, OuiSource) {
        let mut octets = [0u8; 6];

        // First determine the OUI portion of the MAC address
        let source = if word3 != 0 {
            octets[0] = (word3 >> 16) as u8;
            octets[1] = (word3 >> 8) as u8;
            octets[2] = word3 as u8;
            OuiSource::Efuse
        } else {
            match (word1 >> 16) as u8 {
                0 => {
                    octets[..3].copy_from_slice(&DEFAULT_OUI);
                    OuiSource::Default
                }
                1 => {
                    octets[..3].copy_from_slice(&ALTERNATE_OUI);
                    OuiSource::Alternate
                }
                selector => OuiSource::Unknown(selector),
            }
        };

        // Add the remaining NIC portion of the MAC address
        octets[3] = (word1 >> 8) as u8;
        octets[4] = word1 as u8;
        octets[5] = (word0 >> 24) as u8;

        (Self(octets), source)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl Display for MacAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let groups = self.0.iter().map(|b| hex_octet(*b)).collect::<Vec<_>>();

        write!(f, "{}", groups.join(":"))
    }
}

/// Format a byte as exactly two lowercase hex digits
pub fn hex_octet(byte: u8) -> String {
    format!("{byte:02x}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn hex_octets_are_two_lowercase_digits() {
        assert_eq!(hex_octet(0), "00");
        assert_eq!(hex_octet(0x0a), "0a");
        assert_eq!(hex_octet(255), "ff");

        for byte in 0..=u8::MAX {
            let hex = hex_octet(byte);
            assert_eq!(hex.len(), 2);
            assert!(hex
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            assert_eq!(u8::from_str_radix(&hex, 16).unwrap(), byte);
        }
    }

    #[test]
    fn two_word_layout() {
        let mac = MacAddress::from_two_words(0x1234_5678, 0x0000_abcd);
        assert_eq!(mac.to_string(), "ab:cd:12:34:56:78");

        // Only the low half of the second word is part of the address
        let mac = MacAddress::from_two_words(0x1234_5678, 0xffff_abcd);
        assert_eq!(mac.to_string(), "ab:cd:12:34:56:78");
    }

    #[test]
    fn scattered_layout_oui_from_efuse() {
        let (mac, source) = MacAddress::from_scattered_words(0xde00_0000, 0x0007_9abc, 0xffaa_bbcc);
        assert_eq!(source, OuiSource::Efuse);
        assert_eq!(mac.to_string(), "aa:bb:cc:9a:bc:de");
    }

    #[test]
    fn scattered_layout_default_ouis() {
        let (mac, source) = MacAddress::from_scattered_words(0xde00_0000, 0x0000_9abc, 0);
        assert_eq!(source, OuiSource::Default);
        assert_eq!(mac.octets(), [0x18, 0xfe, 0x34, 0x9a, 0xbc, 0xde]);

        let (mac, source) = MacAddress::from_scattered_words(0xde00_0000, 0x0001_9abc, 0);
        assert_eq!(source, OuiSource::Alternate);
        assert_eq!(mac.octets(), [0xac, 0xd0, 0x74, 0x9a, 0xbc, 0xde]);
    }

    #[test]
    fn scattered_layout_unknown_selector() {
        let (mac, source) = MacAddress::from_scattered_words(0x0100_0000, 0x0007_0203, 0);
        assert_eq!(source, OuiSource::Unknown(7));
        assert_eq!(mac.to_string(), "00:00:00:02:03:01");
    }
}
