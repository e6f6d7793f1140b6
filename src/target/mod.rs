//! Supported target devices
//!
//! A [Chip] is selected once per session, after the connection layer has
//! synced with the device and matched its magic value. Its methods then
//! decode the identity of the connected device: package, revision,
//! features, crystal frequency and MAC address. Each query issues one or
//! more register reads through a [Loader] and awaits every read before
//! issuing the next.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, VariantNames};

pub use self::{
    efuse::{extract_bits, EfuseField},
    mac::{hex_octet, MacAddress, MacLayout, OuiSource, ALTERNATE_OUI, DEFAULT_OUI},
};
use crate::{config::Config, stubs::FlashStub, Error, Loader};

pub mod efuse;
pub mod mac;

mod esp32;
mod esp32c3;
mod esp32s2;
mod esp8266;

/// Mask applied to the UART clock divider register
const UART_CLKDIV_MASK: u32 = 0xfffff;

/// Supported crystal frequencies
#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Display, VariantNames, Serialize, Deserialize,
)]
#[non_exhaustive]
#[repr(u32)]
pub enum XtalFrequency {
    /// 26 MHz
    #[strum(serialize = "26 MHz")]
    _26Mhz,
    /// 40 MHz
    #[default]
    #[strum(serialize = "40 MHz")]
    _40Mhz,
}

impl XtalFrequency {
    /// Nominal frequency in MHz
    pub fn mhz(&self) -> u32 {
        match self {
            XtalFrequency::_26Mhz => 26,
            XtalFrequency::_40Mhz => 40,
        }
    }

    /// Snap an estimated frequency (in MHz) to the nearest supported crystal.
    pub fn from_estimate(estimate: f64) -> Self {
        if estimate > 33.0 {
            XtalFrequency::_40Mhz
        } else {
            XtalFrequency::_26Mhz
        }
    }
}

/// All supported devices
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Display,
    EnumIter,
    EnumString,
    VariantNames,
    Deserialize,
    Serialize,
)]
#[non_exhaustive]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Chip {
    /// ESP32
    Esp32,
    /// ESP32-C3, ESP8685
    Esp32c3,
    /// ESP32-S2
    Esp32s2,
    /// ESP8266, ESP8285
    Esp8266,
}

/// Constant description of a chip family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipParams {
    /// Human readable chip name, e.g. `ESP32-C3`
    pub name: &'static str,
    /// Chip ID written to the image header, if the image format has one
    pub image_chip_id: Option<u16>,
    /// Base address of the eFuse read registers
    pub efuse_reg: u32,
    /// Address of the low word of the factory MAC address
    pub mac_efuse_reg: u32,
    /// How the MAC address is laid out in the eFuses
    pub mac_layout: MacLayout,
    /// UART0 clock divider register
    pub uart_clkdiv_reg: u32,
    /// UART0 date register
    pub uart_date_reg: Option<u32>,
    /// SPI flash controller registers
    pub spi_registers: SpiRegisters,
    /// Block size for flash writes
    pub flash_write_size: usize,
    /// Flash offset of the second stage bootloader
    pub bootloader_flash_offset: u32,
    /// Flash size labels and their header encodings
    pub flash_sizes: &'static [(&'static str, u8)],
}

/// Flash size encodings shared by the ESP32 family
pub(crate) const ESP32_FLASH_SIZES: &[(&str, u8)] = &[
    ("1MB", 0x00),
    ("2MB", 0x10),
    ("4MB", 0x20),
    ("8MB", 0x30),
    ("16MB", 0x40),
];

impl Chip {
    /// The constant parameters of this chip
    pub fn params(&self) -> &'static ChipParams {
        match self {
            Chip::Esp32 => &esp32::PARAMS,
            Chip::Esp32c3 => &esp32c3::PARAMS,
            Chip::Esp32s2 => &esp32s2::PARAMS,
            Chip::Esp8266 => &esp8266::PARAMS,
        }
    }

    /// Human readable chip name
    pub fn name(&self) -> &'static str {
        self.params().name
    }

    /// Returns the image chip ID, if the chip's image format carries one
    pub fn image_chip_id(&self) -> Option<u16> {
        self.params().image_chip_id
    }

    /// Returns the base address of the eFuse register
    pub fn efuse_reg(&self) -> u32 {
        self.params().efuse_reg
    }

    /// Returns the address of the first MAC address eFuse word
    pub fn mac_efuse_reg(&self) -> u32 {
        self.params().mac_efuse_reg
    }

    pub fn uart_clkdiv_reg(&self) -> u32 {
        self.params().uart_clkdiv_reg
    }

    pub fn uart_date_reg(&self) -> Option<u32> {
        self.params().uart_date_reg
    }

    /// SPI register addresses for a chip
    pub fn spi_registers(&self) -> SpiRegisters {
        self.params().spi_registers
    }

    /// Write size for flashing operations
    pub fn flash_write_size(&self) -> usize {
        self.params().flash_write_size
    }

    /// Flash offset the bootloader is written to
    pub fn bootloader_flash_offset(&self) -> u32 {
        self.params().bootloader_flash_offset
    }

    /// Numeric encodings for the flash sizes supported by a chip
    pub fn flash_size_encodings(&self) -> HashMap<&'static str, u8> {
        self.params().flash_sizes.iter().copied().collect()
    }

    /// Encode a flash size label (e.g. `4MB`) for the image header.
    pub fn encode_flash_size(&self, label: &str) -> Result<u8, Error> {
        let sizes = self.params().flash_sizes;

        sizes
            .iter()
            .find(|(size, _)| *size == label)
            .map(|(_, code)| *code)
            .ok_or_else(|| Error::InvalidFlashSize {
                chip: *self,
                label: label.to_string(),
                accepted: format!(
                    "The accepted values are: {}",
                    sizes
                        .iter()
                        .map(|(size, _)| *size)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }

    /// Load the flash stub for this chip from the configured stub directory
    ///
    /// No stubs are bundled with the library: the directory must hold a
    /// `<chip>.toml` description for this chip (e.g. `esp32c3.toml`),
    /// otherwise [Error::FileOpenError] is returned.
    pub fn stub(&self, config: &Config) -> Result<FlashStub, Error> {
        FlashStub::load(*self, config)
    }

    /// Erase size for a region; no supported chip needs sector rounding.
    pub fn erase_size(&self, _offset: u32, size: u32) -> u32 {
        size
    }

    /// Return the package version based on the eFuses
    pub async fn package_version<L: Loader>(&self, loader: &mut L) -> Result<u32, Error> {
        match self {
            Chip::Esp32 => esp32::package_version(loader).await,
            Chip::Esp32c3 => esp32c3::package_version(loader).await,
            Chip::Esp32s2 => esp32s2::package_version(loader).await,
            Chip::Esp8266 => Err(Error::UnsupportedFeature {
                chip: *self,
                feature: "reading the package version".into(),
            }),
        }
    }

    /// Determine the chip's revision number
    pub async fn chip_revision<L: Loader>(&self, loader: &mut L) -> Result<u32, Error> {
        match self {
            Chip::Esp32 => esp32::chip_revision(loader).await,
            Chip::Esp32c3 => esp32c3::chip_revision(loader).await,
            Chip::Esp32s2 => esp32s2::chip_revision(loader).await,
            Chip::Esp8266 => Err(Error::UnsupportedFeature {
                chip: *self,
                feature: "reading the chip revision".into(),
            }),
        }
    }

    /// Describe the package and revision of the connected device.
    ///
    /// Package codes missing from the chip's table are described as
    /// `unknown <chip name>` instead of failing.
    pub async fn chip_description<L: Loader>(&self, loader: &mut L) -> Result<String, Error> {
        match self {
            Chip::Esp32 => esp32::chip_description(loader).await,
            Chip::Esp32c3 => esp32c3::chip_description(loader).await,
            Chip::Esp32s2 => esp32s2::chip_description(loader).await,
            Chip::Esp8266 => esp8266::chip_description(loader).await,
        }
    }

    /// Enumerate the chip's features, read from eFuse
    pub async fn chip_features<L: Loader>(
        &self,
        loader: &mut L,
    ) -> Result<Vec<&'static str>, Error> {
        match self {
            Chip::Esp32 => esp32::chip_features(loader).await,
            Chip::Esp32c3 => Ok(vec!["Wi-Fi", "BLE"]),
            Chip::Esp32s2 => esp32s2::chip_features(loader).await,
            Chip::Esp8266 => esp8266::chip_features(loader).await,
        }
    }

    /// What is the crystal frequency?
    pub async fn crystal_frequency<L: Loader>(
        &self,
        loader: &mut L,
    ) -> Result<XtalFrequency, Error> {
        match self {
            Chip::Esp32 => {
                uart_xtal_frequency(loader, self.uart_clkdiv_reg(), esp32::XTAL_CLK_DIVIDER).await
            }
            Chip::Esp8266 => {
                uart_xtal_frequency(loader, self.uart_clkdiv_reg(), esp8266::XTAL_CLK_DIVIDER)
                    .await
            }
            // Fixed frequency
            Chip::Esp32c3 | Chip::Esp32s2 => Ok(XtalFrequency::_40Mhz),
        }
    }

    /// What is the MAC address?
    pub async fn mac_address<L: Loader>(&self, loader: &mut L) -> Result<String, Error> {
        let mac = match self.params().mac_layout {
            MacLayout::TwoWord => {
                let low = loader.read_reg(self.mac_efuse_reg()).await?;
                let high = loader.read_reg(self.mac_efuse_reg() + 4).await?;

                MacAddress::from_two_words(low, high)
            }
            MacLayout::Scattered => esp8266::mac_address(loader).await?,
        };

        Ok(mac.to_string())
    }

    /// Adjust session parameters once the connection has been established.
    ///
    /// This is the only operation which changes state on the [Loader].
    pub async fn post_connect<L: Loader>(&self, loader: &mut L) -> Result<(), Error> {
        match self {
            Chip::Esp32s2 => esp32s2::post_connect(loader).await,
            Chip::Esp32 | Chip::Esp32c3 | Chip::Esp8266 => Ok(()),
        }
    }
}

impl TryFrom<u16> for Chip {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Chip::iter()
            .find(|chip| chip.image_chip_id() == Some(value))
            .ok_or(Error::ChipDetectError(value))
    }
}

/// Estimate the crystal frequency from the divider the ROM configured for the
/// current baud rate, and snap it to a supported crystal.
async fn uart_xtal_frequency<L: Loader>(
    loader: &mut L,
    clkdiv_reg: u32,
    xtal_clk_divider: u32,
) -> Result<XtalFrequency, Error> {
    let uart_div = loader.read_reg(clkdiv_reg).await? & UART_CLKDIV_MASK;
    let est_xtal =
        (loader.baud() as f64 * uart_div as f64) / 1_000_000.0 / xtal_clk_divider as f64;
    let norm_xtal = XtalFrequency::from_estimate(est_xtal);

    loader.debug(&format!(
        "Estimated crystal frequency {est_xtal:.2} MHz, normalized to {norm_xtal}"
    ));

    if (est_xtal - norm_xtal.mhz() as f64).abs() > 1.0 {
        loader.warn(&format!(
            "Detected crystal frequency {est_xtal:.2} MHz is quite different to normalized \
             frequency {norm_xtal}, unsupported crystal in use?"
        ));
    }

    Ok(norm_xtal)
}

/// SPI register addresses
#[derive(Copy, Clone, Hash, Debug, PartialEq, Eq)]
pub struct SpiRegisters {
    base: u32,
    usr_offset: u32,
    usr1_offset: u32,
    usr2_offset: u32,
    w0_offset: u32,
    mosi_length_offset: Option<u32>,
    miso_length_offset: Option<u32>,
}

impl SpiRegisters {
    /// Get the base address of the SPI registers.
    pub fn cmd(&self) -> u32 {
        self.base
    }

    /// Get the address of the USR register.
    pub fn usr(&self) -> u32 {
        self.base + self.usr_offset
    }

    /// Get the address of the USR1 register.
    pub fn usr1(&self) -> u32 {
        self.base + self.usr1_offset
    }

    /// Get the address of the USR2 register.
    pub fn usr2(&self) -> u32 {
        self.base + self.usr2_offset
    }

    /// Get the address of the W0 register.
    pub fn w0(&self) -> u32 {
        self.base + self.w0_offset
    }

    /// Get the address of the MOSI length register.
    pub fn mosi_length(&self) -> Option<u32> {
        self.mosi_length_offset.map(|offset| self.base + offset)
    }

    /// Get the address of the MISO length register.
    pub fn miso_length(&self) -> Option<u32> {
        self.miso_length_offset.map(|offset| self.base + offset)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn xtal_estimates_snap_to_nominal() {
        assert_eq!(XtalFrequency::from_estimate(39.97), XtalFrequency::_40Mhz);
        assert_eq!(XtalFrequency::from_estimate(35.0), XtalFrequency::_40Mhz);
        assert_eq!(XtalFrequency::from_estimate(33.0), XtalFrequency::_26Mhz);
        assert_eq!(XtalFrequency::from_estimate(25.98), XtalFrequency::_26Mhz);
        assert_eq!(XtalFrequency::_40Mhz.to_string(), "40 MHz");
    }

    #[test]
    fn chip_names_round_trip() {
        for chip in Chip::iter() {
            assert_eq!(Chip::from_str(&chip.to_string()).unwrap(), chip);
        }

        assert_eq!(Chip::Esp32c3.to_string(), "esp32c3");
        assert_eq!(Chip::Esp32s2.name(), "ESP32-S2");
    }

    #[test]
    fn image_chip_ids() {
        assert_eq!(Chip::try_from(0).unwrap(), Chip::Esp32);
        assert_eq!(Chip::try_from(2).unwrap(), Chip::Esp32s2);
        assert_eq!(Chip::try_from(5).unwrap(), Chip::Esp32c3);
        assert!(matches!(
            Chip::try_from(9),
            Err(Error::ChipDetectError(9))
        ));

        assert_eq!(Chip::Esp8266.image_chip_id(), None);
    }

    #[test]
    fn flash_size_encodings() {
        assert_eq!(Chip::Esp32.encode_flash_size("4MB").unwrap(), 0x20);
        assert_eq!(Chip::Esp32c3.encode_flash_size("16MB").unwrap(), 0x40);
        assert_eq!(Chip::Esp8266.encode_flash_size("256KB").unwrap(), 0x10);
        assert_eq!(Chip::Esp8266.encode_flash_size("4MB-c1").unwrap(), 0x60);
        assert_eq!(Chip::Esp8266.flash_size_encodings().len(), 9);

        assert!(matches!(
            Chip::Esp32s2.encode_flash_size("512KB"),
            Err(Error::InvalidFlashSize { chip: Chip::Esp32s2, .. })
        ));
    }

    #[test]
    fn erase_size_is_identity() {
        for chip in Chip::iter() {
            for (offset, size) in [(0, 0), (0x1000, 0x1234), (0x1_0000, 0x4000), (u32::MAX, 1)] {
                assert_eq!(chip.erase_size(offset, size), size);
            }
        }
    }

    #[test]
    fn spi_register_addresses() {
        let regs = Chip::Esp32.spi_registers();
        assert_eq!(regs.cmd(), 0x3ff4_2000);
        assert_eq!(regs.w0(), 0x3ff4_2080);
        assert_eq!(regs.miso_length(), Some(0x3ff4_202c));

        let regs = Chip::Esp8266.spi_registers();
        assert_eq!(regs.usr(), 0x6000_021c);
        assert_eq!(regs.mosi_length(), None);
    }
}
