use super::{efuse::esp8266 as efuse, ChipParams, MacAddress, MacLayout, OuiSource, SpiRegisters};
use crate::{Error, Loader};

pub(crate) const XTAL_CLK_DIVIDER: u32 = 2;

pub(crate) const PARAMS: ChipParams = ChipParams {
    name: "ESP8266",
    image_chip_id: None,
    efuse_reg: efuse::EFUSE_BASE,
    mac_efuse_reg: efuse::MAC_WORD0.address(),
    mac_layout: MacLayout::Scattered,
    uart_clkdiv_reg: 0x6000_0014,
    uart_date_reg: None,
    spi_registers: SpiRegisters {
        base: 0x6000_0200,
        usr_offset: 0x1c,
        usr1_offset: 0x20,
        usr2_offset: 0x24,
        w0_offset: 0x40,
        mosi_length_offset: None,
        miso_length_offset: None,
    },
    flash_write_size: 0x4000,
    bootloader_flash_offset: 0x0,
    flash_sizes: &[
        ("512KB", 0x00),
        ("256KB", 0x10),
        ("1MB", 0x20),
        ("2MB", 0x30),
        ("4MB", 0x40),
        ("2MB-c1", 0x50),
        ("4MB-c1", 0x60),
        ("8MB", 0x80),
        ("16MB", 0x90),
    ],
};

async fn is_esp8285<L: Loader>(loader: &mut L) -> Result<bool, Error> {
    let word2 = efuse::IS_ESP8285_2.read(loader).await?;
    let word0 = efuse::IS_ESP8285_0.read(loader).await?;

    Ok(word0 != 0 || word2 != 0)
}

pub(crate) async fn chip_description<L: Loader>(loader: &mut L) -> Result<String, Error> {
    let name = if is_esp8285(loader).await? {
        "ESP8285"
    } else {
        "ESP8266EX"
    };

    Ok(name.to_string())
}

pub(crate) async fn chip_features<L: Loader>(loader: &mut L) -> Result<Vec<&'static str>, Error> {
    let mut features = vec!["Wi-Fi"];

    if is_esp8285(loader).await? {
        features.push("Embedded Flash");
    }

    Ok(features)
}

pub(crate) async fn mac_address<L: Loader>(loader: &mut L) -> Result<MacAddress, Error> {
    let word0 = efuse::MAC_WORD0.read(loader).await?;
    let word1 = efuse::MAC_WORD1.read(loader).await?;
    let word3 = efuse::MAC_WORD3.read(loader).await?;

    let (mac, oui) = MacAddress::from_scattered_words(word0, word1, word3);

    if let OuiSource::Unknown(selector) = oui {
        // OUI octets stay zeroed
        loader.error(&format!(
            "Unknown OUI selector {selector:#04x}, MAC address prefix cannot be determined"
        ));
    }

    Ok(mac)
}
