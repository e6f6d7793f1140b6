use super::{efuse::esp32s2 as efuse, ChipParams, MacLayout, SpiRegisters, ESP32_FLASH_SIZES};
use crate::{loader::USB_RAM_BLOCK_SIZE, Error, Loader};

pub(crate) const PARAMS: ChipParams = ChipParams {
    name: "ESP32-S2",
    image_chip_id: Some(2),
    efuse_reg: efuse::EFUSE_BASE,
    mac_efuse_reg: efuse::MAC0.address(),
    mac_layout: MacLayout::TwoWord,
    uart_clkdiv_reg: 0x3f40_0014, // UART0_BASE_REG + 0x14
    uart_date_reg: Some(0x6000_0078),
    spi_registers: SpiRegisters {
        base: 0x3f40_2000,
        usr_offset: 0x18,
        usr1_offset: 0x1c,
        usr2_offset: 0x20,
        w0_offset: 0x58,
        mosi_length_offset: Some(0x24),
        miso_length_offset: Some(0x28),
    },
    flash_write_size: 0x400,
    bootloader_flash_offset: 0x1000,
    flash_sizes: ESP32_FLASH_SIZES,
};

pub(crate) async fn package_version<L: Loader>(loader: &mut L) -> Result<u32, Error> {
    efuse::PKG_VERSION.read(loader).await
}

pub(crate) async fn chip_revision<L: Loader>(loader: &mut L) -> Result<u32, Error> {
    efuse::WAFER_VERSION_MAJOR.read(loader).await
}

pub(crate) async fn chip_description<L: Loader>(loader: &mut L) -> Result<String, Error> {
    let name = match package_version(loader).await? {
        0 => "ESP32-S2",
        1 => "ESP32-S2FH16",
        2 => "ESP32-S2FH32",
        _ => "unknown ESP32-S2",
    };
    let revision = chip_revision(loader).await?;

    Ok(format!("{name} (revision {revision})"))
}

pub(crate) async fn chip_features<L: Loader>(loader: &mut L) -> Result<Vec<&'static str>, Error> {
    let mut features = vec!["Wi-Fi"];

    let flash_version = match package_version(loader).await? {
        0 => "No Embedded Flash",
        1 => "Embedded Flash 2MB",
        2 => "Embedded Flash 4MB",
        _ => "Unknown Embedded Flash",
    };
    features.push(flash_version);

    let psram_version = match efuse::PSRAM_VERSION.read(loader).await? {
        0 => "No Embedded PSRAM",
        1 => "Embedded PSRAM 2MB",
        2 => "Embedded PSRAM 4MB",
        _ => "Unknown Embedded PSRAM",
    };
    features.push(psram_version);

    let block2_version = match efuse::BLK_VERSION_MINOR.read(loader).await? {
        0 => "No calibration in BLK2 of efuse",
        1 => "ADC and temperature sensor calibration in BLK2 of efuse V1",
        2 => "ADC and temperature sensor calibration in BLK2 of efuse V2",
        _ => "Unknown Calibration in BLK2",
    };
    features.push(block2_version);

    Ok(features)
}

/// Shrink RAM download blocks when the ROM is talking over USB-OTG.
pub(crate) async fn post_connect<L: Loader>(loader: &mut L) -> Result<(), Error> {
    let buf_no = loader.read_reg(efuse::UARTDEV_BUF_NO).await? & 0xff;

    if buf_no == efuse::UARTDEV_BUF_NO_USB_OTG {
        loader.info("Download mode over USB-OTG, reducing RAM block size");
        loader.set_ram_block_size(USB_RAM_BLOCK_SIZE);
    }

    Ok(())
}
