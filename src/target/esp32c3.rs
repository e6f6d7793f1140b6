use super::{efuse::esp32c3 as efuse, ChipParams, MacLayout, SpiRegisters, ESP32_FLASH_SIZES};
use crate::{Error, Loader};

pub(crate) const PARAMS: ChipParams = ChipParams {
    name: "ESP32-C3",
    image_chip_id: Some(5),
    efuse_reg: efuse::EFUSE_BASE,
    mac_efuse_reg: efuse::MAC0.address(),
    mac_layout: MacLayout::TwoWord,
    uart_clkdiv_reg: 0x6000_0014, // UART0_BASE_REG + 0x14
    uart_date_reg: Some(0x6000_007c),
    spi_registers: SpiRegisters {
        base: 0x6000_2000,
        usr_offset: 0x18,
        usr1_offset: 0x1c,
        usr2_offset: 0x20,
        w0_offset: 0x58,
        mosi_length_offset: Some(0x24),
        miso_length_offset: Some(0x28),
    },
    flash_write_size: 0x400,
    bootloader_flash_offset: 0x0,
    flash_sizes: ESP32_FLASH_SIZES,
};

pub(crate) async fn package_version<L: Loader>(loader: &mut L) -> Result<u32, Error> {
    efuse::PKG_VERSION.read(loader).await
}

pub(crate) async fn chip_revision<L: Loader>(loader: &mut L) -> Result<u32, Error> {
    efuse::WAFER_VERSION.read(loader).await
}

pub(crate) async fn chip_description<L: Loader>(loader: &mut L) -> Result<String, Error> {
    let name = match package_version(loader).await? {
        0 => "ESP32-C3",
        _ => "unknown ESP32-C3",
    };
    let revision = chip_revision(loader).await?;

    Ok(format!("{name} (revision {revision})"))
}
