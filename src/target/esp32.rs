use super::{efuse::esp32 as efuse, ChipParams, MacLayout, SpiRegisters, ESP32_FLASH_SIZES};
use crate::{Error, Loader};

pub(crate) const XTAL_CLK_DIVIDER: u32 = 1;

pub(crate) const PARAMS: ChipParams = ChipParams {
    name: "ESP32",
    image_chip_id: Some(0),
    efuse_reg: efuse::EFUSE_BASE,
    mac_efuse_reg: efuse::EFUSE_BASE + 0x4,
    mac_layout: MacLayout::TwoWord,
    uart_clkdiv_reg: 0x3ff4_0014, // UART0_BASE_REG + 0x14
    uart_date_reg: Some(0x6000_0078),
    spi_registers: SpiRegisters {
        base: 0x3ff4_2000,
        usr_offset: 0x1c,
        usr1_offset: 0x20,
        usr2_offset: 0x24,
        w0_offset: 0x80,
        mosi_length_offset: Some(0x28),
        miso_length_offset: Some(0x2c),
    },
    flash_write_size: 0x400,
    bootloader_flash_offset: 0x1000,
    flash_sizes: ESP32_FLASH_SIZES,
};

/// Package names indexed by package version; slot 3 is unassigned
const PACKAGES: [&str; 7] = [
    "ESP32-D0WDQ6",
    "ESP32-D0WD",
    "ESP32-D2WD",
    "",
    "ESP32-U4WDH",
    "ESP32-PICO-D4",
    "ESP32-PICO-V3-02",
];

pub(crate) async fn package_version<L: Loader>(loader: &mut L) -> Result<u32, Error> {
    let word3 = loader.read_reg(efuse::PKG_VERSION.address()).await?;

    let pkg_version = efuse::PKG_VERSION.extract(word3);
    let pkg_version = pkg_version + (efuse::PKG_VERSION_4BIT.extract(word3) << 3);

    Ok(pkg_version)
}

pub(crate) async fn chip_revision<L: Loader>(loader: &mut L) -> Result<u32, Error> {
    let rev_bit0 = efuse::CHIP_VER_REV1.read(loader).await?;
    let rev_bit1 = efuse::CHIP_VER_REV2.read(loader).await?;
    let rev_bit2 = efuse::APB_CTL_DATE_REV.read(loader).await?;

    let combine_value = (rev_bit2 << 2) | (rev_bit1 << 1) | rev_bit0;

    let revision = match combine_value {
        1 => 1,
        3 => 2,
        7 => 3,
        _ => 0,
    };

    Ok(revision)
}

pub(crate) async fn chip_description<L: Loader>(loader: &mut L) -> Result<String, Error> {
    let pkg_version = package_version(loader).await?;
    let revision = chip_revision(loader).await?;
    let single_core = efuse::DISABLE_APP_CPU.read(loader).await? != 0;

    loader.debug(&format!(
        "ESP32 package {pkg_version}, revision {revision}, single core: {single_core}"
    ));

    let rev3 = revision == 3;

    let mut name = match pkg_version {
        0 if single_core => "ESP32-S0WDQ6".to_string(),
        1 if single_core => "ESP32-S0WD".to_string(),
        5 if rev3 => "ESP32-PICO-V3".to_string(),
        pkg => match PACKAGES.get(pkg as usize) {
            Some(package) if !package.is_empty() => package.to_string(),
            _ => "unknown ESP32".to_string(),
        },
    };

    if rev3 && (pkg_version == 0 || pkg_version == 1) {
        name.push_str("-V3");
    }

    Ok(format!("{name} (revision {revision})"))
}

pub(crate) async fn chip_features<L: Loader>(loader: &mut L) -> Result<Vec<&'static str>, Error> {
    let word3 = loader.read_reg(efuse::DISABLE_BT.address()).await?;

    let mut features = vec!["Wi-Fi"];

    if efuse::DISABLE_BT.extract(word3) == 0 {
        features.push("BT");
    }

    if efuse::DISABLE_APP_CPU.extract(word3) == 0 {
        features.push("Dual Core");
    } else {
        features.push("Single Core");
    }

    if efuse::CHIP_CPU_FREQ_RATED.extract(word3) != 0 {
        if efuse::CHIP_CPU_FREQ_LOW.extract(word3) != 0 {
            features.push("160MHz");
        } else {
            features.push("240MHz");
        }
    }

    let pkg_version = package_version(loader).await?;
    if [2, 4, 5, 6].contains(&pkg_version) {
        features.push("Embedded Flash");
    }
    if pkg_version == 6 {
        features.push("Embedded PSRAM");
    }

    if efuse::ADC_VREF.read(loader).await? != 0 {
        features.push("VRef calibration in efuse");
    }

    if efuse::BLK3_PART_RESERVE.extract(word3) != 0 {
        features.push("BLK3 partially reserved");
    }

    let coding_scheme = efuse::CODING_SCHEME.read(loader).await?;
    features.push(match coding_scheme {
        0 => "Coding Scheme None",
        1 => "Coding Scheme 3/4",
        2 => "Coding Scheme Repeat (UNSUPPORTED)",
        _ => "Coding Scheme Invalid",
    });

    Ok(features)
}
