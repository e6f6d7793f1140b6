//! Flash stub descriptions
//!
//! The stub is uploaded by the connection layer; this crate only describes
//! where its segments are loaded and where execution starts.

use std::{fs::read_to_string, io};

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::StubError, target::Chip, Error};

/// Flash stub object (deserialized from TOML, converted from JSON as used by
/// `esptool.py`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlashStub {
    /// Entry point (address)
    entry: u32,
    /// Text (base64 encoded)
    text: String,
    /// Start of text section address
    text_start: u32,
    /// Data (base64 encoded)
    data: String,
    /// Start of data section address
    data_start: u32,
}

impl FlashStub {
    /// Load the stub for `chip` from the configured stub directory
    ///
    /// The description is read from `<dir>/<chip>.toml`; the files are
    /// provided by the caller, none are embedded in the library.
    pub fn load(chip: Chip, config: &Config) -> Result<Self, Error> {
        let dir = config.stub_dir().ok_or_else(|| {
            Error::FileOpenError(
                format!("{chip}.toml"),
                io::Error::new(io::ErrorKind::NotFound, "no stub directory configured"),
            )
        })?;
        let path = dir.join(format!("{chip}.toml"));

        let data = read_to_string(&path)
            .map_err(|e| Error::FileOpenError(path.display().to_string(), e))?;

        Self::from_toml(chip, &data)
    }

    /// Parse a stub description
    pub fn from_toml(chip: Chip, data: &str) -> Result<Self, Error> {
        toml::from_str(data).map_err(|e| Error::InvalidStub(chip, StubError::Toml(e)))
    }

    /// Fetch stub entry point
    pub fn entry(&self) -> u32 {
        self.entry
    }

    /// Fetch text start address and bytes
    pub fn text(&self) -> Result<(u32, Vec<u8>), StubError> {
        let v = general_purpose::STANDARD.decode(&self.text)?;
        Ok((self.text_start, v))
    }

    /// Fetch data start address and bytes
    pub fn data(&self) -> Result<(u32, Vec<u8>), StubError> {
        let v = general_purpose::STANDARD.decode(&self.data)?;
        Ok((self.data_start, v))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::StubConfig;

    const STUB: &str = r#"
entry = 1074521580
text = "CAD0PxwA9D8AAPQ/"
text_start = 1074520064
data = "CMD8Pw=="
data_start = 1073605544
"#;

    #[test]
    fn decodes_stub_segments() {
        let stub = FlashStub::from_toml(Chip::Esp32, STUB).unwrap();

        assert_eq!(stub.entry(), 1074521580);

        let (text_start, text) = stub.text().unwrap();
        assert_eq!(text_start, 1074520064);
        assert_eq!(text.len(), 12);

        let (data_start, data) = stub.data().unwrap();
        assert_eq!(data_start, 1073605544);
        assert_eq!(data, vec![0x08, 0xc0, 0xfc, 0x3f]);
    }

    #[test]
    fn rejects_bad_payload() {
        let stub = FlashStub::from_toml(Chip::Esp32, &STUB.replace("CMD8Pw==", "not base64!"))
            .unwrap();

        assert!(matches!(stub.data(), Err(StubError::Base64(_))));
    }

    #[test]
    fn rejects_incomplete_stub() {
        assert!(matches!(
            FlashStub::from_toml(Chip::Esp8266, "entry = 0"),
            Err(Error::InvalidStub(Chip::Esp8266, StubError::Toml(_)))
        ));
    }

    #[test]
    fn missing_stub_file() {
        let config = Config {
            stubs: StubConfig {
                dir: Some(PathBuf::from("/nonexistent/stubs")),
            },
        };

        match Chip::Esp32c3.stub(&config) {
            Err(Error::FileOpenError(path, _)) => assert!(path.ends_with("esp32c3.toml")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
