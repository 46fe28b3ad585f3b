//! On-disk card dumps.
//!
//! Dumps are JSON documents tagged by card family. Byte fields are hex
//! strings.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::desfire::{DesfireApplication, DesfireCard, DesfireFile, DesfireFileSettings};
use crate::error::CardError;
use crate::ultralight::{PAGE_SIZE, UltralightCard, UltralightPage};
use crate::util::parse_hex;

/// DESFire application identifiers are 24 bits wide
const MAX_AID: u32 = 0x00FF_FFFF;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardDump {
    Desfire(DesfireDump),
    Ultralight(UltralightDump),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DesfireDump {
    pub uid: String,
    #[serde(default)]
    pub applications: Vec<ApplicationDump>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplicationDump {
    pub id: u32,
    #[serde(default)]
    pub files: Vec<FileDump>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileDump {
    pub id: u8,
    #[serde(default)]
    pub settings: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub unauthorized: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UltralightDump {
    pub uid: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub pages: Vec<PageDump>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageDump {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub unauthorized: bool,
}

/// A decoded card of any supported family
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Card {
    Desfire(DesfireCard),
    Ultralight(UltralightCard),
}

impl Card {
    pub fn uid(&self) -> &[u8] {
        match self {
            Card::Desfire(card) => &card.uid,
            Card::Ultralight(card) => &card.uid,
        }
    }
}

impl CardDump {
    pub fn from_json(source: &str) -> Result<Self, CardError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, CardError> {
        let source = fs::read_to_string(path).map_err(|source| CardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dump = Self::from_json(&source)?;
        tracing::info!(path = %path.display(), "loaded card dump");
        Ok(dump)
    }

    /// Decodes hex fields and file settings.
    ///
    /// Settings that are missing or not valid hex become
    /// [`DesfireFileSettings::Invalid`] rather than failing the dump.
    pub fn into_card(self) -> Result<Card, CardError> {
        match self {
            CardDump::Desfire(dump) => dump.into_card().map(Card::Desfire),
            CardDump::Ultralight(dump) => dump.into_card().map(Card::Ultralight),
        }
    }
}

impl DesfireDump {
    fn into_card(self) -> Result<DesfireCard, CardError> {
        let uid = decode_field("uid", &self.uid)?;
        let applications = self
            .applications
            .into_iter()
            .map(ApplicationDump::into_application)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DesfireCard::new(uid, applications))
    }
}

impl ApplicationDump {
    fn into_application(self) -> Result<DesfireApplication, CardError> {
        let aid = self.id;
        if aid > MAX_AID {
            return Err(CardError::ApplicationId(aid));
        }
        let files = self
            .files
            .into_iter()
            .map(|file| file.into_file(aid))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DesfireApplication::new(aid, files))
    }
}

impl FileDump {
    fn into_file(self, aid: u32) -> Result<DesfireFile, CardError> {
        let raw_settings = self.settings.as_deref().and_then(|text| match parse_hex(text) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::debug!(aid, file = self.id, error = %e, "settings are not hex");
                None
            }
        });
        let settings = DesfireFileSettings::decode_optional(raw_settings.as_deref());

        if self.unauthorized {
            return Ok(DesfireFile::unauthorized(self.id, settings));
        }
        if let Some(message) = self.error {
            return Ok(DesfireFile::with_error(self.id, settings, message));
        }

        let field = format!("application 0x{:06x} file 0x{:02x} data", aid, self.id);
        let data = match self.data.as_deref() {
            Some(text) => decode_field(&field, text)?,
            None => Vec::new(),
        };
        Ok(DesfireFile::new(self.id, settings, data))
    }
}

impl UltralightDump {
    fn into_card(self) -> Result<UltralightCard, CardError> {
        let uid = decode_field("uid", &self.uid)?;
        let pages = self
            .pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| page.into_page(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(UltralightCard::new(uid, self.model, pages))
    }
}

impl PageDump {
    fn into_page(self, index: usize) -> Result<UltralightPage, CardError> {
        if self.unauthorized {
            return Ok(UltralightPage::unauthorized());
        }
        let data = match self.data.as_deref() {
            Some(text) => decode_field(&format!("page {}", index), text)?,
            None => vec![0; PAGE_SIZE],
        };
        if data.len() != PAGE_SIZE {
            return Err(CardError::PageLength {
                index,
                len: data.len(),
            });
        }
        Ok(UltralightPage::new(data))
    }
}

fn decode_field(field: &str, text: &str) -> Result<Vec<u8>, CardError> {
    parse_hex(text).map_err(|source| CardError::Hex {
        field: field.to_string(),
        source,
    })
}
