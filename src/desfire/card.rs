use serde::Serialize;

use super::settings::DesfireFileSettings;
use crate::localize::{Localizer, StringKey};

/// Outcome of reading a file's contents
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum FileState {
    #[default]
    Read,
    Unauthorized,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesfireFile {
    pub id: u8,
    pub settings: DesfireFileSettings,
    pub data: Option<Vec<u8>>,
    pub state: FileState,
}

impl DesfireFile {
    pub fn new(id: u8, settings: DesfireFileSettings, data: Vec<u8>) -> Self {
        Self {
            id,
            settings,
            data: Some(data),
            state: FileState::Read,
        }
    }

    pub fn unauthorized(id: u8, settings: DesfireFileSettings) -> Self {
        Self {
            id,
            settings,
            data: None,
            state: FileState::Unauthorized,
        }
    }

    pub fn with_error(id: u8, settings: DesfireFileSettings, message: impl Into<String>) -> Self {
        Self {
            id,
            settings,
            data: None,
            state: FileState::Error(message.into()),
        }
    }

    pub fn title(&self, localizer: &dyn Localizer) -> String {
        let id = format!("0x{:02x}", self.id);
        localizer.localize_format(StringKey::DesfireFileTitle, &[&id])
    }

    /// Read failures take precedence over the settings description.
    pub fn subtitle(&self, localizer: &dyn Localizer) -> String {
        match &self.state {
            FileState::Read => self.settings.subtitle(localizer),
            FileState::Unauthorized => localizer.localize(StringKey::DesfireUnauthorizedFile),
            FileState::Error(message) => {
                localizer.localize_format(StringKey::DesfireFileError, &[message])
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesfireApplication {
    /// 24-bit application identifier
    pub id: u32,
    pub files: Vec<DesfireFile>,
}

impl DesfireApplication {
    pub fn new(id: u32, files: Vec<DesfireFile>) -> Self {
        Self { id, files }
    }

    pub fn file(&self, id: u8) -> Option<&DesfireFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn title(&self, localizer: &dyn Localizer) -> String {
        let id = format!("0x{:06x}", self.id);
        localizer.localize_format(StringKey::DesfireApplicationTitle, &[&id])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesfireCard {
    pub uid: Vec<u8>,
    pub applications: Vec<DesfireApplication>,
}

impl DesfireCard {
    pub fn new(uid: Vec<u8>, applications: Vec<DesfireApplication>) -> Self {
        Self { uid, applications }
    }

    pub fn application(&self, aid: u32) -> Option<&DesfireApplication> {
        self.applications.iter().find(|a| a.id == aid)
    }

    pub fn file(&self, aid: u32, fid: u8) -> Option<&DesfireFile> {
        self.application(aid)?.file(fid)
    }

    /// Every file on the card with its application id
    pub fn files(&self) -> impl Iterator<Item = (u32, &DesfireFile)> {
        self.applications
            .iter()
            .flat_map(|app| app.files.iter().map(move |f| (app.id, f)))
    }

    pub fn invalid_file_count(&self) -> usize {
        self.files().filter(|(_, f)| f.settings.is_invalid()).count()
    }
}
