//! MIFARE DESFire applications, files and file settings.

pub mod access;
pub mod card;
pub mod settings;

pub use access::{AccessKey, AccessRights, CommSetting};
pub use card::{DesfireApplication, DesfireCard, DesfireFile, FileState};
pub use settings::{
    DataFileSettings, DesfireFileSettings, FileType, RecordFileSettings, ValueFileSettings,
};
