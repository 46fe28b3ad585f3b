use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::desfire::FileType;

/// Errors raised by the strict DESFire file settings decoder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Empty file settings block")]
    Empty,

    #[error("Unknown file type 0x{0:02x}")]
    UnknownFileType(u8),

    #[error("Truncated {file_type} settings: expected {expected} bytes, got {actual}")]
    Truncated {
        file_type: FileType,
        expected: usize,
        actual: usize,
    },
}

/// Errors that can occur when loading a card dump
#[derive(Error, Debug)]
pub enum CardError {
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed dump: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid hex in {field}: {source}")]
    Hex {
        field: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("Application id 0x{0:x} does not fit in 24 bits")]
    ApplicationId(u32),

    #[error("Ultralight page {index} has {len} bytes, expected 4")]
    PageLength { index: usize, len: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Unsupported locale: {0}")]
    Unsupported(String),

    #[error("Malformed string table for {locale}: {message}")]
    MalformedTable { locale: String, message: String },
}

/// Errors that can occur when loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Locale(#[from] LocaleError),
}
