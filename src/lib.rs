pub mod card;
pub mod config;
pub mod desfire;
pub mod error;
pub mod localize;
pub mod report;
pub mod ultralight;
pub mod util;

pub use card::{Card, CardDump};
pub use config::{CliOverrides, Config, OutputFormat};
pub use desfire::{DesfireCard, DesfireFile, DesfireFileSettings};
pub use error::{CardError, ConfigError, LocaleError, SettingsError};
pub use localize::{Locale, Localizer, StringCatalog, StringKey, StringTable};
pub use report::{CardReport, inspect, inspect_paths};
pub use ultralight::UltralightCard;
