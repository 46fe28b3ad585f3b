use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::{Localizer, StringKey};
use crate::error::LocaleError;

const EN_STRINGS: &str = include_str!("strings/en.json");
const FR_STRINGS: &str = include_str!("strings/fr.json");
const DE_STRINGS: &str = include_str!("strings/de.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::English, Locale::French, Locale::German];

    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
            Self::German => "de",
        }
    }

    /// CLDR cardinal category for `count`
    #[must_use]
    pub fn plural_category(&self, count: u64) -> PluralCategory {
        match self {
            Self::French if count <= 1 => PluralCategory::One,
            Self::English | Self::German if count == 1 => PluralCategory::One,
            _ => PluralCategory::Other,
        }
    }

    fn builtin_source(&self) -> &'static str {
        match self {
            Self::English => EN_STRINGS,
            Self::French => FR_STRINGS,
            Self::German => DE_STRINGS,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Accepts bare language tags and region-qualified ones (`fr-CA`, `de_AT`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|locale| locale.tag() == language)
            .ok_or_else(|| LocaleError::Unsupported(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralCategory {
    One,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum Entry {
    Text(String),
    Plural { one: Option<String>, other: String },
}

impl Entry {
    fn select(&self, category: Option<PluralCategory>) -> &str {
        match (self, category) {
            (Entry::Text(text), _) => text,
            (Entry::Plural { one: Some(one), .. }, Some(PluralCategory::One)) => one,
            (Entry::Plural { other, .. }, _) => other,
        }
    }
}

/// The strings of a single locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    locale: Locale,
    entries: HashMap<StringKey, Entry>,
}

impl StringTable {
    /// Parses a table from a JSON object mapping resource keys to either a
    /// string or a `{ "one": .., "other": .. }` plural object.
    ///
    /// Keys the crate does not know about are skipped.
    pub fn from_json(locale: Locale, source: &str) -> Result<Self, LocaleError> {
        let raw: HashMap<String, Entry> =
            serde_json::from_str(source).map_err(|e| LocaleError::MalformedTable {
                locale: locale.tag().to_string(),
                message: e.to_string(),
            })?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (name, entry) in raw {
            match name.parse::<StringKey>() {
                Ok(key) => {
                    entries.insert(key, entry);
                }
                Err(()) => {
                    tracing::debug!(locale = %locale, key = %name, "skipping unknown string key");
                }
            }
        }

        Ok(Self { locale, entries })
    }

    pub fn builtin(locale: Locale) -> Result<Self, LocaleError> {
        Self::from_json(locale, locale.builtin_source())
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn contains(&self, key: StringKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Keys the crate renders that this table does not define
    pub fn missing_keys(&self) -> Vec<StringKey> {
        StringKey::ALL
            .into_iter()
            .filter(|key| !self.contains(*key))
            .collect()
    }

    pub fn get(&self, key: StringKey, count: Option<u64>) -> Option<&str> {
        let category = count.map(|n| self.locale.plural_category(n));
        self.entries.get(&key).map(|entry| entry.select(category))
    }
}

impl Localizer for StringTable {
    fn template(&self, key: StringKey, count: Option<u64>) -> String {
        self.get(key, count).unwrap_or(key.as_str()).to_string()
    }
}

/// All loaded locales plus the one currently in use.
///
/// Lookups fall back from the active locale to English and finally to the
/// resource key itself, so every [`StringKey`] resolves to some text.
#[derive(Debug)]
pub struct StringCatalog {
    tables: HashMap<Locale, StringTable>,
    active: RwLock<Locale>,
}

impl StringCatalog {
    pub fn new(tables: impl IntoIterator<Item = StringTable>) -> Self {
        let tables = tables
            .into_iter()
            .map(|table| (table.locale(), table))
            .collect();
        Self {
            tables,
            active: RwLock::new(Locale::English),
        }
    }

    /// Loads every locale shipped with the crate, with English active
    pub fn builtin() -> Result<Self, LocaleError> {
        let tables = Locale::ALL
            .into_iter()
            .map(StringTable::builtin)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(tables))
    }

    pub fn with_locale(self, locale: Locale) -> Result<Self, LocaleError> {
        self.set_locale(locale)?;
        Ok(self)
    }

    pub fn locale(&self) -> Locale {
        *self.active.read()
    }

    pub fn set_locale(&self, locale: Locale) -> Result<(), LocaleError> {
        if !self.tables.contains_key(&locale) {
            return Err(LocaleError::Unsupported(locale.tag().to_string()));
        }
        *self.active.write() = locale;
        Ok(())
    }
}

impl Localizer for StringCatalog {
    fn template(&self, key: StringKey, count: Option<u64>) -> String {
        let active = self.locale();
        [active, Locale::English]
            .iter()
            .filter_map(|locale| self.tables.get(locale))
            .find_map(|table| table.get(key, count))
            .unwrap_or(key.as_str())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_region_tag() {
        assert_eq!("fr-CA".parse::<Locale>().unwrap(), Locale::French);
        assert_eq!("de_AT".parse::<Locale>().unwrap(), Locale::German);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::English);
        assert!("ja".parse::<Locale>().is_err());
    }

    #[test]
    fn test_plural_categories() {
        assert_eq!(Locale::English.plural_category(0), PluralCategory::Other);
        assert_eq!(Locale::French.plural_category(0), PluralCategory::One);
        assert_eq!(Locale::German.plural_category(1), PluralCategory::One);
        assert_eq!(Locale::German.plural_category(2), PluralCategory::Other);
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let table = StringTable::from_json(
            Locale::English,
            r#"{ "desfire_unknown_file": "Unknown file", "not_a_key": "x" }"#,
        )
        .unwrap();
        assert!(table.contains(StringKey::DesfireUnknownFile));
        assert_eq!(table.missing_keys().len(), StringKey::ALL.len() - 1);
    }

    #[test]
    fn test_malformed_table() {
        let err = StringTable::from_json(Locale::French, "[1, 2]").unwrap_err();
        assert!(matches!(err, LocaleError::MalformedTable { .. }));
    }

    #[test]
    fn test_set_locale_requires_loaded_table() {
        let catalog = StringCatalog::new([StringTable::builtin(Locale::English).unwrap()]);
        assert!(catalog.set_locale(Locale::German).is_err());
        assert_eq!(catalog.locale(), Locale::English);
    }
}
