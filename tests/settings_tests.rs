//! DESFire file settings decoding and rendering

use farecard::desfire::{AccessKey, CommSetting, DesfireFileSettings, FileType};
use farecard::{Locale, Localizer, SettingsError, StringCatalog, StringKey, StringTable};
use proptest::prelude::*;
use rstest::*;

#[fixture]
fn english() -> StringCatalog {
    StringCatalog::builtin().unwrap()
}

fn record_block(file_type: u8, record_size: u32, max: u32, current: u32) -> Vec<u8> {
    let mut block = vec![file_type, 0x01, 0x00, 0x12];
    block.extend_from_slice(&record_size.to_le_bytes()[..3]);
    block.extend_from_slice(&max.to_le_bytes()[..3]);
    block.extend_from_slice(&current.to_le_bytes()[..3]);
    block
}

// ============================================================================
// Invalid settings
// ============================================================================

#[test]
fn test_invalid_subtitle_with_fixed_table() {
    let table = StringTable::from_json(
        Locale::English,
        r#"{ "desfire_unknown_file": "Unknown file" }"#,
    )
    .unwrap();
    assert_eq!(DesfireFileSettings::Invalid.subtitle(&table), "Unknown file");
}

#[rstest]
fn test_invalid_subtitle_builtin_english(english: StringCatalog) {
    assert_eq!(DesfireFileSettings::Invalid.subtitle(&english), "Unknown file");
}

#[rstest]
#[case(Locale::English)]
#[case(Locale::French)]
#[case(Locale::German)]
fn test_invalid_subtitle_non_empty_and_stable(#[case] locale: Locale) {
    let catalog = StringCatalog::builtin().unwrap().with_locale(locale).unwrap();
    let first = DesfireFileSettings::Invalid.subtitle(&catalog);
    let second = DesfireFileSettings::Invalid.subtitle(&catalog);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[rstest]
fn test_invalid_subtitle_follows_active_locale(english: StringCatalog) {
    english.set_locale(Locale::French).unwrap();
    assert_eq!(DesfireFileSettings::Invalid.subtitle(&english), "Fichier inconnu");
    english.set_locale(Locale::German).unwrap();
    assert_eq!(DesfireFileSettings::Invalid.subtitle(&english), "Unbekannte Datei");
}

#[test]
fn test_invalid_instances_are_equal() {
    let a = DesfireFileSettings::Invalid;
    let b = DesfireFileSettings::default();
    assert_eq!(a, b);
    assert!(b.is_invalid());
    assert_eq!(b.file_type(), None);
    assert_eq!(b.comm_setting(), None);
    assert_eq!(b.access_rights(), None);
}

#[rstest]
fn test_invalid_substitutes_for_any_variant(english: StringCatalog) {
    let family = vec![
        DesfireFileSettings::decode(&[0x00, 0x00, 0xE0, 0xEE, 0x20, 0x00, 0x00]),
        DesfireFileSettings::decode(&record_block(0x04, 32, 6, 3)),
        DesfireFileSettings::Invalid,
    ];
    let subtitles: Vec<String> = family.iter().map(|s| s.subtitle(&english)).collect();
    assert!(subtitles.iter().all(|s| !s.is_empty()));
    assert_eq!(subtitles[2], "Unknown file");
}

/// A localizer that echoes resource keys, to check which key a variant uses
struct KeyEcho;

impl Localizer for KeyEcho {
    fn template(&self, key: StringKey, _count: Option<u64>) -> String {
        key.as_str().to_string()
    }
}

#[test]
fn test_invalid_uses_unknown_file_key() {
    assert_eq!(
        DesfireFileSettings::Invalid.subtitle(&KeyEcho),
        "desfire_unknown_file"
    );
}

// ============================================================================
// Decoding
// ============================================================================

#[rstest]
#[case::empty(&[], SettingsError::Empty)]
#[case::unknown_type(&[0x09, 0x00, 0x00, 0x00], SettingsError::UnknownFileType(0x09))]
#[case::short_standard(
    &[0x00, 0x00, 0xE0, 0xEE, 0x20],
    SettingsError::Truncated { file_type: FileType::Standard, expected: 7, actual: 5 }
)]
#[case::short_value(
    &[0x02, 0x00, 0x00, 0x00],
    SettingsError::Truncated { file_type: FileType::Value, expected: 17, actual: 4 }
)]
fn test_parse_errors(#[case] block: &[u8], #[case] expected: SettingsError) {
    assert_eq!(DesfireFileSettings::parse(block).unwrap_err(), expected);
    assert!(DesfireFileSettings::decode(block).is_invalid());
}

#[test]
fn test_decode_optional_absent_is_invalid() {
    assert!(DesfireFileSettings::decode_optional(None).is_invalid());
}

#[test]
fn test_trailing_status_bytes_ignored() {
    let block = [0x01, 0x00, 0xE0, 0xEE, 0x00, 0x01, 0x00, 0x91, 0x00];
    let DesfireFileSettings::Backup(backup) = DesfireFileSettings::parse(&block).unwrap() else {
        panic!("expected backup settings");
    };
    assert_eq!(backup.file_size, 256);
    assert_eq!(backup.comm, CommSetting::Plain);
    assert_eq!(backup.access.read, AccessKey::Free);
    assert_eq!(backup.access.change, AccessKey::Key(0));
}

#[test]
fn test_record_settings() {
    let settings = DesfireFileSettings::parse(&record_block(0x03, 16, 10, 2)).unwrap();
    let DesfireFileSettings::LinearRecord(record) = settings else {
        panic!("expected linear record settings");
    };
    assert_eq!(record.record_size, 16);
    assert_eq!(record.max_records, 10);
    assert_eq!(record.current_records, 2);
    assert_eq!(record.comm, CommSetting::Maced);
    assert_eq!(record.access.read, AccessKey::Key(1));
    assert_eq!(record.access.write, AccessKey::Key(2));
}

// ============================================================================
// Subtitles
// ============================================================================

#[rstest]
fn test_standard_subtitle(english: StringCatalog) {
    let settings = DesfireFileSettings::decode(&[0x00, 0x00, 0xE0, 0xEE, 0x20, 0x00, 0x00]);
    assert_eq!(settings.subtitle(&english), "Standard file, 32 bytes");
}

#[rstest]
fn test_standard_subtitle_singular(english: StringCatalog) {
    let settings = DesfireFileSettings::decode(&[0x00, 0x00, 0xE0, 0xEE, 0x01, 0x00, 0x00]);
    assert_eq!(settings.subtitle(&english), "Standard file, 1 byte");
    english.set_locale(Locale::French).unwrap();
    assert_eq!(settings.subtitle(&english), "Fichier standard, 1 octet");
}

#[rstest]
fn test_cyclic_subtitle(english: StringCatalog) {
    let settings = DesfireFileSettings::decode(&record_block(0x04, 32, 6, 3));
    assert_eq!(
        settings.subtitle(&english),
        "Cyclic record file, 3 of 6 records, 32 bytes each"
    );
}

#[rstest]
fn test_value_subtitle(english: StringCatalog) {
    let mut block = vec![0x02, 0x00, 0xEE, 0xEE];
    block.extend_from_slice(&(-100i32).to_le_bytes());
    block.extend_from_slice(&5000i32.to_le_bytes());
    block.extend_from_slice(&0i32.to_le_bytes());
    block.push(0x00);
    let settings = DesfireFileSettings::decode(&block);
    assert_eq!(settings.subtitle(&english), "Value file, range -100 to 5000");
}

#[rstest]
fn test_detail_describes_access(english: StringCatalog) {
    let settings = DesfireFileSettings::decode(&record_block(0x03, 16, 10, 2));
    assert_eq!(
        settings.detail(&english).unwrap(),
        "Communication: MACed; read: key 1, write: key 2, read/write: key 0, change: key 0"
    );
}

proptest! {
    #[test]
    fn prop_decode_is_total(block in proptest::collection::vec(any::<u8>(), 0..64)) {
        let decoded = DesfireFileSettings::decode(&block);
        prop_assert_eq!(decoded.is_invalid(), DesfireFileSettings::parse(&block).is_err());
    }

    #[test]
    fn prop_unknown_type_is_invalid(
        file_type in 5u8..,
        tail in proptest::collection::vec(any::<u8>(), 0..32),
    ) {
        let mut block = vec![file_type];
        block.extend(tail);
        prop_assert!(DesfireFileSettings::decode(&block).is_invalid());
    }
}
