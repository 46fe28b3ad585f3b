//! DESFire file settings.
//!
//! A settings block is the card's answer to GetFileSettings. Layout, all
//! integers little-endian:
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 1 | file type |
//! | 1 | 1 | communication settings |
//! | 2 | 2 | access rights |
//! | 4 | .. | type specific |
//!
//! Standard and backup files carry a 3 byte size. Value files carry lower
//! limit, upper limit and limited credit value (i32 each) followed by a
//! limited-credit flag byte. Record files carry record size, maximum record
//! count and current record count, 3 bytes each.

use byteorder::{LittleEndian, ReadBytesExt};
use serde::Serialize;
use std::fmt;
use std::io::Cursor;

use super::access::{AccessRights, CommSetting};
use crate::error::SettingsError;
use crate::localize::{Localizer, StringKey};

const COMMON_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Standard,
    Backup,
    Value,
    LinearRecord,
    CyclicRecord,
}

impl FileType {
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Standard),
            0x01 => Some(Self::Backup),
            0x02 => Some(Self::Value),
            0x03 => Some(Self::LinearRecord),
            0x04 => Some(Self::CyclicRecord),
            _ => None,
        }
    }

    /// Minimum length of a settings block of this type
    #[must_use]
    pub const fn settings_len(&self) -> usize {
        match self {
            Self::Standard | Self::Backup => COMMON_LEN + 3,
            Self::Value => COMMON_LEN + 13,
            Self::LinearRecord | Self::CyclicRecord => COMMON_LEN + 9,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Backup => "backup",
            Self::Value => "value",
            Self::LinearRecord => "linear record",
            Self::CyclicRecord => "cyclic record",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings of a standard or backup data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataFileSettings {
    pub comm: CommSetting,
    pub access: AccessRights,
    pub file_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueFileSettings {
    pub comm: CommSetting,
    pub access: AccessRights,
    pub lower_limit: i32,
    pub upper_limit: i32,
    pub limited_credit_value: i32,
    pub limited_credit_enabled: bool,
}

/// Settings of a linear or cyclic record file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordFileSettings {
    pub comm: CommSetting,
    pub access: AccessRights,
    pub record_size: u32,
    pub max_records: u32,
    pub current_records: u32,
}

/// Decoded settings of one DESFire file.
///
/// `Invalid` stands in for settings that could not be read or recognized.
/// It holds no data and is what [`DesfireFileSettings::decode`] returns on
/// any failure, so every file always has a renderable settings value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DesfireFileSettings {
    Standard(DataFileSettings),
    Backup(DataFileSettings),
    Value(ValueFileSettings),
    LinearRecord(RecordFileSettings),
    CyclicRecord(RecordFileSettings),
    #[default]
    Invalid,
}

impl DesfireFileSettings {
    /// Strictly decodes a settings block. Bytes past the type's required
    /// length are ignored.
    pub fn parse(data: &[u8]) -> Result<Self, SettingsError> {
        let (&type_byte, _) = data.split_first().ok_or(SettingsError::Empty)?;
        let file_type =
            FileType::from_byte(type_byte).ok_or(SettingsError::UnknownFileType(type_byte))?;

        let truncated = || SettingsError::Truncated {
            file_type,
            expected: file_type.settings_len(),
            actual: data.len(),
        };
        if data.len() < file_type.settings_len() {
            return Err(truncated());
        }

        let mut cursor = Cursor::new(&data[1..]);
        let comm = CommSetting::from_byte(cursor.read_u8().map_err(|_| truncated())?);
        let access = AccessRights::from_u16(
            cursor
                .read_u16::<LittleEndian>()
                .map_err(|_| truncated())?,
        );

        let settings = match file_type {
            FileType::Standard | FileType::Backup => {
                let data_settings = DataFileSettings {
                    comm,
                    access,
                    file_size: cursor
                        .read_u24::<LittleEndian>()
                        .map_err(|_| truncated())?,
                };
                if file_type == FileType::Standard {
                    Self::Standard(data_settings)
                } else {
                    Self::Backup(data_settings)
                }
            }
            FileType::Value => {
                let lower_limit = cursor
                    .read_i32::<LittleEndian>()
                    .map_err(|_| truncated())?;
                let upper_limit = cursor
                    .read_i32::<LittleEndian>()
                    .map_err(|_| truncated())?;
                let limited_credit_value = cursor
                    .read_i32::<LittleEndian>()
                    .map_err(|_| truncated())?;
                let flags = cursor.read_u8().map_err(|_| truncated())?;
                Self::Value(ValueFileSettings {
                    comm,
                    access,
                    lower_limit,
                    upper_limit,
                    limited_credit_value,
                    limited_credit_enabled: flags & 0x01 != 0,
                })
            }
            FileType::LinearRecord | FileType::CyclicRecord => {
                let record_settings = RecordFileSettings {
                    comm,
                    access,
                    record_size: cursor
                        .read_u24::<LittleEndian>()
                        .map_err(|_| truncated())?,
                    max_records: cursor
                        .read_u24::<LittleEndian>()
                        .map_err(|_| truncated())?,
                    current_records: cursor
                        .read_u24::<LittleEndian>()
                        .map_err(|_| truncated())?,
                };
                if file_type == FileType::LinearRecord {
                    Self::LinearRecord(record_settings)
                } else {
                    Self::CyclicRecord(record_settings)
                }
            }
        };

        Ok(settings)
    }

    /// Decodes a settings block, falling back to `Invalid` on any error.
    pub fn decode(data: &[u8]) -> Self {
        match Self::parse(data) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::debug!(error = %e, len = data.len(), "unrecognized file settings");
                Self::Invalid
            }
        }
    }

    /// Like [`decode`](Self::decode), for files whose settings could not be
    /// read from the card at all.
    pub fn decode_optional(data: Option<&[u8]>) -> Self {
        data.map_or(Self::Invalid, Self::decode)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    pub fn file_type(&self) -> Option<FileType> {
        match self {
            Self::Standard(_) => Some(FileType::Standard),
            Self::Backup(_) => Some(FileType::Backup),
            Self::Value(_) => Some(FileType::Value),
            Self::LinearRecord(_) => Some(FileType::LinearRecord),
            Self::CyclicRecord(_) => Some(FileType::CyclicRecord),
            Self::Invalid => None,
        }
    }

    pub fn comm_setting(&self) -> Option<CommSetting> {
        match self {
            Self::Standard(s) | Self::Backup(s) => Some(s.comm),
            Self::Value(s) => Some(s.comm),
            Self::LinearRecord(s) | Self::CyclicRecord(s) => Some(s.comm),
            Self::Invalid => None,
        }
    }

    pub fn access_rights(&self) -> Option<AccessRights> {
        match self {
            Self::Standard(s) | Self::Backup(s) => Some(s.access),
            Self::Value(s) => Some(s.access),
            Self::LinearRecord(s) | Self::CyclicRecord(s) => Some(s.access),
            Self::Invalid => None,
        }
    }

    /// Short localized description of the file. Never empty as long as the
    /// localizer returns non-empty templates.
    pub fn subtitle(&self, localizer: &dyn Localizer) -> String {
        match self {
            Self::Standard(s) => localizer.localize_plural(
                StringKey::DesfireStandardFormat,
                s.file_size as u64,
                &[&s.file_size],
            ),
            Self::Backup(s) => localizer.localize_plural(
                StringKey::DesfireBackupFormat,
                s.file_size as u64,
                &[&s.file_size],
            ),
            Self::Value(s) => localizer.localize_format(
                StringKey::DesfireValueFormat,
                &[&s.lower_limit, &s.upper_limit],
            ),
            Self::LinearRecord(s) => {
                record_subtitle(localizer, StringKey::DesfireLinearRecordFormat, s)
            }
            Self::CyclicRecord(s) => {
                record_subtitle(localizer, StringKey::DesfireCyclicRecordFormat, s)
            }
            Self::Invalid => localizer.localize(StringKey::DesfireUnknownFile),
        }
    }

    /// Communication mode and access rights, or `None` for `Invalid`
    pub fn detail(&self, localizer: &dyn Localizer) -> Option<String> {
        let comm = localizer.localize(self.comm_setting()?.label_key());
        let access = self.access_rights()?.describe(localizer);
        Some(localizer.localize_format(StringKey::DesfireFileDetail, &[&comm, &access]))
    }
}

fn record_subtitle(localizer: &dyn Localizer, key: StringKey, s: &RecordFileSettings) -> String {
    localizer.localize_plural(
        key,
        s.max_records as u64,
        &[&s.current_records, &s.max_records, &s.record_size],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard() {
        let block = [0x00, 0x03, 0xEF, 0x1E, 0x20, 0x00, 0x00];
        let settings = DesfireFileSettings::parse(&block).unwrap();
        match settings {
            DesfireFileSettings::Standard(s) => {
                assert_eq!(s.comm, CommSetting::Enciphered);
                assert_eq!(s.file_size, 32);
                assert_eq!(s.access.to_u16(), 0x1EEF);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_value_negative_limits() {
        let mut block = vec![0x02, 0x00, 0xEE, 0xEE];
        block.extend_from_slice(&(-100i32).to_le_bytes());
        block.extend_from_slice(&5000i32.to_le_bytes());
        block.extend_from_slice(&0i32.to_le_bytes());
        block.push(0x01);
        let DesfireFileSettings::Value(v) = DesfireFileSettings::parse(&block).unwrap() else {
            panic!("expected value settings");
        };
        assert_eq!(v.lower_limit, -100);
        assert_eq!(v.upper_limit, 5000);
        assert!(v.limited_credit_enabled);
    }

    #[test]
    fn test_truncated_reports_lengths() {
        let err = DesfireFileSettings::parse(&[0x04, 0x00, 0x00, 0x00, 0x10]).unwrap_err();
        assert_eq!(
            err,
            SettingsError::Truncated {
                file_type: FileType::CyclicRecord,
                expected: 13,
                actual: 5
            }
        );
    }

    #[test]
    fn test_invalid_has_no_detail() {
        use crate::localize::{Locale, StringTable};

        let table = StringTable::builtin(Locale::English).unwrap();
        assert!(DesfireFileSettings::Invalid.detail(&table).is_none());
    }
}
