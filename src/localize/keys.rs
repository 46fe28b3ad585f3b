use std::fmt;
use std::str::FromStr;

/// Identifiers of every string the crate renders.
///
/// The set is closed, so each built-in locale table can be checked for
/// completeness and lookups can never name a key that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StringKey {
    DesfireCardName,
    DesfireApplicationTitle,
    DesfireAppFileCount,
    DesfireFileTitle,
    DesfireUnknownFile,
    DesfireStandardFormat,
    DesfireBackupFormat,
    DesfireValueFormat,
    DesfireLinearRecordFormat,
    DesfireCyclicRecordFormat,
    DesfireUnauthorizedFile,
    DesfireFileError,
    DesfireFileDetail,
    DesfireCommPlain,
    DesfireCommMaced,
    DesfireCommEnciphered,
    DesfireAccessKey,
    DesfireAccessFree,
    DesfireAccessDenied,
    DesfireAccessRightsFormat,
    UltralightCardName,
    UltralightPageCount,
    UltralightNotBlank,
    BlankMfuCard,
    BlankMfuCardDetail,
}

impl StringKey {
    pub const ALL: [StringKey; 25] = [
        StringKey::DesfireCardName,
        StringKey::DesfireApplicationTitle,
        StringKey::DesfireAppFileCount,
        StringKey::DesfireFileTitle,
        StringKey::DesfireUnknownFile,
        StringKey::DesfireStandardFormat,
        StringKey::DesfireBackupFormat,
        StringKey::DesfireValueFormat,
        StringKey::DesfireLinearRecordFormat,
        StringKey::DesfireCyclicRecordFormat,
        StringKey::DesfireUnauthorizedFile,
        StringKey::DesfireFileError,
        StringKey::DesfireFileDetail,
        StringKey::DesfireCommPlain,
        StringKey::DesfireCommMaced,
        StringKey::DesfireCommEnciphered,
        StringKey::DesfireAccessKey,
        StringKey::DesfireAccessFree,
        StringKey::DesfireAccessDenied,
        StringKey::DesfireAccessRightsFormat,
        StringKey::UltralightCardName,
        StringKey::UltralightPageCount,
        StringKey::UltralightNotBlank,
        StringKey::BlankMfuCard,
        StringKey::BlankMfuCardDetail,
    ];

    /// The resource identifier used in the string tables
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DesfireCardName => "desfire_card_name",
            Self::DesfireApplicationTitle => "desfire_application_title",
            Self::DesfireAppFileCount => "desfire_app_file_count",
            Self::DesfireFileTitle => "desfire_file_title",
            Self::DesfireUnknownFile => "desfire_unknown_file",
            Self::DesfireStandardFormat => "desfire_standard_format",
            Self::DesfireBackupFormat => "desfire_backup_format",
            Self::DesfireValueFormat => "desfire_value_format",
            Self::DesfireLinearRecordFormat => "desfire_linear_record_format",
            Self::DesfireCyclicRecordFormat => "desfire_cyclic_record_format",
            Self::DesfireUnauthorizedFile => "desfire_unauthorized_file",
            Self::DesfireFileError => "desfire_file_error",
            Self::DesfireFileDetail => "desfire_file_detail",
            Self::DesfireCommPlain => "desfire_comm_plain",
            Self::DesfireCommMaced => "desfire_comm_maced",
            Self::DesfireCommEnciphered => "desfire_comm_enciphered",
            Self::DesfireAccessKey => "desfire_access_key",
            Self::DesfireAccessFree => "desfire_access_free",
            Self::DesfireAccessDenied => "desfire_access_denied",
            Self::DesfireAccessRightsFormat => "desfire_access_rights_format",
            Self::UltralightCardName => "ultralight_card_name",
            Self::UltralightPageCount => "ultralight_page_count",
            Self::UltralightNotBlank => "ultralight_not_blank",
            Self::BlankMfuCard => "blank_mfu_card",
            Self::BlankMfuCardDetail => "blank_mfu_card_detail",
        }
    }
}

impl fmt::Display for StringKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StringKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|key| key.as_str() == s).ok_or(())
    }
}
