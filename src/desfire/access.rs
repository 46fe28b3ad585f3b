//! Communication mode and access rights, common to every file type.

use serde::Serialize;

use crate::localize::{Localizer, StringKey};

/// How file contents travel between card and reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommSetting {
    Plain,
    Maced,
    Enciphered,
}

impl CommSetting {
    /// Decodes the low two bits. The reserved value `0b10` behaves as plain
    /// on real cards.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte & 0x03 {
            0b01 => Self::Maced,
            0b11 => Self::Enciphered,
            _ => Self::Plain,
        }
    }

    #[must_use]
    pub const fn label_key(&self) -> StringKey {
        match self {
            Self::Plain => StringKey::DesfireCommPlain,
            Self::Maced => StringKey::DesfireCommMaced,
            Self::Enciphered => StringKey::DesfireCommEnciphered,
        }
    }
}

/// One access condition nibble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKey {
    Key(u8),
    Free,
    Denied,
}

impl AccessKey {
    #[must_use]
    pub const fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0x0E => Self::Free,
            0x0F => Self::Denied,
            key => Self::Key(key),
        }
    }

    #[must_use]
    pub const fn nibble(&self) -> u8 {
        match self {
            Self::Key(key) => *key,
            Self::Free => 0x0E,
            Self::Denied => 0x0F,
        }
    }

    pub fn describe(&self, localizer: &dyn Localizer) -> String {
        match self {
            Self::Key(key) => localizer.localize_format(StringKey::DesfireAccessKey, &[key]),
            Self::Free => localizer.localize(StringKey::DesfireAccessFree),
            Self::Denied => localizer.localize(StringKey::DesfireAccessDenied),
        }
    }
}

/// Access conditions packed into the little-endian u16 of a settings block.
///
/// Nibbles from most to least significant: read, write, read&write, change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AccessRights {
    pub read: AccessKey,
    pub write: AccessKey,
    pub read_write: AccessKey,
    pub change: AccessKey,
}

impl AccessRights {
    #[must_use]
    pub const fn from_u16(raw: u16) -> Self {
        Self {
            read: AccessKey::from_nibble((raw >> 12) as u8),
            write: AccessKey::from_nibble((raw >> 8) as u8),
            read_write: AccessKey::from_nibble((raw >> 4) as u8),
            change: AccessKey::from_nibble(raw as u8),
        }
    }

    #[must_use]
    pub const fn to_u16(&self) -> u16 {
        (self.read.nibble() as u16) << 12
            | (self.write.nibble() as u16) << 8
            | (self.read_write.nibble() as u16) << 4
            | self.change.nibble() as u16
    }

    pub fn describe(&self, localizer: &dyn Localizer) -> String {
        let read = self.read.describe(localizer);
        let write = self.write.describe(localizer);
        let read_write = self.read_write.describe(localizer);
        let change = self.change.describe(localizer);
        localizer.localize_format(
            StringKey::DesfireAccessRightsFormat,
            &[&read, &write, &read_write, &change],
        )
    }
}
