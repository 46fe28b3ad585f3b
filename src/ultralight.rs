//! MIFARE Ultralight and NTAG21x cards, and detection of blank ones.

use serde::Serialize;

use crate::localize::{Localizer, StringKey};
use crate::util::is_all_zero;

pub const PAGE_SIZE: usize = 4;

/// Pages 0-2 hold the serial number, internal byte and lock bytes
const FIRST_USER_PAGE: usize = 3;

/// Ultralight EV1 MF0UL11 page count; pages 0x10 and 0x11 are configuration
const UL_EV1_11_PAGES: usize = 0x14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UltralightPage {
    pub data: Vec<u8>,
    pub unauthorized: bool,
}

impl UltralightPage {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            unauthorized: false,
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            data: vec![0; PAGE_SIZE],
            unauthorized: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UltralightCard {
    pub uid: Vec<u8>,
    pub model: Option<String>,
    pub pages: Vec<UltralightPage>,
}

impl UltralightCard {
    pub fn new(uid: Vec<u8>, model: Option<String>, pages: Vec<UltralightPage>) -> Self {
        Self { uid, model, pages }
    }

    /// True when no page past the header holds anything except the
    /// factory defaults for this model.
    pub fn is_blank(&self) -> bool {
        let ntag = self
            .model
            .as_deref()
            .filter(|model| model.starts_with("NTAG21"));
        let count = self.pages.len();

        for (idx, page) in self.pages.iter().enumerate().skip(FIRST_USER_PAGE) {
            if page.unauthorized {
                return false;
            }
            let data = page.data.as_slice();

            let factory = match ntag {
                Some(model) => is_ntag_factory_page(model, idx, count, data),
                None => is_ultralight_factory_page(idx, count, data),
            };
            if factory {
                continue;
            }

            if !is_all_zero(data) {
                return false;
            }
        }
        true
    }

    /// Card name for identification: the blank-card label when
    /// [`is_blank`](Self::is_blank) holds.
    pub fn identity_name(&self, localizer: &dyn Localizer) -> Option<String> {
        self.is_blank()
            .then(|| localizer.localize(StringKey::BlankMfuCard))
    }
}

fn is_ntag_factory_page(model: &str, idx: usize, count: usize, data: &[u8]) -> bool {
    let defaults: &[(usize, [u8; 4])] = match model {
        "NTAG213" => &[
            (0x03, [0xE1, 0x10, 0x12, 0x00]),
            (0x04, [0x01, 0x03, 0xA0, 0x0C]),
            (0x05, [0x34, 0x03, 0x00, 0xFE]),
        ],
        "NTAG215" => &[
            (0x03, [0xE1, 0x10, 0x3E, 0x00]),
            (0x04, [0x03, 0x00, 0xFE, 0x00]),
        ],
        "NTAG216" => &[
            (0x03, [0xE1, 0x10, 0x6D, 0x00]),
            (0x04, [0x03, 0x00, 0xFE, 0x00]),
        ],
        _ => &[],
    };
    if defaults
        .iter()
        .any(|(page, bytes)| *page == idx && data == bytes)
    {
        return true;
    }

    // Configuration area at the end of user memory
    match count.checked_sub(idx) {
        // LOCK / RFUI: only the three lock bytes matter
        Some(5) => data.len() >= 3 && is_all_zero(&data[..3]),
        // MIRROR / RFUI / MIRROR_PAGE / AUTH0
        Some(4) => data == [0x04, 0x00, 0x00, 0xFF],
        // ACCESS / RFUI
        Some(3) => data.first() == Some(&0),
        // PWD and PACK read back masked
        Some(2) | Some(1) => true,
        _ => false,
    }
}

fn is_ultralight_factory_page(idx: usize, count: usize, data: &[u8]) -> bool {
    count == UL_EV1_11_PAGES
        && ((idx == 0x10 && data == [0x00, 0x00, 0x00, 0xFF])
            || (idx == 0x11 && data == [0x00, 0x05, 0x00, 0x00]))
}
