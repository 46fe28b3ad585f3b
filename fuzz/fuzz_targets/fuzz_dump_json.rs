#![no_main]

use farecard::card::CardDump;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(dump) = CardDump::from_json(text) {
            let _ = dump.into_card();
        }
    }
});
