#![no_main]

use farecard::desfire::DesfireFileSettings;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let decoded = DesfireFileSettings::decode(data);
    assert_eq!(decoded.is_invalid(), DesfireFileSettings::parse(data).is_err());
});
