#![no_main]

use libfuzzer_sys::fuzz_target;
use mamdani::parse_inputs;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let assignments: Vec<&str> = s.split_whitespace().collect();
        let _ = parse_inputs(&assignments);
    }
});
