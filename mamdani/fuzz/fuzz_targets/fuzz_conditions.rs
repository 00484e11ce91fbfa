#![no_main]

use libfuzzer_sys::fuzz_target;
use mamdani::{parse_condition, parse_consequent, ResourceLimits};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let limits = ResourceLimits::default();
        let _ = parse_condition(s, "fuzz_when", &limits);
        let _ = parse_consequent(s, "fuzz_then");
    }
});
