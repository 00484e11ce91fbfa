#![no_main]

use libfuzzer_sys::fuzz_target;
use mamdani::Engine;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = Engine::from_json(s, "fuzz_input");
    }
});
