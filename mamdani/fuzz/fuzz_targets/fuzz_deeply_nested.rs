#![no_main]

use libfuzzer_sys::fuzz_target;
use mamdani::{parse_condition, ResourceLimits};

fuzz_target!(|depth: u8| {
    let depth = (depth as usize % 50) + 1;

    let mut condition = String::from("inflation is high");
    for i in 0..depth {
        let operator = if i % 2 == 0 { "and" } else { "or" };
        condition = format!("({} {} unemployment is low)", condition, operator);
    }

    let _ = parse_condition(&condition, "fuzz_nested", &ResourceLimits::default());
});
