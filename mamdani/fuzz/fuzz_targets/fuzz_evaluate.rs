#![no_main]

use libfuzzer_sys::fuzz_target;
use mamdani::Engine;
use std::collections::HashMap;
use std::sync::OnceLock;

static ENGINE: OnceLock<Engine> = OnceLock::new();

fuzz_target!(|values: [f64; 12]| {
    let engine = ENGINE.get_or_init(|| {
        Engine::from_json(include_str!("../../../knowledge/economy.json"), "economy.json")
            .unwrap()
    });

    let inputs: HashMap<String, f64> = engine
        .input_variables()
        .iter()
        .zip(values)
        .map(|(variable, value)| (variable.name.clone(), value))
        .collect();

    if let Ok(score) = engine.evaluate(&inputs) {
        let output = engine.output_variable();
        assert!(score >= output.universe.min() && score <= output.universe.max());
    }
});
