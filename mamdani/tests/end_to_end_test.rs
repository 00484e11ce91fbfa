use mamdani::{load_knowledge, Engine, MamdaniError, ResourceLimits};
use std::collections::HashMap;

const ECONOMY: &str = include_str!("../../knowledge/economy.json");

fn economy() -> Engine {
    Engine::from_json(ECONOMY, "economy.json").unwrap()
}

fn inputs(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn strong_economy() -> HashMap<String, f64> {
    inputs(&[
        ("inflation", 2.0),
        ("unemployment", 3.0),
        ("economic_growth", 6.0),
        ("budget_deficit", 1.0),
        ("foreign_investment", 40.0),
        ("consumer_satisfaction", 85.0),
        ("price_stability", 1.0),
        ("hdi", 0.9),
        ("exports", 280.0),
        ("imports", 50.0),
        ("exchange_rate", 11.0),
        ("fx_reserves", 180.0),
    ])
}

fn stressed_economy() -> HashMap<String, f64> {
    inputs(&[
        ("inflation", 18.0),
        ("unemployment", 20.0),
        ("economic_growth", -4.0),
        ("budget_deficit", 8.0),
        ("foreign_investment", 5.0),
        ("consumer_satisfaction", 20.0),
        ("price_stability", 9.0),
        ("hdi", 0.5),
        ("exports", 50.0),
        ("imports", 250.0),
        ("exchange_rate", 19.0),
        ("fx_reserves", 30.0),
    ])
}

#[test]
fn test_shipped_knowledge_loads() {
    let engine = economy();
    assert_eq!(engine.input_variables().len(), 12);
    assert_eq!(engine.rules().len(), 14);
    assert_eq!(engine.output_variable().name, "economic_condition");
    assert_eq!(engine.output_variable().universe.len(), 101);
}

#[test]
fn test_high_inflation_and_unemployment() {
    let knowledge = load_knowledge(
        r#"{
            "inputs": [
                { "name": "inflation", "universe": { "min": 0, "max": 20, "step": 0.1 },
                  "labels": [ { "label": "low", "triangle": [0, 0, 5] },
                              { "label": "high", "triangle": [10, 20, 20] } ] },
                { "name": "unemployment", "universe": { "min": 0, "max": 20, "step": 0.1 },
                  "labels": [ { "label": "low", "triangle": [0, 0, 5] },
                              { "label": "high", "triangle": [10, 20, 20] } ] }
            ],
            "output": {
                "name": "economic_condition",
                "universe": { "min": 0, "max": 10, "step": 0.1 },
                "labels": [ { "label": "poor", "triangle": [0, 0, 3] },
                            { "label": "normal", "triangle": [2, 5, 8] },
                            { "label": "good", "triangle": [7, 10, 10] } ]
            },
            "rules": [
                { "when": "inflation is high and unemployment is high",
                  "then": "economic_condition is poor" }
            ]
        }"#,
        "inline.json",
        &ResourceLimits::default(),
    )
    .unwrap();
    let engine = Engine::new(knowledge).unwrap();

    let response = engine
        .evaluate_detailed(&inputs(&[("inflation", 18.0), ("unemployment", 17.0)]))
        .unwrap();
    assert!((response.rules[0].strength - 0.7).abs() < 1e-12);
    assert!((response.score - 1.0).abs() < 0.15, "score = {}", response.score);
    assert_eq!(response.category, "poor");
}

#[test]
fn test_strong_economy_is_good() {
    let engine = economy();
    let response = engine.evaluate_detailed(&strong_economy()).unwrap();
    assert!(response.score > 7.0, "score = {}", response.score);
    assert_eq!(response.category, "good");
    assert!(response.fired_rules().iter().all(|r| r.consequent == "good"));
}

#[test]
fn test_stressed_economy_is_poor() {
    let engine = economy();
    let response = engine.evaluate_detailed(&stressed_economy()).unwrap();
    assert!(response.score < 3.0, "score = {}", response.score);
    assert_eq!(response.category, "poor");
    assert!(response.fired_rules().iter().all(|r| r.consequent == "poor"));
}

#[test]
fn test_missing_indicator_is_named() {
    let engine = economy();
    let mut given = strong_economy();
    given.remove("hdi");
    match engine.evaluate(&given) {
        Err(MamdaniError::InputMismatch { missing, unexpected }) => {
            assert_eq!(missing, vec!["hdi"]);
            assert!(unexpected.is_empty());
        }
        other => panic!("Expected input mismatch, got {:?}", other),
    }
}

#[test]
fn test_response_serializes_to_json() {
    let engine = economy();
    let response = engine.evaluate_detailed(&strong_economy()).unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["category"], "good");
    assert_eq!(json["output_variable"], "economic_condition");
    assert_eq!(json["inputs"].as_array().unwrap().len(), 12);
    assert_eq!(json["rules"].as_array().unwrap().len(), 14);
    assert!(json.get("aggregate").is_none());
}

#[test]
fn test_shared_engine_across_threads() {
    let engine = economy();
    let expected = engine.evaluate(&strong_economy()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| engine.evaluate(&strong_economy()).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
