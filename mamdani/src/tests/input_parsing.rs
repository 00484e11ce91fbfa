use crate::{parse_inputs, MamdaniError};

#[test]
fn test_parse_assignments() {
    let inputs = parse_inputs(&["inflation=4.5", "growth=-1e-2", "hdi=.7", "deficit=+3"]).unwrap();
    assert_eq!(inputs.len(), 4);
    assert_eq!(inputs["inflation"], 4.5);
    assert_eq!(inputs["growth"], -0.01);
    assert_eq!(inputs["hdi"], 0.7);
    assert_eq!(inputs["deficit"], 3.0);
}

#[test]
fn test_whitespace_around_equals_is_allowed() {
    let inputs = parse_inputs(&["inflation = 4"]).unwrap();
    assert_eq!(inputs["inflation"], 4.0);
}

#[test]
fn test_invalid_number() {
    match parse_inputs(&["inflation=abc"]) {
        Err(MamdaniError::Parse(details)) => assert_eq!(details.source_id, "<input>"),
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_value() {
    assert!(parse_inputs(&["inflation="]).is_err());
    assert!(parse_inputs(&["inflation"]).is_err());
    assert!(parse_inputs(&["=4"]).is_err());
}

#[test]
fn test_duplicate_input_rejected() {
    match parse_inputs(&["inflation=4", "inflation=5"]) {
        Err(MamdaniError::Parse(details)) => {
            assert!(details.message.contains("more than once"));
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}
