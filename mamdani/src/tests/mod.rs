use crate::{
    CategoryScale, Condition, FuzzyRule, KnowledgeBase, LinguisticVariable, MembershipFunction,
    Universe,
};


mod input_parsing;



pub(crate) fn variable(
    name: &str,
    min: f64,
    max: f64,
    labels: &[(&str, [f64; 3])],
) -> LinguisticVariable {
    let universe = Universe::new(min, max, 0.1).unwrap();
    labels.iter().fold(LinguisticVariable::new(name, universe), |v, (label, params)| {
        v.with_term(MembershipFunction::triangular(*label, *params).unwrap())
    })
}

pub(crate) fn output_variable() -> LinguisticVariable {
    let universe = Universe::new(0.0, 10.0, 0.01).unwrap();
    LinguisticVariable::new("economic_condition", universe)
        .with_term(MembershipFunction::triangular("poor", [0.0, 0.0, 3.0]).unwrap())
        .with_term(MembershipFunction::triangular("normal", [2.0, 5.0, 8.0]).unwrap())
        .with_term(MembershipFunction::triangular("good", [7.0, 10.0, 10.0]).unwrap())
}

/// Two indicators, two rules, default categories
pub(crate) fn small_economy() -> KnowledgeBase {
    let levels = [("low", [0.0, 0.0, 8.0]), ("high", [10.0, 20.0, 20.0])];
    KnowledgeBase::new(
        vec![
            variable("inflation", 0.0, 20.0, &levels),
            variable("unemployment", 0.0, 20.0, &levels),
        ],
        output_variable(),
    )
    .with_rule(FuzzyRule::new(
        Condition::term("inflation", "high").and(Condition::term("unemployment", "high")),
        "poor",
    ))
    .with_rule(FuzzyRule::new(
        Condition::term("inflation", "low").and(Condition::term("unemployment", "low")),
        "good",
    ))
    .with_categories(CategoryScale::default())
}
