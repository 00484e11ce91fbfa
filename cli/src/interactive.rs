use anyhow::{Context, Result};
use inquire::CustomType;
use mamdani::{Engine, LinguisticVariable};
use std::collections::HashMap;

/// Prompt for every input variable that has no value yet, in declaration order
pub fn prompt_missing_inputs(engine: &Engine, values: &mut HashMap<String, f64>) -> Result<()> {
    let missing: Vec<&LinguisticVariable> = engine
        .input_variables()
        .iter()
        .filter(|v| !values.contains_key(&v.name))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    println!("\nEnter input values:");

    for variable in missing {
        let value = prompt_value(variable)?;
        values.insert(variable.name.clone(), value);
    }

    Ok(())
}

fn prompt_value(variable: &LinguisticVariable) -> Result<f64> {
    let universe = &variable.universe;
    let prompt_message = format!(
        "{} [{} to {}]",
        variable.name,
        universe.min(),
        universe.max()
    );
    let labels: Vec<String> = variable.terms.iter().map(|t| t.to_string()).collect();
    let help = format!("Labels: {}", labels.join(", "));
    let midpoint = (universe.min() + universe.max()) / 2.0;

    CustomType::<f64>::new(&prompt_message)
        .with_help_message(&help)
        .with_default(midpoint)
        .with_error_message("Please type a number")
        .prompt()
        .context(format!("Failed to get value for {}", variable.name))
}
