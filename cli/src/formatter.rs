use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use mamdani::{Engine, FuzzifiedInput, LinguisticVariable, Response, RuleFiring};

pub struct Formatter {
    precision: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self { precision: 4 }
    }

    pub fn format_response(&self, response: &Response, raw: bool) -> String {
        if raw {
            return format!("{:.*} {}\n", self.precision, response.score, response.category);
        }

        let mut output = String::new();

        output.push_str(&self.format_inputs_table(response));
        output.push('\n');

        let fired = response.fired_rules();
        if !fired.is_empty() {
            output.push_str(&self.format_rules_table(&fired));
            output.push('\n');
        }

        output.push_str(&self.format_score(
            &response.output_variable,
            response.score,
            &response.category,
        ));
        output.push('\n');

        output
    }

    pub fn format_json(&self, response: &Response) -> serde_json::Result<String> {
        serde_json::to_string_pretty(response)
    }

    /// Fallback score as JSON, flagged so callers can tell it from an evaluation
    pub fn format_fallback_json(
        &self,
        output: &str,
        score: f64,
        category: &str,
    ) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&serde_json::json!({
            "output_variable": output,
            "score": score,
            "category": category,
            "fallback": true,
        }))
    }

    /// Score chosen by the caller because no rule fired
    pub fn format_fallback(&self, output: &str, score: f64, category: &str, raw: bool) -> String {
        if raw {
            return format!("{:.*} {}\n", self.precision, score, category);
        }
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.add_row(Row::from(vec![Cell::new(format!(
            "{} = {:.*} ({})",
            output, self.precision, score, category
        ))]));
        table.add_row(Row::from(vec![Cell::new(
            "No rule fired for these inputs; this is the fallback score",
        )]));
        format!("{}\n", table)
    }

    fn format_inputs_table(&self, response: &Response) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Input").set_alignment(CellAlignment::Left),
            Cell::new("Value").set_alignment(CellAlignment::Right),
            Cell::new("Membership").set_alignment(CellAlignment::Left),
        ]));

        for (input, fuzzified) in response.inputs.iter().zip(&response.fuzzified) {
            let value = if input.value == input.applied {
                format!("{}", input.value)
            } else {
                format!("{} → {}", input.value, input.applied)
            };
            table.add_row(Row::from(vec![
                Cell::new(&input.name),
                Cell::new(value).set_alignment(CellAlignment::Right),
                Cell::new(self.format_degrees(fuzzified)),
            ]));
        }

        table.to_string()
    }

    /// Non-zero degrees only, e.g. `medium 0.25, high 0.60`
    fn format_degrees(&self, fuzzified: &FuzzifiedInput) -> String {
        let degrees: Vec<String> = fuzzified
            .degrees
            .iter()
            .filter(|d| d.degree > 0.0)
            .map(|d| format!("{} {:.2}", d.label, d.degree))
            .collect();
        if degrees.is_empty() {
            "-".to_string()
        } else {
            degrees.join(", ")
        }
    }

    fn format_rules_table(&self, fired: &[&RuleFiring]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("#").set_alignment(CellAlignment::Right),
            Cell::new("Fired rule").set_alignment(CellAlignment::Left),
            Cell::new("Strength").set_alignment(CellAlignment::Right),
        ]));

        for firing in fired {
            table.add_row(Row::from(vec![
                Cell::new(firing.index + 1).set_alignment(CellAlignment::Right),
                Cell::new(&firing.rule),
                Cell::new(format!("{:.*}", self.precision, firing.strength))
                    .set_alignment(CellAlignment::Right),
            ]));
        }

        table.to_string()
    }

    fn format_score(&self, output: &str, score: f64, category: &str) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.add_row(Row::from(vec![Cell::new(format!(
            "{} = {:.*} ({})",
            output, self.precision, score, category
        ))]));
        table.to_string()
    }

    pub fn format_knowledge(&self, engine: &Engine) -> String {
        let mut output = String::new();

        output.push_str(&format!("Knowledge: {}\n\n", engine.source_id()));

        let mut variables = Table::new();
        variables.load_preset(UTF8_FULL);
        variables.set_header(Row::from(vec![
            Cell::new("Variable").set_alignment(CellAlignment::Left),
            Cell::new("Universe").set_alignment(CellAlignment::Left),
            Cell::new("Labels").set_alignment(CellAlignment::Left),
        ]));
        for variable in engine.input_variables() {
            variables.add_row(self.variable_row(variable, &variable.name));
        }
        let output_variable = engine.output_variable();
        let output_name = format!("{} (output)", output_variable.name);
        variables.add_row(self.variable_row(output_variable, &output_name));
        output.push_str(&variables.to_string());
        output.push_str("\n\n");

        let mut rules = Table::new();
        rules.load_preset(UTF8_FULL);
        rules.set_header(Row::from(vec![
            Cell::new("#").set_alignment(CellAlignment::Right),
            Cell::new("When").set_alignment(CellAlignment::Left),
            Cell::new("Then").set_alignment(CellAlignment::Left),
        ]));
        for (index, rule) in engine.rules().iter().enumerate() {
            rules.add_row(Row::from(vec![
                Cell::new(index + 1).set_alignment(CellAlignment::Right),
                Cell::new(rule.condition.to_string()),
                Cell::new(&rule.consequent),
            ]));
        }
        output.push_str(&rules.to_string());
        output.push_str("\n\n");

        let mut categories = Table::new();
        categories.load_preset(UTF8_FULL);
        categories.set_header(Row::from(vec![
            Cell::new("Score").set_alignment(CellAlignment::Left),
            Cell::new("Category").set_alignment(CellAlignment::Left),
        ]));
        let scale = engine.categories();
        for threshold in &scale.thresholds {
            categories.add_row(Row::from(vec![
                Cell::new(format!("≤ {}", threshold.upto)),
                Cell::new(&threshold.label),
            ]));
        }
        categories.add_row(Row::from(vec![Cell::new("otherwise"), Cell::new(&scale.otherwise)]));
        output.push_str(&categories.to_string());
        output.push('\n');

        output
    }

    fn variable_row(&self, variable: &LinguisticVariable, name: &str) -> Row {
        let universe = &variable.universe;
        let labels: Vec<String> = variable.terms.iter().map(|t| t.to_string()).collect();
        Row::from(vec![
            Cell::new(name),
            Cell::new(format!(
                "[{}, {}] step {}",
                universe.min(),
                universe.max(),
                universe.step()
            )),
            Cell::new(labels.join("\n")),
        ])
    }
}
