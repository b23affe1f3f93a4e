//! Terminal rendering of analysis results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cdss_engine::AnalyzerRegistry;
use cdss_model::DetailValue;

use crate::commands::AnalysisOutcome;

pub fn print_analysis(outcome: &AnalysisOutcome) {
    println!("Painel: {} ({})", outcome.panel_code, outcome.panel_description);
    println!();
    println!("{}", outcome.result.interpretation);
    println!();

    if outcome.result.is_critical {
        println!("Estado: CRÍTICO");
    } else {
        println!("Estado: sem criticidade");
    }

    if !outcome.result.abnormalities.is_empty() {
        let tags: Vec<&str> = outcome
            .result
            .abnormalities
            .iter()
            .map(String::as_str)
            .collect();
        println!("Alterações: {}", tags.join(", "));
    }
    if !outcome.result.recommendations.is_empty() {
        println!("Recomendações:");
        for recommendation in &outcome.result.recommendations {
            println!("  - {recommendation}");
        }
    }

    let table = details_table(outcome);
    if table.row_iter().count() > 0 {
        println!();
        println!("{table}");
    }
}

/// One row per parameter: value plus its reference range, with the
/// `*_ref` companion keys folded into the same row.
fn details_table(outcome: &AnalysisOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Parâmetro"),
        header_cell("Valor"),
        header_cell("Referência"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for (key, value) in &outcome.result.details {
        if key.ends_with("_ref") {
            continue;
        }
        let reference = outcome
            .result
            .details
            .get(&format!("{key}_ref"))
            .map(display_value)
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(key),
            Cell::new(display_value(value)).set_alignment(CellAlignment::Right),
            Cell::new(reference),
        ]);
    }
    table
}

pub fn print_panels(registry: &AnalyzerRegistry) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Código"), header_cell("Descrição")]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for code in registry.panel_codes() {
        if let Some(analyzer) = registry.get(code) {
            table.add_row(vec![Cell::new(code), Cell::new(analyzer.description())]);
        }
    }
    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn display_value(value: &DetailValue) -> String {
    match value {
        DetailValue::Number(number) => {
            if number.fract() == 0.0 {
                format!("{number:.0}")
            } else {
                format!("{number:.2}")
            }
        }
        DetailValue::Text(text) => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdss_model::AnalysisResult;

    #[test]
    fn details_table_folds_reference_rows() {
        let mut result = AnalysisResult::default();
        result.details.insert("pH".to_string(), DetailValue::Number(7.25));
        result
            .details
            .insert("pH_ref".to_string(), DetailValue::Text("7.35-7.45".to_string()));
        let outcome = AnalysisOutcome {
            panel_code: "GASOMETRIA".to_string(),
            panel_description: "Gasometria arterial",
            result,
        };
        let table = details_table(&outcome);
        assert_eq!(table.row_iter().count(), 1);
        let rendered = table.to_string();
        assert!(rendered.contains("7.25"));
        assert!(rendered.contains("7.35-7.45"));
    }

    #[test]
    fn numbers_render_compactly() {
        assert_eq!(display_value(&DetailValue::Number(60.0)), "60");
        assert_eq!(display_value(&DetailValue::Number(7.251)), "7.25");
    }
}
