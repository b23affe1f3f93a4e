//! Subcommand implementations.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::info;

use cdss_model::{AnalysisResult, CdssError, LabValue, PatientContext, RawLabInput, Sex};
use cdss_panels::default_registry;

use crate::cli::{AnalyzeArgs, BatchArgs};
use crate::types::{AnalyzeRequest, AnalysisReportPayload, REPORT_SCHEMA, REPORT_SCHEMA_VERSION};

/// Outcome handed to the summary printer.
pub struct AnalysisOutcome {
    pub panel_code: String,
    pub panel_description: &'static str,
    pub result: AnalysisResult,
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalysisOutcome> {
    let content = fs::read_to_string(&args.request_file)
        .with_context(|| format!("reading request file {}", args.request_file.display()))?;
    let request: AnalyzeRequest = serde_json::from_str(&content)
        .with_context(|| format!("parsing request file {}", args.request_file.display()))?;

    let panel = args
        .panel
        .as_deref()
        .or(request.panel.as_deref())
        .map(str::to_string);
    let Some(panel) = panel else {
        bail!("no panel specified: set \"panel\" in the request file or pass --panel");
    };

    let outcome = interpret(&panel, &request.values, &request.patient())?;
    if let Some(output) = &args.output {
        write_report(output, &outcome)?;
    }
    Ok(outcome)
}

pub fn run_batch(args: &BatchArgs) -> Result<AnalysisOutcome> {
    let values = read_csv_values(&args.csv_file)?;
    let patient = PatientContext {
        age: args.age,
        sex: args
            .sex
            .as_deref()
            .map(|raw| Sex::from_str(raw).map_err(anyhow::Error::msg))
            .transpose()?,
    };

    let outcome = interpret(&args.panel, &values, &patient)?;
    if let Some(output) = &args.output {
        write_report(output, &outcome)?;
    }
    Ok(outcome)
}

pub fn run_panels() -> Result<()> {
    crate::summary::print_panels(default_registry());
    Ok(())
}

fn interpret(
    panel: &str,
    values: &RawLabInput,
    patient: &PatientContext,
) -> Result<AnalysisOutcome> {
    let registry = default_registry();
    let Some(analyzer) = registry.get(panel) else {
        return Err(CdssError::UnknownPanel(panel.to_string())).with_context(|| {
            format!("registered panels: {}", registry.panel_codes().join(", "))
        });
    };
    info!(
        panel = analyzer.panel_code(),
        parameters = values.len(),
        "interpreting panel"
    );
    let result = analyzer.analyze(values, patient);
    Ok(AnalysisOutcome {
        panel_code: analyzer.panel_code().to_string(),
        panel_description: analyzer.description(),
        result,
    })
}

/// CSV rows are `parametro,valor`; a header row with those names is
/// skipped. Values stay textual so the normalizer applies the same
/// locale handling as the JSON path.
fn read_csv_values(path: &Path) -> Result<RawLabInput> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("reading csv file {}", path.display()))?;

    let mut values = RawLabInput::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("csv record {}", idx + 1))?;
        let Some(key) = record.get(0).map(str::trim) else {
            continue;
        };
        if key.is_empty() || (idx == 0 && key.eq_ignore_ascii_case("parametro")) {
            continue;
        }
        let value = record.get(1).map(str::trim).unwrap_or_default();
        values.insert(key.to_string(), LabValue::from(value));
    }
    if values.is_empty() {
        bail!("csv file {} contains no parameter rows", path.display());
    }
    Ok(values)
}

fn write_report(path: &Path, outcome: &AnalysisOutcome) -> Result<()> {
    let payload = AnalysisReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        panel: outcome.panel_code.clone(),
        result: outcome.result.clone(),
    };
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("writing report to {}", path.display()))?;
    info!(path = %path.display(), "analysis report written");
    Ok(())
}
