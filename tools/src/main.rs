//! churn-runner: headless driver for the churn analytics core.
//!
//! Usage:
//!   churn-runner summarize --csv customers.csv [--filter-column spend]
//!   churn-runner score --recency 45 --frequency 5 [--monetary 120.5]
//!                      [--satisfaction neutral] [--config data/scoring_config.json]
//!   churn-runner export --csv customers.csv --out customers.json [--format json]
//!   churn-runner histogram --csv customers.csv --x region [--y spend] [--color segment]

use anyhow::{bail, Context, Result};
use churn_analytics_core::{
    explore::{grouped_histogram, HistogramRequest},
    io,
    present_with, summarize_with, ChurnScorer, CustomerFeatures, FilterColumn, Satisfaction,
    ScoringConfig,
};
use serde::Serialize;
use std::env;
use std::path::Path;

const RECENCY_RANGE: std::ops::RangeInclusive<u32> = 0..=365;
const FREQUENCY_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

#[derive(Serialize)]
struct Envelope<T: Serialize> {
    generated_at: chrono::DateTime<chrono::Utc>,
    command:      &'static str,
    result:       T,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1).map(String::as_str) else {
        bail!("usage: churn-runner <summarize|score|export|histogram> [flags]");
    };

    match command {
        "summarize" => run_summarize(&args),
        "score" => run_score(&args),
        "export" => run_export(&args),
        "histogram" => run_histogram(&args),
        other => bail!("Unknown command: {other}"),
    }
}

fn run_summarize(args: &[String]) -> Result<()> {
    let table = load_table(args)?;
    let filter = match arg_value(args, "--filter-column") {
        Some(name) => FilterColumn::Named(name.to_string()),
        None => FilterColumn::FirstNumeric,
    };

    let summary = summarize_with(&table, &filter);
    for warning in &summary.warnings {
        log::warn!("summarize: {warning:?}");
    }

    emit("summarize", &summary)
}

fn run_score(args: &[String]) -> Result<()> {
    let recency: u32 = required_parsed(args, "--recency")?;
    let frequency: u32 = required_parsed(args, "--frequency")?;
    let monetary: f64 = optional_parsed(args, "--monetary")?.unwrap_or(0.0);

    // Input ranges are the caller's contract; the engine never re-checks them.
    if !RECENCY_RANGE.contains(&recency) {
        bail!("--recency must be within {RECENCY_RANGE:?}, got {recency}");
    }
    if !FREQUENCY_RANGE.contains(&frequency) {
        bail!("--frequency must be within {FREQUENCY_RANGE:?}, got {frequency}");
    }
    if !monetary.is_finite() || monetary < 0.0 {
        bail!("--monetary must be a non-negative amount, got {monetary}");
    }

    let mut features = CustomerFeatures::new(recency, frequency).with_monetary(monetary);
    if let Some(level) = arg_value(args, "--satisfaction") {
        features = features.with_satisfaction(level.parse::<Satisfaction>()?);
    }

    let config = match arg_value(args, "--config") {
        Some(path) => ScoringConfig::load(path)?,
        None => ScoringConfig::default(),
    };
    let scorer = ChurnScorer::new(config);

    let assessment = scorer.score(&features);
    let payload = present_with(&assessment, &scorer.config().playbook);

    log::info!(
        "score: {:.1} ({}) for recency={recency} frequency={frequency}",
        assessment.score,
        assessment.tier
    );

    #[derive(Serialize)]
    struct ScoreOutput<'a> {
        features:   &'a CustomerFeatures,
        assessment: &'a churn_analytics_core::RiskAssessment,
        payload:    &'a churn_analytics_core::PresentationPayload,
    }

    emit(
        "score",
        ScoreOutput {
            features:   &features,
            assessment: &assessment,
            payload:    &payload,
        },
    )
}

fn run_export(args: &[String]) -> Result<()> {
    let table = load_table(args)?;
    let out = arg_value(args, "--out").context("--out is required")?;
    let format = arg_value(args, "--format").unwrap_or("csv");

    match format {
        "csv" => io::save_csv(&table, Path::new(out))?,
        "json" => io::save_json(&table, Path::new(out))?,
        other => bail!("Unknown export format: {other} (expected csv or json)"),
    }

    println!("Exported {} rows to {out} ({format}).", table.row_count());
    Ok(())
}

fn run_histogram(args: &[String]) -> Result<()> {
    let table = load_table(args)?;
    let request = HistogramRequest {
        x:     arg_value(args, "--x").context("--x is required")?.to_string(),
        y:     arg_value(args, "--y").map(str::to_string),
        color: arg_value(args, "--color").map(str::to_string),
    };

    let bars = grouped_histogram(&table, &request)?;
    emit("histogram", &bars)
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn load_table(args: &[String]) -> Result<churn_analytics_core::Table> {
    let path = arg_value(args, "--csv").context("--csv is required")?;
    let table = io::load_csv(Path::new(path)).with_context(|| format!("Cannot load {path}"))?;
    log::info!(
        "loaded {path}: {} rows x {} columns",
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

fn emit<T: Serialize>(command: &'static str, result: T) -> Result<()> {
    let envelope = Envelope {
        generated_at: chrono::Utc::now(),
        command,
        result,
    };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// An absent flag is `None`; a present flag that does not parse is an error.
fn optional_parsed<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>> {
    arg_value(args, flag)
        .map(|raw| {
            raw.parse()
                .map_err(|_| anyhow::anyhow!("{flag}: cannot parse '{raw}'"))
        })
        .transpose()
}

fn required_parsed<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<T> {
    optional_parsed(args, flag)?.with_context(|| format!("{flag} is required"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unparsable_monetary_is_rejected() {
        let argv = args(&[
            "churn-runner", "score", "--recency", "45", "--frequency", "5", "--monetary", "12O.5",
        ]);
        assert!(run_score(&argv).is_err());
        assert!(optional_parsed::<f64>(&argv, "--monetary").is_err());
    }

    #[test]
    fn absent_optional_flag_is_none() {
        let argv = args(&["churn-runner", "score", "--monetary", "120.5"]);
        assert_eq!(optional_parsed::<f64>(&argv, "--monetary").unwrap(), Some(120.5));
        assert_eq!(optional_parsed::<f64>(&argv, "--recency").unwrap(), None);
        assert!(required_parsed::<u32>(&argv, "--recency").is_err());
    }
}
