use anyhow::Context;
use mortgage_core::calculations::TaxBreakdown;
use mortgage_core::{CostProjector, MortgageScenario, ProjectionResult, TaxEvaluator, TaxTables};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::ScenarioFile;
use crate::export;

/// Builds the scenario from defaults, the optional scenario file and the
/// command-line values, in that order of precedence (lowest first).
pub fn build_scenario(cli: &Cli) -> anyhow::Result<MortgageScenario> {
    let base = match &cli.config {
        Some(path) => ScenarioFile::load(path)
            .with_context(|| format!("loading scenario from {}", path.display()))?,
        None => ScenarioFile::default(),
    };

    let scenario = base
        .overlay(cli.overrides())
        .into_scenario()
        .context("building scenario")?;
    debug!(?scenario, "resolved scenario");
    Ok(scenario)
}

fn log_breakdown(breakdown: &TaxBreakdown) {
    info!(
        income = %breakdown.income,
        status = %breakdown.filing_status,
        federal_rate = %breakdown.federal_rate_percent,
        state_rate = %breakdown.state_rate_percent,
        state_base = %breakdown.state_base_tax,
        payroll = %breakdown.payroll_tax,
        total = %breakdown.total,
        "tax evaluation"
    );
}

/// Runs the projection for `scenario` and writes any requested CSV files.
pub fn project(
    cli: &Cli,
    scenario: &MortgageScenario,
) -> anyhow::Result<ProjectionResult> {
    let observer = log_breakdown;
    let mut evaluator = TaxEvaluator::new(TaxTables::historical());
    if cli.trace_taxes {
        evaluator = evaluator.with_observer(&observer);
    }

    let result = CostProjector::new(evaluator)
        .project(scenario)
        .context("projecting mortgage costs")?;

    if let Some(path) = &cli.csv {
        let rows = export::write_monthly_csv_file(path, &result.series)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(rows, path = %path.display(), "wrote monthly series");
    }
    if let Some(path) = &cli.yearly_csv {
        let rows = export::write_yearly_csv_file(path, &result.yearly)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(rows, path = %path.display(), "wrote yearly table");
    }

    Ok(result)
}

/// Resolves the scenario and runs it.
pub fn run(cli: &Cli) -> anyhow::Result<ProjectionResult> {
    let scenario = build_scenario(cli)?;
    project(cli, &scenario)
}
