//! Run orchestrator — derive and report one configuration.
//!
//! Delegates all formulas to the kernel. No caching between runs.

use std::io::Write;

use log::info;
use thiserror::Error;

use rot_engine::domain::Derivation;
use rot_engine::engine::DerivationEngine;
use rot_engine::error::{DerivationError, ReportError};
use rot_engine::hashing::canonical_hash;
use rot_engine::report::Report;

use crate::config::{ConfigError, RunConfig};

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("derivation failed: {0}")]
    Derivation(#[from] DerivationError),

    #[error("report failed: {0}")]
    Report(#[from] ReportError),

    #[error("determinism failure: run 1 = {first}, run 2 = {second}")]
    DeterminismFailure { first: String, second: String },
}

/// A finished derivation together with its canonical fingerprint.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub derivation: Derivation,
    pub fingerprint: String,
}

/// Check the reference table and derive every constant.
///
/// Parameters and exponents are checked by the engine itself.
/// Pure on its input: same config, same fingerprint.
pub fn run(config: &RunConfig) -> Result<RunOutcome, RunError> {
    config.validate_reference()?;

    let derivation = DerivationEngine::new(&config.parameters, &config.exponents).derive()?;
    let fingerprint = canonical_hash(&derivation);
    info!("run fingerprint {}", fingerprint);

    Ok(RunOutcome {
        derivation,
        fingerprint,
    })
}

/// Derive and render the report for `config`.
pub fn render_report(config: &RunConfig) -> Result<String, RunError> {
    let outcome = run(config)?;
    let text = report_for(config, &outcome.derivation)
        .render()
        .map_err(ReportError::from)?;
    Ok(text)
}

/// Derive and write the report for `config` to `out`.
pub fn write_report<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunOutcome, RunError> {
    let outcome = run(config)?;
    report_for(config, &outcome.derivation).write_to(out)?;
    Ok(outcome)
}

pub(crate) fn report_for<'a>(config: &'a RunConfig, derivation: &'a Derivation) -> Report<'a> {
    Report {
        params: &config.parameters,
        exponents: &config.exponents,
        derivation,
        reference: &config.reference,
    }
}
