//! Command-line front end for the `rot-report` binary.
//!
//! Both derivations finish before the first byte of output, so a failing
//! run prints no report.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use rot_engine::error::ReportError;

use crate::config::{export_config_to_file, load_config, RunConfig};
use crate::drift::{compare_derivations, verify_determinism};
use crate::run::{self, RunError};

#[derive(Parser, Debug)]
#[command(name = "rot-report", version, about = "Derive nine physical constants from the ROT base parameters")]
pub struct Cli {
    /// Load parameters, exponents and reference values from a JSON file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the active tables as a JSON template and exit.
    #[arg(long, value_name = "FILE")]
    pub dump_config: Option<PathBuf>,

    /// Append the canonical SHA-256 fingerprint of the derivation.
    #[arg(long)]
    pub fingerprint: bool,

    /// Derive twice and fail unless both runs are bit-identical.
    #[arg(long)]
    pub verify_determinism: bool,

    /// Derive a second configuration and print how it drifts from the first.
    #[arg(long, value_name = "FILE")]
    pub compare: Option<PathBuf>,
}

/// Run the command described by `cli`, writing the report to `out`.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<(), RunError> {
    let config = match &cli.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            load_config(path)?
        }
        None => RunConfig::default(),
    };

    if let Some(path) = &cli.dump_config {
        export_config_to_file(&config, path)?;
        info!("configuration written to {}", path.display());
        return Ok(());
    }

    if cli.verify_determinism {
        let fingerprint = verify_determinism(&config)?;
        info!("determinism verified: {}", fingerprint);
    }

    let outcome = run::run(&config)?;
    let text = run::report_for(&config, &outcome.derivation)
        .render()
        .map_err(ReportError::from)?;

    let drift = match &cli.compare {
        Some(path) => {
            info!("comparing against {}", path.display());
            let other = run::run(&load_config(path)?)?;
            Some(compare_derivations(&outcome.derivation, &other.derivation))
        }
        None => None,
    };

    let fingerprint = cli.fingerprint.then_some(outcome.fingerprint.as_str());
    write_all(out, &text, fingerprint, drift.map(|d| d.render())).map_err(ReportError::from)?;
    Ok(())
}

fn write_all<W: Write>(
    out: &mut W,
    report: &str,
    fingerprint: Option<&str>,
    drift: Option<String>,
) -> std::io::Result<()> {
    out.write_all(report.as_bytes())?;
    if let Some(fingerprint) = fingerprint {
        writeln!(out, "\nFingerprint (SHA-256): {}", fingerprint)?;
    }
    if let Some(drift) = drift {
        writeln!(out, "\n{}", drift.trim_end())?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use rot_engine::domain::{ConstantId, Step};
    use rot_engine::error::DerivationError;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("rot_runtime_cli").join(name);
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rot-report").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_failing_compare_writes_nothing() {
        let dir = temp_dir("failing_compare");
        let path = dir.join("negative_eta.json");
        let mut bad = RunConfig::default();
        bad.parameters.eta0 = -1824.938;
        export_config_to_file(&bad, &path).unwrap();

        let cli = parse(&["--fingerprint", "--compare", path.to_str().unwrap()]);
        let mut sink: Vec<u8> = Vec::new();
        let err = execute(&cli, &mut sink).unwrap_err();

        assert!(
            matches!(
                err,
                RunError::Derivation(DerivationError::Domain {
                    step: Step::Constant(ConstantId::StrongCoupling),
                    ..
                })
            ),
            "got: {err}"
        );
        assert!(sink.is_empty(), "nothing may be written before a failure");
    }

    #[test]
    fn test_compare_appends_drift_after_report() {
        let dir = temp_dir("compare_ok");
        let path = dir.join("same.json");
        export_config_to_file(&RunConfig::default(), &path).unwrap();

        let cli = parse(&["--fingerprint", "--compare", path.to_str().unwrap()]);
        let mut sink: Vec<u8> = Vec::new();
        execute(&cli, &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();

        let report = run::render_report(&RunConfig::default()).unwrap();
        assert!(text.starts_with(&report));
        let fingerprint_at = text.find("Fingerprint (SHA-256): ").unwrap();
        assert!(fingerprint_at >= report.len());
        assert!(text.len() > fingerprint_at + 64);
    }

    #[test]
    fn test_dump_config_writes_no_report() {
        let dir = temp_dir("dump_config");
        let path = dir.join("template.json");

        let cli = parse(&["--dump-config", path.to_str().unwrap()]);
        let mut sink: Vec<u8> = Vec::new();
        execute(&cli, &mut sink).unwrap();

        assert!(sink.is_empty());
        assert_eq!(load_config(&path).unwrap(), RunConfig::default());
    }
}
