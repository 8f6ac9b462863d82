//! Drift detection — determinism verification and derivation comparison.
//!
//! Comparisons are bit-exact: a constant is unchanged only if its f64
//! bit pattern is identical in both runs.

use std::fmt::Write as _;

use log::warn;

use rot_engine::domain::{ConstantId, Derivation};
use rot_engine::report::format_sci;

use crate::config::RunConfig;
use crate::run::{self, RunError};

/// Derive `config` twice and require identical fingerprints.
/// Returns the fingerprint.
pub fn verify_determinism(config: &RunConfig) -> Result<String, RunError> {
    let first = run::run(config)?.fingerprint;
    let second = run::run(config)?.fingerprint;

    if first != second {
        return Err(RunError::DeterminismFailure { first, second });
    }
    Ok(first)
}

/// Per-constant comparison of two derivations.
pub fn compare_derivations(a: &Derivation, b: &Derivation) -> DriftReport {
    let constants = ConstantId::ALL
        .into_iter()
        .filter_map(|id| {
            let value_a = a.constants.get(id)?;
            let value_b = b.constants.get(id)?;
            Some(ConstantDrift {
                constant: id,
                value_a,
                value_b,
                ratio: value_b / value_a,
                unchanged: value_a.to_bits() == value_b.to_bits(),
            })
        })
        .collect::<Vec<_>>();

    let report = DriftReport {
        kappa0_a: a.kappa0,
        kappa0_b: b.kappa0,
        kappa0_unchanged: a.kappa0.to_bits() == b.kappa0.to_bits(),
        constants,
    };
    if !report.changed().is_empty() {
        warn!("derivations differ in {:?}", report.changed());
    }
    report
}

/// One constant across two runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDrift {
    pub constant: ConstantId,
    pub value_a: f64,
    pub value_b: f64,
    /// `value_b / value_a`.
    pub ratio: f64,
    pub unchanged: bool,
}

/// Structured drift report.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftReport {
    pub kappa0_a: f64,
    pub kappa0_b: f64,
    pub kappa0_unchanged: bool,
    pub constants: Vec<ConstantDrift>,
}

impl DriftReport {
    pub fn changed(&self) -> Vec<ConstantId> {
        self.constants
            .iter()
            .filter(|d| !d.unchanged)
            .map(|d| d.constant)
            .collect()
    }

    pub fn unchanged(&self) -> Vec<ConstantId> {
        self.constants
            .iter()
            .filter(|d| d.unchanged)
            .map(|d| d.constant)
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Drift (baseline -> comparison):");
        let _ = writeln!(
            out,
            "{:<10}  A: {}  B: {}  {}",
            "kappa0",
            format_sci(self.kappa0_a, 5, false),
            format_sci(self.kappa0_b, 5, false),
            if self.kappa0_unchanged { "unchanged" } else { "changed" }
        );
        for d in &self.constants {
            let status = if d.unchanged {
                "unchanged".to_string()
            } else {
                format!("ratio {}", format_sci(d.ratio, 5, false))
            };
            let _ = writeln!(
                out,
                "{:<10}  A: {}  B: {}  {}",
                d.constant.symbol(),
                format_sci(d.value_a, 5, false),
                format_sci(d.value_b, 5, false),
                status
            );
        }
        out
    }
}
