/// ROT Engine — Engine
///
/// Top-level orchestrator. Validates inputs, derives kappa0,
/// then delegates the nine constants to the formula pipeline.

use log::info;

use crate::domain::{BaseParameters, Derivation, ExponentSet};
use crate::error::DerivationError;
use crate::formulas::{derive_kappa0, evaluate_pipeline};
use crate::invariants::validate_inputs;

/// Pure engine over one parameter set and one exponent set.
pub struct DerivationEngine<'a> {
    params: &'a BaseParameters,
    exponents: &'a ExponentSet,
}

impl<'a> DerivationEngine<'a> {
    pub fn new(params: &'a BaseParameters, exponents: &'a ExponentSet) -> Self {
        Self { params, exponents }
    }

    /// Run the derivation:
    ///   1. Validate inputs (finite parameters and exponents)
    ///   2. Derive kappa0
    ///   3. Evaluate the nine formulas in pipeline order
    ///
    /// Fails on the first invalid input or domain error.
    pub fn derive(&self) -> Result<Derivation, DerivationError> {
        validate_inputs(self.params, self.exponents)?;

        let kappa0 = derive_kappa0(self.params)?;
        let constants = evaluate_pipeline(self.params, self.exponents, kappa0)?;

        info!("derived {} constants, kappa0 = {:e}", constants.len(), kappa0);
        Ok(Derivation { kappa0, constants })
    }
}

/// Convenience wrapper: `DerivationEngine::new(params, exponents).derive()`.
pub fn derive(
    params: &BaseParameters,
    exponents: &ExponentSet,
) -> Result<Derivation, DerivationError> {
    DerivationEngine::new(params, exponents).derive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConstantId, Step};
    use crate::error::DomainFault;

    #[test]
    fn test_default_run_is_complete() {
        let derivation = derive(&BaseParameters::default(), &ExponentSet::default()).unwrap();
        assert_eq!(derivation.constants.len(), 9);
        for id in ConstantId::ALL {
            let v = derivation.constants.get(id).unwrap();
            assert!(v.is_finite() && v > 0.0, "{id} = {v}");
        }
        assert!(derivation.kappa0 > 0.0);
    }

    #[test]
    fn test_default_run_matches_codata_closely() {
        let derivation = derive(&BaseParameters::default(), &ExponentSet::default()).unwrap();
        let reference = crate::domain::ReferenceTable::default();
        for entry in reference.entries() {
            let predicted = derivation.constants.get(entry.constant).unwrap();
            let rel = (predicted / entry.observed - 1.0).abs();
            assert!(rel < 1e-8, "{}: relative error {rel:e}", entry.constant);
        }
    }

    #[test]
    fn test_zero_entropy_fails_before_report() {
        let params = BaseParameters {
            s0: 0.0,
            ..BaseParameters::default()
        };
        let err = derive(&params, &ExponentSet::default()).unwrap_err();
        // G divides by S0·t0² and runs ahead of Lambda.
        assert!(
            matches!(
                err,
                DerivationError::Domain {
                    step: Step::Constant(ConstantId::Gravitational),
                    fault: DomainFault::ZeroDenominator,
                    ..
                }
            ),
            "got: {err}"
        );
    }

    #[test]
    fn test_negative_entropy_fails_at_cosmological_step() {
        let params = BaseParameters {
            s0: -9.999e5,
            ..BaseParameters::default()
        };
        let err = derive(&params, &ExponentSet::default()).unwrap_err();
        assert!(
            matches!(
                err,
                DerivationError::Domain {
                    step: Step::Constant(ConstantId::Cosmological),
                    fault: DomainFault::NonPositiveLogarithm(_),
                    ..
                }
            ),
            "got: {err}"
        );
        assert!(err.to_string().starts_with("domain error at step 6 (Lambda)"));
    }

    #[test]
    fn test_non_finite_input_rejected_before_any_step() {
        let params = BaseParameters {
            t0: f64::INFINITY,
            ..BaseParameters::default()
        };
        let err = derive(&params, &ExponentSet::default()).unwrap_err();
        assert!(matches!(err, DerivationError::InvalidInput { .. }), "got: {err}");
    }

}
