/// ROT Engine — Input Checks
///
/// Hard-fail validation of the three input tables.
/// Returns the first violation. Domain conditions that belong to a single
/// formula (zero denominators, kappa0 > 0) are checked by that formula.

use std::collections::BTreeSet;

use crate::domain::{BaseParam, BaseParameters, ExponentSet, ReferenceTable};
use crate::error::{ConsistencyError, DerivationError};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run every input check the engine needs before deriving.
pub fn validate_inputs(
    params: &BaseParameters,
    exponents: &ExponentSet,
) -> Result<(), DerivationError> {
    check_parameters_finite(params)?;
    check_exponents_finite(exponents)?;
    Ok(())
}

/// Check observed values: finite and non-zero (they divide the prediction).
pub fn validate_reference(reference: &ReferenceTable) -> Result<(), DerivationError> {
    for entry in reference.entries() {
        if !entry.observed.is_finite() {
            return Err(DerivationError::InvalidInput {
                name: format!("reference.{}", entry.constant),
                value: entry.observed,
                reason: "observed value must be finite",
            });
        }
        if entry.observed == 0.0 {
            return Err(DerivationError::InvalidInput {
                name: format!("reference.{}", entry.constant),
                value: entry.observed,
                reason: "observed value must be non-zero",
            });
        }
    }
    Ok(())
}

/// Every identifier appears at most once in the reference table.
pub fn check_reference_unique(reference: &ReferenceTable) -> Result<(), ConsistencyError> {
    let mut seen = BTreeSet::new();
    for entry in reference.entries() {
        if !seen.insert(entry.constant) {
            return Err(ConsistencyError::DuplicateReference(entry.constant));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual checks (private)
// ---------------------------------------------------------------------------

fn check_parameters_finite(params: &BaseParameters) -> Result<(), DerivationError> {
    for param in BaseParam::ALL {
        let value = params.get(param);
        if !value.is_finite() {
            return Err(DerivationError::InvalidInput {
                name: param.name().to_string(),
                value,
                reason: "base parameter must be finite",
            });
        }
    }
    Ok(())
}

fn check_exponents_finite(exponents: &ExponentSet) -> Result<(), DerivationError> {
    for (id, p) in exponents.iter() {
        if !p.is_finite() {
            return Err(DerivationError::InvalidInput {
                name: id.exponent_label(),
                value: p,
                reason: "correction exponent must be finite",
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConstantId, ReferenceEntry};

    #[test]
    fn test_defaults_pass() {
        validate_inputs(&BaseParameters::default(), &ExponentSet::default()).unwrap();
        validate_reference(&ReferenceTable::default()).unwrap();
        check_reference_unique(&ReferenceTable::default()).unwrap();
    }

    #[test]
    fn test_nan_parameter_rejected() {
        let params = BaseParameters {
            r0: f64::NAN,
            ..BaseParameters::default()
        };
        let err = validate_inputs(&params, &ExponentSet::default()).unwrap_err();
        match err {
            DerivationError::InvalidInput { name, .. } => assert_eq!(name, "r0"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_infinite_exponent_rejected() {
        let exponents = ExponentSet::default().with(ConstantId::ProtonMass, f64::INFINITY);
        let err = validate_inputs(&BaseParameters::default(), &exponents).unwrap_err();
        assert!(err.to_string().contains("p8"), "got: {err}");
    }

    #[test]
    fn test_zero_reference_rejected() {
        let table = ReferenceTable::new(vec![ReferenceEntry {
            constant: ConstantId::Gravitational,
            observed: 0.0,
        }]);
        let err = validate_reference(&table).unwrap_err();
        assert!(err.to_string().contains("reference.G"), "got: {err}");
    }

    #[test]
    fn test_duplicate_reference_rejected() {
        let entry = ReferenceEntry {
            constant: ConstantId::SpeedOfLight,
            observed: 1.0,
        };
        let table = ReferenceTable::new(vec![entry, entry]);
        assert_eq!(
            check_reference_unique(&table),
            Err(ConsistencyError::DuplicateReference(ConstantId::SpeedOfLight))
        );
    }
}
