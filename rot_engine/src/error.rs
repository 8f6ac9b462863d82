/// ROT Engine — Error Types
///
/// Every failure is fatal to the run. Nothing here is retried.

use std::io;

use thiserror::Error;

use crate::domain::{ConstantId, Step};

/// Arithmetic reason a primitive refused its operands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainFault {
    #[error("division by zero denominator")]
    ZeroDenominator,

    #[error("logarithm of non-positive value {0:e}")]
    NonPositiveLogarithm(f64),

    #[error("fractional power of negative value {0:e}")]
    NegativeRoot(f64),

    #[error("non-positive length {0:e}")]
    NonPositiveLength(f64),
}

/// Failure of the derivation pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DerivationError {
    #[error("invalid input {name} = {value:e}: {reason}")]
    InvalidInput {
        name: String,
        value: f64,
        reason: &'static str,
    },

    #[error("domain error at {step}: {fault} [{inputs}]")]
    Domain {
        step: Step,
        fault: DomainFault,
        inputs: String,
    },

    #[error("{step} produced non-finite value {value} [{inputs}]")]
    NonFinite {
        step: Step,
        value: f64,
        inputs: String,
    },

    #[error("{step} read {input}, which it does not declare as an input")]
    UndeclaredInput { step: Step, input: String },

    #[error("{step} depends on {input}, which has not been derived yet")]
    OutOfOrder { step: Step, input: ConstantId },
}

/// The reference table and the derived constants disagree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsistencyError {
    #[error("reference constant {0} has no derived value")]
    MissingDerived(ConstantId),

    #[error("reference constant {0} is listed more than once")]
    DuplicateReference(ConstantId),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("consistency error: {0}")]
    Consistency(#[from] ConsistencyError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
