/// ROT Engine — Arithmetic Primitives
///
/// All numeric values: IEEE-754 f64.
/// Checked variants refuse operands outside their real domain
/// instead of returning inf or NaN.

use std::f64::consts::PI;

use crate::error::DomainFault;

/// Volume of a sphere of radius `r`: `(4/3)·π·r³`.
pub fn sphere_volume(r: f64) -> f64 {
    (4.0 / 3.0) * PI * r.powi(3)
}

/// Correction factor `10^p` for a real exponent.
pub fn pow10(p: f64) -> f64 {
    10f64.powf(p)
}

/// `a / b`. Fails on a zero denominator.
pub fn checked_div(a: f64, b: f64) -> Result<f64, DomainFault> {
    if b == 0.0 {
        return Err(DomainFault::ZeroDenominator);
    }
    Ok(a / b)
}

/// Natural logarithm. Fails for `x <= 0`.
pub fn checked_ln(x: f64) -> Result<f64, DomainFault> {
    if x <= 0.0 {
        return Err(DomainFault::NonPositiveLogarithm(x));
    }
    Ok(x.ln())
}

/// `x^e` for fractional `e`. Fails for negative `x`.
pub fn checked_root(x: f64, e: f64) -> Result<f64, DomainFault> {
    if x < 0.0 {
        return Err(DomainFault::NegativeRoot(x));
    }
    Ok(x.powf(e))
}

/// Signed relative error `predicted/observed - 1`.
pub fn relative_error(predicted: f64, observed: f64) -> f64 {
    predicted / observed - 1.0
}
