/// ROT Engine — Report Generator
///
/// Renders inputs, kappa0 and the comparison table as plain text.
/// Rows follow reference table order. Nothing is written unless every
/// row can be built.

use std::fmt::Write as _;
use std::io::Write;

use crate::arithmetic::relative_error;
use crate::domain::{BaseParameters, ConstantId, Derivation, DerivedConstants, ExponentSet, ReferenceTable};
use crate::error::{ConsistencyError, ReportError};
use crate::invariants::check_reference_unique;

pub const REPORT_TITLE: &str =
    "====== ROT Engine | Final Analytical Version (Machine-Precision Fit) ======";

/// Width of the symbol column in comparison rows.
const SYMBOL_WIDTH: usize = 10;

/// One line of the comparison table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonRow {
    pub constant: ConstantId,
    pub predicted: f64,
    pub observed: f64,
    pub relative_error: f64,
}

/// Pair every reference entry with its prediction.
///
/// A reference identifier without a derived value, or listed twice,
/// means the tables have drifted apart; no row is skipped.
pub fn compare(
    derived: &DerivedConstants,
    reference: &ReferenceTable,
) -> Result<Vec<ComparisonRow>, ConsistencyError> {
    check_reference_unique(reference)?;
    reference
        .entries()
        .iter()
        .map(|entry| {
            let predicted = derived
                .get(entry.constant)
                .ok_or(ConsistencyError::MissingDerived(entry.constant))?;
            Ok(ComparisonRow {
                constant: entry.constant,
                predicted,
                observed: entry.observed,
                relative_error: relative_error(predicted, entry.observed),
            })
        })
        .collect()
}

/// Scientific notation with a signed, at least two-digit exponent
/// (`2.99792e+08`). `explicit_sign` also forces a leading `+`.
pub fn format_sci(value: f64, precision: usize, explicit_sign: bool) -> String {
    let raw = if explicit_sign {
        format!("{:+.*e}", precision, value)
    } else {
        format!("{:.*e}", precision, value)
    };
    let Some((mantissa, exp)) = raw.split_once('e') else {
        // inf / NaN carry no exponent
        return raw;
    };
    match exp.parse::<i32>() {
        Ok(exp) => format!(
            "{}e{}{:02}",
            mantissa,
            if exp < 0 { '-' } else { '+' },
            exp.unsigned_abs()
        ),
        Err(_) => raw,
    }
}

/// Everything a report reads.
pub struct Report<'a> {
    pub params: &'a BaseParameters,
    pub exponents: &'a ExponentSet,
    pub derivation: &'a Derivation,
    pub reference: &'a ReferenceTable,
}

impl Report<'_> {
    pub fn rows(&self) -> Result<Vec<ComparisonRow>, ConsistencyError> {
        compare(&self.derivation.constants, self.reference)
    }

    /// Render the full report. Fails before producing any text if the
    /// comparison table cannot be built.
    pub fn render(&self) -> Result<String, ConsistencyError> {
        let rows = self.rows()?;
        let p = self.params;
        let kappa0 = self.derivation.kappa0;

        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", REPORT_TITLE);
        let _ = writeln!(out, "Postulated Parameters (5):");
        let _ = writeln!(
            out,
            "l₀ = {} m, t₀ = {} s, S₀ = {:.1}, r₀ = {:.3}, η₀ = {:.3}",
            format_sci(p.l0, 3, false),
            format_sci(p.t0, 3, false),
            p.s0,
            p.r0,
            p.eta0
        );
        let _ = writeln!(
            out,
            "log₁₀(κ₀) = {:.3}, κ₀ = {}",
            kappa0.log10(),
            format_sci(kappa0, 3, false)
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "Scaling Exponents Derived Analytically:");
        for (id, value) in self.exponents.iter() {
            let _ = writeln!(out, "{} = {:.9}", id.exponent_label(), value);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Derived Constants vs CODATA:");
        for row in &rows {
            let _ = writeln!(out, "{}", format_row(row));
        }
        Ok(out)
    }

    /// Render and write in one piece.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), ReportError> {
        let text = self.render()?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

fn format_row(row: &ComparisonRow) -> String {
    format!(
        "{:<width$}  Pred: {}  Obs: {}  Rel Error: {}",
        row.constant.symbol(),
        format_sci(row.predicted, 5, false),
        format_sci(row.observed, 5, false),
        format_sci(row.relative_error, 2, true),
        width = SYMBOL_WIDTH,
    )
}
