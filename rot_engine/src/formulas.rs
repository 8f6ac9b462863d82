/// ROT Engine — Formula Pipeline
///
/// ALL closed-form expressions live here.
/// Each formula declares its inputs; a formula can only read what it
/// declares, and a prior output only once it has been derived.
/// The pipeline order is checked against those declarations.

use std::f64::consts::PI;

use log::debug;

use crate::arithmetic::{checked_div, checked_ln, checked_root, pow10, sphere_volume};
use crate::domain::{
    BaseParam, BaseParameters, ConstantId, DerivedConstants, ExponentSet, Step,
};
use crate::error::{DerivationError, DomainFault};

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// Something a formula reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Base(BaseParam),
    Kappa0,
    Prior(ConstantId),
}

impl Input {
    pub fn label(self) -> String {
        match self {
            Input::Base(p) => p.name().to_string(),
            Input::Kappa0 => "kappa0".to_string(),
            Input::Prior(id) => id.symbol().to_string(),
        }
    }
}

type RawFn = fn(&FormulaInputs<'_>) -> Result<f64, DerivationError>;

/// One pipeline step: `value = raw(inputs) · 10^p`.
pub struct Formula {
    pub constant: ConstantId,
    pub expression: &'static str,
    pub inputs: &'static [Input],
    raw: RawFn,
}

use BaseParam::{Eta0, L0, R0, S0, T0};
use ConstantId::{ElectronMass, FineStructure, ReducedPlanck, SpeedOfLight};

const KAPPA0_INPUTS: &[Input] = &[Input::Base(S0), Input::Base(L0)];

/// The nine formulas in evaluation order.
pub static PIPELINE: [Formula; 9] = [
    Formula {
        constant: ConstantId::SpeedOfLight,
        expression: "c = (l0/t0)·10^p1",
        inputs: &[Input::Base(L0), Input::Base(T0)],
        raw: speed_of_light,
    },
    Formula {
        constant: ConstantId::ReducedPlanck,
        expression: "hbar = kappa0·l0³·t0·10^p2",
        inputs: &[Input::Kappa0, Input::Base(L0), Input::Base(T0)],
        raw: reduced_planck,
    },
    Formula {
        constant: ConstantId::Gravitational,
        expression: "G = l0³/(S0·t0²)·10^p3",
        inputs: &[Input::Base(L0), Input::Base(S0), Input::Base(T0)],
        raw: gravitational,
    },
    Formula {
        constant: ConstantId::FineStructure,
        expression: "alpha = (eta0/r0)²·10^p4",
        inputs: &[Input::Base(Eta0), Input::Base(R0)],
        raw: fine_structure,
    },
    Formula {
        constant: ConstantId::Cosmological,
        expression: "Lambda = (1/(S0·t0²))·ln(kappa0)·10^p5",
        inputs: &[Input::Base(S0), Input::Base(T0), Input::Kappa0],
        raw: cosmological,
    },
    Formula {
        constant: ConstantId::ElectronMass,
        expression: "m_e = hbar/(l0·c)·10^p6",
        inputs: &[Input::Prior(ReducedPlanck), Input::Base(L0), Input::Prior(SpeedOfLight)],
        raw: electron_mass,
    },
    Formula {
        constant: ConstantId::StrongCoupling,
        expression: "alpha_s = alpha·(eta0/r0)^¼·10^p7",
        inputs: &[Input::Prior(FineStructure), Input::Base(Eta0), Input::Base(R0)],
        raw: strong_coupling,
    },
    Formula {
        constant: ConstantId::ProtonMass,
        expression: "m_p = m_e·10^p8",
        inputs: &[Input::Prior(ElectronMass)],
        raw: proton_mass,
    },
    Formula {
        constant: ConstantId::ElementaryCharge,
        expression: "e = sqrt(4π·hbar·c·alpha)·10^p9",
        inputs: &[
            Input::Prior(ReducedPlanck),
            Input::Prior(SpeedOfLight),
            Input::Prior(FineStructure),
        ],
        raw: elementary_charge,
    },
];

/// The formula that derives `id`.
pub fn formula(id: ConstantId) -> &'static Formula {
    &PIPELINE[id.index()]
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// `kappa0 = S0 / ((4/3)·π·l0³)`. Requires `l0 > 0`.
pub fn derive_kappa0(params: &BaseParameters) -> Result<f64, DerivationError> {
    let empty = DerivedConstants::default();
    let x = FormulaInputs {
        step: Step::Kappa0,
        declared: KAPPA0_INPUTS,
        params,
        kappa0: f64::NAN,
        derived: &empty,
    };
    let l0 = x.base(L0)?;
    if l0 <= 0.0 {
        return Err(x.fault(DomainFault::NonPositiveLength(l0)));
    }
    let kappa0 = x.check(checked_div(x.base(S0)?, sphere_volume(l0)))?;
    if !kappa0.is_finite() {
        return Err(DerivationError::NonFinite {
            step: Step::Kappa0,
            value: kappa0,
            inputs: x.describe(),
        });
    }
    debug!("{}: kappa0 = {:e}", Step::Kappa0, kappa0);
    Ok(kappa0)
}

/// Run all nine formulas in pipeline order.
pub fn evaluate_pipeline(
    params: &BaseParameters,
    exponents: &ExponentSet,
    kappa0: f64,
) -> Result<DerivedConstants, DerivationError> {
    check_order(&PIPELINE)?;

    let mut derived = DerivedConstants::default();
    for f in PIPELINE.iter() {
        let value = f.evaluate(params, exponents, kappa0, &derived)?;
        debug!("{}: {} -> {:e}", f.step(), f.expression, value);
        derived.insert(f.constant, value);
    }
    Ok(derived)
}

impl Formula {
    pub fn step(&self) -> Step {
        Step::Constant(self.constant)
    }

    /// Evaluate against whatever has been derived so far.
    pub fn evaluate(
        &self,
        params: &BaseParameters,
        exponents: &ExponentSet,
        kappa0: f64,
        derived: &DerivedConstants,
    ) -> Result<f64, DerivationError> {
        let x = FormulaInputs {
            step: self.step(),
            declared: self.inputs,
            params,
            kappa0,
            derived,
        };
        let raw = (self.raw)(&x)?;
        let value = raw * pow10(exponents.get(self.constant));
        if !value.is_finite() {
            return Err(DerivationError::NonFinite {
                step: self.step(),
                value,
                inputs: x.describe(),
            });
        }
        Ok(value)
    }
}

/// Every prior a formula reads must be produced by an earlier formula.
pub fn check_order(pipeline: &[Formula]) -> Result<(), DerivationError> {
    for (pos, f) in pipeline.iter().enumerate() {
        for input in f.inputs {
            if let Input::Prior(dep) = *input {
                let earlier = pipeline[..pos].iter().any(|g| g.constant == dep);
                if !earlier {
                    return Err(DerivationError::OutOfOrder {
                        step: f.step(),
                        input: dep,
                    });
                }
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Gated input access
// ---------------------------------------------------------------------------

/// The view a single formula has of the run.
pub struct FormulaInputs<'a> {
    step: Step,
    declared: &'static [Input],
    params: &'a BaseParameters,
    kappa0: f64,
    derived: &'a DerivedConstants,
}

impl FormulaInputs<'_> {
    fn require(&self, input: Input) -> Result<(), DerivationError> {
        if self.declared.contains(&input) {
            Ok(())
        } else {
            Err(DerivationError::UndeclaredInput {
                step: self.step,
                input: input.label(),
            })
        }
    }

    fn base(&self, param: BaseParam) -> Result<f64, DerivationError> {
        self.require(Input::Base(param))?;
        Ok(self.params.get(param))
    }

    fn kappa0(&self) -> Result<f64, DerivationError> {
        self.require(Input::Kappa0)?;
        Ok(self.kappa0)
    }

    fn prior(&self, id: ConstantId) -> Result<f64, DerivationError> {
        self.require(Input::Prior(id))?;
        self.derived.get(id).ok_or(DerivationError::OutOfOrder {
            step: self.step,
            input: id,
        })
    }

    fn fault(&self, fault: DomainFault) -> DerivationError {
        DerivationError::Domain {
            step: self.step,
            fault,
            inputs: self.describe(),
        }
    }

    fn check(&self, r: Result<f64, DomainFault>) -> Result<f64, DerivationError> {
        r.map_err(|fault| self.fault(fault))
    }

    /// `name=value` for every declared input, for diagnostics.
    fn describe(&self) -> String {
        self.declared
            .iter()
            .map(|input| {
                let value = match *input {
                    Input::Base(p) => Some(self.params.get(p)),
                    Input::Kappa0 => Some(self.kappa0),
                    Input::Prior(id) => self.derived.get(id),
                };
                match value {
                    Some(v) => format!("{}={:e}", input.label(), v),
                    None => format!("{}=?", input.label()),
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ---------------------------------------------------------------------------
// Raw expressions (before the 10^p correction)
// ---------------------------------------------------------------------------

fn speed_of_light(x: &FormulaInputs<'_>) -> Result<f64, DerivationError> {
    x.check(checked_div(x.base(L0)?, x.base(T0)?))
}

fn reduced_planck(x: &FormulaInputs<'_>) -> Result<f64, DerivationError> {
    Ok(x.kappa0()? * x.base(L0)?.powi(3) * x.base(T0)?)
}

fn gravitational(x: &FormulaInputs<'_>) -> Result<f64, DerivationError> {
    let t0 = x.base(T0)?;
    x.check(checked_div(x.base(L0)?.powi(3), x.base(S0)? * t0.powi(2)))
}

fn fine_structure(x: &FormulaInputs<'_>) -> Result<f64, DerivationError> {
    Ok(x.check(checked_div(x.base(Eta0)?, x.base(R0)?))?.powi(2))
}

fn cosmological(x: &FormulaInputs<'_>) -> Result<f64, DerivationError> {
    let log_kappa = x.check(checked_ln(x.kappa0()?))?;
    let t0 = x.base(T0)?;
    let inverse = x.check(checked_div(1.0, x.base(S0)? * t0.powi(2)))?;
    Ok(inverse * log_kappa)
}

fn electron_mass(x: &FormulaInputs<'_>) -> Result<f64, DerivationError> {
    let c = x.prior(SpeedOfLight)?;
    x.check(checked_div(x.prior(ReducedPlanck)?, x.base(L0)? * c))
}

fn strong_coupling(x: &FormulaInputs<'_>) -> Result<f64, DerivationError> {
    let ratio = x.check(checked_div(x.base(Eta0)?, x.base(R0)?))?;
    Ok(x.prior(FineStructure)? * x.check(checked_root(ratio, 0.25))?)
}

fn proton_mass(x: &FormulaInputs<'_>) -> Result<f64, DerivationError> {
    x.prior(ElectronMass)
}

/// Precondition: hbar, c and alpha are non-negative, so the radicand is.
/// A negative radicand surfaces as a non-finite step result.
fn elementary_charge(x: &FormulaInputs<'_>) -> Result<f64, DerivationError> {
    let hbar = x.prior(ReducedPlanck)?;
    let c = x.prior(SpeedOfLight)?;
    let alpha = x.prior(FineStructure)?;
    Ok((4.0 * PI * hbar * c * alpha).sqrt())
}
