/// ROT Engine — Core Domain Types
///
/// Pure data. No formulas, no formatting.
/// All values: IEEE-754 f64.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tables;

// ── Identifiers ────────────────────────────────────────────────────

/// The nine predicted constants, in declaration order.
///
/// The order is load-bearing: variant `i` is paired with exponent `p{i+1}`
/// and is derived at pipeline step `i + 2` (step 1 is kappa0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConstantId {
    #[serde(rename = "c")]
    SpeedOfLight,
    #[serde(rename = "hbar")]
    ReducedPlanck,
    #[serde(rename = "G")]
    Gravitational,
    #[serde(rename = "alpha")]
    FineStructure,
    #[serde(rename = "Lambda")]
    Cosmological,
    #[serde(rename = "m_e")]
    ElectronMass,
    #[serde(rename = "alpha_s")]
    StrongCoupling,
    #[serde(rename = "m_p")]
    ProtonMass,
    #[serde(rename = "e")]
    ElementaryCharge,
}

impl ConstantId {
    pub const ALL: [ConstantId; 9] = [
        ConstantId::SpeedOfLight,
        ConstantId::ReducedPlanck,
        ConstantId::Gravitational,
        ConstantId::FineStructure,
        ConstantId::Cosmological,
        ConstantId::ElectronMass,
        ConstantId::StrongCoupling,
        ConstantId::ProtonMass,
        ConstantId::ElementaryCharge,
    ];

    /// Short symbol used in reports and configuration files.
    pub fn symbol(self) -> &'static str {
        match self {
            ConstantId::SpeedOfLight => "c",
            ConstantId::ReducedPlanck => "hbar",
            ConstantId::Gravitational => "G",
            ConstantId::FineStructure => "alpha",
            ConstantId::Cosmological => "Lambda",
            ConstantId::ElectronMass => "m_e",
            ConstantId::StrongCoupling => "alpha_s",
            ConstantId::ProtonMass => "m_p",
            ConstantId::ElementaryCharge => "e",
        }
    }

    /// Zero-based position in declaration order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label of the paired correction exponent (`p1`..`p9`).
    pub fn exponent_label(self) -> String {
        format!("p{}", self.index() + 1)
    }
}

impl fmt::Display for ConstantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Names one of the five base parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseParam {
    L0,
    T0,
    S0,
    R0,
    Eta0,
}

impl BaseParam {
    pub const ALL: [BaseParam; 5] = [
        BaseParam::L0,
        BaseParam::T0,
        BaseParam::S0,
        BaseParam::R0,
        BaseParam::Eta0,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BaseParam::L0 => "l0",
            BaseParam::T0 => "t0",
            BaseParam::S0 => "S0",
            BaseParam::R0 => "r0",
            BaseParam::Eta0 => "eta0",
        }
    }
}

/// A position in the derivation pipeline, used to name failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Kappa0,
    Constant(ConstantId),
}

impl Step {
    /// One-based step number: kappa0 is 1, `c` is 2, ..., `e` is 10.
    pub fn number(self) -> usize {
        match self {
            Step::Kappa0 => 1,
            Step::Constant(id) => id.index() + 2,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Kappa0 => write!(f, "step {} (kappa0)", self.number()),
            Step::Constant(id) => write!(f, "step {} ({})", self.number(), id),
        }
    }
}

// ── Inputs ─────────────────────────────────────────────────────────

/// The five postulated base parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaseParameters {
    /// Base length scale [m].
    pub l0: f64,
    /// Base time scale [s].
    pub t0: f64,
    /// Base entropy, dimensionless.
    #[serde(rename = "S0")]
    pub s0: f64,
    /// Entropic radius, dimensionless.
    pub r0: f64,
    /// Attentional field amplitude, dimensionless.
    pub eta0: f64,
}

impl BaseParameters {
    pub fn get(&self, param: BaseParam) -> f64 {
        match param {
            BaseParam::L0 => self.l0,
            BaseParam::T0 => self.t0,
            BaseParam::S0 => self.s0,
            BaseParam::R0 => self.r0,
            BaseParam::Eta0 => self.eta0,
        }
    }
}

impl Default for BaseParameters {
    fn default() -> Self {
        tables::ROT_PARAMETERS
    }
}

/// Correction exponents. `p{i}` scales constant `i` by `10^p{i}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExponentSet {
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub p4: f64,
    pub p5: f64,
    pub p6: f64,
    pub p7: f64,
    pub p8: f64,
    pub p9: f64,
}

impl ExponentSet {
    /// Exponent paired with `id`.
    pub fn get(&self, id: ConstantId) -> f64 {
        match id {
            ConstantId::SpeedOfLight => self.p1,
            ConstantId::ReducedPlanck => self.p2,
            ConstantId::Gravitational => self.p3,
            ConstantId::FineStructure => self.p4,
            ConstantId::Cosmological => self.p5,
            ConstantId::ElectronMass => self.p6,
            ConstantId::StrongCoupling => self.p7,
            ConstantId::ProtonMass => self.p8,
            ConstantId::ElementaryCharge => self.p9,
        }
    }

    /// Copy with the exponent paired with `id` replaced.
    pub fn with(mut self, id: ConstantId, value: f64) -> Self {
        let slot = match id {
            ConstantId::SpeedOfLight => &mut self.p1,
            ConstantId::ReducedPlanck => &mut self.p2,
            ConstantId::Gravitational => &mut self.p3,
            ConstantId::FineStructure => &mut self.p4,
            ConstantId::Cosmological => &mut self.p5,
            ConstantId::ElectronMass => &mut self.p6,
            ConstantId::StrongCoupling => &mut self.p7,
            ConstantId::ProtonMass => &mut self.p8,
            ConstantId::ElementaryCharge => &mut self.p9,
        };
        *slot = value;
        self
    }

    /// `(constant, exponent)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ConstantId, f64)> + '_ {
        ConstantId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }
}

impl Default for ExponentSet {
    fn default() -> Self {
        tables::ROT_EXPONENTS
    }
}

/// One observed reference value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceEntry {
    pub constant: ConstantId,
    pub observed: f64,
}

/// Observed values in declaration order. Reports follow this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceTable {
    entries: Vec<ReferenceEntry>,
}

impl ReferenceTable {
    pub fn new(entries: Vec<ReferenceEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn get(&self, id: ConstantId) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.constant == id)
            .map(|e| e.observed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::new(
            tables::CODATA_REFERENCE
                .iter()
                .map(|&(constant, observed)| ReferenceEntry { constant, observed })
                .collect(),
        )
    }
}

// ── Outputs ────────────────────────────────────────────────────────

/// Predicted values, keyed by identifier. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedConstants {
    values: BTreeMap<ConstantId, f64>,
}

impl DerivedConstants {
    pub fn get(&self, id: ConstantId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    /// Values in identifier declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ConstantId, f64)> + '_ {
        self.values.iter().map(|(&id, &v)| (id, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert(&mut self, id: ConstantId, value: f64) {
        self.values.insert(id, value);
    }
}

impl FromIterator<(ConstantId, f64)> for DerivedConstants {
    fn from_iter<I: IntoIterator<Item = (ConstantId, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Complete output of one engine run.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub kappa0: f64,
    pub constants: DerivedConstants,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order_matches_exponent_labels() {
        let labels: Vec<String> = ConstantId::ALL.iter().map(|id| id.exponent_label()).collect();
        assert_eq!(labels, ["p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8", "p9"]);
    }

    #[test]
    fn test_step_numbers() {
        assert_eq!(Step::Kappa0.number(), 1);
        assert_eq!(Step::Constant(ConstantId::SpeedOfLight).number(), 2);
        assert_eq!(Step::Constant(ConstantId::ElementaryCharge).number(), 10);
        assert_eq!(
            Step::Constant(ConstantId::Cosmological).to_string(),
            "step 6 (Lambda)"
        );
    }

    #[test]
    fn test_exponent_with_replaces_only_its_slot() {
        let base = ExponentSet::default();
        let bumped = base.with(ConstantId::StrongCoupling, 1.5);
        for id in ConstantId::ALL {
            if id == ConstantId::StrongCoupling {
                assert_eq!(bumped.get(id), 1.5);
            } else {
                assert_eq!(bumped.get(id).to_bits(), base.get(id).to_bits());
            }
        }
    }

    #[test]
    fn test_constant_id_serializes_as_symbol() {
        let json = serde_json::to_string(&ConstantId::ElectronMass).unwrap();
        assert_eq!(json, "\"m_e\"");
        let back: ConstantId = serde_json::from_str("\"Lambda\"").unwrap();
        assert_eq!(back, ConstantId::Cosmological);
    }

    #[test]
    fn test_reference_lookup() {
        let table = ReferenceTable::default();
        assert_eq!(table.len(), 9);
        assert_eq!(table.get(ConstantId::StrongCoupling), Some(0.1181));
    }
}
