/// ROT Engine — Compiled-in Tables
///
/// The three literal tables a run uses when no configuration file is given.

use crate::domain::{BaseParameters, ConstantId, ExponentSet};

/// Postulated base parameters.
pub const ROT_PARAMETERS: BaseParameters = BaseParameters {
    l0: 9.676e-35,
    t0: 3.227e-43,
    s0: 9.999e+05,
    r0: 99.790,
    eta0: 1824.938,
};

/// Correction exponents, `p1`..`p9`.
pub const ROT_EXPONENTS: ExponentSet = ExponentSet {
    p1: -0.000076191,
    p2: 3.136409236,
    p3: 12.884872644,
    p4: -4.661156854,
    p5: -133.332151463,
    p6: -21.601070602,
    p7: 0.893544295,
    p8: 3.263908789,
    p9: -5.526425635,
};

/// CODATA observed values, in report order.
pub const CODATA_REFERENCE: [(ConstantId, f64); 9] = [
    (ConstantId::SpeedOfLight, 2.99792458e8),         // m/s
    (ConstantId::ReducedPlanck, 1.054571817e-34),     // J·s
    (ConstantId::Gravitational, 6.67430e-11),         // m³/(kg·s²)
    (ConstantId::FineStructure, 7.2973525693e-3),
    (ConstantId::Cosmological, 1.1056e-52),           // 1/m²
    (ConstantId::ElectronMass, 9.1093837015e-31),     // kg
    (ConstantId::StrongCoupling, 0.1181),
    (ConstantId::ProtonMass, 1.67262192369e-27),      // kg
    (ConstantId::ElementaryCharge, 1.602176634e-19),  // C
];
