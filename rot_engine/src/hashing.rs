/// ROT Engine — Canonical Fingerprint
///
/// Deterministic canonical serialization + SHA-256 hashing of a derivation.
/// Two derivations share a fingerprint iff every value is bit-identical.
///
/// Rules:
///   - Field order: engine_version, kappa0, constants
///   - Constants in identifier declaration order, keyed by symbol
///   - Every f64 written as its 16-digit lowercase hex bit pattern
///   - UTF-8 JSON, no whitespace

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::domain::Derivation;
use crate::ENGINE_VERSION;

/// Canonical serialization of a Derivation to UTF-8 JSON bytes.
pub fn canonical_serialize(derivation: &Derivation) -> Vec<u8> {
    build_canonical_value(derivation).to_string().into_bytes()
}

/// SHA-256 of canonical serialization. Lowercase hex string.
pub fn canonical_hash(derivation: &Derivation) -> String {
    let digest = Sha256::digest(canonical_serialize(derivation));
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

fn bits(value: f64) -> Value {
    Value::String(format!("{:016x}", value.to_bits()))
}

/// Uses serde_json::Map with preserve_order, so insertion order is output order.
fn build_canonical_value(derivation: &Derivation) -> Value {
    let mut constants = Map::new();
    for (id, value) in derivation.constants.iter() {
        constants.insert(id.symbol().to_string(), bits(value));
    }

    let mut root = Map::new();
    root.insert(
        "engine_version".to_string(),
        Value::Number(ENGINE_VERSION.into()),
    );
    root.insert("kappa0".to_string(), bits(derivation.kappa0));
    root.insert("constants".to_string(), Value::Object(constants));
    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BaseParameters, ConstantId, DerivedConstants, ExponentSet};
    use crate::engine::derive;

    #[test]
    fn test_canonical_layout() {
        let derivation = Derivation {
            kappa0: 1.0,
            constants: [(ConstantId::ProtonMass, 2.0), (ConstantId::SpeedOfLight, -0.0)]
                .into_iter()
                .collect::<DerivedConstants>(),
        };
        let json = String::from_utf8(canonical_serialize(&derivation)).unwrap();
        assert_eq!(
            json,
            "{\"engine_version\":1,\"kappa0\":\"3ff0000000000000\",\
             \"constants\":{\"c\":\"8000000000000000\",\"m_p\":\"4000000000000000\"}}"
        );
    }

    #[test]
    fn test_hash_is_lowercase_hex() {
        let derivation = derive(&BaseParameters::default(), &ExponentSet::default()).unwrap();
        let hash = canonical_hash(&derivation);
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_hash_sees_single_bit_changes() {
        let a = derive(&BaseParameters::default(), &ExponentSet::default()).unwrap();
        let mut b = a.clone();
        b.kappa0 = f64::from_bits(a.kappa0.to_bits() ^ 1);
        assert_ne!(canonical_hash(&a), canonical_hash(&b));
    }
}
