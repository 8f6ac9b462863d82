#![forbid(unsafe_code)]

/// Engine v1. Any change to formulas or their order requires engine_v2.
pub const ENGINE_VERSION: u32 = 1;

pub mod arithmetic;
pub mod domain;
pub mod error;
pub mod tables;
pub mod invariants;
pub mod formulas;
pub mod engine;
pub mod report;
pub mod hashing;
