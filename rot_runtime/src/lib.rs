#![forbid(unsafe_code)]

//! ROT Engine — Rust Runtime
//!
//! Wraps the derivation kernel with configuration loading,
//! determinism verification, drift reports and the CLI.
//!
//! No formulas live here. Every value is derived by rot_engine.

pub mod config;
pub mod run;
pub mod drift;
pub mod cli;
