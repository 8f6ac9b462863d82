//! Config codec — JSON encoder/decoder for the three input tables.
//!
//! - `decode_config`:  JSON string → RunConfig (strict, no defaults)
//! - `restore_config`: decode + input validation
//! - `load_config` / `export_config_to_file`: file I/O
//! - `encode_config`:  RunConfig → pretty JSON, declaration order kept

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rot_engine::domain::{BaseParameters, ExponentSet, ReferenceTable};
use rot_engine::error::{ConsistencyError, DerivationError};
use rot_engine::invariants::{check_reference_unique, validate_inputs, validate_reference};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] DerivationError),

    #[error("inconsistent reference table: {0}")]
    Inconsistent(#[from] ConsistencyError),
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// The three tables a run needs.
///
/// ```json
/// {
///   "parameters": { "l0": 9.676e-35, "t0": 3.227e-43, "S0": 999900.0, "r0": 99.79, "eta0": 1824.938 },
///   "exponents":  { "p1": -0.000076191, ..., "p9": -5.526425635 },
///   "reference":  [ { "constant": "c", "observed": 299792458.0 }, ... ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub parameters: BaseParameters,
    pub exponents: ExponentSet,
    pub reference: ReferenceTable,
}

impl RunConfig {
    /// Check every table before anything is derived.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_inputs(&self.parameters, &self.exponents)?;
        self.validate_reference()
    }

    /// Reference values finite and non-zero, each id listed at most once.
    pub fn validate_reference(&self) -> Result<(), ConfigError> {
        validate_reference(&self.reference)?;
        check_reference_unique(&self.reference)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Strict parse. Unknown or missing fields fail; no validation.
pub fn decode_config(json: &str) -> Result<RunConfig, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse and validate. The safe entry point for files.
pub fn restore_config(json: &str) -> Result<RunConfig, ConfigError> {
    let config = decode_config(json)?;
    config.validate()?;
    Ok(config)
}

pub fn encode_config(config: &RunConfig) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(config)?)
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

pub fn load_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    restore_config(&content)
}

/// Write `config` as a JSON template. Creates parent directories if needed.
pub fn export_config_to_file(config: &RunConfig, path: &Path) -> Result<(), ConfigError> {
    let json = encode_config(config)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, json.as_bytes())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
