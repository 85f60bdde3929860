use super::Statement;
use crate::error::ProgramError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A named entry point of a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub evaluate: Statement,
}

/// All phases of a rule set keyed by phase name.
pub type Phases = BTreeMap<String, Phase>;

/// Parses a single statement from its JSON wire form.
pub fn parse_statement(json: &str) -> Result<Statement, ProgramError> {
    serde_json::from_str(json).map_err(ProgramError::Json)
}

/// Parses a phases object (`{ "<name>": { "evaluate": ... } }`).
pub fn parse_phases(json: &str) -> Result<Phases, ProgramError> {
    serde_json::from_str(json).map_err(ProgramError::Json)
}

pub fn read_statement_file(path: impl AsRef<Path>) -> Result<Statement, ProgramError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ProgramError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_statement(&content)
}

pub fn read_phases_file(path: impl AsRef<Path>) -> Result<Phases, ProgramError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ProgramError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_phases(&content)
}

/// Serializes any program value to pretty-printed JSON.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, ProgramError> {
    serde_json::to_string_pretty(value).map_err(ProgramError::Json)
}
