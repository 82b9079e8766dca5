//! JSON seed-data model for problem lists.
//!
//! A seed file is a JSON array of problem definitions without review state;
//! seeding a list replaces that list's problems and starts their review
//! state from defaults.

use std::path::Path;

use serde::Deserialize;

use crate::error::CoreError;
use crate::problem::Difficulty;

/// List name used when seeding without an explicit `--list`.
pub const DEFAULT_LIST: &str = "Blind 75";

fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

/// One problem definition from a seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedProblem {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    pub pattern: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
}

/// Parse a seed file's JSON contents.
pub fn parse(json: &str) -> Result<Vec<SeedProblem>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read and parse a seed file from disk.
pub fn load_file(path: &Path) -> Result<Vec<SeedProblem>, CoreError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse(&contents)?)
}
