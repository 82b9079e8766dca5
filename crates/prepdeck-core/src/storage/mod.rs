mod config;
pub mod migrations;
pub mod study_db;

pub use config::Config;
pub use study_db::StudyDb;

use std::path::PathBuf;

/// Returns `~/.config/prepdeck[-dev]/` based on PREPDECK_ENV.
///
/// Set PREPDECK_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PREPDECK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("prepdeck-dev")
    } else {
        base_dir.join("prepdeck")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
