//! Configuration management commands for CLI.

use clap::Subcommand;
use prepdeck_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set configuration values
    Set {
        /// Default list applied when no --list is given
        #[arg(long)]
        default_list: Option<String>,
        /// Clear the default list
        #[arg(long)]
        clear_default_list: bool,
        /// Whether solve opens the problem URL in a browser
        #[arg(long)]
        open_browser: Option<bool>,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Set {
            default_list,
            clear_default_list,
            open_browser,
        } => {
            let mut config = Config::load()?;
            if let Some(list) = default_list {
                config.default_list = Some(list);
            }
            if clear_default_list {
                config.default_list = None;
            }
            if let Some(open) = open_browser {
                config.open_browser = open;
            }
            config.save()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
