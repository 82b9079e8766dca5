use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "prepdeck", version, about = "Spaced-repetition prep for coding problems")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database and seed a problem list
    Init {
        /// JSON seed file (defaults to the bundled Blind 75 set)
        #[arg(long)]
        file: Option<PathBuf>,
        /// List name to seed into
        #[arg(long, short)]
        list: Option<String>,
    },
    /// Problem management
    Problem {
        #[command(subcommand)]
        action: commands::problem::ProblemAction,
    },
    /// Show the next problem due for review
    Next {
        /// Filter by pattern (case-insensitive substring)
        #[arg(long, short)]
        pattern: Option<String>,
        /// Filter by list (case-insensitive substring)
        #[arg(long, short)]
        list: Option<String>,
    },
    /// Record a review: open the problem and rate your recall
    Solve {
        /// Problem id
        id: i64,
        /// Recall score 0-5; prompts interactively when omitted
        #[arg(long, short)]
        score: Option<u8>,
        /// Skip opening the problem URL in a browser
        #[arg(long)]
        no_open: bool,
    },
    /// Pattern-wise progress dashboard
    Dashboard {
        /// Filter by list (case-insensitive substring)
        #[arg(long, short)]
        list: Option<String>,
    },
    /// Study statistics
    Stats {
        /// Filter by list (case-insensitive substring)
        #[arg(long, short)]
        list: Option<String>,
    },
    /// Show known problem lists
    Lists,
    /// Reset review progress, keeping the problems
    Reset {
        /// Only reset problems from this list
        #[arg(long, short)]
        list: Option<String>,
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Init { file, list } => commands::init::run(file, list),
        Commands::Problem { action } => commands::problem::run(action),
        Commands::Next { pattern, list } => commands::next::run(pattern, list),
        Commands::Solve { id, score, no_open } => commands::solve::run(id, score, no_open),
        Commands::Dashboard { list } => commands::dashboard::run(list),
        Commands::Stats { list } => commands::stats::run(list),
        Commands::Lists => commands::lists::run(),
        Commands::Reset { list, yes } => commands::reset::run(list, yes),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "prepdeck", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
