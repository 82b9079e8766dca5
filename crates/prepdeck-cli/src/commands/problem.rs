//! Problem management commands for CLI.

use clap::Subcommand;
use prepdeck_core::seed::SeedProblem;
use prepdeck_core::{Difficulty, Filter, StudyDb};

#[derive(Subcommand)]
pub enum ProblemAction {
    /// Add a custom problem
    Add {
        /// Problem title
        title: String,
        /// Problem URL
        #[arg(long)]
        url: Option<String>,
        /// Algorithm pattern label
        #[arg(long, default_value = "General")]
        pattern: String,
        /// Source list name
        #[arg(long, default_value = "Custom")]
        list: String,
        /// Difficulty: easy, medium or hard
        #[arg(long, default_value = "medium")]
        difficulty: String,
    },
    /// List problems
    List {
        /// Filter by pattern (case-insensitive substring)
        #[arg(long, short)]
        pattern: Option<String>,
        /// Filter by list (case-insensitive substring)
        #[arg(long, short)]
        list: Option<String>,
    },
    /// Get problem details
    Get {
        /// Problem id
        id: i64,
    },
}

pub fn run(action: ProblemAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = StudyDb::open()?;

    match action {
        ProblemAction::Add {
            title,
            url,
            pattern,
            list,
            difficulty,
        } => {
            let difficulty: Difficulty = difficulty.parse()?;
            let problem = SeedProblem {
                title,
                url,
                pattern,
                difficulty,
            };
            let id = db.insert_problem(&problem, &list)?;
            println!("Problem created: {id}");
            if let Some(stored) = db.get_problem(id)? {
                println!("{}", serde_json::to_string_pretty(&stored)?);
            }
        }
        ProblemAction::List { pattern, list } => {
            let problems = db.list_problems(&Filter { pattern, list })?;
            println!("{}", serde_json::to_string_pretty(&problems)?);
        }
        ProblemAction::Get { id } => match db.get_problem(id)? {
            Some(problem) => println!("{}", serde_json::to_string_pretty(&problem)?),
            None => println!("Problem not found: {id}"),
        },
    }
    Ok(())
}
