//! Pattern-wise progress dashboard.

use chrono::Local;
use prepdeck_core::{overview, progress_by_pattern, Config, StudyDb};

pub fn run(list: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let db = StudyDb::open()?;
    let config = Config::load()?;
    let filter = super::filter_from_args(None, list, &config);
    let today = Local::now().date_naive();

    let problems = db.list_problems(&filter)?;
    if problems.is_empty() {
        println!("No problems in the database. Run 'prepdeck init' first.");
        return Ok(());
    }

    if let Some(list) = &filter.list {
        println!("Showing: {list}");
    }

    let stats = overview(&problems, today);
    println!(
        "Total: {} problems | Started: {} | Due: {}",
        stats.total_problems, stats.problems_started, stats.due_today
    );
    println!();

    for entry in progress_by_pattern(&problems, today) {
        let filled = (entry.percent() / 10.0) as usize;
        let bar: String = "█".repeat(filled) + &"░".repeat(10 - filled);
        let due = if entry.due > 0 {
            format!("  ({} due)", entry.due)
        } else {
            String::new()
        };
        println!(
            "  {bar} {:5.1}% {} ({}/{}){due}",
            entry.percent(),
            entry.pattern,
            entry.solved,
            entry.total
        );
    }

    println!();
    println!("Run 'prepdeck stats' for the detailed problem list");
    println!("Run 'prepdeck next' to get the next problem to solve");
    Ok(())
}
