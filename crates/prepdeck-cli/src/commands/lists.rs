//! Problem list summaries.

use chrono::Local;
use prepdeck_core::{overview, Filter, Problem, StudyDb};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = StudyDb::open()?;
    let lists = db.lists()?;
    if lists.is_empty() {
        println!("No lists found. Run 'prepdeck init' first.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    let problems = db.list_problems(&Filter::default())?;

    for list in lists {
        // Exact label match here; substring filters are for lookups.
        let subset: Vec<Problem> = problems.iter().filter(|p| p.list == list).cloned().collect();
        let stats = overview(&subset, today);
        println!(
            "  {list}: {} problems ({} started, {} due)",
            stats.total_problems, stats.problems_started, stats.due_today
        );
    }
    Ok(())
}
