//! Study statistics command.

use chrono::Local;
use prepdeck_core::{overview, streak, Config, StudyDb};

pub fn run(list: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let db = StudyDb::open()?;
    let config = Config::load()?;
    let filter = super::filter_from_args(None, list, &config);
    let today = Local::now().date_naive();

    let problems = db.list_problems(&filter)?;
    if problems.is_empty() {
        match &filter.list {
            Some(list) => println!("No problems found in list '{list}'."),
            None => println!("No problems in the database. Run 'prepdeck init' first."),
        }
        return Ok(());
    }

    let stats = overview(&problems, today);
    let streak_days = streak(&problems, today);
    let started_pct = stats.problems_started * 100 / stats.total_problems.max(1);

    println!("Total problems:  {}", stats.total_problems);
    println!(
        "Started:         {} ({started_pct}%)",
        stats.problems_started
    );
    println!("New:             {}", stats.new_problems);
    println!("Due today:       {}", stats.due_today);
    println!("Total reviews:   {}", stats.total_reviews);
    println!("Streak:          {streak_days} days");
    println!();

    println!(
        "{:>4}  {:<35} {:<22} {:<8} {:<12} {:>6}",
        "ID", "Title", "Pattern", "Diff", "Next", "Solved"
    );
    for problem in &problems {
        let next = match problem.review.due {
            None => "new".to_string(),
            Some(due) if due <= today => {
                let days = (today - due).num_days();
                if days == 0 {
                    "today".to_string()
                } else {
                    format!("{days}d overdue")
                }
            }
            Some(due) => format!("in {}d", (due - today).num_days()),
        };
        println!(
            "{:>4}  {:<35} {:<22} {:<8} {:<12} {:>6}",
            problem.id,
            truncate(&problem.title, 35),
            truncate(&problem.pattern, 22),
            problem.difficulty.as_str(),
            next,
            problem.review.times_solved
        );
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}
