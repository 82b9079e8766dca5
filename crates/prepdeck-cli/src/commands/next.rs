//! Next-due-problem command.

use chrono::Local;
use prepdeck_core::{select_next, Config, Filter, StudyDb};

pub fn run(pattern: Option<String>, list: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let db = StudyDb::open()?;
    let config = Config::load()?;
    let filter = super::filter_from_args(pattern, list, &config);
    let today = Local::now().date_naive();

    let problems = db.list_problems(&Filter::default())?;
    let Some(problem) = select_next(&problems, &filter, today) else {
        match &filter.list {
            Some(list) => println!("All caught up! No problems due for review in '{list}'."),
            None => println!("All caught up! No problems due for review."),
        }
        return Ok(());
    };

    let status = match problem.review.due {
        None => "NEW - never attempted".to_string(),
        Some(due) if due <= today => {
            let days_overdue = (today - due).num_days();
            if days_overdue == 0 {
                "DUE TODAY".to_string()
            } else {
                format!("OVERDUE by {days_overdue} days")
            }
        }
        Some(due) => format!("due on {due}"),
    };

    println!("Next problem:");
    println!("  ID:           {}", problem.id);
    println!("  Title:        {}", problem.title);
    println!("  Pattern:      {}", problem.pattern);
    println!("  List:         {}", problem.list);
    println!("  Difficulty:   {}", problem.difficulty.as_str());
    println!("  Status:       {status}");
    println!("  Times solved: {}", problem.review.times_solved);
    if let Some(url) = &problem.url {
        println!("  URL:          {url}");
    }
    println!();
    println!("Run 'prepdeck solve {}' to attempt this problem", problem.id);
    Ok(())
}
