//! Bulk review-progress reset.

use std::io::Write;

use prepdeck_core::StudyDb;

pub fn run(list: Option<String>, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        let scope = list.as_deref().unwrap_or("ALL lists");
        print!("Reset review progress for {scope}? This clears all review history. [y/N] ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        if !matches!(line.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let db = StudyDb::open()?;
    let count = db.reset_progress(list.as_deref())?;
    println!("Reset review progress for {count} problems");
    Ok(())
}
