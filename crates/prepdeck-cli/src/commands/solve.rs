//! Review recording: open the problem, rate recall, persist the result.

use std::io::Write;

use chrono::Local;
use prepdeck_core::{rate, Config, Score, StudyDb};

pub fn run(id: i64, score: Option<u8>, no_open: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = StudyDb::open()?;
    let config = Config::load()?;
    let problem = db
        .get_problem(id)?
        .ok_or_else(|| format!("problem not found: {id}"))?;

    println!(
        "Solving: {} [{} | {}]",
        problem.title,
        problem.pattern,
        problem.difficulty.as_str()
    );

    if !no_open && config.open_browser {
        if let Some(url) = &problem.url {
            println!("Opening {url}");
            open::that(url)?;
        }
    }

    let value = match score {
        Some(value) => value,
        None => prompt_score()?,
    };
    let score = Score::new(value)?;

    let today = Local::now().date_naive();
    let next = rate(&problem.review, score, today)?;
    db.save_review_state(id, &next)?;

    println!();
    if score.is_lapse() {
        println!("The problem will reappear tomorrow for reinforcement.");
    } else {
        println!(
            "Problem logged. Next review in {} days.",
            next.interval_days
        );
    }
    if let Some(due) = next.due {
        println!("Next review: {due} (ease factor {:.2})", next.ease_factor);
    }
    Ok(())
}

fn prompt_score() -> Result<u8, Box<dyn std::error::Error>> {
    println!();
    println!("Rate how it went:");
    println!("  0 - Complete blackout (couldn't even start)");
    println!("  1 - Incorrect, remembered after seeing the solution");
    println!("  2 - Incorrect, but the solution seemed easy");
    println!("  3 - Correct with serious difficulty");
    println!("  4 - Correct after some hesitation");
    println!("  5 - Perfect, easy recall");

    loop {
        print!("score (0-5): ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            return Err("no score given".into());
        }
        match line.trim().parse::<u8>() {
            Ok(value) if value <= 5 => return Ok(value),
            _ => println!("enter a number between 0 and 5"),
        }
    }
}
