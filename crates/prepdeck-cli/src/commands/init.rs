//! Database initialization and seeding.

use std::path::PathBuf;

use prepdeck_core::seed::{self, DEFAULT_LIST};
use prepdeck_core::StudyDb;

/// Bundled Blind 75 seed data.
const BLIND75_JSON: &str = include_str!("../../data/blind75.json");

pub fn run(file: Option<PathBuf>, list: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let problems = match &file {
        Some(path) => seed::load_file(path)?,
        None => seed::parse(BLIND75_JSON)?,
    };
    let list = list.unwrap_or_else(|| DEFAULT_LIST.to_string());

    let db = StudyDb::open()?;
    let count = db.seed(&problems, &list)?;
    println!("Seeded {count} problems into list '{list}'");

    // Per-pattern summary in curriculum order.
    let mut patterns: Vec<(String, usize)> = Vec::new();
    for problem in &problems {
        match patterns.iter_mut().find(|(p, _)| p == &problem.pattern) {
            Some((_, n)) => *n += 1,
            None => patterns.push((problem.pattern.clone(), 1)),
        }
    }
    println!();
    println!("Problems by pattern:");
    for (pattern, n) in patterns {
        println!("  {pattern}: {n}");
    }
    println!();
    println!("Run 'prepdeck dashboard' to see your progress");
    println!("Run 'prepdeck next' to get the next problem");
    Ok(())
}
