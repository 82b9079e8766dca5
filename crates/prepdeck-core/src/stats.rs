//! Study statistics over loaded problems.
//!
//! Pure aggregation; the schedule store holds no logic, so totals and
//! streaks are recomputed from the problem slice the caller loaded.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::problem::Problem;

/// Overall study totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StudyStats {
    pub total_problems: usize,
    /// Problems attempted at least once.
    pub problems_started: usize,
    /// Problems never attempted.
    pub new_problems: usize,
    /// Previously-reviewed problems whose due date has arrived.
    pub due_today: usize,
    /// Total recorded reviews across all problems.
    pub total_reviews: u64,
}

/// Compute overall totals as of `today`.
pub fn overview(problems: &[Problem], today: NaiveDate) -> StudyStats {
    let total_problems = problems.len();
    let problems_started = problems
        .iter()
        .filter(|p| p.review.last_reviewed.is_some())
        .count();
    let due_today = problems
        .iter()
        .filter(|p| p.review.due.is_some_and(|d| d <= today))
        .count();
    let total_reviews = problems
        .iter()
        .map(|p| p.review.times_solved as u64)
        .sum();

    StudyStats {
        total_problems,
        problems_started,
        new_problems: total_problems - problems_started,
        due_today,
        total_reviews,
    }
}

/// Current study streak: consecutive days with at least one review, ending
/// today or yesterday.
///
/// Derived from `last_reviewed` dates, so only the most recent review of
/// each problem contributes; with a handful of reviews per day this tracks
/// the real streak closely.
pub fn streak(problems: &[Problem], today: NaiveDate) -> u32 {
    let reviewed: HashSet<NaiveDate> = problems
        .iter()
        .filter_map(|p| p.review.last_reviewed)
        .collect();

    let yesterday = today - Days::new(1);
    let mut current = if reviewed.contains(&today) {
        today
    } else if reviewed.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut days = 0;
    while reviewed.contains(&current) {
        days += 1;
        match current.checked_sub_days(Days::new(1)) {
            Some(previous) => current = previous,
            None => break,
        }
    }
    days
}
