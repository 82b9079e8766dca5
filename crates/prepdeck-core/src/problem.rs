//! Problem and review-state types.
//!
//! A [`Problem`] is one learning item: a coding problem with a pattern label
//! and a source-list label for grouping, plus the embedded [`ReviewState`]
//! the SM-2 engine operates on. Pattern and list are free-text grouping keys,
//! not foreign-keyed entities; matching is substring equality only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ease factor assigned to brand-new items.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Minimum ease factor allowed. Enforced after every update.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Problem difficulty label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Per-problem spaced-repetition state.
///
/// Dates carry day resolution; the item domain is reviewed at most a few
/// times a day, so sub-day scheduling buys nothing.
///
/// Invariants:
/// - `ease_factor >= 1.3` at all times
/// - `interval_days >= 1` once `repetitions > 0`; 0 only for brand-new or
///   just-reset state
/// - `due == last_reviewed + interval_days`, recomputed on every review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Consecutive successful (score >= 3) reviews since the last lapse.
    pub repetitions: u32,
    /// Multiplier controlling interval growth; higher = easier item.
    pub ease_factor: f64,
    /// Days until the next due date, measured from the last review.
    pub interval_days: u32,
    /// Day of the most recent review; `None` if never reviewed.
    pub last_reviewed: Option<NaiveDate>,
    /// Next scheduled review day; `None` means due immediately.
    pub due: Option<NaiveDate>,
    /// Total recorded reviews, lapses included.
    pub times_solved: u32,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            repetitions: 0,
            ease_factor: INITIAL_EASE_FACTOR,
            interval_days: 0,
            last_reviewed: None,
            due: None,
            times_solved: 0,
        }
    }
}

/// One learning item tracked by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Store-assigned id; ascending ids follow insertion order.
    pub id: i64,
    pub title: String,
    pub url: Option<String>,
    /// Algorithm pattern label, e.g. "Two Pointers".
    pub pattern: String,
    /// Source list label, e.g. "Blind 75".
    pub list: String,
    pub difficulty: Difficulty,
    pub review: ReviewState,
}

/// Pattern/list filter applied before selection and listing.
///
/// Matching is case-insensitive substring on the respective label, so
/// `--pattern pointers` finds "Two Pointers".
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub pattern: Option<String>,
    pub list: Option<String>,
}

impl Filter {
    pub fn matches(&self, problem: &Problem) -> bool {
        fn contains(label: &str, needle: &str) -> bool {
            label.to_lowercase().contains(&needle.to_lowercase())
        }

        self.pattern
            .as_deref()
            .map_or(true, |p| contains(&problem.pattern, p))
            && self
                .list
                .as_deref()
                .map_or(true, |l| contains(&problem.list, l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_review_state() {
        let state = ReviewState::default();
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.ease_factor, INITIAL_EASE_FACTOR);
        assert_eq!(state.interval_days, 0);
        assert!(state.last_reviewed.is_none());
        assert!(state.due.is_none());
        assert_eq!(state.times_solved, 0);
    }

    #[test]
    fn difficulty_round_trip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(d.as_str().parse::<Difficulty>().unwrap(), d);
        }
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
