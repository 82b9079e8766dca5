//! SM-2 scheduling engine and due-item selection policy.
//!
//! Implements the SuperMemo 2 algorithm for calculating review intervals
//! from recall quality, and the ordering policy that picks the next due
//! problem. Both live here because they share the same state shape and the
//! same day-granularity due-date semantics.
//!
//! Quality ratings (0-5):
//! - 0: Complete blackout, no recall
//! - 1: Incorrect, but upon seeing the answer, remembered
//! - 2: Incorrect, but the answer seemed easy to recall
//! - 3: Correct response with serious difficulty
//! - 4: Correct response after hesitation
//! - 5: Perfect response with no hesitation
//!
//! Every function here is pure: no I/O, no internal state, new values
//! returned instead of mutation. The caller owns persistence.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::SrsError;
use crate::problem::{Filter, Problem, ReviewState, MIN_EASE_FACTOR};

/// A validated recall score on the 0-5 scale.
///
/// Construction is the only validation point: out-of-range input fails with
/// [`SrsError::InvalidScore`] before any state change is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score(u8);

impl Score {
    pub fn new(value: u8) -> Result<Self, SrsError> {
        if value > 5 {
            return Err(SrsError::InvalidScore { score: value });
        }
        Ok(Score(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// A score below 3 is a lapse: the interval and repetition count reset.
    pub fn is_lapse(self) -> bool {
        self.0 < 3
    }
}

/// Rate a problem's review state with a recall score.
///
/// Returns the successor state: new interval, ease factor, repetition count,
/// and due date measured from `today`. The input state is never mutated, so
/// the caller controls persistence atomically.
///
/// The ease factor is updated in both branches; a lapse penalizes ease even
/// though the interval resets to one day.
///
/// # Errors
/// [`SrsError::InvalidState`] if the input state violates an invariant.
pub fn rate(state: &ReviewState, score: Score, today: NaiveDate) -> Result<ReviewState, SrsError> {
    validate_state(state)?;

    // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at 1.3
    let q = score.value() as f64;
    let mut ease_factor = state.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
    if ease_factor < MIN_EASE_FACTOR {
        ease_factor = MIN_EASE_FACTOR;
    }

    let (repetitions, interval_days) = if score.is_lapse() {
        // Failed review: reset the streak, see it again tomorrow.
        (0, 1)
    } else {
        let repetitions = state.repetitions + 1;
        let interval_days = match repetitions {
            1 => 1,
            2 => 6,
            _ => (state.interval_days as f64 * ease_factor).round() as u32,
        };
        (repetitions, interval_days)
    };

    Ok(ReviewState {
        repetitions,
        ease_factor,
        interval_days,
        last_reviewed: Some(today),
        due: Some(today + Days::new(interval_days as u64)),
        times_solved: state.times_solved + 1,
    })
}

fn validate_state(state: &ReviewState) -> Result<(), SrsError> {
    if !state.ease_factor.is_finite() || state.ease_factor < MIN_EASE_FACTOR {
        return Err(SrsError::InvalidState {
            reason: format!(
                "ease factor {} is below the {MIN_EASE_FACTOR} floor",
                state.ease_factor
            ),
        });
    }
    if state.repetitions > 0 && state.interval_days == 0 {
        return Err(SrsError::InvalidState {
            reason: format!(
                "interval is 0 despite {} successful repetitions",
                state.repetitions
            ),
        });
    }
    Ok(())
}

/// All problems eligible for review, in selection order.
///
/// A problem is due if it has no due date (never scheduled) or its due date
/// has arrived. Never-reviewed problems sort first in insertion order, so
/// new material surfaces before reinforcing old material; previously-reviewed
/// problems follow, most overdue first, ids breaking ties.
pub fn due_problems<'a>(
    problems: &'a [Problem],
    filter: &Filter,
    today: NaiveDate,
) -> Vec<&'a Problem> {
    let mut due: Vec<&Problem> = problems
        .iter()
        .filter(|p| filter.matches(p))
        .filter(|p| p.review.due.map_or(true, |d| d <= today))
        .collect();
    due.sort_by_key(|p| selection_key(p));
    due
}

/// Pick the next problem to review, or `None` when nothing is due.
pub fn select_next<'a>(
    problems: &'a [Problem],
    filter: &Filter,
    today: NaiveDate,
) -> Option<&'a Problem> {
    due_problems(problems, filter, today).into_iter().next()
}

fn selection_key(problem: &Problem) -> (u8, NaiveDate, i64) {
    match problem.review.last_reviewed {
        None => (0, NaiveDate::MIN, problem.id),
        Some(_) => (1, problem.review.due.unwrap_or(NaiveDate::MIN), problem.id),
    }
}

/// Per-pattern progress counts for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternProgress {
    pub pattern: String,
    /// Problems attempted at least once (`last_reviewed` present). This is
    /// a "seen" progress-bar semantics, independent of current mastery.
    pub solved: usize,
    pub total: usize,
    /// Previously-reviewed problems whose due date has arrived.
    pub due: usize,
}

impl PatternProgress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.solved as f64 / self.total as f64 * 100.0
        }
    }
}

/// Aggregate progress grouped by pattern.
///
/// Patterns appear in first-seen order of the input, not alphabetically,
/// preserving a curated curriculum ordering.
pub fn progress_by_pattern(problems: &[Problem], today: NaiveDate) -> Vec<PatternProgress> {
    let mut progress: Vec<PatternProgress> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for problem in problems {
        let i = *index.entry(problem.pattern.clone()).or_insert_with(|| {
            progress.push(PatternProgress {
                pattern: problem.pattern.clone(),
                solved: 0,
                total: 0,
                due: 0,
            });
            progress.len() - 1
        });

        let entry = &mut progress[i];
        entry.total += 1;
        if problem.review.last_reviewed.is_some() {
            entry.solved += 1;
        }
        if problem.review.due.is_some_and(|d| d <= today) {
            entry.due += 1;
        }
    }

    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Difficulty;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn make_problem(id: i64, pattern: &str) -> Problem {
        Problem {
            id,
            title: format!("Problem {id}"),
            url: None,
            pattern: pattern.to_string(),
            list: "Blind 75".to_string(),
            difficulty: Difficulty::Medium,
            review: ReviewState::default(),
        }
    }

    fn score(value: u8) -> Score {
        Score::new(value).unwrap()
    }

    #[test]
    fn score_out_of_range_is_rejected() {
        assert!(matches!(
            Score::new(6),
            Err(SrsError::InvalidScore { score: 6 })
        ));
        assert!(Score::new(0).is_ok());
        assert!(Score::new(5).is_ok());
    }

    #[test]
    fn first_review_of_fresh_item() {
        let today = d(2024, 3, 1);
        let next = rate(&ReviewState::default(), score(5), today).unwrap();

        assert_eq!(next.repetitions, 1);
        assert_eq!(next.interval_days, 1);
        assert!((next.ease_factor - 2.6).abs() < 1e-9);
        assert_eq!(next.last_reviewed, Some(today));
        assert_eq!(next.due, Some(d(2024, 3, 2)));
        assert_eq!(next.times_solved, 1);
    }

    #[test]
    fn perfect_streak_follows_1_6_then_ease_multiples() {
        let day0 = d(2024, 3, 1);
        let first = rate(&ReviewState::default(), score(5), day0).unwrap();

        let day1 = d(2024, 3, 2);
        let second = rate(&first, score(5), day1).unwrap();
        assert_eq!(second.repetitions, 2);
        assert_eq!(second.interval_days, 6);
        assert_eq!(second.due, Some(d(2024, 3, 8)));
        assert!((second.ease_factor - 2.7).abs() < 1e-9);

        let day7 = d(2024, 3, 8);
        let third = rate(&second, score(5), day7).unwrap();
        assert_eq!(third.repetitions, 3);
        // 6 * 2.8 = 16.8, rounded
        assert_eq!(third.interval_days, 17);
        assert_eq!(third.due, Some(d(2024, 3, 25)));
    }

    #[test]
    fn lapse_resets_repetitions_but_still_penalizes_ease() {
        let state = ReviewState {
            repetitions: 3,
            ease_factor: 2.8,
            interval_days: 17,
            last_reviewed: Some(d(2024, 3, 8)),
            due: Some(d(2024, 3, 25)),
            times_solved: 3,
        };

        let next = rate(&state, score(1), d(2024, 3, 25)).unwrap();
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.interval_days, 1);
        assert!(next.ease_factor < state.ease_factor);
        assert!(next.ease_factor >= MIN_EASE_FACTOR);
        assert_eq!(next.due, Some(d(2024, 3, 26)));
        assert_eq!(next.times_solved, 4);
    }

    #[test]
    fn ease_factor_is_clamped_at_floor() {
        let state = ReviewState {
            ease_factor: MIN_EASE_FACTOR,
            ..ReviewState::default()
        };
        let next = rate(&state, score(0), d(2024, 3, 1)).unwrap();
        assert_eq!(next.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn interval_is_non_decreasing_across_a_success_streak() {
        let mut state = ReviewState::default();
        let mut today = d(2024, 1, 1);
        let mut previous_interval = 0;

        for _ in 0..10 {
            state = rate(&state, score(5), today).unwrap();
            assert!(state.interval_days >= previous_interval);
            previous_interval = state.interval_days;
            today = state.due.unwrap();
        }
    }

    #[test]
    fn corrupt_state_is_rejected_not_repaired() {
        let below_floor = ReviewState {
            ease_factor: 1.1,
            ..ReviewState::default()
        };
        assert!(matches!(
            rate(&below_floor, score(4), d(2024, 3, 1)),
            Err(SrsError::InvalidState { .. })
        ));

        let zero_interval_with_reps = ReviewState {
            repetitions: 2,
            interval_days: 0,
            ..ReviewState::default()
        };
        assert!(matches!(
            rate(&zero_interval_with_reps, score(4), d(2024, 3, 1)),
            Err(SrsError::InvalidState { .. })
        ));
    }

    #[test]
    fn never_reviewed_item_beats_overdue_item() {
        let today = d(2024, 3, 10);
        let fresh = make_problem(1, "Arrays & Hashing");
        let mut overdue = make_problem(2, "Arrays & Hashing");
        overdue.review.repetitions = 1;
        overdue.review.interval_days = 1;
        overdue.review.last_reviewed = Some(d(2024, 3, 8));
        overdue.review.due = Some(d(2024, 3, 9));

        let problems = vec![overdue, fresh];
        let next = select_next(&problems, &Filter::default(), today).unwrap();
        assert_eq!(next.id, 1);
    }

    #[test]
    fn nothing_due_returns_none() {
        let today = d(2024, 3, 10);
        let mut a = make_problem(1, "Stack");
        a.review.last_reviewed = Some(d(2024, 3, 9));
        a.review.due = Some(d(2024, 3, 15));
        let mut b = make_problem(2, "Stack");
        b.review.last_reviewed = Some(d(2024, 3, 10));
        b.review.due = Some(d(2024, 3, 11));

        assert!(select_next(&[a, b], &Filter::default(), today).is_none());
    }

    #[test]
    fn reviewed_items_order_by_due_date_then_id() {
        let today = d(2024, 3, 10);
        let mut mildly_overdue = make_problem(1, "Trees");
        mildly_overdue.review.last_reviewed = Some(d(2024, 3, 8));
        mildly_overdue.review.due = Some(d(2024, 3, 9));
        let mut very_overdue = make_problem(2, "Trees");
        very_overdue.review.last_reviewed = Some(d(2024, 3, 1));
        very_overdue.review.due = Some(d(2024, 3, 2));
        let mut tied = make_problem(3, "Trees");
        tied.review.last_reviewed = Some(d(2024, 3, 1));
        tied.review.due = Some(d(2024, 3, 2));

        let problems = vec![mildly_overdue, tied, very_overdue];
        let due: Vec<i64> = due_problems(&problems, &Filter::default(), today)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(due, vec![2, 3, 1]);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let problems = vec![
            make_problem(1, "Two Pointers"),
            make_problem(2, "Sliding Window"),
        ];

        let filter = Filter {
            pattern: Some("pointers".to_string()),
            list: None,
        };
        let next = select_next(&problems, &filter, d(2024, 3, 1)).unwrap();
        assert_eq!(next.id, 1);

        let filter = Filter {
            pattern: None,
            list: Some("BLIND".to_string()),
        };
        assert_eq!(due_problems(&problems, &filter, d(2024, 3, 1)).len(), 2);

        let filter = Filter {
            pattern: Some("graphs".to_string()),
            list: None,
        };
        assert!(select_next(&problems, &filter, d(2024, 3, 1)).is_none());
    }

    #[test]
    fn progress_groups_by_first_seen_pattern_order() {
        let today = d(2024, 3, 10);
        let mut problems = vec![
            make_problem(1, "Intervals"),
            make_problem(2, "Intervals"),
            make_problem(3, "Greedy"),
            make_problem(4, "Intervals"),
            make_problem(5, "Greedy"),
            make_problem(6, "Greedy"),
            make_problem(7, "Greedy"),
            make_problem(8, "Greedy"),
        ];
        // Two Intervals problems attempted, none of Greedy.
        for problem in problems.iter_mut().take(2) {
            problem.review.last_reviewed = Some(d(2024, 3, 9));
            problem.review.due = Some(d(2024, 3, 10));
        }
        problems.swap(2, 3); // interleave; first-seen order must hold

        let progress = progress_by_pattern(&problems, today);
        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].pattern, "Intervals");
        assert_eq!(progress[0].solved, 2);
        assert_eq!(progress[0].total, 3);
        assert_eq!(progress[0].due, 2);
        assert_eq!(progress[1].pattern, "Greedy");
        assert_eq!(progress[1].solved, 0);
        assert_eq!(progress[1].total, 5);
        assert!((progress[1].percent() - 0.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn ease_floor_holds_for_all_inputs(
            value in 0u8..=5,
            ease in 1.3f64..4.0,
            repetitions in 0u32..10,
            interval in 1u32..400,
        ) {
            let state = ReviewState {
                repetitions,
                ease_factor: ease,
                interval_days: interval,
                ..ReviewState::default()
            };
            let next = rate(&state, score(value), d(2024, 3, 1)).unwrap();
            prop_assert!(next.ease_factor >= MIN_EASE_FACTOR);
        }

        #[test]
        fn due_date_equals_review_day_plus_interval(
            value in 0u8..=5,
            repetitions in 0u32..10,
            interval in 1u32..400,
        ) {
            let state = ReviewState {
                repetitions,
                interval_days: interval,
                ..ReviewState::default()
            };
            let today = d(2024, 3, 1);
            let next = rate(&state, score(value), today).unwrap();
            let expected = today + Days::new(next.interval_days as u64);
            prop_assert_eq!(next.due, Some(expected));
            prop_assert_eq!(next.last_reviewed, Some(today));
        }
    }
}
