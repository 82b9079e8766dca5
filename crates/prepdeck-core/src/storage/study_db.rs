//! SQLite-backed schedule store for problems and review state.
//!
//! The store is a leaf component: it persists and retrieves problems keyed
//! by id and carries no scheduling logic. Dates are stored as ISO-8601 day
//! strings; the ease factor is a REAL column, so review state round-trips
//! losslessly at the resolution the engine uses.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, migrations};
use crate::error::{CoreError, DatabaseError};
use crate::problem::{Difficulty, Filter, Problem, ReviewState};
use crate::seed::SeedProblem;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse difficulty from database string
fn parse_difficulty(difficulty_str: &str) -> Difficulty {
    difficulty_str.parse().unwrap_or(Difficulty::Medium)
}

/// Parse an optional day-resolution date column
fn parse_day(day_str: Option<String>) -> Option<NaiveDate> {
    day_str.and_then(|s| NaiveDate::parse_from_str(&s, DAY_FORMAT).ok())
}

/// Format an optional date for database storage
fn format_day(day: Option<NaiveDate>) -> Option<String> {
    day.map(|d| d.format(DAY_FORMAT).to_string())
}

/// Build a Problem from a database row
fn row_to_problem(row: &rusqlite::Row) -> Result<Problem, rusqlite::Error> {
    let difficulty_str: String = row.get(5)?;
    let last_reviewed: Option<String> = row.get(9)?;
    let due: Option<String> = row.get(10)?;

    Ok(Problem {
        id: row.get(0)?,
        title: row.get(1)?,
        url: row.get(2)?,
        pattern: row.get(3)?,
        list: row.get(4)?,
        difficulty: parse_difficulty(&difficulty_str),
        review: ReviewState {
            repetitions: row.get(6)?,
            ease_factor: row.get(7)?,
            interval_days: row.get(8)?,
            last_reviewed: parse_day(last_reviewed),
            due: parse_day(due),
            times_solved: row.get(11)?,
        },
    })
}

const PROBLEM_COLUMNS: &str = "id, title, url, pattern, list, difficulty,
            repetitions, ease_factor, interval_days, last_reviewed, due, times_solved";

/// SQLite database for problem storage.
///
/// Stores problems and their review state.
pub struct StudyDb {
    conn: Connection,
}

impl StudyDb {
    /// Open the study database at `~/.config/prepdeck/study.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("study.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the study database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        // Base (v1) schema; later columns are added by versioned migrations.
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS problems (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                title         TEXT NOT NULL,
                url           TEXT,
                pattern       TEXT NOT NULL DEFAULT 'General',
                list          TEXT NOT NULL DEFAULT 'Blind 75',
                difficulty    TEXT NOT NULL DEFAULT 'Medium',
                repetitions   INTEGER NOT NULL DEFAULT 0,
                ease_factor   REAL NOT NULL DEFAULT 2.5,
                interval_days INTEGER NOT NULL DEFAULT 0,
                last_reviewed TEXT,
                due           TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_problems_list ON problems(list);
            CREATE INDEX IF NOT EXISTS idx_problems_due ON problems(due);",
        )?;

        migrations::migrate(&self.conn)?;

        Ok(())
    }

    /// Insert a new problem with default review state.
    ///
    /// Returns the store-assigned id.
    pub fn insert_problem(
        &self,
        problem: &SeedProblem,
        list: &str,
    ) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO problems (title, url, pattern, list, difficulty)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                problem.title,
                problem.url,
                problem.pattern,
                list,
                problem.difficulty.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a problem by id.
    pub fn get_problem(&self, id: i64) -> Result<Option<Problem>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROBLEM_COLUMNS} FROM problems WHERE id = ?1"
        ))?;
        let problem = stmt
            .query_row(params![id], row_to_problem)
            .optional()?;
        Ok(problem)
    }

    /// List problems in insertion order, applying the given filter.
    ///
    /// Filtering happens on the loaded rows via [`Filter::matches`], so the
    /// store and the selection policy share one matching rule.
    pub fn list_problems(&self, filter: &Filter) -> Result<Vec<Problem>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROBLEM_COLUMNS} FROM problems ORDER BY id ASC"
        ))?;
        let problems = stmt
            .query_map([], row_to_problem)?
            .collect::<Result<Vec<Problem>, _>>()?;
        Ok(problems
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect())
    }

    /// Persist a problem's review state after rating.
    ///
    /// # Errors
    /// [`DatabaseError::ProblemNotFound`] if no row has the given id.
    pub fn save_review_state(&self, id: i64, review: &ReviewState) -> Result<(), DatabaseError> {
        let updated = self.conn.execute(
            "UPDATE problems
             SET repetitions = ?1, ease_factor = ?2, interval_days = ?3,
                 last_reviewed = ?4, due = ?5, times_solved = ?6
             WHERE id = ?7",
            params![
                review.repetitions,
                review.ease_factor,
                review.interval_days,
                format_day(review.last_reviewed),
                format_day(review.due),
                review.times_solved,
                id,
            ],
        )?;
        if updated == 0 {
            return Err(DatabaseError::ProblemNotFound(id));
        }
        Ok(())
    }

    /// Seed a list with problems, replacing that list's existing rows only.
    ///
    /// Returns the number of problems inserted.
    pub fn seed(&self, problems: &[SeedProblem], list: &str) -> Result<usize, DatabaseError> {
        self.conn.execute_batch("BEGIN IMMEDIATE TRANSACTION;")?;
        let result: Result<(), rusqlite::Error> = (|| {
            self.conn
                .execute("DELETE FROM problems WHERE list = ?1", params![list])?;
            for problem in problems {
                self.conn.execute(
                    "INSERT INTO problems (title, url, pattern, list, difficulty)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        problem.title,
                        problem.url,
                        problem.pattern,
                        list,
                        problem.difficulty.as_str(),
                    ],
                )?;
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                self.conn.execute_batch("COMMIT;")?;
                Ok(problems.len())
            }
            Err(err) => {
                let _ = self.conn.execute_batch("ROLLBACK;");
                Err(err.into())
            }
        }
    }

    /// Reset review state to defaults, keeping the problems themselves.
    ///
    /// Limited to one list when `list` is given. Returns the number of
    /// problems reset.
    pub fn reset_progress(&self, list: Option<&str>) -> Result<usize, DatabaseError> {
        let reset = match list {
            Some(list) => self.conn.execute(
                "UPDATE problems
                 SET repetitions = 0, ease_factor = 2.5, interval_days = 0,
                     last_reviewed = NULL, due = NULL, times_solved = 0
                 WHERE list = ?1",
                params![list],
            )?,
            None => self.conn.execute(
                "UPDATE problems
                 SET repetitions = 0, ease_factor = 2.5, interval_days = 0,
                     last_reviewed = NULL, due = NULL, times_solved = 0",
                [],
            )?,
        };
        Ok(reset)
    }

    /// All distinct list labels, sorted.
    pub fn lists(&self) -> Result<Vec<String>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT list FROM problems ORDER BY list ASC")?;
        let lists = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(lists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn seed_problem(title: &str, pattern: &str) -> SeedProblem {
        SeedProblem {
            title: title.to_string(),
            url: Some(format!(
                "https://leetcode.com/problems/{}/",
                title.to_lowercase().replace(' ', "-")
            )),
            pattern: pattern.to_string(),
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn insert_and_get_problem() {
        let db = StudyDb::open_memory().unwrap();
        let id = db
            .insert_problem(&seed_problem("Two Sum", "Arrays & Hashing"), "Blind 75")
            .unwrap();

        let problem = db.get_problem(id).unwrap().unwrap();
        assert_eq!(problem.title, "Two Sum");
        assert_eq!(problem.pattern, "Arrays & Hashing");
        assert_eq!(problem.list, "Blind 75");
        assert_eq!(problem.difficulty, Difficulty::Easy);
        assert_eq!(problem.review, ReviewState::default());

        assert!(db.get_problem(id + 1).unwrap().is_none());
    }

    #[test]
    fn list_problems_orders_by_id_and_filters() {
        let db = StudyDb::open_memory().unwrap();
        db.insert_problem(&seed_problem("Two Sum", "Arrays & Hashing"), "Blind 75")
            .unwrap();
        db.insert_problem(&seed_problem("Min Stack", "Stack"), "Blind 75")
            .unwrap();
        db.insert_problem(&seed_problem("Coin Change", "Dynamic Programming"), "NeetCode 150")
            .unwrap();

        let all = db.list_problems(&Filter::default()).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let stack_only = db
            .list_problems(&Filter {
                pattern: Some("stack".to_string()),
                list: None,
            })
            .unwrap();
        assert_eq!(stack_only.len(), 1);
        assert_eq!(stack_only[0].title, "Min Stack");

        let neetcode = db
            .list_problems(&Filter {
                pattern: None,
                list: Some("neetcode".to_string()),
            })
            .unwrap();
        assert_eq!(neetcode.len(), 1);
    }

    #[test]
    fn review_state_round_trips_at_day_resolution() {
        let db = StudyDb::open_memory().unwrap();
        let id = db
            .insert_problem(&seed_problem("Two Sum", "Arrays & Hashing"), "Blind 75")
            .unwrap();

        let review = ReviewState {
            repetitions: 3,
            ease_factor: 2.36,
            interval_days: 17,
            last_reviewed: Some(d(2024, 3, 8)),
            due: Some(d(2024, 3, 8) + Days::new(17)),
            times_solved: 5,
        };
        db.save_review_state(id, &review).unwrap();

        let reloaded = db.get_problem(id).unwrap().unwrap();
        assert_eq!(reloaded.review, review);
    }

    #[test]
    fn saving_state_for_unknown_problem_fails() {
        let db = StudyDb::open_memory().unwrap();
        let err = db.save_review_state(42, &ReviewState::default());
        assert!(matches!(err, Err(DatabaseError::ProblemNotFound(42))));
    }

    #[test]
    fn seed_replaces_only_its_own_list() {
        let db = StudyDb::open_memory().unwrap();
        db.insert_problem(&seed_problem("Custom Drill", "Graphs"), "Custom")
            .unwrap();

        let count = db
            .seed(
                &[
                    seed_problem("Two Sum", "Arrays & Hashing"),
                    seed_problem("Min Stack", "Stack"),
                ],
                "Blind 75",
            )
            .unwrap();
        assert_eq!(count, 2);

        // Re-seeding the same list replaces it; "Custom" is untouched.
        db.seed(&[seed_problem("Valid Anagram", "Arrays & Hashing")], "Blind 75")
            .unwrap();

        let all = db.list_problems(&Filter::default()).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|p| p.list == "Custom"));
        assert!(all.iter().any(|p| p.title == "Valid Anagram"));
        assert!(!all.iter().any(|p| p.title == "Two Sum"));
    }

    #[test]
    fn reset_clears_history_but_keeps_problems() {
        let db = StudyDb::open_memory().unwrap();
        let blind = db
            .insert_problem(&seed_problem("Two Sum", "Arrays & Hashing"), "Blind 75")
            .unwrap();
        let custom = db
            .insert_problem(&seed_problem("Custom Drill", "Graphs"), "Custom")
            .unwrap();

        let review = ReviewState {
            repetitions: 2,
            ease_factor: 2.7,
            interval_days: 6,
            last_reviewed: Some(d(2024, 3, 8)),
            due: Some(d(2024, 3, 14)),
            times_solved: 2,
        };
        db.save_review_state(blind, &review).unwrap();
        db.save_review_state(custom, &review).unwrap();

        let reset = db.reset_progress(Some("Blind 75")).unwrap();
        assert_eq!(reset, 1);
        assert_eq!(
            db.get_problem(blind).unwrap().unwrap().review,
            ReviewState::default()
        );
        assert_eq!(db.get_problem(custom).unwrap().unwrap().review, review);

        let reset_all = db.reset_progress(None).unwrap();
        assert_eq!(reset_all, 2);
        assert_eq!(
            db.get_problem(custom).unwrap().unwrap().review,
            ReviewState::default()
        );
    }

    #[test]
    fn lists_are_distinct_and_sorted() {
        let db = StudyDb::open_memory().unwrap();
        db.insert_problem(&seed_problem("A", "Stack"), "NeetCode 150")
            .unwrap();
        db.insert_problem(&seed_problem("B", "Stack"), "Blind 75")
            .unwrap();
        db.insert_problem(&seed_problem("C", "Stack"), "Blind 75")
            .unwrap();

        assert_eq!(db.lists().unwrap(), vec!["Blind 75", "NeetCode 150"]);
    }
}
