//! # Prepdeck Core Library
//!
//! This library provides the core business logic for prepdeck, a personal
//! spaced-repetition scheduler for coding problems. It implements a CLI-first
//! philosophy where all operations are available via a standalone CLI binary,
//! with the binary being a thin glue layer over the same core library.
//!
//! ## Architecture
//!
//! - **SRS Engine**: Pure SM-2 interval/ease computation plus the due-item
//!   selection policy. No I/O, no internal state; callers read a problem's
//!   review state from storage, rate it, and persist the returned state.
//! - **Storage**: SQLite-based problem storage and TOML-based configuration
//! - **Stats**: Pure aggregation over loaded problems (progress, streaks)
//!
//! ## Key Components
//!
//! - [`srs::rate`]: SM-2 rating operation
//! - [`srs::select_next`]: Due-item selection policy
//! - [`StudyDb`]: Problem and review-state persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod problem;
pub mod seed;
pub mod srs;
pub mod stats;
pub mod storage;

pub use error::{ConfigError, CoreError, DatabaseError, SrsError};
pub use problem::{Difficulty, Filter, Problem, ReviewState};
pub use srs::{due_problems, progress_by_pattern, rate, select_next, PatternProgress, Score};
pub use stats::{overview, streak, StudyStats};
pub use storage::{Config, StudyDb};
