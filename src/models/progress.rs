// src/models/progress.rs

use serde::Serialize;
use sqlx::FromRow;

/// Aggregate counters from the 'user_progress' table, at most one row per
/// user. `theory_completed` is maintained by the lesson flow, not by result
/// submissions; it is carried here so the client sees the full picture.
#[derive(Debug, Serialize, FromRow)]
pub struct ProgressSummary {
    pub theory_completed: i64,
    pub practice_completed: i64,
    pub tests_completed: i64,
    pub total_score: i64,
}
