// src/models/test_result.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::config::DEFAULT_TEST_TYPE;

/// DTO for submitting a completed simulator attempt.
///
/// Everything except `username` is optional and falls back to the same
/// defaults the front-end relies on. `sequence_data` is free-form JSON
/// (the simulator sends `{"delays": [..]}`) and is stored as text.
#[derive(Debug, Deserialize)]
pub struct SubmitResultRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default = "default_test_type")]
    pub test_type: String,

    #[serde(default)]
    pub score: i64,

    #[serde(default)]
    pub passed: bool,

    #[serde(default = "default_sequence_data")]
    pub sequence_data: serde_json::Value,

    /// Longest delay in the attempt, milliseconds.
    #[serde(default)]
    pub max_delay: f64,
}

fn default_test_type() -> String {
    DEFAULT_TEST_TYPE.to_string()
}

fn default_sequence_data() -> serde_json::Value {
    serde_json::json!({})
}

/// One row of a user's result history, as returned by the fetch endpoint.
/// Projection of 'test_results'; the stored `sequence_data` blob stays
/// server-side.
#[derive(Debug, Serialize, FromRow)]
pub struct TestResultEntry {
    pub id: i64,
    pub test_type: String,
    pub score: i64,
    pub passed: bool,
    pub max_delay: f64,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}
