// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'users' table in the database.
///
/// Rows are created lazily the first time a submission names an unseen
/// username, and are never mutated or deleted by this service.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique username. Acts as the request-time lookup key; all stored
    /// references use `id`.
    pub username: String,

    /// Training access code.
    /// Skipped during serialization to prevent leaking it to clients.
    #[serde(skip)]
    pub access_code: String,
}
