// src/handlers/results.rs

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::{
    config::DEFAULT_ACCESS_CODE,
    error::AppError,
    models::{
        progress::ProgressSummary,
        test_result::{SubmitResultRequest, TestResultEntry},
        user::User,
    },
};

/// Answers the CORS preflight immediately.
///
/// No database work happens here; the allow-origin header is added by the
/// CORS layer like on every other response.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

/// Fallback for unsupported methods on the results route.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Method not allowed".to_string())
}

/// Records one completed simulator attempt.
///
/// * Resolves the user by username, creating the row on first contact.
/// * Inserts the result with a server-side completion timestamp.
/// * Folds the attempt into the per-user progress aggregate.
///
/// All three writes commit as a single transaction; on any failure the
/// transaction rolls back when it is dropped and nothing is persisted.
pub async fn submit_result(
    State(pool): State<PgPool>,
    Json(payload): Json<SubmitResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }

    let sequence_data = serde_json::to_string(&payload.sequence_data)?;

    let mut tx = pool.begin().await?;

    // 1. Find or create the user
    let existing = sqlx::query_as::<_, User>(
        "SELECT id, username, access_code FROM users WHERE username = $1",
    )
    .bind(&payload.username)
    .fetch_optional(&mut *tx)
    .await?;

    let user_id = match existing {
        Some(user) => user.id,
        None => sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, access_code) VALUES ($1, $2) RETURNING id",
        )
        .bind(&payload.username)
        .bind(DEFAULT_ACCESS_CODE)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // Postgres error code for unique violation is 23505: a concurrent
            // first submission won the creation race. Retryable by the caller.
            if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
                AppError::Conflict(format!(
                    "Username '{}' was created concurrently, retry the submission",
                    payload.username
                ))
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::from(e)
            }
        })?,
    };

    // 2. Record the attempt
    let result_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO test_results
            (user_id, test_type, score, passed, sequence_data, max_delay, completed_at)
        VALUES ($1, $2, $3, $4, $5, $6, now())
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(&payload.test_type)
    .bind(payload.score)
    .bind(payload.passed)
    .bind(&sequence_data)
    .bind(payload.max_delay)
    .fetch_one(&mut *tx)
    .await?;

    // 3. Fold into the progress aggregate. A single conditional upsert keyed
    //    on user_id uniqueness; concurrent submissions for the same user must
    //    never lose an increment.
    sqlx::query(
        r#"
        INSERT INTO user_progress (user_id, practice_completed, tests_completed, total_score)
        VALUES ($1, 1, 1, $2)
        ON CONFLICT (user_id) DO UPDATE SET
            practice_completed = user_progress.practice_completed + 1,
            tests_completed = user_progress.tests_completed + 1,
            total_score = user_progress.total_score + EXCLUDED.total_score,
            updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(payload.score)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to upsert user progress: {:?}", e);
        AppError::from(e)
    })?;

    tx.commit().await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "result_id": result_id,
        "user_id": user_id
    })))
}

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub username: Option<String>,
}

/// Returns a user's 10 most recent results plus their progress aggregate.
///
/// An unknown username is not an error: the client renders an empty history,
/// so this answers `{"results": [], "progress": null}` with 200.
pub async fn fetch_results(
    State(pool): State<PgPool>,
    Query(params): Query<ResultsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let username = params.username.unwrap_or_default();
    if username.trim().is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }

    let user_id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = $1")
        .bind(&username)
        .fetch_optional(&pool)
        .await?;

    let Some(user_id) = user_id else {
        return Ok(Json(serde_json::json!({
            "results": [],
            "progress": null
        })));
    };

    let results = sqlx::query_as::<_, TestResultEntry>(
        r#"
        SELECT id, test_type, score, passed, max_delay, completed_at
        FROM test_results
        WHERE user_id = $1
        ORDER BY completed_at DESC
        LIMIT 10
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch results for user {}: {:?}", user_id, e);
        AppError::from(e)
    })?;

    let progress = sqlx::query_as::<_, ProgressSummary>(
        r#"
        SELECT theory_completed, practice_completed, tests_completed, total_score
        FROM user_progress
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(&pool)
    .await?;

    Ok(Json(serde_json::json!({
        "results": results,
        "progress": progress
    })))
}
