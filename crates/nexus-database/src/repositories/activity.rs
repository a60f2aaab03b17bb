//! Student activity repository implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use nexus_core::error::{AppError, ErrorKind};
use nexus_core::result::AppResult;
use nexus_core::types::Email;
use nexus_entity::student::{DailyActivity, EnrollStudent, Student};

use super::{is_foreign_key_violation, is_numeric_overflow, storage_error};
use crate::traits::ActivityRepository;

/// PostgreSQL-backed activity repository.
#[derive(Debug, Clone)]
pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    /// Create a new activity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    async fn enroll(&self, data: EnrollStudent) -> AppResult<Student> {
        sqlx::query(
            "INSERT INTO students (email, name, group_id) VALUES ($1, $2, $3) \
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.group_id)
        .execute(&self.pool)
        .await
        .map_err(storage_error("Failed to enroll student"))?;

        self.find_student(&data.email)
            .await?
            .ok_or_else(|| AppError::storage_unavailable("Enrolled student vanished"))
    }

    async fn find_student(&self, email: &Email) -> AppResult<Option<Student>> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("Failed to find student"))
    }

    async fn add_minutes(
        &self,
        email: &Email,
        date: NaiveDate,
        minutes: i64,
    ) -> AppResult<Vec<DailyActivity>> {
        sqlx::query(
            "INSERT INTO daily_activity (student_email, activity_date, minutes_spent) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (student_email, activity_date) \
             DO UPDATE SET minutes_spent = daily_activity.minutes_spent + EXCLUDED.minutes_spent",
        )
        .bind(email)
        .bind(date)
        .bind(minutes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::not_found(format!("Student {email} not found"))
            } else if is_numeric_overflow(&e) {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Minutes for {email} on {date} exceed the maximum"),
                    e,
                )
            } else {
                storage_error("Failed to record activity")(e)
            }
        })?;

        self.history(email).await
    }

    async fn history(&self, email: &Email) -> AppResult<Vec<DailyActivity>> {
        sqlx::query_as::<_, DailyActivity>(
            "SELECT activity_date, minutes_spent FROM daily_activity \
             WHERE student_email = $1 ORDER BY seq ASC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to load activity history"))
    }

    async fn store_weekly_summary(&self, email: &Email, total: i64) -> AppResult<bool> {
        let result = sqlx::query("UPDATE students SET weekly_summary = $2 WHERE email = $1")
            .bind(email)
            .bind(total)
            .execute(&self.pool)
            .await
            .map_err(storage_error("Failed to store weekly summary"))?;
        Ok(result.rows_affected() > 0)
    }
}
