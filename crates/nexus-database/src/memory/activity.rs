//! In-memory student activity repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use nexus_core::error::AppError;
use nexus_core::result::AppResult;
use nexus_core::types::Email;
use nexus_entity::student::{DailyActivity, EnrollStudent, Student};

use super::{MemoryDatabase, StudentRecord};
use crate::traits::ActivityRepository;

/// Activity repository over [`MemoryDatabase`].
#[derive(Debug, Clone)]
pub struct MemoryActivityRepository {
    db: Arc<MemoryDatabase>,
}

impl MemoryActivityRepository {
    /// Create a repository over the shared tables.
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityRepository for MemoryActivityRepository {
    async fn enroll(&self, data: EnrollStudent) -> AppResult<Student> {
        let record = self
            .db
            .students
            .entry(data.email.clone())
            .or_insert_with(|| StudentRecord {
                student: Student {
                    email: data.email,
                    name: data.name,
                    group_id: data.group_id,
                    weekly_summary: 0,
                    created_at: Utc::now(),
                },
                daily_activity: Vec::new(),
            });
        Ok(record.student.clone())
    }

    async fn find_student(&self, email: &Email) -> AppResult<Option<Student>> {
        Ok(self.db.students.get(email).map(|r| r.student.clone()))
    }

    async fn add_minutes(
        &self,
        email: &Email,
        date: NaiveDate,
        minutes: i64,
    ) -> AppResult<Vec<DailyActivity>> {
        let mut record = self
            .db
            .students
            .get_mut(email)
            .ok_or_else(|| AppError::not_found(format!("Student {email} not found")))?;

        match record.daily_activity.iter_mut().find(|e| e.date == date) {
            Some(entry) => {
                entry.minutes_spent = entry.minutes_spent.checked_add(minutes).ok_or_else(|| {
                    AppError::validation(format!("Minutes for {email} on {date} exceed the maximum"))
                })?;
            }
            None => record.daily_activity.push(DailyActivity {
                date,
                minutes_spent: minutes,
            }),
        }
        Ok(record.daily_activity.clone())
    }

    async fn history(&self, email: &Email) -> AppResult<Vec<DailyActivity>> {
        Ok(self
            .db
            .students
            .get(email)
            .map(|r| r.daily_activity.clone())
            .unwrap_or_default())
    }

    async fn store_weekly_summary(&self, email: &Email, total: i64) -> AppResult<bool> {
        Ok(self
            .db
            .students
            .get_mut(email)
            .map(|mut r| r.student.weekly_summary = total)
            .is_some())
    }
}
