//! Per-student daily minutes and the trailing seven-day sum.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use nexus_core::error::AppError;
use nexus_core::result::AppResult;
use nexus_core::types::{Email, GroupId};
use nexus_database::traits::ActivityRepository;
use nexus_entity::student::{
    DailyActivity, EnrollStudent, Student, StudentActivity, SummaryWindow, WeeklySummary,
};

use crate::deadline::Deadline;

/// Records activity minutes and computes weekly summaries.
#[derive(Debug, Clone)]
pub struct ActivityService {
    repo: Arc<dyn ActivityRepository>,
    deadline: Deadline,
}

/// The server's local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl ActivityService {
    /// Creates a new activity service.
    pub fn new(repo: Arc<dyn ActivityRepository>, deadline: Deadline) -> Self {
        Self { repo, deadline }
    }

    /// Creates the activity record of a student if it does not exist yet.
    pub async fn enroll(&self, email: &Email, name: &str, group_id: &GroupId) -> AppResult<Student> {
        if email.is_empty() {
            return Err(AppError::validation("Student email is required"));
        }
        if group_id.is_empty() {
            return Err(AppError::validation("Student group id is required"));
        }

        let student = self
            .deadline
            .run(
                "enroll student",
                self.repo.enroll(EnrollStudent {
                    email: email.clone(),
                    name: name.trim().to_string(),
                    group_id: group_id.clone(),
                }),
            )
            .await?;
        info!(email = %student.email, group_id = %student.group_id, "Student enrolled");
        Ok(student)
    }

    /// Adds `minutes` to the student's entry for `date` (today when `None`).
    ///
    /// Returns the full history in insertion order.
    pub async fn record_activity(
        &self,
        email: &Email,
        minutes: i64,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<DailyActivity>> {
        if minutes < 0 {
            return Err(AppError::validation("Minutes spent cannot be negative"));
        }
        self.require_student(email).await?;

        let date = date.unwrap_or_else(today);
        let history = self
            .deadline
            .run("record activity", self.repo.add_minutes(email, date, minutes))
            .await?;
        debug!(email = %email, %date, minutes, "Activity recorded");
        Ok(history)
    }

    /// The student with their full history.
    pub async fn get_activity(&self, email: &Email) -> AppResult<StudentActivity> {
        let student = self.require_student(email).await?;
        let daily_activity = self
            .deadline
            .run("load activity", self.repo.history(email))
            .await?;
        Ok(StudentActivity {
            student,
            daily_activity,
        })
    }

    /// Sum of the last seven local calendar days, including today.
    pub async fn weekly_summary(&self, email: &Email) -> AppResult<WeeklySummary> {
        self.weekly_summary_at(email, today()).await
    }

    /// Sum of `[today - 6, today]`, persisted as the cached summary.
    /// History outside the window is kept.
    pub async fn weekly_summary_at(&self, email: &Email, today: NaiveDate) -> AppResult<WeeklySummary> {
        let StudentActivity { daily_activity, .. } = self.get_activity(email).await?;

        let window = SummaryWindow::ending(today);
        let total = window.sum(&daily_activity);

        let stored = self
            .deadline
            .run("store summary", self.repo.store_weekly_summary(email, total))
            .await?;
        if !stored {
            return Err(AppError::not_found(format!("Student {email} not found")));
        }

        Ok(WeeklySummary {
            weekly_summary: total,
            daily_activity,
            window_start: window.start,
            window_end: window.end,
        })
    }

    async fn require_student(&self, email: &Email) -> AppResult<Student> {
        self.deadline
            .run("find student", self.repo.find_student(email))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Student {email} not found")))
    }
}
