//! Student activity entities and the trailing summary window.

pub mod model;
pub mod window;

pub use model::{DailyActivity, EnrollStudent, Student, StudentActivity, WeeklySummary};
pub use window::SummaryWindow;
