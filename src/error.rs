//! Error types for the scheduling service.

use thiserror::Error;

use crate::models::Semester;

/// Errors surfaced by the service and persistence boundary.
///
/// The scheduler core itself never fails: unplaceable sessions become
/// warnings in the generation report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A required input parameter was absent or empty.
    #[error("required parameter `{0}` is missing")]
    MissingParameter(&'static str),

    /// No courses exist for the requested catalog key.
    #[error("no courses found for {curriculum_year}, {semester}")]
    NoCourses {
        curriculum_year: String,
        semester: Semester,
    },

    /// The underlying store failed; nothing was written.
    #[error("storage failure: {0}")]
    Storage(String),
}
