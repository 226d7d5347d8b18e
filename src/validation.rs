//! Post-placement validation of a generated schedule.
//!
//! Recomputes per-subject weekly hours from the committed sessions,
//! detects cohort overlaps, and grades the run with an optimization
//! score. Findings are diagnostic: they are reported, never raised.
//!
//! # Hours Model
//! Expected weekly hours per subject are `lec_units × 1 + lab_units × 3`.
//! The ×3 factor is applied to every department, so departments whose
//! laboratories expand to a single weekly hour will report an hours
//! mismatch for each lab subject. This mirrors the upstream generator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ScheduledSession, SessionTag};

/// Tolerated deviation between expected and actual weekly hours.
const HOURS_TOLERANCE: f64 = 0.1;
/// Score penalty per error finding.
const ERROR_PENALTY: u32 = 5;

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Affects the optimization score.
    Error,
    /// Diagnostic only.
    Warning,
}

/// Category of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    /// Actual weekly hours deviate from the unit-derived expectation.
    HoursMismatch,
    /// A subject with 2+ lecture units has a lecture-session count other than two.
    LectureSessionCount,
    /// Two sessions of one cohort overlap in time.
    CohortOverlap,
    /// A session could not be placed at all.
    Unplaced,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Finding severity.
    pub severity: Severity,
    /// Finding category.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    /// Creates an hours-mismatch error.
    pub fn hours_mismatch(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind: IssueKind::HoursMismatch,
            message: message.into(),
        }
    }

    /// Creates a lecture-session-count warning.
    pub fn lecture_session_count(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind: IssueKind::LectureSessionCount,
            message: message.into(),
        }
    }

    /// Creates a cohort-overlap error.
    pub fn cohort_overlap(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind: IssueKind::CohortOverlap,
            message: message.into(),
        }
    }

    /// Creates an unplaced-session warning.
    pub fn unplaced(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind: IssueKind::Unplaced,
            message: message.into(),
        }
    }
}

/// Outcome of the validation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// All findings, errors and warnings.
    pub issues: Vec<ValidationIssue>,
    /// `max(0, 100 − 5 × errors)`.
    pub optimization_score: u32,
}

impl ValidationReport {
    /// Number of error-severity findings.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity findings.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Whether the schedule validated without errors.
    pub fn is_clean(&self) -> bool {
        self.error_count() == 0
    }
}

/// Validates a generated schedule.
///
/// Checks, per (subject code, program, year level) group, the recomputed
/// weekly hours and the lecture-session count; then pairwise cohort
/// overlaps. The optimization score counts errors only.
pub fn validate_schedule(sessions: &[ScheduledSession]) -> ValidationReport {
    let mut issues = Vec::new();

    // Group keys sorted for deterministic report order
    let mut groups: BTreeMap<(String, String, String), Vec<&ScheduledSession>> = BTreeMap::new();
    for s in sessions {
        groups
            .entry((s.subject_code.clone(), s.program.clone(), s.year_level.clone()))
            .or_default()
            .push(s);
    }

    for ((code, program, year_level), group) in &groups {
        let lec_units = group[0].lec_units;
        let lab_units = group[0].lab_units;
        let expected = lec_units as f64 + lab_units as f64 * 3.0;
        let actual: f64 = group.iter().map(|s| s.duration_hours()).sum();

        if (expected - actual).abs() > HOURS_TOLERANCE {
            issues.push(ValidationIssue::hours_mismatch(format!(
                "{code} ({program} {year_level}): expected {expected:.1}h weekly, scheduled {actual:.1}h"
            )));
        }

        let lecture_sessions = group
            .iter()
            .filter(|s| s.tag == SessionTag::Lecture)
            .count();
        if lec_units >= 2 && lecture_sessions != 2 {
            issues.push(ValidationIssue::lecture_session_count(format!(
                "{code} ({program} {year_level}): {lec_units} lecture units but {lecture_sessions} lecture sessions"
            )));
        }
    }

    let mut cohorts: BTreeMap<(String, String, String), Vec<&ScheduledSession>> = BTreeMap::new();
    for s in sessions {
        cohorts
            .entry((s.program.clone(), s.year_level.clone(), s.semester.to_string()))
            .or_default()
            .push(s);
    }

    for ((program, year_level, _), group) in &cohorts {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                if a.day == b.day && a.slot().overlaps(b.slot()) {
                    issues.push(ValidationIssue::cohort_overlap(format!(
                        "{program} {year_level}: {} and {} overlap on {} at {}",
                        a.subject_code,
                        b.subject_code,
                        a.day,
                        a.slot()
                    )));
                }
            }
        }
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count() as u32;
    ValidationReport {
        issues,
        optimization_score: 100u32.saturating_sub(ERROR_PENALTY * errors),
    }
}
