//! Faculty ranking for course assignment.
//!
//! Scores every approved instructor against a course and keeps the top
//! candidates. The composite score rewards specialization overlap with
//! the course tags, prior experience with the subject, years of teaching,
//! and permanent designation; instructors already at their unit cap are
//! disqualified outright.
//!
//! # Score Convention
//! Higher scores rank first. Ties break on tag match, then years of
//! experience, then last name, keeping the ordering total and
//! deterministic.
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling"

use std::collections::HashMap;

use crate::models::{Course, Instructor, UserStatus};
use crate::scheduler::SchedulerConfig;

/// Bonus for having taught the subject before.
const PREVIOUS_SUBJECT_BONUS: f64 = 50.0;
/// Bonus for permanent ("regular") designation.
const REGULAR_BONUS: f64 = 10.0;
/// Years of experience credited at most.
const EXPERIENCE_CREDIT_CAP: u32 = 20;
/// Score assigned to instructors already at their unit cap.
const DISQUALIFIED: f64 = -1000.0;
/// How many ranked candidates are kept per course.
const CANDIDATE_POOL: usize = 5;

/// A ranked instructor candidate for one course.
///
/// Extends the base instructor with the ranking outcome; the placement
/// engine consumes candidates in rank order.
#[derive(Debug, Clone)]
pub struct FacultyCandidate<'a> {
    /// The underlying instructor.
    pub instructor: &'a Instructor,
    /// Composite match score.
    pub score: f64,
    /// Percentage of course tags covered by the instructor's specializations.
    pub tag_match: f64,
    /// Units already assigned to the instructor this run.
    pub current_workload: u32,
    /// 1-based rank within the candidate pool.
    pub rank: u32,
}

/// Percentage of `tags` found in `specializations`, case-insensitive.
///
/// Returns 0.0 when either set is empty.
pub fn tag_match_percent(tags: &[String], specializations: &[String]) -> f64 {
    if tags.is_empty() || specializations.is_empty() {
        return 0.0;
    }
    let matched = tags
        .iter()
        .filter(|tag| {
            specializations
                .iter()
                .any(|s| s.eq_ignore_ascii_case(tag))
        })
        .count();
    100.0 * matched as f64 / tags.len() as f64
}

/// Computes `(score, tag_match)` for one instructor against one course.
///
/// `current_workload` and the instructor's unit cap decide
/// disqualification: an instructor already at or over cap scores −1000.
pub fn score_instructor(
    course: &Course,
    instructor: &Instructor,
    current_workload: u32,
    unit_cap: u32,
) -> (f64, f64) {
    let tag_match = tag_match_percent(&course.tags, &instructor.specializations);

    if current_workload >= unit_cap {
        return (DISQUALIFIED, tag_match);
    }

    let mut score = tag_match;
    let taught_before = instructor.previous_subjects.iter().any(|s| {
        s.eq_ignore_ascii_case(&course.subject_code) || s.eq_ignore_ascii_case(&course.subject_name)
    });
    if taught_before {
        score += PREVIOUS_SUBJECT_BONUS;
    }
    score += instructor.years_experience.min(EXPERIENCE_CREDIT_CAP) as f64;
    if instructor.is_regular() {
        score += REGULAR_BONUS;
    }
    (score, tag_match)
}

/// Ranks the qualified candidates for a course.
///
/// Only `Approved` instructors are considered. Candidates are ordered by
/// score, tag match, years of experience (all descending), then last name
/// ascending; only those with positive score *and* positive tag match
/// survive, capped at the top five.
pub fn rank_candidates<'a>(
    course: &Course,
    instructors: &'a [Instructor],
    workloads: &HashMap<String, u32>,
    config: &SchedulerConfig,
) -> Vec<FacultyCandidate<'a>> {
    let mut candidates: Vec<FacultyCandidate<'a>> = instructors
        .iter()
        .filter(|f| f.status == UserStatus::Approved)
        .map(|f| {
            let current_workload = workloads.get(&f.id).copied().unwrap_or(0);
            let (score, tag_match) =
                score_instructor(course, f, current_workload, config.unit_cap(f));
            FacultyCandidate {
                instructor: f,
                score,
                tag_match,
                current_workload,
                rank: 0,
            }
        })
        .filter(|c| c.score > 0.0 && c.tag_match > 0.0)
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                b.tag_match
                    .partial_cmp(&a.tag_match)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then(b.instructor.years_experience.cmp(&a.instructor.years_experience))
            .then(a.instructor.last_name.cmp(&b.instructor.last_name))
    });

    candidates.truncate(CANDIDATE_POOL);
    for (i, c) in candidates.iter_mut().enumerate() {
        c.rank = i as u32 + 1;
    }
    candidates
}
