//! Greedy placement engine.
//!
//! # Algorithm
//!
//! 1. Courses are processed in catalog order.
//! 2. Each course expands into session rules (lectures before labs) and
//!    gets a ranked candidate pool of at most five instructors.
//! 3. Each rule searches instructor-major: the top-ranked instructor is
//!    exhausted across every day set, time slot, and room before the
//!    next candidate is tried.
//! 4. A rule commits all of its sessions or none. Unplaceable rules are
//!    reported as warnings and generation continues.
//!
//! A course's units are charged to an instructor once, no matter how
//! many sessions the course produces.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{
    ninety_minute_slots, one_hour_slots, Course, Instructor, Room, RoomKind, ScheduledSession,
    SessionRule, SessionTag, UserRole, Weekday, LAB_DAYS, LAB_DAY_PAIRS, LECTURE_DAYS,
    LECTURE_DAY_PAIRS,
};
use crate::ranking::{rank_candidates, FacultyCandidate};
use crate::validation::{validate_schedule, ValidationIssue, ValidationReport};

use super::bookings::{BookingLedger, CohortKey};

/// Unit caps applied during generation.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Default per-instructor unit cap.
    pub max_units: u32,
    /// Reduced cap for campus administrators.
    pub admin_max_units: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_units: 18,
            admin_max_units: 6,
        }
    }
}

impl SchedulerConfig {
    /// The unit cap applying to one instructor.
    pub fn unit_cap(&self, instructor: &Instructor) -> u32 {
        match instructor.role {
            UserRole::CampusAdmin => self.admin_max_units,
            _ => self.max_units,
        }
    }
}

/// Outcome of one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Every committed session, in placement order.
    pub subjects: Vec<ScheduledSession>,
    /// Number of distinct courses that received at least one session.
    pub total_subjects: usize,
    /// Number of distinct instructors assigned.
    pub total_faculty: usize,
    /// Distinct instructor names, in first-assignment order.
    pub faculty_names: Vec<String>,
    /// `max(0, 100 − 5 × validation errors)`.
    pub optimization_score: u32,
    /// Validation findings, including unplaced-session warnings.
    pub report: ValidationReport,
}

/// The class-schedule generator.
///
/// Holds only configuration; all tracking state lives in a per-run
/// [`BookingLedger`], so one `Scheduler` value can serve many runs.
///
/// # Example
///
/// ```
/// use timetabler::models::{Course, Instructor, Room, Semester};
/// use timetabler::scheduler::Scheduler;
///
/// let courses = vec![Course::new("CS101")
///     .with_name("Introduction to Computing")
///     .with_program("BSCS")
///     .with_year_level("1st Year")
///     .with_semester(Semester::First)
///     .with_units(3, 0)
///     .with_tag("Programming")];
/// let instructors = vec![Instructor::new("F1", "Ada", "Lovelace")
///     .with_specialization("Programming")];
/// let rooms = vec![Room::new("R1", "Room 101")];
///
/// let result = Scheduler::new().generate(&courses, &instructors, &rooms);
/// assert_eq!(result.subjects.len(), 2);
/// assert_eq!(result.optimization_score, 100);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    /// Creates a scheduler with default caps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with the given configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Overrides the default unit cap.
    pub fn with_max_units(mut self, max_units: u32) -> Self {
        self.config.max_units = max_units;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Generates a weekly schedule for the given catalog.
    ///
    /// Always succeeds; courses that cannot be placed are reported as
    /// warnings in the result's validation report. Given identical
    /// inputs the output is identical.
    pub fn generate(
        &self,
        courses: &[Course],
        instructors: &[Instructor],
        rooms: &[Room],
    ) -> GenerationResult {
        let mut ledger = BookingLedger::new();
        let mut sessions: Vec<ScheduledSession> = Vec::new();
        let mut warnings: Vec<ValidationIssue> = Vec::new();

        for course in courses {
            let rules =
                SessionRule::derive(course.lec_units, course.lab_units, Some(&course.program));
            if rules.is_empty() {
                continue;
            }

            let candidates = rank_candidates(course, instructors, ledger.workloads(), &self.config);
            if candidates.is_empty() {
                warn!("{}: no qualified faculty available", course.subject_code);
                warnings.push(ValidationIssue::unplaced(format!(
                    "{} ({} {}): no qualified faculty available",
                    course.subject_code, course.program, course.year_level
                )));
                continue;
            }
            let recommended: Vec<String> =
                candidates.iter().map(|c| c.instructor.full_name()).collect();

            for rule in &rules {
                match place_rule(
                    &self.config,
                    course,
                    rule,
                    &candidates,
                    rooms,
                    &recommended,
                    &mut ledger,
                ) {
                    Some(mut placed) => sessions.append(&mut placed),
                    None => {
                        warn!(
                            "{}: no feasible {} placement ({} x {}min)",
                            course.subject_code,
                            rule.tag,
                            rule.sessions_per_week,
                            rule.minutes_per_session
                        );
                        warnings.push(ValidationIssue::unplaced(format!(
                            "{} ({} {}): no feasible {} placement",
                            course.subject_code, course.program, course.year_level, rule.tag
                        )));
                    }
                }
            }
        }

        let mut report = validate_schedule(&sessions);
        report.issues.extend(warnings);

        let mut faculty_names = Vec::new();
        let mut seen = HashSet::new();
        for s in &sessions {
            if seen.insert(s.faculty_name.clone()) {
                faculty_names.push(s.faculty_name.clone());
            }
        }
        let total_subjects = sessions
            .iter()
            .map(|s| (s.subject_code.as_str(), s.program.as_str(), s.year_level.as_str()))
            .collect::<HashSet<_>>()
            .len();

        GenerationResult {
            total_subjects,
            total_faculty: faculty_names.len(),
            optimization_score: report.optimization_score,
            faculty_names,
            subjects: sessions,
            report,
        }
    }
}

/// Identity of a course within one run, for once-only unit charging.
fn course_key(course: &Course) -> String {
    format!(
        "{}|{}|{}|{}",
        course.subject_code, course.program, course.year_level, course.semester
    )
}

/// The ordered day sets a rule may occupy, minus days the subject
/// already uses.
fn day_sets(rule: &SessionRule, used: &[Weekday]) -> Vec<Vec<Weekday>> {
    match rule.sessions_per_week {
        1 => {
            let order = match rule.tag {
                SessionTag::Lecture => LECTURE_DAYS,
                SessionTag::Laboratory => LAB_DAYS,
            };
            order
                .iter()
                .copied()
                .filter(|d| !used.contains(d))
                .map(|d| vec![d])
                .collect()
        }
        2 => {
            let pairs = match rule.tag {
                SessionTag::Lecture => LECTURE_DAY_PAIRS,
                SessionTag::Laboratory => LAB_DAY_PAIRS,
            };
            pairs
                .iter()
                .copied()
                .filter(|(a, b)| !used.contains(a) && !used.contains(b))
                .map(|(a, b)| vec![a, b])
                .collect()
        }
        n => {
            warn!("{} sessions per week has no day-pair model; rule skipped", n);
            Vec::new()
        }
    }
}

/// Rooms eligible for a session tag: rooms of the matching kind, or every
/// room when none of that kind exists.
fn preferred_rooms(rooms: &[Room], tag: SessionTag) -> Vec<&Room> {
    let kind = match tag {
        SessionTag::Lecture => RoomKind::Lecture,
        SessionTag::Laboratory => RoomKind::Laboratory,
    };
    let matching: Vec<&Room> = rooms.iter().filter(|r| r.kind() == kind).collect();
    if matching.is_empty() {
        rooms.iter().collect()
    } else {
        matching
    }
}

/// Searches for and commits a placement for one session rule.
///
/// Returns the committed sessions, or `None` when no (instructor, day
/// set, slot, room) combination satisfies every constraint.
fn place_rule(
    config: &SchedulerConfig,
    course: &Course,
    rule: &SessionRule,
    candidates: &[FacultyCandidate<'_>],
    rooms: &[Room],
    recommended: &[String],
    ledger: &mut BookingLedger,
) -> Option<Vec<ScheduledSession>> {
    let slots = if rule.minutes_per_session == 60 {
        one_hour_slots()
    } else {
        ninety_minute_slots()
    };
    let used = ledger.subject_days(&course.subject_code, course.semester).to_vec();
    let day_sets = day_sets(rule, &used);
    if day_sets.is_empty() {
        return None;
    }
    let cohort = CohortKey {
        program: course.program.clone(),
        year_level: course.year_level.clone(),
        semester: course.semester,
    };
    let key = course_key(course);
    let eligible_rooms = preferred_rooms(rooms, rule.tag);

    for candidate in candidates {
        let instructor = candidate.instructor;
        let charged = ledger.is_charged(&instructor.id, &key);
        if !charged
            && ledger.workload(&instructor.id) + course.units > config.unit_cap(instructor)
        {
            continue;
        }

        for days in &day_sets {
            if !days.iter().all(|&d| instructor.accepts_day(d)) {
                continue;
            }
            for &slot in &slots {
                if !ledger.cohort_free(&cohort, days, slot) {
                    continue;
                }
                if !ledger.faculty_free(instructor, days, slot, course.semester) {
                    continue;
                }
                let room = match eligible_rooms
                    .iter()
                    .find(|r| ledger.room_free(&r.id, days, slot, course.semester))
                {
                    Some(r) => *r,
                    None => continue,
                };

                let placed: Vec<ScheduledSession> = days
                    .iter()
                    .map(|&day| ScheduledSession {
                        subject_code: course.subject_code.clone(),
                        subject_name: course.subject_name.clone(),
                        program: course.program.clone(),
                        year_level: course.year_level.clone(),
                        semester: course.semester,
                        academic_year: course.curriculum_year.clone(),
                        tag: rule.tag,
                        day,
                        start_time: slot.start,
                        end_time: slot.end,
                        units: course.units,
                        lec_units: course.lec_units,
                        lab_units: course.lab_units,
                        tags: course.tags.clone(),
                        faculty_id: instructor.id.clone(),
                        faculty_name: instructor.full_name(),
                        room_id: room.id.clone(),
                        room_name: room.name.clone(),
                        recommended_faculty: recommended.to_vec(),
                    })
                    .collect();

                for &day in days.iter() {
                    ledger.book(&instructor.id, &room.id, &cohort, day, slot);
                }
                ledger.charge_units_once(&instructor.id, &key, course.units);
                ledger.note_subject_days(&course.subject_code, course.semester, days);

                debug!(
                    "{}: {} placed with {} in {} at {} on {:?}",
                    course.subject_code,
                    rule.tag,
                    instructor.full_name(),
                    room.name,
                    slot,
                    days
                );
                return Some(placed);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Semester, TimeOfDay, TimeSlot};
    use crate::validation::IssueKind;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn make_course(code: &str, lec: u32, lab: u32) -> Course {
        Course::new(code)
            .with_name(format!("{code} name"))
            .with_curriculum_year("2024-2025")
            .with_program("BSCS")
            .with_year_level("1st Year")
            .with_semester(Semester::First)
            .with_units(lec, lab)
            .with_tag("Programming")
    }

    fn make_faculty(id: &str, last: &str) -> Instructor {
        Instructor::new(id, "Test", last).with_specialization("Programming")
    }

    fn lecture_room() -> Room {
        Room::new("R1", "Room 101")
    }

    fn lab_room() -> Room {
        Room::new("LAB1", "Computer Lab 1")
    }

    #[test]
    fn test_single_lecture_course() {
        // S1: 3 lecture units → two 1.5h sessions on Mon/Wed at day start
        init_logs();
        let courses = vec![make_course("CS101", 3, 0)];
        let instructors = vec![make_faculty("F1", "Lovelace")];
        let rooms = vec![lecture_room()];

        let result = Scheduler::new().generate(&courses, &instructors, &rooms);
        assert_eq!(result.subjects.len(), 2);
        assert_eq!(result.total_subjects, 1);
        assert_eq!(result.total_faculty, 1);
        assert_eq!(result.faculty_names, vec!["Test Lovelace"]);
        assert_eq!(result.optimization_score, 100);

        let days: Vec<Weekday> = result.subjects.iter().map(|s| s.day).collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Wednesday]);
        for s in &result.subjects {
            assert_eq!(s.start_time, TimeOfDay::hm(7, 0));
            assert_eq!(s.end_time, TimeOfDay::hm(8, 30));
            assert_eq!(s.room_id, "R1");
            assert_eq!(s.faculty_id, "F1");
            assert_eq!(s.tag, SessionTag::Lecture);
        }
    }

    #[test]
    fn test_lab_course_takes_lab_room() {
        // S2: a lab-only BSCS course gets two 1.5h sessions in the lab room
        let courses = vec![make_course("CS101", 3, 0), make_course("CS102L", 0, 1)];
        let instructors = vec![make_faculty("F1", "Lovelace")];
        let rooms = vec![lecture_room(), lab_room()];

        let result = Scheduler::new().generate(&courses, &instructors, &rooms);
        let labs: Vec<&ScheduledSession> = result
            .subjects
            .iter()
            .filter(|s| s.tag == SessionTag::Laboratory)
            .collect();
        assert_eq!(labs.len(), 2);
        assert_eq!(
            labs.iter().map(|s| s.day).collect::<Vec<_>>(),
            vec![Weekday::Tuesday, Weekday::Thursday]
        );
        for s in &labs {
            assert_eq!(s.room_id, "LAB1");
            assert_eq!(s.duration_min(), 90);
        }
        // The lecture room is never used for laboratory sessions
        assert!(result
            .subjects
            .iter()
            .all(|s| s.tag == SessionTag::Lecture || s.room_id == "LAB1"));
    }

    #[test]
    fn test_lab_falls_back_without_lab_rooms() {
        let courses = vec![make_course("CS102L", 0, 1)];
        let instructors = vec![make_faculty("F1", "Lovelace")];
        let rooms = vec![lecture_room()];

        let result = Scheduler::new().generate(&courses, &instructors, &rooms);
        assert_eq!(result.subjects.len(), 2);
        assert!(result.subjects.iter().all(|s| s.room_id == "R1"));
    }

    #[test]
    fn test_available_days_shift_placement() {
        // S3: instructor only works Tue/Thu → the Mon/Wed pair is skipped
        let courses = vec![make_course("CS101", 3, 0)];
        let instructors = vec![make_faculty("F1", "Lovelace")
            .with_available_days(&[Weekday::Tuesday, Weekday::Thursday])];
        let rooms = vec![lecture_room()];

        let result = Scheduler::new().generate(&courses, &instructors, &rooms);
        assert_eq!(
            result.subjects.iter().map(|s| s.day).collect::<Vec<_>>(),
            vec![Weekday::Tuesday, Weekday::Thursday]
        );
    }

    #[test]
    fn test_cap_blocks_second_course() {
        // S4: cap 3 and two 3-unit courses matching one instructor
        init_logs();
        let courses = vec![make_course("CS101", 3, 0), make_course("CS201", 3, 0)];
        let instructors = vec![make_faculty("F1", "Lovelace")];
        let rooms = vec![lecture_room()];

        let result = Scheduler::new()
            .with_max_units(3)
            .generate(&courses, &instructors, &rooms);
        assert_eq!(result.subjects.len(), 2);
        assert!(result.subjects.iter().all(|s| s.subject_code == "CS101"));
        let unplaced: Vec<_> = result
            .report
            .issues
            .iter()
            .filter(|i| i.kind == IssueKind::Unplaced)
            .collect();
        assert_eq!(unplaced.len(), 1);
        assert!(unplaced[0].message.contains("CS201"));
    }

    #[test]
    fn test_cohort_conflict_pushes_slot() {
        // S5: same cohort, different instructors → second course shifts
        let courses = vec![
            make_course("CS101", 3, 0),
            Course::new("NET101")
                .with_name("Networks")
                .with_curriculum_year("2024-2025")
                .with_program("BSCS")
                .with_year_level("1st Year")
                .with_semester(Semester::First)
                .with_units(3, 0)
                .with_tag("Networking"),
        ];
        let instructors = vec![
            make_faculty("F1", "Lovelace"),
            Instructor::new("F2", "Grace", "Hopper").with_specialization("Networking"),
        ];
        let rooms = vec![lecture_room(), Room::new("R2", "Room 102")];

        let result = Scheduler::new().generate(&courses, &instructors, &rooms);
        let net: Vec<&ScheduledSession> = result
            .subjects
            .iter()
            .filter(|s| s.subject_code == "NET101")
            .collect();
        assert_eq!(net.len(), 2);
        // Same Mon/Wed pair, next slot clear of the 07:00-08:30 block
        assert_eq!(net[0].day, Weekday::Monday);
        assert_eq!(net[0].start_time, TimeOfDay::hm(8, 30));
        assert_eq!(net[0].end_time, TimeOfDay::hm(10, 0));
        assert_eq!(result.optimization_score, 100);
    }

    #[test]
    fn test_lecture_and_lab_days_disjoint() {
        let courses = vec![make_course("CS103", 3, 1)];
        let instructors = vec![make_faculty("F1", "Lovelace")];
        let rooms = vec![lecture_room(), lab_room()];

        let result = Scheduler::new().generate(&courses, &instructors, &rooms);
        assert_eq!(result.subjects.len(), 4);
        let lecture_days: HashSet<Weekday> = result
            .subjects
            .iter()
            .filter(|s| s.tag == SessionTag::Lecture)
            .map(|s| s.day)
            .collect();
        let lab_days: HashSet<Weekday> = result
            .subjects
            .iter()
            .filter(|s| s.tag == SessionTag::Laboratory)
            .map(|s| s.day)
            .collect();
        assert!(lecture_days.is_disjoint(&lab_days));
    }

    #[test]
    fn test_units_charged_once_across_rules() {
        // lec + lab placed with the same instructor charge units once, so
        // a 4-unit course fits under a cap of 4
        let courses = vec![make_course("CS103", 3, 1)];
        let instructors = vec![make_faculty("F1", "Lovelace")];
        let rooms = vec![lecture_room(), lab_room()];

        let result = Scheduler::new()
            .with_max_units(4)
            .generate(&courses, &instructors, &rooms);
        assert_eq!(result.subjects.len(), 4);
        assert!(result
            .report
            .issues
            .iter()
            .all(|i| i.kind != IssueKind::Unplaced));
    }

    #[test]
    fn test_preferred_window_honored() {
        let courses = vec![make_course("CS101", 3, 0)];
        let instructors =
            vec![make_faculty("F1", "Lovelace").with_preferred_slots(&["1:00 PM - 8:00 PM"])];
        let rooms = vec![lecture_room()];

        let result = Scheduler::new().generate(&courses, &instructors, &rooms);
        assert_eq!(result.subjects.len(), 2);
        for s in &result.subjects {
            assert!(s.start_time >= TimeOfDay::hm(13, 0));
            assert!(s.end_time <= TimeOfDay::hm(20, 0));
        }
    }

    #[test]
    fn test_top_ranked_instructor_exhausted_first() {
        // Both match, but Hopper has more experience → every session hers
        let courses = vec![make_course("CS101", 3, 0), make_course("CS201", 3, 0)];
        let instructors = vec![
            make_faculty("F1", "Lovelace").with_experience(2),
            make_faculty("F2", "Hopper").with_experience(15),
        ];
        let rooms = vec![lecture_room(), Room::new("R2", "Room 102")];

        let result = Scheduler::new().generate(&courses, &instructors, &rooms);
        assert_eq!(result.subjects.len(), 4);
        assert!(result.subjects.iter().all(|s| s.faculty_id == "F2"));
    }

    #[test]
    fn test_no_matching_faculty_reported() {
        let courses = vec![make_course("CS101", 3, 0)];
        let instructors = vec![Instructor::new("F1", "No", "Match").with_specialization("History")];
        let rooms = vec![lecture_room()];

        let result = Scheduler::new().generate(&courses, &instructors, &rooms);
        assert!(result.subjects.is_empty());
        assert_eq!(result.report.warning_count(), 1);
        assert_eq!(result.report.issues[0].kind, IssueKind::Unplaced);
        // Warnings never reduce the score
        assert_eq!(result.optimization_score, 100);
    }

    #[test]
    fn test_recommended_faculty_carried() {
        let courses = vec![make_course("CS101", 3, 0)];
        let instructors = vec![
            make_faculty("F1", "Lovelace").with_experience(2),
            make_faculty("F2", "Hopper").with_experience(15),
        ];
        let rooms = vec![lecture_room()];

        let result = Scheduler::new().generate(&courses, &instructors, &rooms);
        let first = &result.subjects[0];
        assert_eq!(
            first.recommended_faculty,
            vec!["Test Hopper".to_string(), "Test Lovelace".to_string()]
        );
    }

    #[test]
    fn test_schedule_respects_working_hours_and_rest() {
        // A loaded cohort: every placement must still satisfy the hard
        // constraints recomputed here from scratch
        let courses: Vec<Course> = (0..6)
            .map(|i| make_course(&format!("CS10{i}"), 3, 0))
            .collect();
        let instructors = vec![
            make_faculty("F1", "Lovelace"),
            make_faculty("F2", "Hopper"),
        ];
        let rooms = vec![lecture_room(), Room::new("R2", "Room 102")];

        let result = Scheduler::new().generate(&courses, &instructors, &rooms);
        assert!(!result.subjects.is_empty());

        let lunch = TimeSlot::new(TimeOfDay::hm(12, 0), TimeOfDay::hm(13, 0));
        for s in &result.subjects {
            assert!(s.start_time >= TimeOfDay::hm(7, 0));
            assert!(s.end_time <= TimeOfDay::hm(20, 0));
            assert!(!s.slot().overlaps(lunch));
        }

        // Per-instructor, per-day: disjoint with at least 30 minutes gap
        for a in &result.subjects {
            for b in &result.subjects {
                if std::ptr::eq(a, b) || a.faculty_id != b.faculty_id || a.day != b.day {
                    continue;
                }
                assert!(!a.slot().overlaps(b.slot()), "{a:?} overlaps {b:?}");
                let gap = if a.start_time >= b.end_time {
                    a.start_time.minutes() - b.end_time.minutes()
                } else {
                    b.start_time.minutes() - a.end_time.minutes()
                };
                assert!(gap >= 30, "rest gap violated: {a:?} vs {b:?}");
            }
        }

        // Paired sessions share their time slot
        let mut by_course: std::collections::HashMap<&str, Vec<&ScheduledSession>> =
            std::collections::HashMap::new();
        for s in &result.subjects {
            by_course.entry(s.subject_code.as_str()).or_default().push(s);
        }
        for group in by_course.values() {
            assert!(group.windows(2).all(|w| w[0].slot() == w[1].slot()));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let courses: Vec<Course> = (0..5)
            .map(|i| make_course(&format!("CS10{i}"), 3, if i % 2 == 0 { 1 } else { 0 }))
            .collect();
        let instructors = vec![
            make_faculty("F1", "Lovelace").with_experience(3),
            make_faculty("F2", "Hopper").with_experience(9),
            make_faculty("F3", "Liskov").with_experience(9),
        ];
        let rooms = vec![lecture_room(), Room::new("R2", "Room 102"), lab_room()];

        let scheduler = Scheduler::new();
        let a = scheduler.generate(&courses, &instructors, &rooms);
        let b = scheduler.generate(&courses, &instructors, &rooms);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_empty_catalog() {
        let result = Scheduler::new().generate(&[], &[], &[]);
        assert!(result.subjects.is_empty());
        assert_eq!(result.total_subjects, 0);
        assert_eq!(result.total_faculty, 0);
        assert_eq!(result.optimization_score, 100);
    }
}
