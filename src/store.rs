//! Persistence boundary.
//!
//! [`TimetableStore`] abstracts the relational store behind the service:
//! catalog reads happen once, up front; writes happen once, at save
//! time, as a delete-then-insert replace keyed by (curriculum year,
//! semester). [`MemoryStore`] is the in-memory implementation used in
//! tests and single-process deployments; both operations of its replace
//! are applied atomically from the caller's point of view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::{
    Course, Instructor, Room, ScheduledSession, Semester, TimeOfDay, Weekday,
};

/// Lifecycle status of a persisted session row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    #[serde(rename = "conflict-free")]
    ConflictFree,
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "conflict")]
    Conflict,
}

/// One row of the persisted timetable.
///
/// Fully denormalized; `tags` and `recommended_faculty` are stored as
/// JSON columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    /// Primary key, assigned by the store on insert.
    pub id: u64,
    pub subject_code: String,
    pub subject_name: String,
    pub faculty_id: String,
    pub faculty_name: String,
    pub room_name: String,
    pub day: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub semester: Semester,
    pub academic_year: String,
    pub program: String,
    pub year_level: String,
    pub units: u32,
    pub lec: u32,
    pub lab: u32,
    /// Subject tags, when the course carried any.
    pub tags: Option<serde_json::Value>,
    /// Ranked candidate names recorded at generation time.
    pub recommended_faculty: Option<serde_json::Value>,
    pub has_conflict: bool,
    pub status: SessionStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_generated: DateTime<Utc>,
}

impl PersistedSession {
    /// Builds a row from a generated session. The id is assigned on insert.
    pub fn from_session(session: &ScheduledSession, now: DateTime<Utc>) -> Self {
        let tags = if session.tags.is_empty() {
            None
        } else {
            serde_json::to_value(&session.tags).ok()
        };
        let recommended_faculty = if session.recommended_faculty.is_empty() {
            None
        } else {
            serde_json::to_value(&session.recommended_faculty).ok()
        };
        Self {
            id: 0,
            subject_code: session.subject_code.clone(),
            subject_name: session.subject_name.clone(),
            faculty_id: session.faculty_id.clone(),
            faculty_name: session.faculty_name.clone(),
            room_name: session.room_name.clone(),
            day: session.day,
            start_time: session.start_time,
            end_time: session.end_time,
            semester: session.semester,
            academic_year: session.academic_year.clone(),
            program: session.program.clone(),
            year_level: session.year_level.clone(),
            units: session.units,
            lec: session.lec_units,
            lab: session.lab_units,
            tags,
            recommended_faculty,
            has_conflict: false,
            status: SessionStatus::ConflictFree,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_generated: now,
        }
    }
}

/// Result of a save operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    /// Rows removed for the replaced (year, semester) key.
    pub deleted: usize,
    /// Rows inserted.
    pub inserted: usize,
}

/// The relational store behind the scheduling service.
pub trait TimetableStore {
    /// Curriculum courses for a catalog key. `program = None` means all
    /// programs.
    fn courses(
        &self,
        curriculum_year: &str,
        semester: Semester,
        program: Option<&str>,
    ) -> Result<Vec<Course>, ScheduleError>;

    /// Every registered instructor, regardless of status.
    fn instructors(&self) -> Result<Vec<Instructor>, ScheduleError>;

    /// Every room, in insertion order.
    fn rooms(&self) -> Result<Vec<Room>, ScheduleError>;

    /// Configured default unit cap, if any.
    fn max_units(&self) -> Result<Option<u32>, ScheduleError>;

    /// Replaces the persisted timetable for one (curriculum year,
    /// semester) key: deletes matching rows, then inserts `rows` as one
    /// unit. A failure leaves the previous timetable intact.
    fn replace_schedule(
        &mut self,
        curriculum_year: &str,
        semester: Semester,
        rows: Vec<PersistedSession>,
    ) -> Result<SaveOutcome, ScheduleError>;

    /// Persisted rows, optionally narrowed to one academic year.
    fn sessions(&self, academic_year: Option<&str>) -> Result<Vec<PersistedSession>, ScheduleError>;
}

/// In-memory [`TimetableStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    courses: Vec<Course>,
    instructors: Vec<Instructor>,
    rooms: Vec<Room>,
    max_units: Option<u32>,
    rows: Vec<PersistedSession>,
    next_id: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Seeds the course catalog.
    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = courses;
        self
    }

    /// Seeds the instructor roster.
    pub fn with_instructors(mut self, instructors: Vec<Instructor>) -> Self {
        self.instructors = instructors;
        self
    }

    /// Seeds the rooms.
    pub fn with_rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = rooms;
        self
    }

    /// Sets the configured default unit cap.
    pub fn with_max_units(mut self, max_units: u32) -> Self {
        self.max_units = Some(max_units);
        self
    }
}

impl TimetableStore for MemoryStore {
    fn courses(
        &self,
        curriculum_year: &str,
        semester: Semester,
        program: Option<&str>,
    ) -> Result<Vec<Course>, ScheduleError> {
        Ok(self
            .courses
            .iter()
            .filter(|c| c.curriculum_year == curriculum_year && c.semester == semester)
            .filter(|c| program.map_or(true, |p| c.program.eq_ignore_ascii_case(p)))
            .cloned()
            .collect())
    }

    fn instructors(&self) -> Result<Vec<Instructor>, ScheduleError> {
        Ok(self.instructors.clone())
    }

    fn rooms(&self) -> Result<Vec<Room>, ScheduleError> {
        Ok(self.rooms.clone())
    }

    fn max_units(&self) -> Result<Option<u32>, ScheduleError> {
        Ok(self.max_units)
    }

    fn replace_schedule(
        &mut self,
        curriculum_year: &str,
        semester: Semester,
        rows: Vec<PersistedSession>,
    ) -> Result<SaveOutcome, ScheduleError> {
        let before = self.rows.len();
        self.rows
            .retain(|r| !(r.academic_year == curriculum_year && r.semester == semester));
        let deleted = before - self.rows.len();

        let inserted = rows.len();
        for mut row in rows {
            row.id = self.next_id;
            self.next_id += 1;
            self.rows.push(row);
        }
        Ok(SaveOutcome { deleted, inserted })
    }

    fn sessions(&self, academic_year: Option<&str>) -> Result<Vec<PersistedSession>, ScheduleError> {
        Ok(self
            .rows
            .iter()
            .filter(|r| academic_year.map_or(true, |y| r.academic_year == y))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionTag;

    fn make_session(code: &str, year: &str, semester: Semester) -> ScheduledSession {
        ScheduledSession {
            subject_code: code.into(),
            subject_name: code.into(),
            program: "BSCS".into(),
            year_level: "1st Year".into(),
            semester,
            academic_year: year.into(),
            tag: SessionTag::Lecture,
            day: Weekday::Monday,
            start_time: TimeOfDay::hm(7, 0),
            end_time: TimeOfDay::hm(8, 0),
            units: 3,
            lec_units: 3,
            lab_units: 0,
            tags: vec!["Programming".into()],
            faculty_id: "F1".into(),
            faculty_name: "Ada Lovelace".into(),
            room_id: "R1".into(),
            room_name: "Room 101".into(),
            recommended_faculty: vec!["Ada Lovelace".into()],
        }
    }

    fn rows_for(sessions: &[ScheduledSession]) -> Vec<PersistedSession> {
        let now = Utc::now();
        sessions
            .iter()
            .map(|s| PersistedSession::from_session(s, now))
            .collect()
    }

    #[test]
    fn test_row_mapping() {
        let now = Utc::now();
        let row = PersistedSession::from_session(&make_session("CS101", "2024-2025", Semester::First), now);
        assert_eq!(row.id, 0);
        assert_eq!(row.subject_code, "CS101");
        assert_eq!(row.lec, 3);
        assert_eq!(row.status, SessionStatus::ConflictFree);
        assert!(!row.has_conflict);
        assert!(row.is_active);
        assert_eq!(row.created_at, now);
        assert_eq!(row.tags, Some(serde_json::json!(["Programming"])));
        assert_eq!(
            row.recommended_faculty,
            Some(serde_json::json!(["Ada Lovelace"]))
        );
    }

    #[test]
    fn test_empty_json_columns_are_null() {
        let mut s = make_session("CS101", "2024-2025", Semester::First);
        s.tags.clear();
        s.recommended_faculty.clear();
        let row = PersistedSession::from_session(&s, Utc::now());
        assert_eq!(row.tags, None);
        assert_eq!(row.recommended_faculty, None);
    }

    #[test]
    fn test_replace_deletes_then_inserts() {
        let mut store = MemoryStore::new();
        let a = rows_for(&[
            make_session("CS101", "2024-2025", Semester::First),
            make_session("CS102", "2024-2025", Semester::First),
        ]);
        let outcome = store
            .replace_schedule("2024-2025", Semester::First, a)
            .unwrap();
        assert_eq!(outcome, SaveOutcome { deleted: 0, inserted: 2 });

        let b = rows_for(&[make_session("CS201", "2024-2025", Semester::First)]);
        let outcome = store
            .replace_schedule("2024-2025", Semester::First, b)
            .unwrap();
        assert_eq!(outcome, SaveOutcome { deleted: 2, inserted: 1 });

        let rows = store.sessions(None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subject_code, "CS201");
    }

    #[test]
    fn test_replace_scoped_to_key() {
        let mut store = MemoryStore::new();
        store
            .replace_schedule(
                "2024-2025",
                Semester::First,
                rows_for(&[make_session("CS101", "2024-2025", Semester::First)]),
            )
            .unwrap();
        store
            .replace_schedule(
                "2024-2025",
                Semester::Second,
                rows_for(&[make_session("CS150", "2024-2025", Semester::Second)]),
            )
            .unwrap();

        // Replacing the first semester leaves the second untouched
        let outcome = store
            .replace_schedule(
                "2024-2025",
                Semester::First,
                rows_for(&[make_session("CS102", "2024-2025", Semester::First)]),
            )
            .unwrap();
        assert_eq!(outcome.deleted, 1);
        let codes: Vec<String> = store
            .sessions(None)
            .unwrap()
            .iter()
            .map(|r| r.subject_code.clone())
            .collect();
        assert!(codes.contains(&"CS150".to_string()));
        assert!(codes.contains(&"CS102".to_string()));
    }

    #[test]
    fn test_ids_keep_increasing_across_replaces() {
        let mut store = MemoryStore::new();
        store
            .replace_schedule(
                "2024-2025",
                Semester::First,
                rows_for(&[make_session("CS101", "2024-2025", Semester::First)]),
            )
            .unwrap();
        store
            .replace_schedule(
                "2024-2025",
                Semester::First,
                rows_for(&[make_session("CS102", "2024-2025", Semester::First)]),
            )
            .unwrap();
        let rows = store.sessions(None).unwrap();
        assert_eq!(rows[0].id, 2);
    }

    #[test]
    fn test_sessions_filter_by_year() {
        let mut store = MemoryStore::new();
        store
            .replace_schedule(
                "2023-2024",
                Semester::First,
                rows_for(&[make_session("OLD1", "2023-2024", Semester::First)]),
            )
            .unwrap();
        store
            .replace_schedule(
                "2024-2025",
                Semester::First,
                rows_for(&[make_session("NEW1", "2024-2025", Semester::First)]),
            )
            .unwrap();

        assert_eq!(store.sessions(Some("2023-2024")).unwrap().len(), 1);
        assert_eq!(store.sessions(None).unwrap().len(), 2);
    }

    #[test]
    fn test_course_filtering() {
        let store = MemoryStore::new().with_courses(vec![
            Course::new("CS101")
                .with_curriculum_year("2024-2025")
                .with_program("BSCS")
                .with_semester(Semester::First),
            Course::new("ED101")
                .with_curriculum_year("2024-2025")
                .with_program("BSED")
                .with_semester(Semester::First),
            Course::new("CS150")
                .with_curriculum_year("2024-2025")
                .with_program("BSCS")
                .with_semester(Semester::Second),
        ]);

        let all = store.courses("2024-2025", Semester::First, None).unwrap();
        assert_eq!(all.len(), 2);
        let bscs = store
            .courses("2024-2025", Semester::First, Some("bscs"))
            .unwrap();
        assert_eq!(bscs.len(), 1);
        assert_eq!(bscs[0].subject_code, "CS101");
        assert!(store
            .courses("2020-2021", Semester::First, None)
            .unwrap()
            .is_empty());
    }
}
