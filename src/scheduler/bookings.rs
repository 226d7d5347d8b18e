//! Booking ledger: the mutable tracking state of one generation run.
//!
//! Four tables are maintained while sessions are committed: per-faculty
//! and per-room reservations, per-cohort reservations, per-faculty unit
//! workload, and the weekdays each subject already occupies. The
//! availability predicates answer whether a candidate placement would
//! violate any of them.
//!
//! The ledger lives only for the duration of one run; a fresh run starts
//! from an empty ledger.

use std::collections::{HashMap, HashSet};

use crate::models::{Instructor, Semester, TimeSlot, Weekday, MIN_REST_GAP_MIN};

/// One committed reservation of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Booking {
    semester: Semester,
    day: Weekday,
    slot: TimeSlot,
}

impl Booking {
    /// Whether `slot` on `day`/`semester` collides with this booking.
    fn collides(&self, semester: Semester, day: Weekday, slot: TimeSlot) -> bool {
        self.semester == semester && self.day == day && self.slot.overlaps(slot)
    }

    /// Whether `slot` leaves less than the required rest gap around this
    /// booking on the same day. Only meaningful for non-overlapping slots.
    fn too_close(&self, semester: Semester, day: Weekday, slot: TimeSlot) -> bool {
        if self.semester != semester || self.day != day {
            return false;
        }
        let gap = if slot.start >= self.slot.end {
            slot.start.minutes() - self.slot.end.minutes()
        } else {
            self.slot.start.minutes().saturating_sub(slot.end.minutes())
        };
        gap < MIN_REST_GAP_MIN
    }
}

/// Identity of a student cohort: no two of its classes may overlap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CohortKey {
    /// Program code.
    pub program: String,
    /// Year level string.
    pub year_level: String,
    /// Semester.
    pub semester: Semester,
}

/// Mutable tracking tables for one generation run.
#[derive(Debug, Default)]
pub struct BookingLedger {
    faculty: HashMap<String, Vec<Booking>>,
    rooms: HashMap<String, Vec<Booking>>,
    cohorts: HashMap<CohortKey, Vec<(Weekday, TimeSlot)>>,
    workloads: HashMap<String, u32>,
    charged: HashSet<(String, String)>,
    subject_days: HashMap<(String, Semester), Vec<Weekday>>,
}

impl BookingLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the room is free on every given day at `slot`.
    pub fn room_free(
        &self,
        room_id: &str,
        days: &[Weekday],
        slot: TimeSlot,
        semester: Semester,
    ) -> bool {
        let bookings = match self.rooms.get(room_id) {
            Some(b) => b,
            None => return true,
        };
        days.iter()
            .all(|&day| !bookings.iter().any(|b| b.collides(semester, day, slot)))
    }

    /// Whether the instructor can take `slot` on every given day.
    ///
    /// Checks, in order: declared availability (day set and preferred
    /// window), collision with existing reservations, and the minimum
    /// rest gap on both sides of neighboring sessions.
    pub fn faculty_free(
        &self,
        instructor: &Instructor,
        days: &[Weekday],
        slot: TimeSlot,
        semester: Semester,
    ) -> bool {
        if !days.iter().all(|&d| instructor.accepts_day(d)) {
            return false;
        }
        if !instructor.accepts_slot(slot) {
            return false;
        }
        let bookings = match self.faculty.get(&instructor.id) {
            Some(b) => b,
            None => return true,
        };
        days.iter().all(|&day| {
            bookings
                .iter()
                .all(|b| !b.collides(semester, day, slot) && !b.too_close(semester, day, slot))
        })
    }

    /// Whether the cohort has no class on any given day overlapping `slot`.
    pub fn cohort_free(&self, key: &CohortKey, days: &[Weekday], slot: TimeSlot) -> bool {
        let taken = match self.cohorts.get(key) {
            Some(t) => t,
            None => return true,
        };
        days.iter()
            .all(|&day| !taken.iter().any(|&(d, s)| d == day && s.overlaps(slot)))
    }

    /// Records a committed session for instructor, room, and cohort.
    pub fn book(
        &mut self,
        instructor_id: &str,
        room_id: &str,
        cohort: &CohortKey,
        day: Weekday,
        slot: TimeSlot,
    ) {
        let semester = cohort.semester;
        let booking = Booking { semester, day, slot };
        self.faculty
            .entry(instructor_id.to_string())
            .or_default()
            .push(booking);
        self.rooms.entry(room_id.to_string()).or_default().push(booking);
        self.cohorts
            .entry(cohort.clone())
            .or_default()
            .push((day, slot));
    }

    /// Charges a course's units to an instructor exactly once.
    ///
    /// Returns `true` if the units were charged now, `false` if this
    /// (instructor, course) pair was already charged.
    pub fn charge_units_once(&mut self, instructor_id: &str, course_key: &str, units: u32) -> bool {
        let key = (instructor_id.to_string(), course_key.to_string());
        if !self.charged.insert(key) {
            return false;
        }
        *self.workloads.entry(instructor_id.to_string()).or_insert(0) += units;
        true
    }

    /// Whether the instructor already carries this course's units.
    pub fn is_charged(&self, instructor_id: &str, course_key: &str) -> bool {
        self.charged
            .contains(&(instructor_id.to_string(), course_key.to_string()))
    }

    /// Units currently assigned to an instructor.
    pub fn workload(&self, instructor_id: &str) -> u32 {
        self.workloads.get(instructor_id).copied().unwrap_or(0)
    }

    /// All current per-instructor workloads.
    pub fn workloads(&self) -> &HashMap<String, u32> {
        &self.workloads
    }

    /// Records the weekdays a subject now occupies.
    pub fn note_subject_days(&mut self, subject_code: &str, semester: Semester, days: &[Weekday]) {
        self.subject_days
            .entry((subject_code.to_string(), semester))
            .or_default()
            .extend_from_slice(days);
    }

    /// Weekdays already occupied by a subject this semester.
    pub fn subject_days(&self, subject_code: &str, semester: Semester) -> &[Weekday] {
        self.subject_days
            .get(&(subject_code.to_string(), semester))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
