//! Instructor model.
//!
//! Instructors carry the qualifications the ranking engine scores
//! (specializations, previously taught subjects, experience, designation)
//! and the availability constraints the placement engine honors
//! (preferred time window, available days). Only `Approved` instructors
//! are schedulable.
//!
//! # Preferred Window
//! The upstream records encode the preferred window in two shapes: an
//! ordered pair `["start:HH:MM", "end:HH:MM"]` or a display string like
//! `"8:00 AM - 5:00 PM"`. Both are normalized to a [`TimeSlot`] at load
//! time; an absent or malformed value means fully available.

use serde::{Deserialize, Serialize};

use super::{TimeOfDay, TimeSlot, Weekday};

/// Role of a user within the institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Faculty,
    DepartmentHead,
    Registrar,
    CampusAdmin,
}

/// Account status; only `Approved` instructors are schedulable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Pending,
    Verified,
    Approved,
}

/// An instructor who may be assigned to course sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    /// Stable identifier.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name (ranking tie-breaker).
    pub last_name: String,
    /// Institutional role; `CampusAdmin` carries a reduced unit cap.
    pub role: UserRole,
    /// Free-form designation; a substring `"regular"` marks permanent staff.
    pub designation: String,
    /// Department the instructor belongs to.
    pub department: String,
    /// Specialization keywords matched against course tags.
    pub specializations: Vec<String>,
    /// Subject codes or names previously taught.
    pub previous_subjects: Vec<String>,
    /// Years of teaching experience (0..=50).
    pub years_experience: u32,
    /// Preferred teaching window. `None` = any time.
    pub preferred_window: Option<TimeSlot>,
    /// Days the instructor accepts sessions on. Empty = every day.
    pub available_days: Vec<Weekday>,
    /// Account status.
    pub status: UserStatus,
}

impl Instructor {
    /// Creates an approved faculty instructor with the given id and name.
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role: UserRole::Faculty,
            designation: String::new(),
            department: String::new(),
            specializations: Vec::new(),
            previous_subjects: Vec::new(),
            years_experience: 0,
            preferred_window: None,
            available_days: Vec::new(),
            status: UserStatus::Approved,
        }
    }

    /// Sets the role.
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// Sets the designation string.
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = designation.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Adds a specialization keyword.
    pub fn with_specialization(mut self, keyword: impl Into<String>) -> Self {
        self.specializations.push(keyword.into());
        self
    }

    /// Adds a previously taught subject (code or name).
    pub fn with_previous_subject(mut self, subject: impl Into<String>) -> Self {
        self.previous_subjects.push(subject.into());
        self
    }

    /// Sets years of experience, clamped to 0..=50.
    pub fn with_experience(mut self, years: u32) -> Self {
        self.years_experience = years.min(50);
        self
    }

    /// Sets the preferred window directly.
    pub fn with_preferred_window(mut self, window: TimeSlot) -> Self {
        self.preferred_window = Some(window);
        self
    }

    /// Normalizes raw preferred-slot strings into the preferred window.
    ///
    /// Accepts both upstream encodings; anything unparseable leaves the
    /// instructor fully available.
    pub fn with_preferred_slots<S: AsRef<str>>(mut self, raw: &[S]) -> Self {
        self.preferred_window = parse_preferred_window(raw);
        self
    }

    /// Restricts the instructor to the given days.
    pub fn with_available_days(mut self, days: &[Weekday]) -> Self {
        self.available_days = days.to_vec();
        self
    }

    /// Sets the account status.
    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    /// Display name, `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the designation marks permanent staff.
    pub fn is_regular(&self) -> bool {
        self.designation.to_lowercase().contains("regular")
    }

    /// Whether the instructor accepts sessions on `day`.
    ///
    /// An empty available-day set means every day is acceptable.
    pub fn accepts_day(&self, day: Weekday) -> bool {
        self.available_days.is_empty() || self.available_days.contains(&day)
    }

    /// Whether `slot` lies within the preferred window (or no window is set).
    pub fn accepts_slot(&self, slot: TimeSlot) -> bool {
        match self.preferred_window {
            None => true,
            Some(window) => window.contains(slot),
        }
    }
}

/// Parses the preferred-window field from its raw string form.
///
/// Two encodings are recognized:
/// - the ordered pair `["start:HH:MM", "end:HH:MM"]`;
/// - a single display string `"8:00 AM - 5:00 PM"`.
///
/// Returns `None` (fully available) for anything else.
pub fn parse_preferred_window<S: AsRef<str>>(raw: &[S]) -> Option<TimeSlot> {
    match raw {
        [single] if single.as_ref().contains(" - ") => {
            let (from, to) = single.as_ref().split_once(" - ")?;
            let start = TimeOfDay::parse_12h(from).ok()?;
            let end = TimeOfDay::parse_12h(to).ok()?;
            (start < end).then_some(TimeSlot::new(start, end))
        }
        [first, second] => {
            let start: TimeOfDay = first.as_ref().strip_prefix("start:")?.parse().ok()?;
            let end: TimeOfDay = second.as_ref().strip_prefix("end:")?.parse().ok()?;
            (start < end).then_some(TimeSlot::new(start, end))
        }
        _ => None,
    }
}
