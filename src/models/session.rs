//! Session rules and scheduled sessions.
//!
//! A [`SessionRule`] describes how a course's lecture or laboratory units
//! expand into concrete weekly sessions; a [`ScheduledSession`] is one
//! committed placement, fully denormalized for downstream consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Semester, TimeOfDay, TimeSlot, Weekday};

/// Kind of a weekly session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionTag {
    Lecture,
    Laboratory,
}

impl SessionTag {
    /// Placement priority; lectures are placed before laboratories.
    pub const fn priority(self) -> u8 {
        match self {
            SessionTag::Lecture => 1,
            SessionTag::Laboratory => 2,
        }
    }
}

impl fmt::Display for SessionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionTag::Lecture => f.write_str("Lecture"),
            SessionTag::Laboratory => f.write_str("Laboratory"),
        }
    }
}

/// How many weekly sessions of what length one course component needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionRule {
    /// Lecture or laboratory.
    pub tag: SessionTag,
    /// Length of each session in minutes (60 or 90).
    pub minutes_per_session: u16,
    /// Number of sessions per week.
    pub sessions_per_week: u32,
    /// Total weekly hours this rule demands.
    pub total_hours: f64,
}

impl SessionRule {
    fn new(tag: SessionTag, minutes_per_session: u16, sessions_per_week: u32) -> Self {
        let total_hours = sessions_per_week as f64 * minutes_per_session as f64 / 60.0;
        Self {
            tag,
            minutes_per_session,
            sessions_per_week,
            total_hours,
        }
    }

    /// Session length in hours (1.0 or 1.5).
    pub fn hours_per_session(&self) -> f64 {
        self.minutes_per_session as f64 / 60.0
    }

    /// Expands lecture/laboratory unit counts into session rules,
    /// lectures first.
    ///
    /// Lectures: 3 units → 2 × 1.5h, 2 → 2 × 1h, 1 → 1 × 1h, any other
    /// positive `n` → `n` × 1h. Laboratories: under the `BSCS` and `ACT`
    /// departments each lab unit expands to 3 weekly hours as 2 × 1.5h;
    /// elsewhere each unit is a single 1-hour session.
    pub fn derive(lec_units: u32, lab_units: u32, department: Option<&str>) -> Vec<SessionRule> {
        let mut rules = Vec::new();

        match lec_units {
            0 => {}
            1 => rules.push(SessionRule::new(SessionTag::Lecture, 60, 1)),
            2 => rules.push(SessionRule::new(SessionTag::Lecture, 60, 2)),
            3 => rules.push(SessionRule::new(SessionTag::Lecture, 90, 2)),
            n => rules.push(SessionRule::new(SessionTag::Lecture, 60, n)),
        }

        let split_labs = department
            .map(|d| matches!(d.to_uppercase().as_str(), "BSCS" | "ACT"))
            .unwrap_or(false);
        for _ in 0..lab_units {
            if split_labs {
                rules.push(SessionRule::new(SessionTag::Laboratory, 90, 2));
            } else {
                rules.push(SessionRule::new(SessionTag::Laboratory, 60, 1));
            }
        }

        rules.sort_by_key(|r| r.tag.priority());
        rules
    }
}

/// One committed session placement.
///
/// Carries the full denormalized payload so consumers never join back to
/// the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSession {
    /// Subject code of the placed course.
    pub subject_code: String,
    /// Subject name.
    pub subject_name: String,
    /// Program code of the cohort.
    pub program: String,
    /// Cohort year level.
    pub year_level: String,
    /// Semester the session belongs to.
    pub semester: Semester,
    /// Curriculum year the schedule was generated for.
    pub academic_year: String,
    /// Lecture or laboratory.
    #[serde(rename = "type")]
    pub tag: SessionTag,
    /// Weekday the session runs on.
    pub day: Weekday,
    /// Session start.
    pub start_time: TimeOfDay,
    /// Session end.
    pub end_time: TimeOfDay,
    /// Total units of the course.
    pub units: u32,
    /// Lecture units of the course.
    pub lec_units: u32,
    /// Laboratory units of the course.
    pub lab_units: u32,
    /// Subject tags of the course.
    pub tags: Vec<String>,
    /// Assigned instructor id.
    pub faculty_id: String,
    /// Assigned instructor display name.
    pub faculty_name: String,
    /// Assigned room id.
    pub room_id: String,
    /// Assigned room display name.
    pub room_name: String,
    /// Names of the ranked candidates considered for the course.
    pub recommended_faculty: Vec<String>,
}

impl ScheduledSession {
    /// The session's time interval.
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.start_time, self.end_time)
    }

    /// Session length in minutes.
    pub fn duration_min(&self) -> u16 {
        self.slot().duration_min()
    }

    /// Session length in hours.
    pub fn duration_hours(&self) -> f64 {
        self.duration_min() as f64 / 60.0
    }
}
