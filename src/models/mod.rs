//! Timetabling domain models.
//!
//! Core data types for curriculum scheduling: the course catalog,
//! instructors with qualifications and availability, rooms, the clock/slot
//! arithmetic, and the session types the generator produces.

mod course;
mod instructor;
mod room;
mod session;
mod timeslot;

pub use course::{Course, ParseSemesterError, Semester};
pub use instructor::{parse_preferred_window, Instructor, UserRole, UserStatus};
pub use room::{Room, RoomKind};
pub use session::{ScheduledSession, SessionRule, SessionTag};
pub use timeslot::{
    ninety_minute_slots, one_hour_slots, DayPair, ParseTimeError, TimeOfDay, TimeSlot, Weekday,
    DAY_END, DAY_START, LAB_DAYS, LAB_DAY_PAIRS, LECTURE_DAYS, LECTURE_DAY_PAIRS, LUNCH,
    MIN_REST_GAP_MIN,
};
