//! Time-of-day arithmetic, teaching slots, and weekday tables.
//!
//! All times are minutes since midnight. The teaching day runs 07:00–20:00
//! with a fixed lunch break 12:00–13:00 during which nothing is scheduled.
//!
//! # Slot Tables
//! Two canonical tables are precomputed: hourly 1-hour slots and
//! half-hour-cadence 1.5-hour slots. Both exclude the lunch block and
//! never run past 20:00.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Start of the teaching day (07:00).
pub const DAY_START: TimeOfDay = TimeOfDay::hm(7, 0);
/// End of the teaching day (20:00).
pub const DAY_END: TimeOfDay = TimeOfDay::hm(20, 0);
/// Lunch break, during which no session may run.
pub const LUNCH: TimeSlot = TimeSlot {
    start: TimeOfDay::hm(12, 0),
    end: TimeOfDay::hm(13, 0),
};
/// Minimum rest between two sessions of the same instructor on one day (minutes).
pub const MIN_REST_GAP_MIN: u16 = 30;

/// A clock time within one day, stored as minutes since midnight.
///
/// Serializes as a 24-hour `"HH:MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

/// Error parsing a clock-time string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid time `{0}`, expected HH:MM")]
pub struct ParseTimeError(pub String);

impl TimeOfDay {
    /// Creates a time from hour and minute components.
    pub const fn hm(hour: u16, minute: u16) -> Self {
        Self(hour * 60 + minute)
    }

    /// Creates a time from minutes since midnight.
    pub const fn from_minutes(minutes: u16) -> Self {
        Self(minutes)
    }

    /// Minutes since midnight.
    #[inline]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component (0..=23).
    #[inline]
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Minute component (0..=59).
    #[inline]
    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    /// This time shifted forward by `minutes`.
    pub const fn plus(self, minutes: u16) -> Self {
        Self(self.0 + minutes)
    }

    /// Parses a 12-hour string such as `"8:00 AM"` or `"12:30 PM"`.
    pub fn parse_12h(s: &str) -> Result<Self, ParseTimeError> {
        let err = || ParseTimeError(s.to_string());
        let (clock, meridiem) = s.trim().rsplit_once(' ').ok_or_else(err)?;
        let t: TimeOfDay = clock.trim().parse().map_err(|_| err())?;
        let hour12 = t.hour();
        if hour12 == 0 || hour12 > 12 {
            return Err(err());
        }
        let hour = match meridiem.trim().to_ascii_uppercase().as_str() {
            "AM" => hour12 % 12,
            "PM" => hour12 % 12 + 12,
            _ => return Err(err()),
        };
        Ok(Self::hm(hour, t.minute()))
    }

    /// Formats as a 12-hour string, e.g. `"7:30 AM"`.
    pub fn format_12h(self) -> String {
        let meridiem = if self.hour() < 12 { "AM" } else { "PM" };
        let hour12 = match self.hour() % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour12, self.minute(), meridiem)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeError(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
        let hour: u16 = h.trim().parse().map_err(|_| err())?;
        let minute: u16 = m.trim().parse().map_err(|_| err())?;
        if hour > 23 || minute > 59 {
            return Err(err());
        }
        Ok(Self::hm(hour, minute))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

/// A time interval `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Interval start (inclusive).
    pub start: TimeOfDay,
    /// Interval end (exclusive for overlap purposes).
    pub end: TimeOfDay,
}

impl TimeSlot {
    /// Creates a new slot.
    pub const fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Slot length in minutes.
    #[inline]
    pub const fn duration_min(self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// Whether two slots overlap (half-open interval semantics).
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely within this slot.
    pub fn contains(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the slot is a legal teaching slot: inside the teaching day,
    /// non-empty, and clear of the lunch break.
    pub fn is_teaching_slot(self) -> bool {
        self.start >= DAY_START && self.end <= DAY_END && self.end > self.start
            && !self.overlaps(LUNCH)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Enumerates every valid teaching slot of `duration_min` length starting
/// at a `step_min` cadence from the start of the teaching day.
fn slot_table(duration_min: u16, step_min: u16) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    let mut start = DAY_START;
    while start.plus(duration_min) <= DAY_END {
        let slot = TimeSlot::new(start, start.plus(duration_min));
        if slot.is_teaching_slot() {
            slots.push(slot);
        }
        start = start.plus(step_min);
    }
    slots
}

/// The canonical 1-hour slot table: 07:00–08:00 .. 11:00–12:00, 13:00–14:00 .. 19:00–20:00.
pub fn one_hour_slots() -> Vec<TimeSlot> {
    slot_table(60, 60)
}

/// The canonical 1.5-hour slot table at a half-hour cadence.
///
/// The latest slot starts at 18:30 and finishes exactly at 20:00.
pub fn ninety_minute_slots() -> Vec<TimeSlot> {
    slot_table(90, 30)
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        f.write_str(name)
    }
}

/// A pair of weekdays shared by a two-session-per-week subject.
pub type DayPair = (Weekday, Weekday);

/// Day pairs searched, in order, when placing paired lecture sessions.
pub const LECTURE_DAY_PAIRS: [DayPair; 5] = [
    (Weekday::Monday, Weekday::Wednesday),
    (Weekday::Tuesday, Weekday::Thursday),
    (Weekday::Monday, Weekday::Friday),
    (Weekday::Wednesday, Weekday::Friday),
    (Weekday::Tuesday, Weekday::Friday),
];

/// Day pairs searched, in order, when placing paired laboratory sessions.
pub const LAB_DAY_PAIRS: [DayPair; 5] = [
    (Weekday::Tuesday, Weekday::Thursday),
    (Weekday::Wednesday, Weekday::Friday),
    (Weekday::Monday, Weekday::Friday),
    (Weekday::Monday, Weekday::Wednesday),
    (Weekday::Tuesday, Weekday::Friday),
];

/// Single-day search order for one-session-per-week lectures.
///
/// Derived from [`LECTURE_DAY_PAIRS`] by first occurrence.
pub const LECTURE_DAYS: [Weekday; 5] = [
    Weekday::Monday,
    Weekday::Wednesday,
    Weekday::Tuesday,
    Weekday::Thursday,
    Weekday::Friday,
];

/// Single-day search order for one-session-per-week laboratories.
///
/// Derived from [`LAB_DAY_PAIRS`] by first occurrence.
pub const LAB_DAYS: [Weekday; 5] = [
    Weekday::Tuesday,
    Weekday::Thursday,
    Weekday::Wednesday,
    Weekday::Friday,
    Weekday::Monday,
];
