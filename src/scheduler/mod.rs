//! Schedule generation.
//!
//! The placement engine walks the course catalog in order and greedily
//! commits each course's weekly sessions into (day, time, room,
//! instructor) slots, consulting the faculty ranking and the booking
//! ledger. Placement is one-shot: there is no backtracking across
//! already-placed courses.
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling"

mod bookings;
mod engine;

pub use bookings::{BookingLedger, CohortKey};
pub use engine::{GenerationResult, Scheduler, SchedulerConfig};
