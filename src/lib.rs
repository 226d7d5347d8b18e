//! Constraint-based weekly class-schedule generation for university curricula.
//!
//! Given a curriculum catalog, an instructor roster, and a set of rooms,
//! the generator expands each course's lecture/laboratory units into
//! weekly session rules, ranks qualified faculty per course, and greedily
//! places paired sessions into (day, time, room, instructor) slots under
//! a hard conflict model: no faculty, room, or cohort double-booking,
//! working hours 07:00–20:00 minus lunch, 30-minute faculty rest gaps,
//! per-instructor unit caps, and declared availability. A validation pass
//! recomputes per-subject hours and grades the run.
//!
//! # Modules
//!
//! - **`models`**: domain types (`Course`, `Instructor`, `Room`,
//!   `SessionRule`, `ScheduledSession`) and clock/slot arithmetic
//! - **`ranking`**: composite faculty scoring and candidate pools
//! - **`scheduler`**: the placement engine and its booking ledger
//! - **`validation`**: post-placement audit and optimization score
//! - **`store`**: persistence boundary, replace-per-(year, semester)
//! - **`service`**: the external operations (generate, save, list, prospectus)
//!
//! # Example
//!
//! ```
//! use timetabler::models::{Course, Instructor, Room, Semester};
//! use timetabler::service::{GenerationQuery, ScheduleService};
//! use timetabler::store::MemoryStore;
//!
//! let store = MemoryStore::new()
//!     .with_courses(vec![Course::new("CS101")
//!         .with_name("Introduction to Computing")
//!         .with_curriculum_year("2024-2025")
//!         .with_program("BSCS")
//!         .with_year_level("1st Year")
//!         .with_semester(Semester::First)
//!         .with_units(3, 0)
//!         .with_tag("Programming")])
//!     .with_instructors(vec![Instructor::new("F1", "Ada", "Lovelace")
//!         .with_specialization("Programming")])
//!     .with_rooms(vec![Room::new("R1", "Room 101")]);
//!
//! let mut service = ScheduleService::new(store);
//! let result = service
//!     .generate(&GenerationQuery::new("2024-2025", Semester::First))
//!     .unwrap();
//! assert_eq!(result.optimization_score, 100);
//!
//! let saved = service.save(&result.subjects).unwrap();
//! assert_eq!(saved.inserted, 2);
//! ```

pub mod error;
pub mod models;
pub mod ranking;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod validation;

pub use error::ScheduleError;
