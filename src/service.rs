//! The external operations of the schedule generator.
//!
//! [`ScheduleService`] wires the persistence boundary to the scheduler
//! core and exposes the four operations consumers call: `generate`,
//! `save`, `list`, and `prospectus`. Generation never persists; saving
//! replaces the stored timetable for the (curriculum year, semester)
//! key of the sessions being saved.

use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ScheduleError;
use crate::models::{Course, ScheduledSession, Semester};
use crate::scheduler::{GenerationResult, Scheduler};
use crate::store::{PersistedSession, SaveOutcome, TimetableStore};

/// Catalog key of one generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationQuery {
    /// Curriculum year to schedule (e.g. `"2024-2025"`).
    pub curriculum_year: String,
    /// Semester to schedule.
    pub semester: Semester,
    /// Program filter; `None` and `"all"` are equivalent.
    pub program: Option<String>,
}

impl GenerationQuery {
    /// Creates a query for every program of a catalog key.
    pub fn new(curriculum_year: impl Into<String>, semester: Semester) -> Self {
        Self {
            curriculum_year: curriculum_year.into(),
            semester,
            program: None,
        }
    }

    /// Restricts the query to one program.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// The effective program filter, treating `"all"` as no filter.
    fn program_filter(&self) -> Option<&str> {
        self.program
            .as_deref()
            .filter(|p| !p.trim().is_empty() && !p.eq_ignore_ascii_case("all"))
    }
}

/// Curriculum courses grouped for display, by year level then semester.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prospectus {
    pub academic_year: String,
    pub program: String,
    pub year_levels: Vec<ProspectusYear>,
}

/// Courses of one year level, grouped by semester.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectusYear {
    pub year_level: String,
    pub semesters: Vec<ProspectusTerm>,
}

/// Courses of one semester within a year level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectusTerm {
    pub semester: Semester,
    pub courses: Vec<Course>,
}

/// Canonical display order for year levels; unknown levels sort last.
fn year_level_rank(year_level: &str) -> u8 {
    match year_level {
        "1st Year" => 0,
        "2nd Year" => 1,
        "3rd Year" => 2,
        "4th Year" => 3,
        _ => 4,
    }
}

/// Schedule generation and persistence, bound to one store.
pub struct ScheduleService<S> {
    store: S,
    scheduler: Scheduler,
}

impl<S: TimetableStore> ScheduleService<S> {
    /// Creates a service over a store with default scheduler settings.
    pub fn new(store: S) -> Self {
        Self {
            store,
            scheduler: Scheduler::new(),
        }
    }

    /// Replaces the scheduler (e.g. custom caps).
    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generates a schedule for one catalog key. Does not persist.
    ///
    /// # Errors
    /// - [`ScheduleError::MissingParameter`] when the curriculum year is empty.
    /// - [`ScheduleError::NoCourses`] when the catalog has no matching courses.
    /// - [`ScheduleError::Storage`] when the store fails.
    pub fn generate(&self, query: &GenerationQuery) -> Result<GenerationResult, ScheduleError> {
        if query.curriculum_year.trim().is_empty() {
            return Err(ScheduleError::MissingParameter("curriculum_year"));
        }

        let courses = self.store.courses(
            &query.curriculum_year,
            query.semester,
            query.program_filter(),
        )?;
        if courses.is_empty() {
            return Err(ScheduleError::NoCourses {
                curriculum_year: query.curriculum_year.clone(),
                semester: query.semester,
            });
        }

        let instructors = self.store.instructors()?;
        let rooms = self.store.rooms()?;
        let scheduler = match self.store.max_units()? {
            Some(max) => self.scheduler.clone().with_max_units(max),
            None => self.scheduler.clone(),
        };

        let result = scheduler.generate(&courses, &instructors, &rooms);
        info!(
            "generated {} sessions for {} {} (score {})",
            result.subjects.len(),
            query.curriculum_year,
            query.semester,
            result.optimization_score
        );
        Ok(result)
    }

    /// Persists a generated schedule, replacing whatever was stored for
    /// the (curriculum year, semester) key of the first session.
    pub fn save(&mut self, sessions: &[ScheduledSession]) -> Result<SaveOutcome, ScheduleError> {
        let first = match sessions.first() {
            Some(s) => s,
            None => return Err(ScheduleError::MissingParameter("sessions")),
        };
        let now = Utc::now();
        let rows = sessions
            .iter()
            .map(|s| PersistedSession::from_session(s, now))
            .collect();
        self.store
            .replace_schedule(&first.academic_year, first.semester, rows)
    }

    /// Persisted sessions, optionally narrowed to one academic year.
    pub fn list(&self, academic_year: Option<&str>) -> Result<Vec<PersistedSession>, ScheduleError> {
        self.store.sessions(academic_year)
    }

    /// Curriculum courses of one program grouped by year level and
    /// semester. Pure transformation over the stored catalog.
    pub fn prospectus(
        &self,
        academic_year: &str,
        program: &str,
    ) -> Result<Prospectus, ScheduleError> {
        if academic_year.trim().is_empty() {
            return Err(ScheduleError::MissingParameter("academic_year"));
        }
        if program.trim().is_empty() {
            return Err(ScheduleError::MissingParameter("program"));
        }

        let mut grouped: BTreeMap<(u8, String), BTreeMap<Semester, Vec<Course>>> = BTreeMap::new();
        for semester in [Semester::First, Semester::Second, Semester::Summer] {
            for course in self.store.courses(academic_year, semester, Some(program))? {
                grouped
                    .entry((year_level_rank(&course.year_level), course.year_level.clone()))
                    .or_default()
                    .entry(semester)
                    .or_default()
                    .push(course);
            }
        }

        let year_levels = grouped
            .into_iter()
            .map(|((_, year_level), semesters)| ProspectusYear {
                year_level,
                semesters: semesters
                    .into_iter()
                    .map(|(semester, courses)| ProspectusTerm { semester, courses })
                    .collect(),
            })
            .collect();

        Ok(Prospectus {
            academic_year: academic_year.to_string(),
            program: program.to_string(),
            year_levels,
        })
    }
}
