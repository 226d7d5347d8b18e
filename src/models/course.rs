//! Curriculum course model.
//!
//! A course is one row of the curriculum catalog for a given curriculum
//! year: a subject with lecture/laboratory unit counts, offered to one
//! program cohort in one semester. Immutable during a generation run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Academic term a course is offered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Semester {
    /// `"1st Semester"`
    #[serde(rename = "1st Semester")]
    First,
    /// `"2nd Semester"`
    #[serde(rename = "2nd Semester")]
    Second,
    /// `"Summer"`
    Summer,
}

/// Error parsing a semester string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown semester `{0}`")]
pub struct ParseSemesterError(pub String);

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Semester::First => "1st Semester",
            Semester::Second => "2nd Semester",
            Semester::Summer => "Summer",
        };
        f.write_str(name)
    }
}

impl FromStr for Semester {
    type Err = ParseSemesterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1st Semester" => Ok(Semester::First),
            "2nd Semester" => Ok(Semester::Second),
            "Summer" => Ok(Semester::Summer),
            other => Err(ParseSemesterError(other.to_string())),
        }
    }
}

/// A curriculum course to be scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Curriculum year the course belongs to (e.g. `"2024-2025"`).
    pub curriculum_year: String,
    /// Program code (e.g. `"BSCS"`).
    pub program: String,
    /// Year level of the cohort (`"1st Year"` .. `"4th Year"`).
    pub year_level: String,
    /// Semester the course is offered in.
    pub semester: Semester,
    /// Subject code (e.g. `"CS101"`).
    pub subject_code: String,
    /// Subject name.
    pub subject_name: String,
    /// Weekly lecture units.
    pub lec_units: u32,
    /// Weekly laboratory units.
    pub lab_units: u32,
    /// Total units carried by the course.
    pub units: u32,
    /// Domain keywords used for faculty matching.
    pub tags: Vec<String>,
}

impl Course {
    /// Creates a course with the given subject code.
    pub fn new(subject_code: impl Into<String>) -> Self {
        Self {
            curriculum_year: String::new(),
            program: String::new(),
            year_level: String::new(),
            semester: Semester::First,
            subject_code: subject_code.into(),
            subject_name: String::new(),
            lec_units: 0,
            lab_units: 0,
            units: 0,
            tags: Vec::new(),
        }
    }

    /// Sets the subject name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.subject_name = name.into();
        self
    }

    /// Sets the curriculum year.
    pub fn with_curriculum_year(mut self, year: impl Into<String>) -> Self {
        self.curriculum_year = year.into();
        self
    }

    /// Sets the program code.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Sets the cohort year level.
    pub fn with_year_level(mut self, year_level: impl Into<String>) -> Self {
        self.year_level = year_level.into();
        self
    }

    /// Sets the semester.
    pub fn with_semester(mut self, semester: Semester) -> Self {
        self.semester = semester;
        self
    }

    /// Sets lecture and laboratory units; total units default to their sum.
    pub fn with_units(mut self, lec: u32, lab: u32) -> Self {
        self.lec_units = lec;
        self.lab_units = lab;
        self.units = lec + lab;
        self
    }

    /// Overrides the total unit count.
    pub fn with_total_units(mut self, units: u32) -> Self {
        self.units = units;
        self
    }

    /// Adds a subject tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}
