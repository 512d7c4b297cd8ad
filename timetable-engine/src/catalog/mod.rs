/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Course catalog loading and cohort grouping.
//!
//! The expected YAML structure is:
//! ```yaml
//! courses:
//!   - department: CSE
//!     semester: 2A
//!     code: CS201
//!     name: Data Structures
//!     faculty: Dr. Rao / Dr. Iyer
//!     classroom: C101
//!     lab_room: LAB-2
//!     l: 3
//!     t: 1
//!     p: 2
//!     s: 0
//!     c: 4
//! ```
//!
//! Catalog data is hand-maintained, so the loader is lenient about values:
//! hours may be integers, numeric strings, floats (truncated) or blank, and
//! anything unreadable counts as 0.  Text fields may be written as numbers
//! (`semester: 4`).  Structural problems (missing file, broken YAML, no
//! courses) are fatal.

pub mod directory;

use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use tracing::{debug, info, warn};

use crate::calendar::{Day, MAX_SLOTS_PER_DAY};
use crate::course::{CatalogRow, Hours};
use crate::scheduler::SchedulerError;

/// Largest accepted hour value: every slot of the widest possible week.
pub const MAX_WEEKLY_HOURS: u32 = (Day::COUNT * MAX_SLOTS_PER_DAY) as u32;

// ── Private YAML deserialization types ────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    courses: Vec<CourseEntry>,
}

#[derive(Debug, Deserialize)]
struct CourseEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    department: String,
    #[serde(default, deserialize_with = "lenient_text")]
    semester: String,
    #[serde(default, deserialize_with = "lenient_text")]
    code: String,
    #[serde(default, deserialize_with = "lenient_text")]
    name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    faculty: String,
    #[serde(default, deserialize_with = "lenient_text")]
    classroom: String,
    #[serde(default, deserialize_with = "lenient_text")]
    lab_room: String,
    #[serde(default, deserialize_with = "lenient_hours")]
    l: u32,
    #[serde(default, deserialize_with = "lenient_hours")]
    t: u32,
    #[serde(default, deserialize_with = "lenient_hours")]
    p: u32,
    #[serde(default, deserialize_with = "lenient_hours")]
    s: u32,
    #[serde(default, deserialize_with = "lenient_hours")]
    c: u32,
}

impl From<CourseEntry> for CatalogRow {
    fn from(e: CourseEntry) -> Self {
        let lab_room = Some(e.lab_room).filter(|r| !r.is_empty());
        CatalogRow {
            department: e.department,
            semester: e.semester,
            code: e.code,
            name: e.name,
            faculty: e.faculty,
            classroom: e.classroom,
            lab_room,
            hours: Hours {
                l: e.l,
                t: e.t,
                p: e.p,
                s: e.s,
                c: e.c,
            },
        }
    }
}

/// Text cell: strings are trimmed, numbers are printed, anything else is "".
fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Hour cell: the integer part of any non-negative number, 0 otherwise.
fn lenient_hours<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(hours_from_value(&value))
}

fn hours_from_value(value: &Value) -> u32 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() && n >= 0.0 => n.trunc().min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

/// Clamp every hour field of `row` to [`MAX_WEEKLY_HOURS`].
fn cap_hours(row: &mut CatalogRow) {
    let hours = &mut row.hours;
    let fields = [
        ("l", &mut hours.l),
        ("t", &mut hours.t),
        ("p", &mut hours.p),
        ("s", &mut hours.s),
        ("c", &mut hours.c),
    ];
    for (field, value) in fields {
        if *value > MAX_WEEKLY_HOURS {
            warn!(
                code = %row.code,
                field,
                hours = *value,
                cap = MAX_WEEKLY_HOURS,
                "hour value exceeds a week, capped"
            );
            *value = MAX_WEEKLY_HOURS;
        }
    }
}

// ── Cohort key ────────────────────────────────────────────────────────────────

/// Identity of one cohort: department, numeric term and optional section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CohortKey {
    pub department: String,
    pub term: u32,
    pub section: Option<char>,
}

impl CohortKey {
    /// Split a raw semester string into term and section.
    ///
    /// The section is the last character when it is a letter (upper-cased);
    /// the term is every digit of the string read as one number, so `"2A"`
    /// is term 2 section A and `"Sem 4"` is term 4 without a section.
    ///
    /// # Errors
    /// [`SchedulerError::InvalidSemester`] when the string has no digits.
    pub fn from_semester(department: &str, semester: &str) -> Result<Self, SchedulerError> {
        let semester = semester.trim();
        let section = semester
            .chars()
            .last()
            .filter(|c| c.is_alphabetic())
            .map(|c| c.to_ascii_uppercase());
        let digits: String = semester.chars().filter(char::is_ascii_digit).collect();
        let term = digits
            .parse::<u32>()
            .map_err(|_| SchedulerError::InvalidSemester {
                department: department.to_string(),
                semester: semester.to_string(),
            })?;

        Ok(Self {
            department: department.to_string(),
            term,
            section,
        })
    }

    /// Base name for this cohort's rendered files, e.g.
    /// `timetable_cse_semester_2_section_a`.
    pub fn file_stem(&self) -> String {
        let dept = self.department.replace(' ', "_").to_lowercase();
        match self.section {
            Some(s) => format!(
                "timetable_{dept}_semester_{}_section_{}",
                self.term,
                s.to_ascii_lowercase()
            ),
            None => format!("timetable_{dept}_semester_{}", self.term),
        }
    }

    /// Heading used by renderers: `CSE Department - Semester 2 - Section A`.
    pub fn title(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Department - Semester {}", self.department, self.term)?;
        if let Some(s) = self.section {
            write!(f, " - Section {s}")?;
        }
        Ok(())
    }
}

// ── Cohort ────────────────────────────────────────────────────────────────────

/// The catalog rows of one cohort, in catalog order.
#[derive(Debug, Clone)]
pub struct Cohort {
    pub key: CohortKey,
    /// Semester text as written in the catalog.
    pub semester: String,
    pub rows: Vec<CatalogRow>,
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// The normalised course list for one run.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rows: Vec<CatalogRow>,
}

impl Catalog {
    /// Parses `path` into a catalog.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, the YAML is invalid or
    /// the `courses` list is empty.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading course catalog from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open catalog file: {}", path.display()))?;

        let file: CatalogFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        if file.courses.is_empty() {
            bail!("No courses found in catalog: {}", path.display());
        }

        let catalog = Self::from_rows(file.courses.into_iter().map(CatalogRow::from).collect());
        for row in catalog.rows() {
            debug!(
                department = %row.department,
                semester = %row.semester,
                code = %row.code,
                l = row.hours.l,
                t = row.hours.t,
                p = row.hours.p,
                "course loaded"
            );
        }

        info!(courses = catalog.len(), "Course catalog loaded");
        Ok(catalog)
    }

    /// Build a catalog from rows, capping hour values at
    /// [`MAX_WEEKLY_HOURS`].
    pub fn from_rows(mut rows: Vec<CatalogRow>) -> Self {
        rows.iter_mut().for_each(cap_hours);
        Self { rows }
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Group rows into cohorts.
    ///
    /// Departments come in order of first appearance; within a department,
    /// distinct semester strings are sorted lexicographically.  Spellings
    /// that yield the same [`CohortKey`] (`"2A"`, `"2a"`) form one cohort,
    /// named after the first spelling in that order.  Rows keep catalog
    /// order inside a cohort.
    ///
    /// # Errors
    /// [`SchedulerError::EmptyCatalog`] for a catalog without rows, and
    /// [`SchedulerError::InvalidSemester`] for a semester without a term
    /// number.
    pub fn cohorts(&self) -> Result<Vec<Cohort>, SchedulerError> {
        if self.rows.is_empty() {
            return Err(SchedulerError::EmptyCatalog);
        }

        let mut departments: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !departments.contains(&row.department.as_str()) {
                departments.push(&row.department);
            }
        }

        let mut cohorts = Vec::new();
        for department in departments {
            let mut semesters: Vec<&str> = self
                .rows
                .iter()
                .filter(|r| r.department == department)
                .map(|r| r.semester.as_str())
                .collect();
            semesters.sort_unstable();
            semesters.dedup();

            let mut keyed: Vec<(CohortKey, &str)> = Vec::new();
            for semester in semesters {
                let key = CohortKey::from_semester(department, semester)?;
                match keyed.iter().find(|(k, _)| *k == key) {
                    Some((_, first)) => warn!(
                        department,
                        semester,
                        merged_into = *first,
                        "semester spellings share a cohort, merging"
                    ),
                    None => keyed.push((key, semester)),
                }
            }

            for (key, semester) in keyed {
                let rows = self
                    .rows
                    .iter()
                    .filter(|r| {
                        r.department == department
                            && CohortKey::from_semester(department, &r.semester)
                                .is_ok_and(|k| k == key)
                    })
                    .cloned()
                    .collect();
                cohorts.push(Cohort {
                    key,
                    semester: semester.to_string(),
                    rows,
                });
            }
        }
        Ok(cohorts)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
