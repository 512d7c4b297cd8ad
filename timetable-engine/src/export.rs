/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! JSON hand-off document for external renderers.
//!
//! One [`RunExport`] describes a whole generation run: every cohort's
//! placements, legend and unscheduled sessions, plus an index of cohorts per
//! department.  Renderers (HTML pages, spreadsheets) read this document and
//! never see engine types.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "timetables": [
//!     {
//!       "department": "CSE", "term": 2, "section": "A",
//!       "title": "CSE Department - Semester 2 - Section A",
//!       "file_stem": "timetable_cse_semester_2_section_a",
//!       "break_offset": 0, "rest_slots": [3, 7, 8, 9],
//!       "days": ["Monday", ...], "slots": ["09:00 AM - 09:30 AM", ...],
//!       "placements": [ { "day": "Monday", "start": 0, "length": 3, ... } ],
//!       "legend": [ { "code": "CS201", "color": "FFD6E0", ... } ],
//!       "unscheduled": []
//!     }
//!   ],
//!   "index": { "CSE": [ { "term": 2, "section": "A", "file_stem": "..." } ] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::calendar::clock::format_12h;
use crate::calendar::{Day, TimeSlots};
use crate::course::SessionType;
use crate::palette::{LegendEntry, Rgb};
use crate::runner::CohortTimetable;

// ── Document types ────────────────────────────────────────────────────────────

/// One committed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementExport {
    pub day: Day,
    pub start: usize,
    pub length: usize,
    /// `"09:00 AM - 10:30 AM"`.
    pub time: String,
    #[serde(rename = "type")]
    pub kind: SessionType,
    pub code: String,
    pub name: String,
    pub faculty: String,
    pub room: String,
    pub color: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnscheduledExport {
    #[serde(rename = "type")]
    pub kind: SessionType,
    pub code: String,
    pub name: String,
    pub faculty: String,
    pub room: String,
    pub reason: String,
}

/// Everything a renderer needs for one cohort.
#[derive(Debug, Clone, Serialize)]
pub struct TimetableExport {
    pub department: String,
    pub semester: String,
    pub term: u32,
    pub section: Option<char>,
    pub title: String,
    pub file_stem: String,
    pub break_offset: u8,
    pub rest_slots: Vec<usize>,
    pub days: Vec<&'static str>,
    pub slots: Vec<String>,
    pub placements: Vec<PlacementExport>,
    pub legend: Vec<LegendEntry>,
    pub unscheduled: Vec<UnscheduledExport>,
}

/// Index link to one cohort's rendered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub term: u32,
    pub section: Option<char>,
    pub file_stem: String,
}

/// The complete hand-off document for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunExport {
    /// Seed of the random source, when known.
    pub seed: Option<u64>,
    pub timetables: Vec<TimetableExport>,
    /// Department → cohorts, sorted by term then section.
    pub index: BTreeMap<String, Vec<IndexEntry>>,
}

// ── Building ──────────────────────────────────────────────────────────────────

impl TimetableExport {
    pub fn build(slots: &TimeSlots, timetable: &CohortTimetable) -> Self {
        let key = &timetable.key;

        let placements = timetable
            .grid
            .placements()
            .iter()
            .map(|p| PlacementExport {
                day: p.day,
                start: p.start,
                length: p.len,
                time: block_label(slots, p.start, p.len),
                kind: p.session.kind,
                code: p.session.course_code.clone(),
                name: p.session.course_name.clone(),
                faculty: p.session.faculty_display.clone(),
                room: p.session.room.to_string(),
                color: timetable.legend.color_of(&p.session.course_code),
            })
            .collect();

        let unscheduled = timetable
            .unscheduled
            .iter()
            .map(|u| UnscheduledExport {
                kind: u.session.kind,
                code: u.session.course_code.clone(),
                name: u.session.course_name.clone(),
                faculty: u.session.faculty_display.clone(),
                room: u.session.room.to_string(),
                reason: u.reason.to_string(),
            })
            .collect();

        Self {
            department: key.department.clone(),
            semester: timetable.semester.clone(),
            term: key.term,
            section: key.section,
            title: key.title(),
            file_stem: key.file_stem(),
            break_offset: timetable.break_offset,
            rest_slots: timetable.rest_slots.clone(),
            days: Day::ALL.iter().map(|d| d.name()).collect(),
            slots: slots.iter().map(|s| s.label()).collect(),
            placements,
            legend: timetable.legend.entries().to_vec(),
            unscheduled,
        }
    }
}

/// Start of the first slot to end of the last, in 12-hour form.
fn block_label(slots: &TimeSlots, start: usize, len: usize) -> String {
    let first = slots.get(start);
    let last = slots.get(start + len.saturating_sub(1));
    match (first, last) {
        (Some(a), Some(b)) => format!(
            "{} - {}",
            format_12h(a.start_minute),
            format_12h(b.end_minute)
        ),
        _ => String::new(),
    }
}

impl RunExport {
    pub fn build(slots: &TimeSlots, timetables: &[CohortTimetable], seed: Option<u64>) -> Self {
        let mut index: BTreeMap<String, Vec<IndexEntry>> = BTreeMap::new();
        for t in timetables {
            index
                .entry(t.key.department.clone())
                .or_default()
                .push(IndexEntry {
                    term: t.key.term,
                    section: t.key.section,
                    file_stem: t.key.file_stem(),
                });
        }
        for entries in index.values_mut() {
            entries.sort_by(|a, b| (a.term, a.section).cmp(&(b.term, b.section)));
        }

        Self {
            seed,
            timetables: timetables
                .iter()
                .map(|t| TimetableExport::build(slots, t))
                .collect(),
            index,
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialise timetable export")
    }

    /// Write the document as pretty JSON to `path`.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json_string()?;
        std::fs::write(path, json)
            .with_context(|| format!("Cannot write export file: {}", path.display()))?;
        info!(
            path = %path.display(),
            timetables = self.timetables.len(),
            "Timetable export written"
        );
        Ok(())
    }

    /// One `info!` line per cohort.
    pub fn log_summary(&self) {
        for t in &self.timetables {
            info!(
                cohort = %t.title,
                file_stem = %t.file_stem,
                placements = t.placements.len(),
                courses = t.legend.len(),
                unscheduled = t.unscheduled.len(),
                "Timetable ready"
            );
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
