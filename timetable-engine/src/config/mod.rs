/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Timetable configuration loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! day:
//!   start: "09:00"
//!   end: "18:30"
//! breaks:
//!   morning: "10:30"
//!   lunch_start: "12:30"
//!   lunch_slots: 3
//! max_attempts: 1000
//! offsets:
//!   CSE:
//!     2A: 0
//!     2B: 1
//!   ECE:
//!     4: 0
//! ```
//!
//! Every section is optional; absent values fall back to
//! [`TimetableConfig::default`].  Offsets select which 30-minute step of the
//! lunch span a cohort rests in; cohorts without an entry use offset 0.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::calendar::clock::{format_24h, parse_hhmm};
use crate::calendar::{TimeSlots, MAX_SLOTS_PER_DAY, SLOT_MINUTES};
use crate::scheduler::DEFAULT_MAX_ATTEMPTS;

/// Largest accepted lunch offset (lunch may start at most one hour late).
pub const MAX_BREAK_OFFSET: u8 = 2;

// ── Private YAML deserialization types ────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    day: Option<DayEntry>,
    #[serde(default)]
    breaks: Option<BreaksEntry>,
    #[serde(default)]
    max_attempts: Option<usize>,
    /// department → (semester key → offset).  Semester keys may be written
    /// unquoted (`4: 0`), so they are read as raw YAML values.
    #[serde(default)]
    offsets: HashMap<String, serde_yaml::Mapping>,
}

#[derive(Debug, Deserialize)]
struct DayEntry {
    start: Option<String>,
    end: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BreaksEntry {
    morning: Option<String>,
    lunch_start: Option<String>,
    lunch_slots: Option<u32>,
}

// ── Public data structures ────────────────────────────────────────────────────

/// Rest-period settings shared by every cohort.  All times are minutes after
/// midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakSettings {
    /// Start of the fixed one-slot morning break.
    pub morning: u32,
    /// Start of the lunch span at offset 0.
    pub lunch_start: u32,
    /// Length of a cohort's lunch break in slots.
    pub lunch_slots: u32,
}

impl Default for BreakSettings {
    fn default() -> Self {
        Self {
            morning: 10 * 60 + 30,
            lunch_start: 12 * 60 + 30,
            lunch_slots: 3,
        }
    }
}

/// Lunch offsets keyed by department, then by `"{term}{section}"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakOffsets {
    table: HashMap<String, HashMap<String, u8>>,
}

impl BreakOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the offset for `department` / `semester_key` (e.g. `"2A"`, `"8"`).
    pub fn insert(&mut self, department: &str, semester_key: &str, offset: u8) {
        self.table
            .entry(department.to_string())
            .or_default()
            .insert(semester_key.to_string(), offset);
    }

    /// Offset for a cohort; `0` when the department or semester is unknown.
    pub fn lookup(&self, department: &str, term: u32, section: Option<char>) -> u8 {
        let key = match section {
            Some(s) => format!("{term}{s}"),
            None => term.to_string(),
        };
        self.table
            .get(department)
            .and_then(|d| d.get(&key))
            .copied()
            .unwrap_or(0)
    }

    /// Total number of configured entries across departments.
    pub fn len(&self) -> usize {
        self.table.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything a generation run needs besides the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableConfig {
    /// First slot start, minutes after midnight.
    pub day_start: u32,
    /// End of the teaching day, minutes after midnight.
    pub day_end: u32,
    pub breaks: BreakSettings,
    /// Retry ceiling for every slot search.
    pub max_attempts: usize,
    pub offsets: BreakOffsets,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            day_start: 9 * 60,
            day_end: 18 * 60 + 30,
            breaks: BreakSettings::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            offsets: BreakOffsets::new(),
        }
    }
}

impl TimetableConfig {
    /// Parses `path` into a validated configuration.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, the YAML is invalid, a
    /// time is not `HH:MM`, the day window is empty or wider than 64 slots,
    /// an offset exceeds [`MAX_BREAK_OFFSET`], or `max_attempts` is zero.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading timetable configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        let mut cfg = Self::default();

        if let Some(day) = file.day {
            if let Some(start) = day.start {
                cfg.day_start = parse_hhmm(&start).context("day.start")?;
            }
            if let Some(end) = day.end {
                cfg.day_end = parse_hhmm(&end).context("day.end")?;
            }
        }

        if let Some(breaks) = file.breaks {
            if let Some(morning) = breaks.morning {
                cfg.breaks.morning = parse_hhmm(&morning).context("breaks.morning")?;
            }
            if let Some(lunch) = breaks.lunch_start {
                cfg.breaks.lunch_start = parse_hhmm(&lunch).context("breaks.lunch_start")?;
            }
            if let Some(n) = breaks.lunch_slots {
                cfg.breaks.lunch_slots = n;
            }
        }

        if let Some(n) = file.max_attempts {
            cfg.max_attempts = n;
        }

        for (department, entries) in &file.offsets {
            for (key, value) in entries {
                let key = match key {
                    serde_yaml::Value::String(s) => s.trim().to_string(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    other => bail!("offsets.{department}: unsupported semester key {other:?}"),
                };
                let offset = value
                    .as_u64()
                    .with_context(|| format!("offsets.{department}.{key}: not an integer"))?;
                if offset > u64::from(MAX_BREAK_OFFSET) {
                    bail!(
                        "offsets.{department}.{key}: offset {offset} exceeds maximum {MAX_BREAK_OFFSET}"
                    );
                }
                debug!(department = %department, semester = %key, offset, "break offset");
                cfg.offsets.insert(department, &key, offset as u8);
            }
        }

        cfg.validate()?;

        info!(
            day_start = %format_24h(cfg.day_start),
            day_end = %format_24h(cfg.day_end),
            slots = cfg.time_slots().len(),
            max_attempts = cfg.max_attempts,
            offsets = cfg.offsets.len(),
            "Timetable configuration loaded"
        );

        Ok(cfg)
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.day_start >= self.day_end {
            bail!(
                "day window is empty: start {} is not before end {}",
                self.day_start,
                self.day_end
            );
        }
        let slots = self.time_slots().len();
        if slots > MAX_SLOTS_PER_DAY {
            bail!("day window has {slots} slots, at most {MAX_SLOTS_PER_DAY} are supported");
        }
        if self.max_attempts == 0 {
            bail!("max_attempts must be at least 1");
        }
        if self.breaks.lunch_slots as usize > MAX_SLOTS_PER_DAY {
            bail!(
                "breaks.lunch_slots is {}, at most {MAX_SLOTS_PER_DAY} are supported",
                self.breaks.lunch_slots
            );
        }
        if self.breaks.lunch_slots == 0 {
            warn!("breaks.lunch_slots is 0, cohorts get no lunch break");
        }
        let lunch_span = self
            .breaks
            .lunch_slots
            .saturating_add(u32::from(MAX_BREAK_OFFSET));
        let lunch_end = self
            .breaks
            .lunch_start
            .saturating_add(SLOT_MINUTES.saturating_mul(lunch_span));
        if lunch_end > self.day_end {
            warn!("lunch window extends past the end of the day");
        }
        Ok(())
    }

    /// The slot table implied by the day window.
    pub fn time_slots(&self) -> TimeSlots {
        TimeSlots::generate(self.day_start, self.day_end)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
