/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Weekly calendar: weekdays, the 30-minute slot table, and per-cohort rest
//! periods.
//!
//! The slot table is generated once per run from the configured daily window
//! and shared by every cohort.  A [`BreakCalendar`] is built per cohort
//! because the lunch window slides with the cohort's break offset.
//!
//! ```text
//!  slot   0     1     2     3     4     5     6     7     8     9    10  ...
//!        09:00 09:30 10:00 10:30 11:00 11:30 12:00 12:30 13:00 13:30 14:00
//!                          ^^^^^                   ^^^^^^^^^^^^^^^^^
//!                          morning                 lunch (offset 0)
//! ```

pub mod clock;

use serde::Serialize;

use crate::config::BreakSettings;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Length of one slot in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// Upper bound on slots per day.  Ledgers store one day as a `u64` bitmask.
pub const MAX_SLOTS_PER_DAY: usize = 64;

/// Radius (in slots) used by [`BreakCalendar::is_near_rest`].
pub const NEAR_REST_RADIUS: usize = 2;

// ── Day ───────────────────────────────────────────────────────────────────────

/// One of the five teaching weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// Number of teaching days per week.
    pub const COUNT: usize = 5;

    /// All weekdays in calendar order.
    pub const ALL: [Day; Day::COUNT] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Zero-based index (`Monday` = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index).  `None` for indices ≥ 5.
    pub fn from_index(index: usize) -> Option<Day> {
        Day::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ── TimeSlot ──────────────────────────────────────────────────────────────────

/// A fixed 30-minute interval of the teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    /// Position within the day, `0..N`.
    pub index: usize,
    /// Start, in minutes after midnight.
    pub start_minute: u32,
    /// End (exclusive), in minutes after midnight.
    pub end_minute: u32,
}

impl TimeSlot {
    /// `"09:00 AM - 09:30 AM"`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            clock::format_12h(self.start_minute),
            clock::format_12h(self.end_minute)
        )
    }
}

/// The immutable slot table for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlots {
    slots: Vec<TimeSlot>,
}

impl TimeSlots {
    /// Generate consecutive 30-minute slots starting at `day_start` while the
    /// slot start is before `day_end`.  A trailing partial slot is kept whole,
    /// so 09:00–18:30 yields 19 slots.
    pub fn generate(day_start: u32, day_end: u32) -> Self {
        let mut slots = Vec::new();
        let mut current = day_start;
        while current < day_end {
            slots.push(TimeSlot {
                index: slots.len(),
                start_minute: current,
                end_minute: current + SLOT_MINUTES,
            });
            current += SLOT_MINUTES;
        }
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimeSlot> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter()
    }
}

// ── BreakCalendar ─────────────────────────────────────────────────────────────

/// Rest periods for one cohort.
///
/// The morning break is the slot starting at `breaks.morning`.  Lunch is a
/// run of `breaks.lunch_slots` slots starting at
/// `breaks.lunch_start + 30 min × offset`.  Both repeat on every weekday, so
/// the table is indexed by slot only.
#[derive(Debug, Clone)]
pub struct BreakCalendar {
    rest: Vec<bool>,
    near: Vec<bool>,
}

impl BreakCalendar {
    pub fn new(slots: &TimeSlots, breaks: &BreakSettings, offset: u8) -> Self {
        let morning_start = breaks.morning;
        let morning_end = morning_start.saturating_add(SLOT_MINUTES);
        let lunch_start = breaks
            .lunch_start
            .saturating_add(SLOT_MINUTES.saturating_mul(u32::from(offset)));
        let lunch_end =
            lunch_start.saturating_add(SLOT_MINUTES.saturating_mul(breaks.lunch_slots));

        let rest: Vec<bool> = slots
            .iter()
            .map(|s| {
                let begin = s.start_minute;
                (morning_start..morning_end).contains(&begin)
                    || (lunch_start..lunch_end).contains(&begin)
            })
            .collect();

        let near = (0..rest.len())
            .map(|i| {
                let lo = i.saturating_sub(NEAR_REST_RADIUS);
                let hi = (i + NEAR_REST_RADIUS).min(rest.len().saturating_sub(1));
                rest[lo..=hi].iter().any(|&r| r)
            })
            .collect();

        Self { rest, near }
    }

    /// `true` if `slot` is a rest period on `day`.  Slots outside the day are
    /// never rest periods.
    pub fn is_rest(&self, _day: Day, slot: usize) -> bool {
        self.rest.get(slot).copied().unwrap_or(false)
    }

    /// `true` if any slot within ±2 of `slot` is a rest period.
    pub fn is_near_rest(&self, slot: usize) -> bool {
        self.near.get(slot).copied().unwrap_or(false)
    }

    /// `true` if any slot of the block `start..start + len` is a rest period.
    pub fn block_overlaps_rest(&self, day: Day, start: usize, len: usize) -> bool {
        (start..start + len).any(|slot| self.is_rest(day, slot))
    }

    /// Number of block slots near a rest period, the lecture placement score.
    pub fn break_proximity(&self, start: usize, len: usize) -> usize {
        (start..start + len)
            .filter(|&slot| self.is_near_rest(slot))
            .count()
    }

    /// Indices of every rest slot, ascending.
    pub fn rest_slots(&self) -> Vec<usize> {
        self.rest
            .iter()
            .enumerate()
            .filter_map(|(i, &r)| r.then_some(i))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
