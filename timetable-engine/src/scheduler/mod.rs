/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Session placement engine.
//!
//! [`PlacementEngine`] finds a block for one [`Session`] and commits it into
//! a cohort's [`ScheduleGrid`], booking the room and the faculty member.  The
//! search strategy depends on the session type:
//!
//! | Type | Strategy |
//! |---|---|
//! | Lecture | best-slot scan of a random day, preferring blocks next to breaks |
//! | Lab, Tutorial | random (day, start) probe, first open block wins |
//!
//! Both strategies are bounded by `max_attempts` and never backtrack: once a
//! block is committed it stays.  A session whose search runs out of attempts
//! is reported as [`Unscheduled`] instead of failing the run.
//!
//! Searches only read state and return `Option<(Day, start)>`; the commit is
//! a separate step.  All randomness comes from the caller's generator, so a
//! seeded generator makes the whole run reproducible.
//!
//! # Example
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use timetable_engine::calendar::BreakCalendar;
//! use timetable_engine::config::TimetableConfig;
//! use timetable_engine::course::{CatalogRow, Hours};
//! use timetable_engine::ledger::FacultyLedger;
//! use timetable_engine::scheduler::{CohortState, PlacementEngine};
//!
//! let cfg = TimetableConfig::default();
//! let slots = cfg.time_slots();
//! let calendar = BreakCalendar::new(&slots, &cfg.breaks, 0);
//! let engine = PlacementEngine::new(&calendar, cfg.max_attempts);
//!
//! let row = CatalogRow {
//!     code: "CS201".into(),
//!     faculty: "Dr. Rao".into(),
//!     classroom: "C101".into(),
//!     hours: Hours { l: 3, ..Default::default() },
//!     ..Default::default()
//! };
//!
//! let mut state = CohortState::new(slots.len());
//! let mut faculty = FacultyLedger::new();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! for session in row.lecture_sessions() {
//!     engine.place(session, &mut state, &mut faculty, &mut rng).unwrap();
//! }
//! assert_eq!(state.grid.placements().len(), 2);
//! ```

pub mod error;
pub mod feasibility;

pub use error::{SchedulerError, Unscheduled, UnscheduledReason};

use rand::Rng;
use tracing::debug;

use crate::calendar::{BreakCalendar, Day};
use crate::course::{Session, SessionType};
use crate::grid::{PlacementId, ScheduleGrid};
use crate::ledger::{FacultyLedger, RoomLedger};

use feasibility::{block_is_open, lecture_is_feasible};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default retry ceiling for every slot search.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

// ── CohortState ───────────────────────────────────────────────────────────────

/// Mutable state owned by one cohort: its grid and its room bookings.
///
/// Created empty when the cohort starts and handed off when it is done.  The
/// faculty ledger is not part of it; it outlives every cohort.
#[derive(Debug, Clone)]
pub struct CohortState {
    pub grid: ScheduleGrid,
    pub rooms: RoomLedger,
}

impl CohortState {
    pub fn new(slot_count: usize) -> Self {
        Self {
            grid: ScheduleGrid::new(slot_count),
            rooms: RoomLedger::new(),
        }
    }
}

// ── PlacementEngine ───────────────────────────────────────────────────────────

/// Places sessions for one cohort.
///
/// Borrows the cohort's [`BreakCalendar`]; holds no other state, so one
/// engine is built per cohort and dropped with it.
pub struct PlacementEngine<'a> {
    calendar: &'a BreakCalendar,
    max_attempts: usize,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(calendar: &'a BreakCalendar, max_attempts: usize) -> Self {
        Self {
            calendar,
            max_attempts,
        }
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Find a block for `session` and commit it.
    ///
    /// # Errors
    /// Returns the reason the session could not be placed.  Nothing is
    /// booked in that case.
    pub fn place<R: Rng>(
        &self,
        session: Session,
        state: &mut CohortState,
        faculty: &mut FacultyLedger,
        rng: &mut R,
    ) -> Result<PlacementId, UnscheduledReason> {
        let len = session.block_len();
        let slot_count = state.grid.slot_count();
        if len > slot_count {
            return Err(UnscheduledReason::BlockExceedsDay {
                block_len: len,
                slot_count,
            });
        }

        let found = match session.kind {
            SessionType::Lecture => self.search_best_slot(&session, state, faculty, rng),
            SessionType::Lab | SessionType::Tutorial => {
                self.search_random_probe(&session, state, faculty, rng)
            }
        };

        match found {
            Some((day, start)) => Ok(self.commit(session, day, start, state, faculty)),
            None => Err(UnscheduledReason::AttemptsExhausted {
                attempts: self.max_attempts,
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Strategy A: best-slot search (lectures)
    // ─────────────────────────────────────────────────────────────────────────

    /// Pick a random day and scan it with [`best_slot_on_day`]; repeat up to
    /// `max_attempts` times.
    ///
    /// [`best_slot_on_day`]: Self::best_slot_on_day
    pub fn search_best_slot<R: Rng>(
        &self,
        session: &Session,
        state: &CohortState,
        faculty: &FacultyLedger,
        rng: &mut R,
    ) -> Option<(Day, usize)> {
        for attempt in 0..self.max_attempts {
            let day = random_day(rng);
            if let Some(start) = self.best_slot_on_day(session, day, state, faculty) {
                debug!(
                    course = %session.course_code,
                    kind = %session.kind,
                    day = %day,
                    start,
                    attempt,
                    "best slot found"
                );
                return Some((day, start));
            }
        }
        None
    }

    /// Scan `day` in increasing start order for the feasible block with the
    /// most slots near a break.
    ///
    /// Ties keep the earliest block.  The scan stops at the first feasible
    /// block that has any break proximity at all, so the result is a greedy
    /// first fit rather than a global best.
    pub fn best_slot_on_day(
        &self,
        session: &Session,
        day: Day,
        state: &CohortState,
        faculty: &FacultyLedger,
    ) -> Option<usize> {
        let len = session.block_len();
        let positions = (state.grid.slot_count() + 1).saturating_sub(len);

        let mut best: Option<(usize, usize)> = None; // (start, proximity)
        for start in 0..positions {
            if !lecture_is_feasible(session, day, start, state, faculty, self.calendar) {
                continue;
            }
            let proximity = self.calendar.break_proximity(start, len);
            if best.map_or(true, |(_, p)| proximity > p) {
                best = Some((start, proximity));
            }
            if proximity > 0 {
                break;
            }
        }
        best.map(|(start, _)| start)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Strategy B: random probe (labs, tutorials)
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw a random day and start up to `max_attempts` times and return the
    /// first open block.
    pub fn search_random_probe<R: Rng>(
        &self,
        session: &Session,
        state: &CohortState,
        faculty: &FacultyLedger,
        rng: &mut R,
    ) -> Option<(Day, usize)> {
        let positions = (state.grid.slot_count() + 1).saturating_sub(session.block_len());
        if positions == 0 {
            return None;
        }

        for attempt in 0..self.max_attempts {
            let day = random_day(rng);
            let start = rng.random_range(0..positions);
            if block_is_open(session, day, start, state, faculty, self.calendar) {
                debug!(
                    course = %session.course_code,
                    kind = %session.kind,
                    day = %day,
                    start,
                    attempt,
                    "probe accepted"
                );
                return Some((day, start));
            }
        }
        None
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commit
    // ─────────────────────────────────────────────────────────────────────────

    /// Book faculty and room for the block and write it into the grid.
    pub fn commit(
        &self,
        session: Session,
        day: Day,
        start: usize,
        state: &mut CohortState,
        faculty: &mut FacultyLedger,
    ) -> PlacementId {
        let len = session.block_len();
        faculty.reserve(&session.faculty, day, start, len);
        state.rooms.reserve(&session.room, day, start, len);
        state.grid.place(session, day, start)
    }
}

fn random_day<R: Rng>(rng: &mut R) -> Day {
    Day::ALL[rng.random_range(0..Day::COUNT)]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
