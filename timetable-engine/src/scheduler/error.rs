/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Error types for the placement engine.
//!
//! Two layers, mirroring how failures are handled:
//!
//! * [`UnscheduledReason`]: why one session could not be placed.  This is a
//!   soft failure: the session is listed in the cohort's unscheduled list and
//!   the run continues.
//! * [`SchedulerError`]: fatal conditions returned from
//!   [`CohortRunner::run()`](crate::runner::CohortRunner::run); the run cannot
//!   proceed.

use thiserror::Error;

use crate::course::Session;

// ── Soft failures ─────────────────────────────────────────────────────────────

/// Why a session was left out of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnscheduledReason {
    /// Every attempt of the slot search failed.
    AttemptsExhausted { attempts: usize },

    /// The block is longer than the teaching day; no search was made.
    BlockExceedsDay { block_len: usize, slot_count: usize },
}

impl std::fmt::Display for UnscheduledReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnscheduledReason::AttemptsExhausted { attempts } => {
                write!(f, "no feasible block found in {attempts} attempts")
            }
            UnscheduledReason::BlockExceedsDay {
                block_len,
                slot_count,
            } => write!(
                f,
                "block of {block_len} slots does not fit in a {slot_count}-slot day"
            ),
        }
    }
}

/// A session the engine gave up on, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unscheduled {
    pub session: Session,
    pub reason: UnscheduledReason,
}

// ── Fatal errors ──────────────────────────────────────────────────────────────

/// Conditions that stop a generation run.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The catalog has no course rows.
    #[error("catalog contains no courses")]
    EmptyCatalog,

    /// A semester string carries no term number, so the cohort cannot be
    /// keyed.
    #[error("department '{department}': semester '{semester}' has no term number")]
    InvalidSemester {
        department: String,
        semester: String,
    },

    /// The slot table is empty or wider than the ledger bitmask.
    #[error("day window has {slots} slots (supported: 1..={max})")]
    InvalidDayWindow { slots: usize, max: usize },
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_render_their_values() {
        let exhausted = UnscheduledReason::AttemptsExhausted { attempts: 1000 };
        assert_eq!(
            exhausted.to_string(),
            "no feasible block found in 1000 attempts"
        );

        let too_long = UnscheduledReason::BlockExceedsDay {
            block_len: 4,
            slot_count: 3,
        };
        assert!(too_long.to_string().contains("4 slots"));
    }

    #[test]
    fn invalid_semester_names_the_cohort() {
        let err = SchedulerError::InvalidSemester {
            department: "CSE".into(),
            semester: "A".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("CSE") && msg.contains("'A'"));
    }
}
