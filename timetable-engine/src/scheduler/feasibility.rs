/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Candidate-block feasibility checks.
//!
//! Every candidate must pass [`block_is_open`].  Lecture candidates must
//! additionally pass two same-course rules:
//!
//! | Rule | Check |
//! |---|---|
//! | minimum gap | another lecture of the course on the same day starts more than [`MIN_LECTURE_GAP`] slots away |
//! | period variety | the block does not cover a period of day at which another block of the course starts, on any day |
//!
//! Lab and tutorial probes only use [`block_is_open`].

use crate::calendar::{BreakCalendar, Day};
use crate::course::{Session, SessionType};
use crate::grid::ScheduleGrid;
use crate::ledger::FacultyLedger;

use super::CohortState;

/// Lecture starts of one course on one day must be further apart than this.
pub const MIN_LECTURE_GAP: usize = 6;

/// `true` if every slot of the block is inside the day, empty in the grid,
/// free for the faculty and the room, and not a rest period.
pub fn block_is_open(
    session: &Session,
    day: Day,
    start: usize,
    state: &CohortState,
    faculty: &FacultyLedger,
    calendar: &BreakCalendar,
) -> bool {
    let len = session.block_len();
    state.grid.is_block_free(day, start, len)
        && !calendar.block_overlaps_rest(day, start, len)
        && faculty.available(&session.faculty, day, start, len)
        && state.rooms.available(&session.room, day, start, len)
}

/// `true` if no other lecture of `course_code` starts within
/// [`MIN_LECTURE_GAP`] slots of `start` on `day`.
pub fn respects_lecture_gap(
    grid: &ScheduleGrid,
    course_code: &str,
    day: Day,
    start: usize,
) -> bool {
    grid.course_placements(course_code)
        .filter(|p| p.session.kind == SessionType::Lecture && p.day == day)
        .all(|p| p.start.abs_diff(start) > MIN_LECTURE_GAP)
}

/// `true` if the block `start..start + len` covers no period of day at which
/// another block of `course_code` starts.
pub fn respects_period_variety(
    grid: &ScheduleGrid,
    course_code: &str,
    start: usize,
    len: usize,
) -> bool {
    grid.course_placements(course_code)
        .all(|p| !(start..start + len).contains(&p.start))
}

/// Full lecture check: open block plus both same-course rules.
pub fn lecture_is_feasible(
    session: &Session,
    day: Day,
    start: usize,
    state: &CohortState,
    faculty: &FacultyLedger,
    calendar: &BreakCalendar,
) -> bool {
    let code = session.course_code.as_str();
    block_is_open(session, day, start, state, faculty, calendar)
        && respects_period_variety(&state.grid, code, start, session.block_len())
        && respects_lecture_gap(&state.grid, code, day, start)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BreakSettings, TimetableConfig};
    use crate::course::{FacultyId, RoomId};

    fn session(code: &str, faculty: &str, room: &str, kind: SessionType) -> Session {
        Session {
            course_code: code.into(),
            course_name: String::new(),
            faculty: FacultyId::normalize(faculty),
            faculty_display: faculty.into(),
            room: RoomId::new(room),
            kind,
        }
    }

    fn calendar(offset: u8) -> BreakCalendar {
        let cfg = TimetableConfig::default();
        BreakCalendar::new(&cfg.time_slots(), &BreakSettings::default(), offset)
    }

    #[test]
    fn open_block_rejects_rest_periods() {
        let state = CohortState::new(19);
        let faculty = FacultyLedger::new();
        let cal = calendar(0);
        let lec = session("CS201", "Dr. Rao", "C101", SessionType::Lecture);

        assert!(block_is_open(&lec, Day::Monday, 0, &state, &faculty, &cal));
        assert!(!block_is_open(&lec, Day::Monday, 1, &state, &faculty, &cal)); // covers 3
        assert!(!block_is_open(&lec, Day::Monday, 5, &state, &faculty, &cal)); // covers 7
        assert!(block_is_open(&lec, Day::Monday, 10, &state, &faculty, &cal));
        assert!(!block_is_open(&lec, Day::Monday, 17, &state, &faculty, &cal)); // past the day
    }

    #[test]
    fn open_block_rejects_busy_faculty_room_and_cells() {
        let mut state = CohortState::new(19);
        let mut faculty = FacultyLedger::new();
        let cal = calendar(0);

        faculty.reserve(&FacultyId::normalize("Dr. Rao"), Day::Tuesday, 12, 3);
        state.rooms.reserve(&RoomId::new("C101"), Day::Wednesday, 12, 3);
        state.grid.place(
            session("MA101", "Dr. Sen", "C202", SessionType::Lecture),
            Day::Thursday,
            12,
        );

        let lec = session("CS201", "Dr. Rao", "C101", SessionType::Lecture);
        assert!(!block_is_open(&lec, Day::Tuesday, 13, &state, &faculty, &cal));
        assert!(!block_is_open(&lec, Day::Wednesday, 14, &state, &faculty, &cal));
        assert!(!block_is_open(&lec, Day::Thursday, 10, &state, &faculty, &cal));
        assert!(block_is_open(&lec, Day::Friday, 12, &state, &faculty, &cal));
    }

    #[test]
    fn unassigned_faculty_never_blocks() {
        let state = CohortState::new(19);
        let mut faculty = FacultyLedger::new();
        faculty.reserve(&FacultyId::Unassigned, Day::Monday, 0, 3);
        let lec = session("CS201", "TBA", "C101", SessionType::Lecture);
        assert!(block_is_open(&lec, Day::Monday, 0, &state, &faculty, &calendar(0)));
    }

    #[test]
    fn lecture_gap_is_checked_per_day() {
        let mut grid = ScheduleGrid::new(19);
        grid.place(
            session("CS201", "Dr. Rao", "C101", SessionType::Lecture),
            Day::Monday,
            4,
        );

        assert!(!respects_lecture_gap(&grid, "CS201", Day::Monday, 10)); // distance 6
        assert!(respects_lecture_gap(&grid, "CS201", Day::Monday, 11)); // distance 7
        assert!(!respects_lecture_gap(&grid, "CS201", Day::Monday, 0));
        assert!(respects_lecture_gap(&grid, "CS201", Day::Tuesday, 4));
        assert!(respects_lecture_gap(&grid, "MA101", Day::Monday, 5));
    }

    #[test]
    fn lecture_gap_ignores_labs_and_tutorials() {
        let mut grid = ScheduleGrid::new(19);
        grid.place(
            session("CS201", "Dr. Rao", "LAB-1", SessionType::Lab),
            Day::Monday,
            4,
        );
        assert!(respects_lecture_gap(&grid, "CS201", Day::Monday, 10));
    }

    #[test]
    fn period_variety_blocks_covering_another_start() {
        let mut grid = ScheduleGrid::new(19);
        grid.place(
            session("CS201", "Dr. Rao", "LAB-1", SessionType::Lab),
            Day::Monday,
            12,
        );

        // Any day, any block that covers slot 12 is rejected.
        assert!(!respects_period_variety(&grid, "CS201", 10, 3));
        assert!(!respects_period_variety(&grid, "CS201", 12, 3));
        assert!(respects_period_variety(&grid, "CS201", 13, 3));
        assert!(respects_period_variety(&grid, "CS201", 9, 3));
        assert!(respects_period_variety(&grid, "MA101", 12, 3));
    }

    #[test]
    fn lecture_feasibility_combines_all_rules() {
        let mut state = CohortState::new(19);
        let faculty = FacultyLedger::new();
        let cal = calendar(0);
        let lec = session("CS201", "Dr. Rao", "C101", SessionType::Lecture);

        state.grid.place(lec.clone(), Day::Monday, 0);

        // Same day, too close.
        assert!(!lecture_is_feasible(&lec, Day::Monday, 4, &state, &faculty, &cal));
        // Other day, same period.
        assert!(!lecture_is_feasible(&lec, Day::Tuesday, 0, &state, &faculty, &cal));
        // Other day, different period.
        assert!(lecture_is_feasible(&lec, Day::Tuesday, 4, &state, &faculty, &cal));
        // Same day, far enough.
        assert!(lecture_is_feasible(&lec, Day::Monday, 10, &state, &faculty, &cal));
    }
}
