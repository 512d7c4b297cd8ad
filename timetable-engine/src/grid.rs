/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Per-cohort schedule grid.
//!
//! Committed blocks are stored once, as [`Placement`]s in insertion order.
//! Every covered cell references its placement by id together with its
//! offset inside the block, so renderers can merge a block into one cell by
//! drawing only offset 0.

use std::ops::Range;

use crate::calendar::Day;
use crate::course::{Session, SessionType};

/// Index of a placement within its grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacementId(usize);

impl PlacementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A committed session: `session` occupies `start..start + len` on `day`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub id: PlacementId,
    pub session: Session,
    pub day: Day,
    pub start: usize,
    pub len: usize,
}

impl Placement {
    /// Covered slot indices.
    pub fn slots(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// `true` if the block covers `slot`.
    pub fn covers(&self, slot: usize) -> bool {
        self.slots().contains(&slot)
    }

    /// `true` if both blocks share a day and at least one slot.
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.day == other.day
            && self.start < other.start + other.len
            && other.start < self.start + self.len
    }
}

/// Content of one occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub placement: PlacementId,
    /// Position inside the block; `0` is the head cell.
    pub offset: usize,
}

impl Cell {
    pub fn is_head(&self) -> bool {
        self.offset == 0
    }
}

/// `(day, slot) → Option<Cell>` for one cohort.
#[derive(Debug, Clone)]
pub struct ScheduleGrid {
    slot_count: usize,
    cells: Vec<Option<Cell>>,
    placements: Vec<Placement>,
}

impl ScheduleGrid {
    /// Empty grid with `slot_count` slots per day.
    pub fn new(slot_count: usize) -> Self {
        Self {
            slot_count,
            cells: vec![None; slot_count * Day::COUNT],
            placements: Vec::new(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    fn cell_index(&self, day: Day, slot: usize) -> Option<usize> {
        (slot < self.slot_count).then(|| day.index() * self.slot_count + slot)
    }

    pub fn cell(&self, day: Day, slot: usize) -> Option<Cell> {
        self.cell_index(day, slot).and_then(|i| self.cells[i])
    }

    /// `true` for an empty in-range cell.
    pub fn is_free(&self, day: Day, slot: usize) -> bool {
        self.cell_index(day, slot)
            .map(|i| self.cells[i].is_none())
            .unwrap_or(false)
    }

    /// `true` if the whole block lies inside the day and is empty.
    pub fn is_block_free(&self, day: Day, start: usize, len: usize) -> bool {
        (start..start + len).all(|slot| self.is_free(day, slot))
    }

    /// Record `session` at `start` on `day` and return its id.
    ///
    /// The caller must have checked [`is_block_free`](Self::is_block_free);
    /// in debug builds an occupied or out-of-range block panics.
    pub fn place(&mut self, session: Session, day: Day, start: usize) -> PlacementId {
        let len = session.block_len();
        debug_assert!(
            self.is_block_free(day, start, len),
            "block {start}+{len} on {day} is not free"
        );

        let id = PlacementId(self.placements.len());
        for offset in 0..len {
            if let Some(i) = self.cell_index(day, start + offset) {
                self.cells[i] = Some(Cell {
                    placement: id,
                    offset,
                });
            }
        }
        self.placements.push(Placement {
            id,
            session,
            day,
            start,
            len,
        });
        id
    }

    pub fn placement(&self, id: PlacementId) -> &Placement {
        &self.placements[id.0]
    }

    /// All placements in commit order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// The placement covering `(day, slot)` and the cell's offset in it.
    pub fn placement_at(&self, day: Day, slot: usize) -> Option<(&Placement, usize)> {
        self.cell(day, slot)
            .map(|c| (self.placement(c.placement), c.offset))
    }

    /// Placements of `course_code`, in commit order.
    pub fn course_placements<'a>(
        &'a self,
        course_code: &'a str,
    ) -> impl Iterator<Item = &'a Placement> + 'a {
        self.placements
            .iter()
            .filter(move |p| p.session.course_code == course_code)
    }

    /// Number of placements of `kind`.
    pub fn count_of(&self, kind: SessionType) -> usize {
        self.placements
            .iter()
            .filter(|p| p.session.kind == kind)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{FacultyId, RoomId};

    fn session(code: &str, kind: SessionType) -> Session {
        Session {
            course_code: code.into(),
            course_name: format!("{code} name"),
            faculty: FacultyId::Unassigned,
            faculty_display: String::new(),
            room: RoomId::new("C101"),
            kind,
        }
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = ScheduleGrid::new(19);
        assert!(grid.is_empty());
        assert!(grid.is_block_free(Day::Friday, 0, 19));
        assert!(!grid.is_block_free(Day::Friday, 17, 3)); // runs past the day
        assert!(!grid.is_free(Day::Monday, 19));
    }

    #[test]
    fn place_marks_head_and_continuation_cells() {
        let mut grid = ScheduleGrid::new(19);
        let id = grid.place(session("CS201", SessionType::Lab), Day::Wednesday, 11);

        let head = grid.cell(Day::Wednesday, 11).unwrap();
        assert_eq!(head.placement, id);
        assert!(head.is_head());

        for offset in 1..4 {
            let cell = grid.cell(Day::Wednesday, 11 + offset).unwrap();
            assert_eq!(cell.placement, id);
            assert_eq!(cell.offset, offset);
            assert!(!cell.is_head());
        }
        assert!(grid.is_free(Day::Wednesday, 10));
        assert!(grid.is_free(Day::Wednesday, 15));
        assert!(grid.is_free(Day::Thursday, 11));
    }

    #[test]
    fn placement_at_resolves_continuation_cells() {
        let mut grid = ScheduleGrid::new(19);
        grid.place(session("CS201", SessionType::Lecture), Day::Monday, 0);

        let (p, offset) = grid.placement_at(Day::Monday, 2).unwrap();
        assert_eq!(p.session.course_code, "CS201");
        assert_eq!(p.start, 0);
        assert_eq!(p.len, 3);
        assert_eq!(offset, 2);
        assert!(grid.placement_at(Day::Monday, 3).is_none());
    }

    #[test]
    fn course_placements_filter_by_code() {
        let mut grid = ScheduleGrid::new(19);
        grid.place(session("CS201", SessionType::Lecture), Day::Monday, 0);
        grid.place(session("MA101", SessionType::Lecture), Day::Monday, 4);
        grid.place(session("CS201", SessionType::Tutorial), Day::Friday, 12);

        let starts: Vec<_> = grid.course_placements("CS201").map(|p| p.start).collect();
        assert_eq!(starts, vec![0, 12]);
        assert_eq!(grid.count_of(SessionType::Lecture), 2);
        assert_eq!(grid.count_of(SessionType::Lab), 0);
    }

    #[test]
    fn overlaps_requires_same_day_and_shared_slot() {
        let mut grid = ScheduleGrid::new(19);
        let a = grid.place(session("A", SessionType::Lecture), Day::Monday, 0);
        let b = grid.place(session("B", SessionType::Lecture), Day::Tuesday, 1);
        let c = grid.place(session("C", SessionType::Lecture), Day::Monday, 3);

        assert!(!grid.placement(a).overlaps(grid.placement(b)));
        assert!(!grid.placement(a).overlaps(grid.placement(c)));

        let shifted = Placement {
            day: Day::Monday,
            start: 2,
            ..grid.placement(a).clone()
        };
        assert!(shifted.overlaps(grid.placement(a)));
        assert!(shifted.overlaps(grid.placement(c)));
        assert!(shifted.covers(4));
    }
}
