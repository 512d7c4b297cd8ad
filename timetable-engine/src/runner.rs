/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Cohort runner: drives the placement engine over a whole catalog.
//!
//! For each cohort, in [`Catalog::cohorts`] order, the runner builds a fresh
//! grid, room ledger and break calendar, then places sessions in this order:
//!
//! 1. the lab of every course that has practical hours, in catalog order;
//! 2. for every theory course in catalog order, its lectures then its
//!    tutorials.
//!
//! The faculty ledger is owned by the runner and outlives every cohort, so a
//! faculty member booked in one cohort is unavailable to the next.  The
//! runner does no constraint checking of its own.

use rand::Rng;
use tracing::{info, warn};

use crate::calendar::{BreakCalendar, TimeSlots, MAX_SLOTS_PER_DAY};
use crate::catalog::directory::FacultyDirectory;
use crate::catalog::{Catalog, Cohort, CohortKey};
use crate::config::TimetableConfig;
use crate::course::Session;
use crate::grid::ScheduleGrid;
use crate::ledger::FacultyLedger;
use crate::palette::Legend;
use crate::scheduler::{CohortState, PlacementEngine, SchedulerError, Unscheduled};

/// Result of scheduling one cohort.
#[derive(Debug, Clone)]
pub struct CohortTimetable {
    pub key: CohortKey,
    /// Semester text as written in the catalog.
    pub semester: String,
    pub break_offset: u8,
    /// Rest slot indices for this cohort, identical on every day.
    pub rest_slots: Vec<usize>,
    pub grid: ScheduleGrid,
    pub legend: Legend,
    pub unscheduled: Vec<Unscheduled>,
}

impl CohortTimetable {
    pub fn is_complete(&self) -> bool {
        self.unscheduled.is_empty()
    }
}

/// Schedules every cohort of a catalog with one random source.
pub struct CohortRunner<R: Rng> {
    config: TimetableConfig,
    slots: TimeSlots,
    faculty: FacultyLedger,
    rng: R,
}

impl<R: Rng> CohortRunner<R> {
    /// # Errors
    /// [`SchedulerError::InvalidDayWindow`] when the configured day has no
    /// slots or more than the ledgers can track.
    pub fn new(config: TimetableConfig, rng: R) -> Result<Self, SchedulerError> {
        let slots = config.time_slots();
        if slots.is_empty() || slots.len() > MAX_SLOTS_PER_DAY {
            return Err(SchedulerError::InvalidDayWindow {
                slots: slots.len(),
                max: MAX_SLOTS_PER_DAY,
            });
        }
        Ok(Self {
            config,
            slots,
            faculty: FacultyLedger::new(),
            rng,
        })
    }

    /// Seed the faculty ledger with every directory member.
    pub fn register_faculty(&mut self, directory: &FacultyDirectory) {
        for member in directory.members() {
            self.faculty.register(member);
        }
        info!(registered = self.faculty.len(), "Faculty directory registered");
    }

    /// Schedule every cohort of `catalog`.
    ///
    /// # Errors
    /// Propagates [`Catalog::cohorts`] errors.  Sessions that cannot be
    /// placed are not errors; they are listed per cohort.
    pub fn run(&mut self, catalog: &Catalog) -> Result<Vec<CohortTimetable>, SchedulerError> {
        let cohorts = catalog.cohorts()?;
        info!(
            cohorts = cohorts.len(),
            courses = catalog.len(),
            slots = self.slots.len(),
            "Starting timetable generation"
        );

        let timetables: Vec<CohortTimetable> = cohorts
            .iter()
            .map(|cohort| self.schedule_cohort(cohort))
            .collect();

        let unscheduled: usize = timetables.iter().map(|t| t.unscheduled.len()).sum();
        info!(
            cohorts = timetables.len(),
            unscheduled,
            faculty = self.faculty.len(),
            "Timetable generation finished"
        );
        Ok(timetables)
    }

    /// Schedule one cohort against the shared faculty ledger.
    pub fn schedule_cohort(&mut self, cohort: &Cohort) -> CohortTimetable {
        let key = &cohort.key;
        let offset = self
            .config
            .offsets
            .lookup(&key.department, key.term, key.section);
        let calendar = BreakCalendar::new(&self.slots, &self.config.breaks, offset);
        let engine = PlacementEngine::new(&calendar, self.config.max_attempts);

        info!(
            cohort = %key,
            courses = cohort.rows.len(),
            break_offset = offset,
            "Scheduling cohort"
        );

        let mut state = CohortState::new(self.slots.len());
        let mut legend = Legend::new();
        let mut unscheduled = Vec::new();

        for row in cohort.rows.iter().filter(|r| r.has_lab()) {
            legend.assign(row, &mut self.rng);
            if let Some(lab) = row.lab_session() {
                self.place(&engine, lab, &mut state, &mut unscheduled);
            }
        }

        for row in cohort.rows.iter().filter(|r| r.is_theory()) {
            legend.assign(row, &mut self.rng);
            for session in row.lecture_sessions().into_iter().chain(row.tutorial_sessions()) {
                self.place(&engine, session, &mut state, &mut unscheduled);
            }
        }

        info!(
            cohort = %key,
            placed = state.grid.placements().len(),
            unscheduled = unscheduled.len(),
            "Cohort scheduled"
        );

        CohortTimetable {
            key: key.clone(),
            semester: cohort.semester.clone(),
            break_offset: offset,
            rest_slots: calendar.rest_slots(),
            grid: state.grid,
            legend,
            unscheduled,
        }
    }

    fn place(
        &mut self,
        engine: &PlacementEngine<'_>,
        session: Session,
        state: &mut CohortState,
        unscheduled: &mut Vec<Unscheduled>,
    ) {
        let placed = engine.place(session.clone(), state, &mut self.faculty, &mut self.rng);
        if let Err(reason) = placed {
            warn!(
                course = %session.course_code,
                kind = %session.kind,
                faculty = %session.faculty,
                room = %session.room,
                %reason,
                "Session left unscheduled"
            );
            unscheduled.push(Unscheduled { session, reason });
        }
    }

    pub fn slots(&self) -> &TimeSlots {
        &self.slots
    }

    pub fn faculty(&self) -> &FacultyLedger {
        &self.faculty
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Day;
    use crate::course::{CatalogRow, Hours, SessionType};
    use crate::grid::Placement;
    use crate::scheduler::UnscheduledReason;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // ── Test helpers ──────────────────────────────────────────────────────────

    fn course(
        semester: &str,
        code: &str,
        faculty: &str,
        room: &str,
        (l, t, p): (u32, u32, u32),
    ) -> CatalogRow {
        CatalogRow {
            department: "CSE".into(),
            semester: semester.into(),
            code: code.into(),
            name: format!("{code} name"),
            faculty: faculty.into(),
            classroom: room.into(),
            lab_room: (p > 0).then(|| format!("LAB-{code}")),
            hours: Hours {
                l,
                t,
                p,
                ..Default::default()
            },
        }
    }

    /// Two sections sharing several faculty members.
    fn sample_catalog() -> Catalog {
        Catalog::from_rows(vec![
            course("2A", "CS201", "Dr. Rao", "C101", (3, 1, 2)),
            course("2A", "CS202", "Dr. Sen / Dr. Iyer", "C101", (3, 0, 0)),
            course("2A", "MA201", "Dr. Menon", "C101", (3, 1, 0)),
            course("2A", "CS291", "Dr. Rao", "C101", (0, 0, 4)),
            course("2B", "CS201", "Dr. Rao", "C102", (3, 1, 2)),
            course("2B", "CS202", "Dr. Sen", "C102", (3, 0, 0)),
            course("2B", "MA201", "TBA", "C102", (3, 1, 0)),
        ])
    }

    fn config_with_offsets() -> TimetableConfig {
        let mut cfg = TimetableConfig::default();
        cfg.offsets.insert("CSE", "2A", 0);
        cfg.offsets.insert("CSE", "2B", 1);
        cfg
    }

    fn run(seed: u64) -> Vec<CohortTimetable> {
        let mut runner =
            CohortRunner::new(config_with_offsets(), ChaCha8Rng::seed_from_u64(seed)).unwrap();
        runner.run(&sample_catalog()).unwrap()
    }

    fn all_placements(timetables: &[CohortTimetable]) -> Vec<&Placement> {
        timetables
            .iter()
            .flat_map(|t| t.grid.placements())
            .collect()
    }

    // ── Setup ─────────────────────────────────────────────────────────────────

    #[test]
    fn empty_day_window_is_rejected() {
        let mut cfg = TimetableConfig::default();
        cfg.day_end = cfg.day_start;
        let err = CohortRunner::new(cfg, ChaCha8Rng::seed_from_u64(0)).err();
        assert!(matches!(
            err,
            Some(SchedulerError::InvalidDayWindow { slots: 0, .. })
        ));
    }

    #[test]
    fn empty_catalog_is_fatal() {
        let mut runner =
            CohortRunner::new(TimetableConfig::default(), ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert!(matches!(
            runner.run(&Catalog::default()),
            Err(SchedulerError::EmptyCatalog)
        ));
    }

    #[test]
    fn directory_members_are_registered() {
        let mut runner =
            CohortRunner::new(TimetableConfig::default(), ChaCha8Rng::seed_from_u64(0)).unwrap();
        runner.register_faculty(&FacultyDirectory::from_names(["Dr. Rao", "TBA"]));
        assert_eq!(runner.faculty().len(), 1);
    }

    // ── Cohort bookkeeping ────────────────────────────────────────────────────

    #[test]
    fn cohorts_get_their_configured_lunch_offset() {
        let timetables = run(1);
        assert_eq!(timetables.len(), 2);

        assert_eq!(timetables[0].key.section, Some('A'));
        assert_eq!(timetables[0].break_offset, 0);
        assert_eq!(timetables[0].rest_slots, vec![3, 7, 8, 9]);

        assert_eq!(timetables[1].key.section, Some('B'));
        assert_eq!(timetables[1].break_offset, 1);
        assert_eq!(timetables[1].rest_slots, vec![3, 8, 9, 10]);
    }

    #[test]
    fn every_session_is_placed_or_reported() {
        for t in run(2) {
            let expected: usize = t
                .legend
                .entries()
                .iter()
                .map(|e| {
                    let lectures = match e.hours.l {
                        3 => 2,
                        6 => 4,
                        n => n,
                    };
                    (lectures + e.hours.t + u32::from(e.hours.p > 0)) as usize
                })
                .sum();
            assert_eq!(t.grid.placements().len() + t.unscheduled.len(), expected);
        }
    }

    #[test]
    fn legend_follows_processing_order() {
        let t = &run(3)[0];
        let codes: Vec<_> = t.legend.entries().iter().map(|e| e.code.as_str()).collect();
        // labs first (CS201, CS291), then theory courses not yet seen
        assert_eq!(codes, vec!["CS201", "CS291", "CS202", "MA201"]);
    }

    // ── Invariants ────────────────────────────────────────────────────────────

    #[test]
    fn no_block_covers_a_rest_period() {
        for seed in 0..10 {
            for t in run(seed) {
                for p in t.grid.placements() {
                    for slot in p.slots() {
                        assert!(
                            !t.rest_slots.contains(&slot),
                            "{} {} covers rest slot {slot}",
                            t.key,
                            p.session.course_code
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn rooms_are_never_double_booked_within_a_cohort() {
        for seed in 0..10 {
            for t in run(seed) {
                let placements = t.grid.placements();
                for (i, a) in placements.iter().enumerate() {
                    for b in &placements[i + 1..] {
                        if a.session.room == b.session.room {
                            assert!(!a.overlaps(b));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn named_faculty_never_overlap_across_cohorts() {
        for seed in 0..10 {
            let timetables = run(seed);
            let placements = all_placements(&timetables);
            for (i, a) in placements.iter().enumerate() {
                for b in &placements[i + 1..] {
                    if a.session.faculty == b.session.faculty && !a.session.faculty.is_unassigned()
                    {
                        assert!(
                            !a.overlaps(b),
                            "{} double-booked on {}",
                            a.session.faculty,
                            a.day
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn same_day_lectures_of_a_course_are_spread_out() {
        for seed in 0..10 {
            for t in run(seed) {
                let lectures: Vec<_> = t
                    .grid
                    .placements()
                    .iter()
                    .filter(|p| p.session.kind == SessionType::Lecture)
                    .collect();
                for (i, a) in lectures.iter().enumerate() {
                    for b in &lectures[i + 1..] {
                        if a.session.course_code == b.session.course_code && a.day == b.day {
                            assert!(a.start.abs_diff(b.start) >= 6);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn lectures_never_cover_an_earlier_block_start_of_the_same_course() {
        for seed in 0..10 {
            for t in run(seed) {
                let placements = t.grid.placements();
                for (i, later) in placements.iter().enumerate() {
                    if later.session.kind != SessionType::Lecture {
                        continue;
                    }
                    for earlier in &placements[..i] {
                        if earlier.session.course_code == later.session.course_code {
                            assert!(!later.covers(earlier.start));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn one_lab_per_course_regardless_of_practical_hours() {
        for t in run(4) {
            for code in ["CS201", "CS291"] {
                let labs: Vec<_> = t
                    .grid
                    .course_placements(code)
                    .filter(|p| p.session.kind == SessionType::Lab)
                    .collect();
                assert!(labs.len() <= 1);
                if code == "CS291" && t.key.section == Some('A') {
                    assert_eq!(labs.len(), 1, "P = 4 gives exactly one lab");
                    assert_eq!(labs[0].len, 4);
                }
            }
        }
    }

    #[test]
    fn same_seed_reproduces_every_grid() {
        let snapshot = |timetables: Vec<CohortTimetable>| {
            timetables
                .into_iter()
                .map(|t| {
                    t.grid
                        .placements()
                        .iter()
                        .map(|p| (p.session.course_code.clone(), p.session.kind, p.day, p.start))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(snapshot(run(42)), snapshot(run(42)));
    }

    #[test]
    fn demo_catalog_schedules_with_shared_faculty() {
        let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos");
        let config = TimetableConfig::load_from_file(&demos.join("timetable.yaml")).unwrap();
        let catalog = Catalog::load_from_file(&demos.join("catalog.yaml")).unwrap();
        let directory = FacultyDirectory::load_from_file(&demos.join("faculty.yaml")).unwrap();

        let mut runner = CohortRunner::new(config, ChaCha8Rng::seed_from_u64(2026)).unwrap();
        runner.register_faculty(&directory);
        let timetables = runner.run(&catalog).unwrap();

        let titles: Vec<_> = timetables.iter().map(|t| t.key.file_stem()).collect();
        assert_eq!(
            titles,
            vec![
                "timetable_cse_semester_2_section_a",
                "timetable_cse_semester_2_section_b",
                "timetable_cse_semester_4_section_a",
                "timetable_dsai_semester_2",
                "timetable_ece_semester_4",
            ]
        );

        let placements = all_placements(&timetables);
        for (i, a) in placements.iter().enumerate() {
            for b in &placements[i + 1..] {
                if a.session.faculty == b.session.faculty && !a.session.faculty.is_unassigned() {
                    assert!(!a.overlaps(b));
                }
            }
        }
    }

    // ── Degenerate input ──────────────────────────────────────────────────────

    #[test]
    fn lab_longer_than_day_is_reported() {
        let mut cfg = TimetableConfig::default();
        cfg.day_end = cfg.day_start + 90; // 3 slots
        cfg.breaks.morning = 0;
        cfg.breaks.lunch_slots = 0;
        let mut runner = CohortRunner::new(cfg, ChaCha8Rng::seed_from_u64(0)).unwrap();

        let catalog = Catalog::from_rows(vec![course("1", "CS101", "Dr. Rao", "C1", (0, 0, 2))]);
        let timetables = runner.run(&catalog).unwrap();

        let t = &timetables[0];
        assert!(t.grid.is_empty());
        assert!(!t.is_complete());
        assert_eq!(
            t.unscheduled[0].reason,
            UnscheduledReason::BlockExceedsDay {
                block_len: 4,
                slot_count: 3
            }
        );
    }

    #[test]
    fn overloaded_faculty_leaves_sessions_unscheduled() {
        // One faculty member, far more lecture time than a week holds.
        let mut cfg = TimetableConfig::default();
        cfg.max_attempts = 20;
        let mut runner = CohortRunner::new(cfg, ChaCha8Rng::seed_from_u64(9)).unwrap();

        let rows = (0..12)
            .map(|i| course("1", &format!("CS1{i:02}"), "Dr. Rao", "C1", (6, 0, 0)))
            .collect();
        let timetables = runner.run(&Catalog::from_rows(rows)).unwrap();

        let t = &timetables[0];
        assert!(!t.unscheduled.is_empty());
        // Whatever was placed still never double-books a slot.
        for day in Day::ALL {
            let mut busy = vec![false; 19];
            for p in t.grid.placements().iter().filter(|p| p.day == day) {
                for slot in p.slots() {
                    assert!(!busy[slot]);
                    busy[slot] = true;
                }
            }
        }
    }
}
