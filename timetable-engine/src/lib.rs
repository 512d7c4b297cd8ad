/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Timetable engine – weekly cohort timetable generator
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── calendar/       – weekdays, 30-minute slots, per-cohort rest periods
//! ├── config/         – YAML timetable configuration (day window, breaks, offsets)
//! ├── catalog/        – YAML course catalog, cohort grouping, faculty directory
//! ├── course.rs       – catalog rows, sessions, faculty / room identities
//! ├── ledger.rs       – faculty (run-wide) and room (per-cohort) bookings
//! ├── grid.rs         – per-cohort schedule grid of placements
//! ├── palette.rs      – course colours and legend
//! ├── scheduler/      – session placement engine and feasibility rules
//! ├── runner.rs       – drives the engine over every cohort of a catalog
//! └── export.rs       – JSON hand-off document for renderers
//! ```

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod course;
pub mod export;
pub mod grid;
pub mod ledger;
pub mod palette;
pub mod runner;
pub mod scheduler;
