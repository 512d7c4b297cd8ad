/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Course data structures for the placement engine.
//!
//! Two distinct types model the two sides of the pipeline:
//!
//! ```text
//! catalog  ──(YAML row)──►  CatalogRow  ──(derive)──►  Session*  ──(engine)──►  Placement
//!                             ↑ one per course            ↑ one per weekly occurrence
//! ```
//!
//! A row yields at most one lab, a lecture count derived from `L`, and `T`
//! tutorials.  Faculty names are normalised into a [`FacultyId`] once, here,
//! so the ledgers never see raw catalog strings.

use std::fmt;

use serde::Serialize;

// ── Session type ──────────────────────────────────────────────────────────────

/// Kind of teaching session.  The block length is fixed per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    /// 90 minutes.
    Lecture,
    /// 120 minutes, at most once per course per week.
    Lab,
    /// 60 minutes.
    Tutorial,
}

impl SessionType {
    /// Block length in 30-minute slots.
    pub fn block_len(self) -> usize {
        match self {
            SessionType::Lecture => 3,
            SessionType::Lab => 4,
            SessionType::Tutorial => 2,
        }
    }

    /// Short tag shown in rendered cells.
    pub fn tag(self) -> &'static str {
        match self {
            SessionType::Lecture => "LEC",
            SessionType::Lab => "LAB",
            SessionType::Tutorial => "TUT",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ── Faculty identity ──────────────────────────────────────────────────────────

/// Normalised faculty identity used as the faculty-ledger key.
///
/// `Unassigned` replaces the `"TBA"` / empty-string sentinels of raw catalog
/// data.  It never conflicts with anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FacultyId {
    Named(String),
    #[default]
    Unassigned,
}

impl FacultyId {
    /// Normalise a raw catalog faculty string.
    ///
    /// Co-taught courses list several names; only the first one is kept.
    /// The name is cut at the first `/`, `&`, `(` or standalone word `and`
    /// (any case) and trimmed.  Empty results and `TBA` are `Unassigned`.
    pub fn normalize(raw: &str) -> Self {
        let mut name = raw.trim();

        for sep in ['/', '&', '('] {
            if let Some((head, _)) = name.split_once(sep) {
                name = head.trim();
            }
        }

        if let Some(idx) = find_word_and(name) {
            name = name[..idx].trim();
        }

        if name.is_empty() || name.eq_ignore_ascii_case("tba") {
            FacultyId::Unassigned
        } else {
            FacultyId::Named(name.to_string())
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, FacultyId::Unassigned)
    }

    /// The normalised name, `None` for `Unassigned`.
    pub fn name(&self) -> Option<&str> {
        match self {
            FacultyId::Named(n) => Some(n),
            FacultyId::Unassigned => None,
        }
    }
}

impl fmt::Display for FacultyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacultyId::Named(n) => f.write_str(n),
            FacultyId::Unassigned => f.write_str("TBA"),
        }
    }
}

/// Byte index of the first standalone `and` (case-insensitive), so names
/// such as "Anand" are left intact.
fn find_word_and(name: &str) -> Option<usize> {
    let lower = name.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut from = 0;
    while let Some(pos) = lower[from..].find("and") {
        let idx = from + pos;
        let before_ok = idx == 0 || bytes[idx - 1].is_ascii_whitespace();
        let after = idx + 3;
        let after_ok = after == bytes.len() || bytes[after].is_ascii_whitespace();
        if before_ok && after_ok {
            return Some(idx);
        }
        from = idx + 3;
    }
    None
}

// ── Room identity ─────────────────────────────────────────────────────────────

/// Room name used as the room-ledger key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn new(name: impl Into<String>) -> Self {
        RoomId(name.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Catalog row ───────────────────────────────────────────────────────────────

/// Weekly contact hours of a course: lecture, tutorial, practical, self-study
/// and credits.  `S` and `C` are informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Hours {
    pub l: u32,
    pub t: u32,
    pub p: u32,
    pub s: u32,
    pub c: u32,
}

/// One course of one cohort, as read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogRow {
    pub department: String,
    /// Raw semester text, optionally suffixed with a section letter (`"2A"`).
    pub semester: String,
    pub code: String,
    pub name: String,
    /// Raw faculty text, possibly several names.
    pub faculty: String,
    pub classroom: String,
    pub lab_room: Option<String>,
    pub hours: Hours,
}

impl CatalogRow {
    /// `true` if the course needs a lab block.
    pub fn has_lab(&self) -> bool {
        self.hours.p > 0
    }

    /// `true` if the course has lectures or tutorials.
    pub fn is_theory(&self) -> bool {
        self.hours.l > 0 || self.hours.t > 0
    }

    /// Number of 90-minute lectures per week.
    ///
    /// Three lecture hours become two 1.5-hour blocks and six become four;
    /// any other value is taken as a block count directly.
    pub fn lecture_count(&self) -> u32 {
        match self.hours.l {
            3 => 2,
            6 => 4,
            n => n,
        }
    }

    /// The single weekly lab, held in the lab room when one is given.
    pub fn lab_session(&self) -> Option<Session> {
        if !self.has_lab() {
            return None;
        }
        let room = self
            .lab_room
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(&self.classroom);
        Some(self.session(SessionType::Lab, room))
    }

    pub fn lecture_sessions(&self) -> Vec<Session> {
        (0..self.lecture_count())
            .map(|_| self.session(SessionType::Lecture, &self.classroom))
            .collect()
    }

    pub fn tutorial_sessions(&self) -> Vec<Session> {
        (0..self.hours.t)
            .map(|_| self.session(SessionType::Tutorial, &self.classroom))
            .collect()
    }

    fn session(&self, kind: SessionType, room: &str) -> Session {
        Session {
            course_code: self.code.clone(),
            course_name: self.name.clone(),
            faculty: FacultyId::normalize(&self.faculty),
            faculty_display: self.faculty.trim().to_string(),
            room: RoomId::new(room),
            kind,
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// One weekly occurrence of a course that needs a time block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub course_code: String,
    pub course_name: String,
    /// Ledger key.
    pub faculty: FacultyId,
    /// Faculty text as written in the catalog, for display.
    pub faculty_display: String,
    pub room: RoomId,
    pub kind: SessionType,
}

impl Session {
    pub fn block_len(&self) -> usize {
        self.kind.block_len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
