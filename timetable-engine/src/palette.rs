/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Course colours and the per-cohort legend.
//!
//! Colours carry no scheduling meaning; they are assigned in the order
//! courses are first met while placing a cohort and handed to the renderer.

use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use serde::{Serialize, Serializer};

use crate::course::{CatalogRow, Hours};

/// A 24-bit colour, rendered as six upper-case hex digits (`FFD6E0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Curated pastel shades handed out before random colours are generated.
pub const CURATED_PALETTE: [Rgb; 18] = [
    Rgb(0xFF, 0xD6, 0xE0),
    Rgb(0xFF, 0xEF, 0xCF),
    Rgb(0xD6, 0xFF, 0xCF),
    Rgb(0xCF, 0xFE, 0xFF),
    Rgb(0xD6, 0xCF, 0xFF),
    Rgb(0xFF, 0xCF, 0xF4),
    Rgb(0xE8, 0xD0, 0xA9),
    Rgb(0xB7, 0xE1, 0xCD),
    Rgb(0xC9, 0xDA, 0xF8),
    Rgb(0xFF, 0xD6, 0xCC),
    Rgb(0xD9, 0xD2, 0xE9),
    Rgb(0xEA, 0xD1, 0xDC),
    Rgb(0xA4, 0xC2, 0xF4),
    Rgb(0xD5, 0xA6, 0xBD),
    Rgb(0xB6, 0xD7, 0xA8),
    Rgb(0xFF, 0xE5, 0x99),
    Rgb(0xA2, 0xC4, 0xC9),
    Rgb(0xD5, 0xD5, 0xD5),
];

/// Lowest channel value of a generated pastel colour.
const PASTEL_FLOOR: u8 = 180;

/// Hands out curated colours in order, then random pastels.
#[derive(Debug, Clone, Default)]
pub struct ColorPalette {
    used: usize,
}

impl ColorPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next colour.  Draws from `rng` only once the curated list is exhausted.
    pub fn next_color<R: Rng>(&mut self, rng: &mut R) -> Rgb {
        let color = match CURATED_PALETTE.get(self.used) {
            Some(&c) => c,
            None => Rgb(
                rng.random_range(PASTEL_FLOOR..=u8::MAX),
                rng.random_range(PASTEL_FLOOR..=u8::MAX),
                rng.random_range(PASTEL_FLOOR..=u8::MAX),
            ),
        };
        self.used += 1;
        color
    }
}

// ── Legend ────────────────────────────────────────────────────────────────────

/// One course in a cohort legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub code: String,
    pub color: Rgb,
    pub name: String,
    /// Faculty text as written in the catalog.
    pub faculty: String,
    pub hours: Hours,
}

/// Course → colour / name / faculty / LTPSC map for one cohort, in
/// first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Legend {
    entries: Vec<LegendEntry>,
    by_code: BTreeMap<String, usize>,
    palette: ColorPalette,
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colour for `row`'s course, assigning one on first sight.  Later rows
    /// with the same code keep the first entry untouched.
    pub fn assign<R: Rng>(&mut self, row: &CatalogRow, rng: &mut R) -> Rgb {
        if let Some(&i) = self.by_code.get(&row.code) {
            return self.entries[i].color;
        }
        let color = self.palette.next_color(rng);
        self.by_code.insert(row.code.clone(), self.entries.len());
        self.entries.push(LegendEntry {
            code: row.code.clone(),
            color,
            name: row.name.clone(),
            faculty: row.faculty.trim().to_string(),
            hours: row.hours,
        });
        color
    }

    pub fn color_of(&self, code: &str) -> Option<Rgb> {
        self.by_code.get(code).map(|&i| self.entries[i].color)
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
