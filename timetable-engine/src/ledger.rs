/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Booking ledgers: which (day, slot) pairs are already taken per entity.
//!
//! | Ledger | Key | Lifetime |
//! |---|---|---|
//! | [`FacultyLedger`] | normalised [`FacultyId`] | whole run, shared across cohorts |
//! | [`RoomLedger`] | [`RoomId`] | one cohort |
//!
//! Each entity stores one `u64` bitmask per weekday (bit N = slot N busy),
//! which is why the day window is capped at
//! [`MAX_SLOTS_PER_DAY`](crate::calendar::MAX_SLOTS_PER_DAY).  `BTreeMap`
//! keeps iteration deterministic.

use std::collections::BTreeMap;

use crate::calendar::{Day, MAX_SLOTS_PER_DAY};
use crate::course::{FacultyId, RoomId};

/// Per-day slot bitmasks for one entity.
type WeekMask = [u64; Day::COUNT];

/// Bits `start..start + len`.  Bits beyond the mask width are dropped.
fn block_mask(start: usize, len: usize) -> u64 {
    debug_assert!(start + len <= MAX_SLOTS_PER_DAY, "block exceeds slot mask");
    let ones = if len >= 64 { u64::MAX } else { (1u64 << len) - 1 };
    ones.checked_shl(start as u32).unwrap_or(0)
}

// ── BookingLedger ─────────────────────────────────────────────────────────────

/// Generic occupancy ledger keyed by an entity identifier.
#[derive(Debug, Clone)]
pub struct BookingLedger<K> {
    busy: BTreeMap<K, WeekMask>,
}

impl<K> Default for BookingLedger<K> {
    fn default() -> Self {
        Self {
            busy: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> BookingLedger<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty entry for `key`.  Has no effect on availability.
    pub fn register(&mut self, key: &K) {
        self.busy.entry(key.clone()).or_insert([0; Day::COUNT]);
    }

    pub fn is_registered(&self, key: &K) -> bool {
        self.busy.contains_key(key)
    }

    /// `true` if `slot` on `day` is booked for `key`.
    pub fn reserved(&self, key: &K, day: Day, slot: usize) -> bool {
        self.busy
            .get(key)
            .map(|week| week[day.index()] & block_mask(slot, 1) != 0)
            .unwrap_or(false)
    }

    /// `true` if every slot of `start..start + len` on `day` is free for `key`.
    pub fn available(&self, key: &K, day: Day, start: usize, len: usize) -> bool {
        self.busy
            .get(key)
            .map(|week| week[day.index()] & block_mask(start, len) == 0)
            .unwrap_or(true)
    }

    /// Mark `start..start + len` on `day` busy for `key`.
    pub fn reserve(&mut self, key: &K, day: Day, start: usize, len: usize) {
        let week = self.busy.entry(key.clone()).or_insert([0; Day::COUNT]);
        week[day.index()] |= block_mask(start, len);
    }

    /// Number of booked slots for `key` across the week.
    pub fn booked_slots(&self, key: &K) -> u32 {
        self.busy
            .get(key)
            .map(|week| week.iter().map(|m| m.count_ones()).sum())
            .unwrap_or(0)
    }

    /// Number of known entities.
    pub fn len(&self) -> usize {
        self.busy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.busy.is_empty()
    }
}

/// Room occupancy for one cohort.
pub type RoomLedger = BookingLedger<RoomId>;

// ── FacultyLedger ─────────────────────────────────────────────────────────────

/// Run-wide faculty occupancy.
///
/// [`FacultyId::Unassigned`] is always available and is never recorded.
#[derive(Debug, Clone, Default)]
pub struct FacultyLedger {
    inner: BookingLedger<String>,
}

impl FacultyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register a known identity (faculty directory).
    pub fn register(&mut self, faculty: &FacultyId) {
        if let FacultyId::Named(name) = faculty {
            self.inner.register(name);
        }
    }

    pub fn is_registered(&self, faculty: &FacultyId) -> bool {
        match faculty {
            FacultyId::Named(name) => self.inner.is_registered(name),
            FacultyId::Unassigned => false,
        }
    }

    pub fn reserved(&self, faculty: &FacultyId, day: Day, slot: usize) -> bool {
        match faculty {
            FacultyId::Named(name) => self.inner.reserved(name, day, slot),
            FacultyId::Unassigned => false,
        }
    }

    pub fn available(&self, faculty: &FacultyId, day: Day, start: usize, len: usize) -> bool {
        match faculty {
            FacultyId::Named(name) => self.inner.available(name, day, start, len),
            FacultyId::Unassigned => true,
        }
    }

    pub fn reserve(&mut self, faculty: &FacultyId, day: Day, start: usize, len: usize) {
        if let FacultyId::Named(name) = faculty {
            self.inner.reserve(name, day, start, len);
        }
    }

    pub fn booked_slots(&self, faculty: &FacultyId) -> u32 {
        match faculty {
            FacultyId::Named(name) => self.inner.booked_slots(name),
            FacultyId::Unassigned => 0,
        }
    }

    /// Number of known named identities.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
