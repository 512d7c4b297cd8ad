/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Minute-of-day helpers: `HH:MM` parsing and slot labels.

use std::fmt;

/// Minutes in one day; a parsed time must be strictly below this.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error returned by [`parse_hhmm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// The text is not of the form `H:MM` / `HH:MM`.
    Malformed(String),

    /// Hour or minute component is out of range.
    OutOfRange { hour: u32, minute: u32 },
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::Malformed(text) => {
                write!(f, "'{text}' is not a valid HH:MM time")
            }
            ClockError::OutOfRange { hour, minute } => {
                write!(f, "time {hour:02}:{minute:02} is out of range")
            }
        }
    }
}

impl std::error::Error for ClockError {}

/// Parse `HH:MM` (24-hour clock) into minutes after midnight.
pub fn parse_hhmm(text: &str) -> Result<u32, ClockError> {
    let trimmed = text.trim();
    let (h, m) = trimmed
        .split_once(':')
        .ok_or_else(|| ClockError::Malformed(trimmed.to_string()))?;

    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return Err(ClockError::Malformed(trimmed.to_string()));
    }

    let hour: u32 = h
        .parse()
        .map_err(|_| ClockError::Malformed(trimmed.to_string()))?;
    let minute: u32 = m
        .parse()
        .map_err(|_| ClockError::Malformed(trimmed.to_string()))?;

    if hour > 23 || minute > 59 {
        return Err(ClockError::OutOfRange { hour, minute });
    }

    Ok(hour * 60 + minute)
}

/// `HH:MM`, 24-hour clock.
pub fn format_24h(minute_of_day: u32) -> String {
    let m = minute_of_day % MINUTES_PER_DAY;
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// `hh:MM AM/PM`, the form used in rendered timetable headers.
pub fn format_12h(minute_of_day: u32) -> String {
    let m = minute_of_day % MINUTES_PER_DAY;
    let (hour, minute) = (m / 60, m % 60);
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12:02}:{minute:02} {suffix}")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
