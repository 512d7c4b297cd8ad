/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Optional faculty directory.
//!
//! ```yaml
//! faculty:
//!   - Dr. Rao
//!   - Prof. Menon (Visiting)
//! ```
//!
//! Names are normalised the same way as catalog faculty text and seeded into
//! the faculty ledger before the first cohort.  Listing a name changes no
//! placement; it only makes the ledger aware of the person.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::course::FacultyId;

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    faculty: Vec<String>,
}

/// Known faculty members, normalised and de-duplicated, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacultyDirectory {
    members: Vec<FacultyId>,
}

impl FacultyDirectory {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading faculty directory from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open faculty directory: {}", path.display()))?;

        let file: DirectoryFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        let directory = Self::from_names(file.faculty.iter().map(String::as_str));
        info!(members = directory.len(), "Faculty directory loaded");
        Ok(directory)
    }

    /// Normalise `names`, dropping unassigned entries and repeats.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut members = Vec::new();
        for raw in names {
            let id = FacultyId::normalize(raw);
            if id.is_unassigned() {
                debug!(raw, "skipping unassigned directory entry");
                continue;
            }
            if !members.contains(&id) {
                members.push(id);
            }
        }
        Self { members }
    }

    pub fn members(&self) -> &[FacultyId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_normalises_and_dedups() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(
            b"faculty:\n  - Dr. Rao\n  - ' Dr. Rao / Dr. Iyer '\n  - TBA\n  - Prof. Menon (Visiting)\n",
        )
        .unwrap();

        let dir = FacultyDirectory::load_from_file(f.path()).unwrap();
        assert_eq!(
            dir.members(),
            &[
                FacultyId::Named("Dr. Rao".into()),
                FacultyId::Named("Prof. Menon".into())
            ]
        );
    }

    #[test]
    fn missing_file_fails() {
        assert!(FacultyDirectory::load_from_file(Path::new("/nonexistent/faculty.yaml")).is_err());
    }

    #[test]
    fn empty_document_gives_empty_directory() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"faculty: []\n").unwrap();
        assert!(FacultyDirectory::load_from_file(f.path()).unwrap().is_empty());
    }
}
