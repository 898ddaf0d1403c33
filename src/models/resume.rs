use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One uploaded resume document: raw XML bytes plus the name used to
/// identify it in error reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// What extraction yields for a single document: the professor it belongs
/// to and one specialty per expertise area, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub professor_name: String,
    pub specialties: Vec<String>,
}

/// Professor name -> declared specialties, aggregated across documents.
///
/// Backed by a `BTreeMap` so iteration order is the professor names in
/// lexicographic order, which keeps ranking output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialtyMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl SpecialtyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append-or-insert merge: a professor already in the map gets the new
    /// specialties appended to their list, a new professor gets a fresh
    /// entry. Duplicates and empty strings are kept as-is.
    pub fn append(
        &mut self,
        professor: impl Into<String>,
        specialties: impl IntoIterator<Item = String>,
    ) {
        self.entries
            .entry(professor.into())
            .or_default()
            .extend(specialties);
    }

    /// Folds one parsed document into the map via [`SpecialtyMap::append`].
    pub fn merge_record(&mut self, record: ResumeRecord) {
        self.append(record.professor_name, record.specialties);
    }

    pub fn get(&self, professor: &str) -> Option<&[String]> {
        self.entries.get(professor).map(Vec::as_slice)
    }

    /// Iterates professors in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.entries.iter().map(|(name, s)| (name.as_str(), s.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
