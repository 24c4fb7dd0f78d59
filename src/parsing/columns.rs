//! Column layout of CAMI data rows.
//!
//! A `@@` line declares which column holds which field. The declared names are
//! collected into a [`ColumnIndexMap`] and [`resolve_indices`] turns that into a
//! fixed-order [`ResolvedIndices`], failing on the first missing mandatory column.

use std::collections::HashMap;
use thiserror::Error;

/// Canonical CAMI column names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnName {
    Rank,
    Taxid,
    Percentage,
    Taxpath,
    Taxpathsn,
}

impl ColumnName {
    /// Mandatory columns, in the order they are checked
    pub const REQUIRED: [ColumnName; 4] = [
        ColumnName::Rank,
        ColumnName::Taxid,
        ColumnName::Percentage,
        ColumnName::Taxpath,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rank => "RANK",
            Self::Taxid => "TAXID",
            Self::Percentage => "PERCENTAGE",
            Self::Taxpath => "TAXPATH",
            Self::Taxpathsn => "TAXPATHSN",
        }
    }
}

impl std::fmt::Display for ColumnName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required column {0} in CAMI column header")]
pub struct MissingColumnError(pub ColumnName);

/// Column name -> zero-based position, as declared by a `@@` line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndexMap(HashMap<String, usize>);

impl ColumnIndexMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-tokenized header fields.
    ///
    /// Names are trimmed and upper-cased. A repeated name keeps its last position.
    #[must_use]
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = Self::new();
        for (i, name) in fields.into_iter().enumerate() {
            map.insert(name, i);
        }
        map
    }

    pub fn insert(&mut self, name: &str, index: usize) {
        self.0.insert(name.trim().to_uppercase(), index);
    }

    #[must_use]
    pub fn get(&self, column: ColumnName) -> Option<usize> {
        self.0.get(column.as_str()).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, usize)> for ColumnIndexMap {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, index) in iter {
            map.insert(name.as_ref(), index);
        }
        map
    }
}

/// Positions of the CAMI fields within a data row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedIndices {
    pub rank: usize,
    pub taxid: usize,
    pub percentage: usize,
    pub taxpath: usize,
    pub taxpathsn: Option<usize>,
}

impl ResolvedIndices {
    /// `(rank, taxid, percentage, taxpath, taxpathsn)`
    #[must_use]
    pub fn as_tuple(&self) -> (usize, usize, usize, usize, Option<usize>) {
        (
            self.rank,
            self.taxid,
            self.percentage,
            self.taxpath,
            self.taxpathsn,
        )
    }

    /// Minimum number of fields a row needs to hold every mandatory column
    #[must_use]
    pub fn min_fields(&self) -> usize {
        self.rank
            .max(self.taxid)
            .max(self.percentage)
            .max(self.taxpath)
            + 1
    }
}

/// Resolve the column positions of a declared CAMI header.
///
/// # Errors
///
/// Returns `MissingColumnError` naming the first of RANK, TAXID, PERCENTAGE,
/// TAXPATH (checked in that order) that is absent. TAXPATHSN is optional.
pub fn resolve_indices(columns: &ColumnIndexMap) -> Result<ResolvedIndices, MissingColumnError> {
    let mut required = [0usize; 4];
    for (slot, column) in required.iter_mut().zip(ColumnName::REQUIRED) {
        *slot = columns.get(column).ok_or(MissingColumnError(column))?;
    }
    let [rank, taxid, percentage, taxpath] = required;

    Ok(ResolvedIndices {
        rank,
        taxid,
        percentage,
        taxpath,
        taxpathsn: columns.get(ColumnName::Taxpathsn),
    })
}
