use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::core::prediction::PredictionRecord;
use crate::core::types::Rank;

/// Header key that starts a new sample block
pub const SAMPLE_ID_KEY: &str = "SAMPLEID";

/// Header key naming the program that produced the profile
pub const PROGRAM_KEY: &str = "__PROGRAM__";

/// Value used for [`PROGRAM_KEY`] when a block does not declare one
pub const DEFAULT_PROGRAM: &str = "unknown";

/// Column order used when writing CAMI profiles
pub const CAMI_COLUMNS: &str = "TAXID\tRANK\tTAXPATH\tTAXPATHSN\tPERCENTAGE";

/// Ordered `@KEY:VALUE` metadata of a profile block.
///
/// Keys are stored upper-cased. Insertion order is preserved; re-inserting a key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileHeader {
    entries: Vec<(String, String)>,
}

impl ProfileHeader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into().to_uppercase();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_uppercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fill in keys every sealed block must expose
    pub fn fill_defaults(&mut self) {
        if !self.contains_key(PROGRAM_KEY) {
            self.insert(PROGRAM_KEY, DEFAULT_PROGRAM);
        }
    }
}

impl Serialize for ProfileHeader {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProfileHeader {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut header = Self::new();
        for (k, v) in iter {
            header.insert(k, v);
        }
        header
    }
}

/// One parsed sample from a CAMI profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileBlock {
    pub sample_id: String,
    pub header: ProfileHeader,
    pub predictions: Vec<PredictionRecord>,
}

impl ProfileBlock {
    /// Program that produced this profile (`"unknown"` if undeclared)
    #[must_use]
    pub fn program(&self) -> &str {
        self.header.get(PROGRAM_KEY).unwrap_or(DEFAULT_PROGRAM)
    }

    /// Sum of percentages per known rank, in canonical rank order
    #[must_use]
    pub fn rank_totals(&self) -> BTreeMap<Rank, f64> {
        let mut totals = BTreeMap::new();
        for prediction in &self.predictions {
            if let Some(rank) = prediction.known_rank() {
                *totals.entry(rank).or_insert(0.0) += prediction.percentage;
            }
        }
        totals
    }

    /// Predictions whose rank is outside the CAMI vocabulary
    #[must_use]
    pub fn unknown_rank_count(&self) -> usize {
        self.predictions
            .iter()
            .filter(|p| p.known_rank().is_none())
            .count()
    }

    /// Render this block as tab-delimited CAMI text
    #[must_use]
    pub fn to_cami(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "@SampleID:{}", self.sample_id);
        for (key, value) in self.header.iter() {
            if key == SAMPLE_ID_KEY {
                continue;
            }
            let _ = writeln!(out, "@{}:{}", display_key(key), value);
        }

        let _ = writeln!(out, "@@{CAMI_COLUMNS}");
        for p in &self.predictions {
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                p.taxid,
                p.rank,
                p.taxpath,
                p.taxpathsn.as_deref().unwrap_or(""),
                p.percentage
            );
        }

        out
    }
}

/// Render several blocks as one CAMI document, separated by blank lines
#[must_use]
pub fn write_profiles(blocks: &[ProfileBlock]) -> String {
    blocks
        .iter()
        .map(ProfileBlock::to_cami)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Conventional spelling of well-known CAMI header keys
fn display_key(key: &str) -> &str {
    match key {
        "VERSION" => "Version",
        "RANKS" => "Ranks",
        "TAXONOMYID" => "TaxonomyID",
        PROGRAM_KEY => "__program__",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block() -> ProfileBlock {
        let header: ProfileHeader = [
            ("SampleID", "S1"),
            ("Version", "0.9.1"),
            ("Ranks", "superkingdom|phylum|class|order|family|genus|species|strain"),
            ("__PROGRAM__", "unknown"),
        ]
        .into_iter()
        .collect();

        ProfileBlock {
            sample_id: "S1".to_string(),
            header,
            predictions: vec![
                PredictionRecord::new("superkingdom", "2157", 0.029528, "2157")
                    .with_taxpathsn("Archaea"),
                PredictionRecord::new("superkingdom", "2", 29.183763, "2"),
                PredictionRecord::new("phylum", "1224", 10.0, "2|1224"),
            ],
        }
    }

    #[test]
    fn test_header_insert_replaces_in_place() {
        let mut header = ProfileHeader::new();
        header.insert("SampleID", "a");
        header.insert("Version", "0.9");
        header.insert("SAMPLEID", "b");

        assert_eq!(header.len(), 2);
        assert_eq!(header.get("sampleid"), Some("b"));
        let keys: Vec<&str> = header.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["SAMPLEID", "VERSION"]);
    }

    #[test]
    fn test_fill_defaults() {
        let mut header = ProfileHeader::new();
        header.fill_defaults();
        assert_eq!(header.get(PROGRAM_KEY), Some(DEFAULT_PROGRAM));

        let mut header = ProfileHeader::new();
        header.insert("__program__", "yacht");
        header.fill_defaults();
        assert_eq!(header.get(PROGRAM_KEY), Some("yacht"));
    }

    #[test]
    fn test_header_serializes_in_order() {
        let header: ProfileHeader = [("b", "2"), ("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&header).unwrap();
        assert_eq!(json, r#"{"B":"2","A":"1"}"#);
    }

    #[test]
    fn test_rank_totals() {
        let block = sample_block();
        let totals = block.rank_totals();
        assert!((totals[&Rank::Superkingdom] - 29.213_291).abs() < 1e-9);
        assert!((totals[&Rank::Phylum] - 10.0).abs() < 1e-9);
        assert!(!totals.contains_key(&Rank::Species));
        assert_eq!(block.unknown_rank_count(), 0);
    }

    #[test]
    fn test_to_cami() {
        let text = sample_block().to_cami();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "@SampleID:S1");
        assert_eq!(lines[1], "@Version:0.9.1");
        assert_eq!(lines[3], "@__program__:unknown");
        assert_eq!(lines[4], format!("@@{CAMI_COLUMNS}"));
        assert_eq!(lines[5], "2157\tsuperkingdom\t2157\tArchaea\t0.029528");
        assert_eq!(lines[6], "2\tsuperkingdom\t2\t\t29.183763");
    }

    #[test]
    fn test_write_profiles_separates_blocks() {
        let mut second = sample_block();
        second.sample_id = "S2".to_string();
        let text = write_profiles(&[sample_block(), second]);

        assert_eq!(text.matches("@SampleID:").count(), 2);
        assert!(text.contains("\n\n@SampleID:S2"));
    }
}
