use serde::{Deserialize, Serialize};

use crate::core::types::Rank;

/// A single taxonomic abundance row from a CAMI profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Rank name as written in the profile (e.g. "species")
    pub rank: String,

    /// Taxonomic identifier
    pub taxid: String,

    /// Relative abundance in percent; not range-checked
    pub percentage: f64,

    /// Ancestor taxids from root to this taxon, joined by `|`
    pub taxpath: String,

    /// Human-readable taxpath (TAXPATHSN column), if declared and non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxpathsn: Option<String>,
}

impl PredictionRecord {
    #[must_use]
    pub fn new(
        rank: impl Into<String>,
        taxid: impl Into<String>,
        percentage: f64,
        taxpath: impl Into<String>,
    ) -> Self {
        Self {
            rank: rank.into(),
            taxid: taxid.into(),
            percentage,
            taxpath: taxpath.into(),
            taxpathsn: None,
        }
    }

    #[must_use]
    pub fn with_taxpathsn(mut self, taxpathsn: impl Into<String>) -> Self {
        self.taxpathsn = Some(taxpathsn.into());
        self
    }

    /// The rank as a vocabulary term, if it is one of the CAMI ranks
    #[must_use]
    pub fn known_rank(&self) -> Option<Rank> {
        Rank::parse(&self.rank)
    }

    /// Number of taxids in the taxpath (empty entries are skipped)
    #[must_use]
    pub fn taxpath_depth(&self) -> usize {
        self.taxpath.split('|').filter(|s| !s.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_builder() {
        let p = PredictionRecord::new("species", "562", 12.5, "2|1224|1236|91347|543|561|562")
            .with_taxpathsn("Bacteria|Proteobacteria|Gammaproteobacteria|Enterobacterales|Enterobacteriaceae|Escherichia|Escherichia coli");

        assert_eq!(p.known_rank(), Some(Rank::Species));
        assert_eq!(p.taxpath_depth(), 7);
        assert!(p.taxpathsn.is_some());
    }

    #[test]
    fn test_unknown_rank() {
        let p = PredictionRecord::new("no rank", "1", 100.0, "1");
        assert!(p.known_rank().is_none());
    }

    #[test]
    fn test_taxpath_depth_with_gaps() {
        // CAMI allows empty levels in a taxpath
        let p = PredictionRecord::new("genus", "561", 1.0, "2||1236||543|561");
        assert_eq!(p.taxpath_depth(), 4);
    }
}
