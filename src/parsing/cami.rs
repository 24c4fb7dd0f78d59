//! Parser for CAMI taxonomic profiling files.
//!
//! A CAMI file holds one or more sample blocks:
//!
//! ```text
//! @SampleID:CAMI_LOW_S001
//! @Version:0.9.1
//! @Ranks:superkingdom|phylum|class|order|family|genus|species|strain
//! @@TAXID	RANK	TAXPATH	TAXPATHSN	PERCENTAGE
//! 2157	superkingdom	2157	Archaea	0.029528
//! ```
//!
//! Each block declares its own column order on its `@@` line, so the layout is
//! resolved again for every block.

use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::prediction::PredictionRecord;
use crate::core::profile::{ProfileBlock, ProfileHeader, SAMPLE_ID_KEY};
use crate::parsing::columns::{resolve_indices, ColumnIndexMap, MissingColumnError, ResolvedIndices};
use crate::utils::validation::{check_prediction_limit, is_valid_percentage, MAX_PREDICTIONS};

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {source}")]
    MissingColumn {
        line: usize,
        source: MissingColumnError,
    },

    #[error("Malformed CAMI profile at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("Too many predictions in sample '{sample}': exceeds maximum allowed ({max})")]
    TooManyPredictions { sample: String, max: usize },
}

impl ProfileError {
    fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }
}

/// How fields are separated within a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Tab-separated; fields may contain spaces
    Tab,
    /// Runs of spaces or tabs
    Whitespace,
}

impl Delimiter {
    /// Tab if the declaration line uses tabs, whitespace otherwise
    #[must_use]
    pub fn detect(line: &str) -> Self {
        if line.contains('\t') {
            Self::Tab
        } else {
            Self::Whitespace
        }
    }

    #[must_use]
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Self::Tab => line.split('\t').map(str::trim).collect(),
            Self::Whitespace => line.split_whitespace().collect(),
        }
    }
}

/// Column layout of the block currently being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub indices: ResolvedIndices,
    pub delimiter: Delimiter,
    /// Number of columns named on the `@@` line
    pub width: usize,
}

impl BlockLayout {
    /// Build the layout from the text following `@@`.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumnError` if a mandatory column is not declared.
    pub fn from_declaration(columns: &str) -> Result<Self, MissingColumnError> {
        let delimiter = Delimiter::detect(columns);
        let declared = delimiter.split(columns);
        let width = declared.len();
        let indices = resolve_indices(&ColumnIndexMap::from_fields(declared))?;
        Ok(Self {
            indices,
            delimiter,
            width,
        })
    }

    /// A row containing tabs is tab-delimited even under a space-separated `@@` line
    fn row_delimiter(&self, line: &str) -> Delimiter {
        if line.contains('\t') {
            Delimiter::Tab
        } else {
            self.delimiter
        }
    }

    fn parse_row(&self, line: &str, line_num: usize) -> Result<PredictionRecord, ProfileError> {
        let delimiter = self.row_delimiter(line);
        let fields = delimiter.split(line);
        let idx = &self.indices;

        // Space-separated rows may not be wider than the declaration
        if delimiter == Delimiter::Whitespace && fields.len() > self.width {
            return Err(ProfileError::malformed(
                line_num,
                format!(
                    "found {} fields but the @@ line declares {}",
                    fields.len(),
                    self.width
                ),
            ));
        }

        if fields.len() < idx.min_fields() {
            return Err(ProfileError::malformed(
                line_num,
                format!(
                    "expected at least {} fields, found {}",
                    idx.min_fields(),
                    fields.len()
                ),
            ));
        }

        let raw_percentage = fields[idx.percentage];
        let percentage: f64 = raw_percentage.parse().map_err(|_| {
            ProfileError::malformed(line_num, format!("invalid percentage '{raw_percentage}'"))
        })?;
        if !percentage.is_finite() {
            return Err(ProfileError::malformed(
                line_num,
                format!("percentage must be finite, got '{raw_percentage}'"),
            ));
        }

        let prediction = PredictionRecord::new(
            fields[idx.rank],
            fields[idx.taxid],
            percentage,
            fields[idx.taxpath],
        );
        // Trailing TAXPATHSN is often left off entirely
        let taxpathsn = idx
            .taxpathsn
            .and_then(|i| fields.get(i).copied())
            .filter(|s| !s.is_empty());

        Ok(match taxpathsn {
            Some(names) => prediction.with_taxpathsn(names),
            None => prediction,
        })
    }
}

/// Scanner state between lines
#[derive(Debug, Clone, Copy)]
enum ParserState {
    /// Nothing but comments seen so far
    SeekingHeader,
    /// Reading `@KEY:VALUE` lines; no columns declared for this block yet
    InHeader,
    /// Columns declared; data rows are accepted
    InData(BlockLayout),
}

/// Block under construction
#[derive(Debug)]
struct BlockBuilder {
    sample_id: Option<String>,
    header: ProfileHeader,
    predictions: Vec<PredictionRecord>,
    first_line: usize,
    max_predictions: usize,
}

impl BlockBuilder {
    fn new(first_line: usize, max_predictions: usize) -> Self {
        Self {
            sample_id: None,
            header: ProfileHeader::new(),
            predictions: Vec::new(),
            first_line,
            max_predictions,
        }
    }

    fn push(&mut self, prediction: PredictionRecord, line_num: usize) -> Result<(), ProfileError> {
        if let Some(reason) = check_prediction_limit(self.predictions.len(), self.max_predictions) {
            warn!(line = line_num, "{reason}");
            return Err(ProfileError::TooManyPredictions {
                sample: self.sample_id.clone().unwrap_or_default(),
                max: self.max_predictions,
            });
        }

        if !is_valid_percentage(prediction.percentage) {
            warn!(
                line = line_num,
                taxid = %prediction.taxid,
                percentage = prediction.percentage,
                "Percentage outside [0, 100]"
            );
        }
        if prediction.known_rank().is_none() {
            debug!(line = line_num, rank = %prediction.rank, "Rank outside the CAMI vocabulary");
        }

        self.predictions.push(prediction);
        Ok(())
    }

    fn seal(self) -> Result<ProfileBlock, ProfileError> {
        let Some(sample_id) = self.sample_id else {
            return Err(ProfileError::malformed(
                self.first_line,
                "profile block has no @SampleID header",
            ));
        };

        let mut header = self.header;
        header.fill_defaults();

        debug!(
            sample = %sample_id,
            predictions = self.predictions.len(),
            "Parsed CAMI sample block"
        );

        Ok(ProfileBlock {
            sample_id,
            header,
            predictions: self.predictions,
        })
    }
}

/// Split the text after `@` into an upper-cased key and trimmed value
fn split_metadata(meta: &str, line_num: usize) -> Result<(String, String), ProfileError> {
    let (key, value) = meta.split_once(':').ok_or_else(|| {
        ProfileError::malformed(line_num, format!("header line '@{meta}' is not @KEY:VALUE"))
    })?;

    let key = key.trim().to_uppercase();
    if key.is_empty() {
        return Err(ProfileError::malformed(line_num, "header line has an empty key"));
    }

    Ok((key, value.trim().to_string()))
}

/// Parse the lines of a CAMI profile into sample blocks.
///
/// Blocks are returned in the order their `@SampleID` lines appear and rows keep
/// their input order. Metadata lines before the first `@SampleID` belong to the
/// first block; data rows there are rejected.
///
/// # Errors
///
/// Returns `ProfileError::MissingColumn` if a `@@` line lacks a mandatory column,
/// `ProfileError::Malformed` for a data row before the block's `@@` line, an
/// unparsable or short row, a malformed header line, or a block without
/// `@SampleID`, and `ProfileError::TooManyPredictions` if a block exceeds the
/// row limit.
pub fn parse_profiles<I, S>(lines: I) -> Result<Vec<ProfileBlock>, ProfileError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_profiles_with_limit(lines, MAX_PREDICTIONS)
}

fn parse_profiles_with_limit<I, S>(
    lines: I,
    max_predictions: usize,
) -> Result<Vec<ProfileBlock>, ProfileError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut blocks = Vec::new();
    let mut state = ParserState::SeekingHeader;
    let mut current = BlockBuilder::new(1, max_predictions);

    for (i, raw) in lines.into_iter().enumerate() {
        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;
        let line = raw.as_ref().trim_end_matches(['\n', '\r']);

        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(columns) = line.strip_prefix("@@") {
            let layout = BlockLayout::from_declaration(columns).map_err(|source| {
                ProfileError::MissingColumn {
                    line: line_num,
                    source,
                }
            })?;
            state = ParserState::InData(layout);
        } else if let Some(meta) = line.strip_prefix('@') {
            let (key, value) = split_metadata(meta, line_num)?;

            if key == SAMPLE_ID_KEY {
                if current.sample_id.is_some() {
                    let finished = std::mem::replace(
                        &mut current,
                        BlockBuilder::new(line_num, max_predictions),
                    );
                    blocks.push(finished.seal()?);
                    state = ParserState::InHeader;
                } else if !current.predictions.is_empty() {
                    // Only metadata may precede the first @SampleID
                    return Err(ProfileError::malformed(
                        current.first_line,
                        "data rows appear before the first @SampleID header",
                    ));
                } else if matches!(state, ParserState::SeekingHeader) {
                    state = ParserState::InHeader;
                }
                current.sample_id = Some(value.clone());
            } else if matches!(state, ParserState::SeekingHeader) {
                state = ParserState::InHeader;
            }

            current.header.insert(key, value);
        } else {
            let ParserState::InData(layout) = state else {
                return Err(ProfileError::malformed(
                    line_num,
                    "data row appears before the @@ column header of its block",
                ));
            };
            let prediction = layout.parse_row(line, line_num)?;
            current.push(prediction, line_num)?;
        }
    }

    if !matches!(state, ParserState::SeekingHeader) {
        blocks.push(current.seal()?);
    }

    Ok(blocks)
}

/// Parse CAMI profile text
///
/// # Errors
///
/// See [`parse_profiles`].
pub fn parse_profile_text(text: &str) -> Result<Vec<ProfileBlock>, ProfileError> {
    parse_profiles(text.lines())
}

/// Parse a CAMI profile file, decompressing gzip input transparently
///
/// # Errors
///
/// Returns `ProfileError::Io` if the file cannot be read or is not UTF-8, or
/// any error from [`parse_profiles`].
pub fn parse_profile_file(path: &Path) -> Result<Vec<ProfileBlock>, ProfileError> {
    let bytes = std::fs::read(path)?;

    let text = if bytes.starts_with(&[0x1f, 0x8b]) {
        let mut text = String::new();
        flate2::read::MultiGzDecoder::new(bytes.as_slice()).read_to_string(&mut text)?;
        text
    } else {
        String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?
    };

    parse_profile_text(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{DEFAULT_PROGRAM, PROGRAM_KEY};
    use crate::parsing::columns::ColumnName;

    const SAMPLE: &str = "\
# Taxonomic Profiling Output
@SampleID:CAMI_LOW_S001
@Version:0.9.1
@Ranks:superkingdom|phylum|class|order|family|genus|species|strain
@TaxonomyID:ncbi-taxonomy_DATE
@@TAXID\tRANK\tTAXPATH\tTAXPATHSN\tPERCENTAGE
2157\tsuperkingdom\t2157\tArchaea\t0.029528
2\tsuperkingdom\t2\tBacteria\t29.183763
1224\tphylum\t2|1224\tBacteria|Proteobacteria\t10.5
562\tspecies\t2|1224|1236|91347|543|561|562\tBacteria|Proteobacteria|Gammaproteobacteria|Enterobacterales|Enterobacteriaceae|Escherichia|Escherichia coli\t3.25
";

    #[test]
    fn test_parse_single_block() {
        let blocks = parse_profile_text(SAMPLE).unwrap();
        assert_eq!(blocks.len(), 1);

        let block = &blocks[0];
        assert_eq!(block.sample_id, "CAMI_LOW_S001");
        assert_eq!(block.predictions.len(), 4);

        let expected: ProfileHeader = [
            ("SAMPLEID", "CAMI_LOW_S001"),
            ("VERSION", "0.9.1"),
            ("RANKS", "superkingdom|phylum|class|order|family|genus|species|strain"),
            ("TAXONOMYID", "ncbi-taxonomy_DATE"),
            ("__PROGRAM__", "unknown"),
        ]
        .into_iter()
        .collect();
        assert_eq!(block.header, expected);

        let first = &block.predictions[0];
        assert_eq!(first.rank, "superkingdom");
        assert_eq!(first.taxid, "2157");
        assert!((first.percentage - 0.029_528).abs() < 1e-6);
        assert_eq!(first.taxpath, "2157");
        assert_eq!(first.taxpathsn.as_deref(), Some("Archaea"));

        let second = &block.predictions[1];
        assert_eq!(second.taxid, "2");
        assert!((second.percentage - 29.183_763).abs() < 1e-6);
        assert_eq!(second.taxpathsn.as_deref(), Some("Bacteria"));

        // Spaces inside TAXPATHSN survive tab splitting
        assert!(block.predictions[3]
            .taxpathsn
            .as_deref()
            .unwrap()
            .ends_with("Escherichia coli"));
    }

    #[test]
    fn test_whitespace_delimited_scenario() {
        let text = "@SampleID:S1\n@@TAXID RANK PERCENTAGE TAXPATH\n2157 superkingdom 0.029528 2157\n";
        let blocks = parse_profile_text(text).unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].sample_id, "S1");
        assert_eq!(blocks[0].predictions.len(), 1);

        let p = &blocks[0].predictions[0];
        assert_eq!(p.rank, "superkingdom");
        assert_eq!(p.taxid, "2157");
        assert!((p.percentage - 0.029_528).abs() < 1e-9);
        assert_eq!(p.taxpath, "2157");
        assert!(p.taxpathsn.is_none());
    }

    #[test]
    fn test_program_defaults_to_unknown() {
        let blocks = parse_profile_text(SAMPLE).unwrap();
        assert_eq!(blocks[0].header.get(PROGRAM_KEY), Some(DEFAULT_PROGRAM));
        assert_eq!(blocks[0].program(), "unknown");
    }

    #[test]
    fn test_declared_program_is_kept() {
        let text = "@SampleID:S1\n@__program__:yacht\n@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\n2\tsuperkingdom\t100\t2\n";
        let blocks = parse_profile_text(text).unwrap();
        assert_eq!(blocks[0].program(), "yacht");
    }

    #[test]
    fn test_multiple_blocks_with_different_layouts() {
        let text = "\
@SampleID:A
@@TAXID\tRANK\tPERCENTAGE\tTAXPATH
2\tsuperkingdom\t60.0\t2
2157\tsuperkingdom\t40.0\t2157

@SampleID:B
@__program__:other
@@RANK\tTAXPATH\tTAXID\tPERCENTAGE\tTAXPATHSN
superkingdom\t2\t2\t100\tBacteria
";
        let blocks = parse_profile_text(text).unwrap();
        assert_eq!(blocks.len(), 2);

        assert_eq!(blocks[0].sample_id, "A");
        assert_eq!(blocks[0].predictions.len(), 2);
        assert_eq!(blocks[0].program(), "unknown");
        assert_eq!(blocks[0].predictions[1].taxid, "2157");

        assert_eq!(blocks[1].sample_id, "B");
        assert_eq!(blocks[1].program(), "other");
        assert_eq!(blocks[1].predictions.len(), 1);
        let p = &blocks[1].predictions[0];
        assert_eq!(p.taxid, "2");
        assert_eq!(p.rank, "superkingdom");
        assert!((p.percentage - 100.0).abs() < f64::EPSILON);
        assert_eq!(p.taxpathsn.as_deref(), Some("Bacteria"));
    }

    #[test]
    fn test_layout_does_not_carry_over_to_next_block() {
        let text = "\
@SampleID:A
@@TAXID\tRANK\tPERCENTAGE\tTAXPATH
2\tsuperkingdom\t100\t2
@SampleID:B
2\tsuperkingdom\t100\t2
";
        let err = parse_profile_text(text).unwrap_err();
        assert!(matches!(err, ProfileError::Malformed { line: 5, .. }));
    }

    #[test]
    fn test_data_before_column_header() {
        let text = "@SampleID:S1\n2157\tsuperkingdom\t0.02\t2157\n";
        let err = parse_profile_text(text).unwrap_err();
        assert!(matches!(err, ProfileError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_data_as_first_line() {
        let err = parse_profile_text("2157\tsuperkingdom\t0.02\t2157\n").unwrap_err();
        assert!(matches!(err, ProfileError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_invalid_percentage() {
        let text = "@SampleID:S1\n@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\n2\tsuperkingdom\tabc\t2\n";
        let err = parse_profile_text(text).unwrap_err();
        match err {
            ProfileError::Malformed { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_percentage() {
        let text = "@SampleID:S1\n@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\n2\tsuperkingdom\tNaN\t2\n";
        assert!(matches!(
            parse_profile_text(text).unwrap_err(),
            ProfileError::Malformed { line: 3, .. }
        ));
    }

    #[test]
    fn test_out_of_range_percentage_is_accepted() {
        let text = "@SampleID:S1\n@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\n2\tsuperkingdom\t150\t2\n";
        let blocks = parse_profile_text(text).unwrap();
        assert!((blocks[0].predictions[0].percentage - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_short_row() {
        let text = "@SampleID:S1\n@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\n2\tsuperkingdom\t1.0\n";
        let err = parse_profile_text(text).unwrap_err();
        assert!(matches!(err, ProfileError::Malformed { line: 3, .. }));
    }

    #[test]
    fn test_missing_taxpathsn_value() {
        let text = "@SampleID:S1\n@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\tTAXPATHSN\n2\tsuperkingdom\t1.0\t2\n1224\tphylum\t1.0\t2|1224\t\n";
        let blocks = parse_profile_text(text).unwrap();
        assert!(blocks[0].predictions[0].taxpathsn.is_none());
        assert!(blocks[0].predictions[1].taxpathsn.is_none());
    }

    #[test]
    fn test_missing_column_in_declaration() {
        let text = "@SampleID:S1\n@@TAXID\tRANK\tTAXPATH\n";
        match parse_profile_text(text).unwrap_err() {
            ProfileError::MissingColumn { line, source } => {
                assert_eq!(line, 2);
                assert_eq!(source, MissingColumnError(ColumnName::Percentage));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_header_line_without_separator() {
        let err = parse_profile_text("@SampleID S1\n").unwrap_err();
        assert!(matches!(err, ProfileError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_block_without_sample_id() {
        let text = "@Version:0.9.1\n@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\n2\tsuperkingdom\t1.0\t2\n";
        let err = parse_profile_text(text).unwrap_err();
        assert!(matches!(err, ProfileError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_preamble_belongs_to_first_block() {
        let text = "@Version:0.9.1\n@SampleID:S1\n@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\n2\tsuperkingdom\t1.0\t2\n";
        let blocks = parse_profile_text(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header.get("VERSION"), Some("0.9.1"));
        assert_eq!(blocks[0].sample_id, "S1");
    }

    #[test]
    fn test_empty_and_comment_only_input() {
        assert!(parse_profile_text("").unwrap().is_empty());
        assert!(parse_profile_text("# comment\n\n   \n").unwrap().is_empty());
    }

    #[test]
    fn test_block_without_rows() {
        let blocks = parse_profile_text("@SampleID:empty\n@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\n").unwrap();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].predictions.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "@SampleID:S1\r\n@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\r\n2\tsuperkingdom\t1.5\t2\r\n";
        let blocks = parse_profile_text(text).unwrap();
        assert_eq!(blocks[0].sample_id, "S1");
        assert_eq!(blocks[0].predictions[0].taxpath, "2");
    }

    #[test]
    fn test_parse_profiles_accepts_owned_lines() {
        let lines: Vec<String> = SAMPLE.lines().map(|l| format!("{l}\n")).collect();
        let blocks = parse_profiles(lines).unwrap();
        assert_eq!(blocks[0].predictions.len(), 4);
    }

    #[test]
    fn test_round_trip_through_writer() {
        let blocks = parse_profile_text(SAMPLE).unwrap();
        let written = crate::core::profile::write_profiles(&blocks);
        let reparsed = parse_profile_text(&written).unwrap();
        assert_eq!(blocks, reparsed);
    }

    #[test]
    fn test_tab_rows_under_space_separated_declaration() {
        let text = "@SampleID:S1\n@@TAXID RANK PERCENTAGE TAXPATH TAXPATHSN\n562\tspecies\t10.0\t2|562\tBacteria|Escherichia coli\n";
        let blocks = parse_profile_text(text).unwrap();

        let p = &blocks[0].predictions[0];
        assert_eq!(p.taxid, "562");
        assert_eq!(p.taxpath, "2|562");
        assert_eq!(p.taxpathsn.as_deref(), Some("Bacteria|Escherichia coli"));
    }

    #[test]
    fn test_whitespace_row_with_extra_fields() {
        let text = "@SampleID:S1\n@@TAXID RANK PERCENTAGE TAXPATH TAXPATHSN\n562 species 10.0 2|562 Bacteria|Escherichia coli\n";
        match parse_profile_text(text).unwrap_err() {
            ProfileError::Malformed { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("declares 5"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rows_before_first_sample_id() {
        let text = "@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\n2\tsuperkingdom\t1.0\t2\n@SampleID:S1\n2157\tsuperkingdom\t2.0\t2157\n";
        let err = parse_profile_text(text).unwrap_err();
        assert!(matches!(err, ProfileError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_column_header_before_first_sample_id() {
        let text = "@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\n@SampleID:S1\n2157\tsuperkingdom\t2.0\t2157\n";
        let blocks = parse_profile_text(text).unwrap();
        assert_eq!(blocks[0].sample_id, "S1");
        assert_eq!(blocks[0].predictions.len(), 1);
    }

    #[test]
    fn test_prediction_limit_per_block() {
        let text = "\
@SampleID:A
@@TAXID\tRANK\tPERCENTAGE\tTAXPATH
2\tsuperkingdom\t50\t2
2157\tsuperkingdom\t50\t2157
@SampleID:B
@@TAXID\tRANK\tPERCENTAGE\tTAXPATH
2\tsuperkingdom\t40\t2
2157\tsuperkingdom\t40\t2157
10239\tsuperkingdom\t20\t10239
";
        match parse_profiles_with_limit(text.lines(), 2).unwrap_err() {
            ProfileError::TooManyPredictions { sample, max } => {
                assert_eq!(sample, "B");
                assert_eq!(max, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // The limit counts rows per block, not across the file
        let blocks = parse_profiles_with_limit(text.lines().take(8), 2).unwrap();
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_delimiter_detection() {
        assert_eq!(Delimiter::detect("TAXID\tRANK"), Delimiter::Tab);
        assert_eq!(Delimiter::detect("TAXID RANK"), Delimiter::Whitespace);
        assert_eq!(
            Delimiter::Whitespace.split("  a \t b  c "),
            vec!["a", "b", "c"]
        );
        assert_eq!(Delimiter::Tab.split("a\t\tc "), vec!["a", "", "c"]);
    }
}
