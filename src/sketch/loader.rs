//! Loading signatures from sketch containers.
//!
//! Containers are recognized by content, not by file extension:
//!
//! | Container | Detected by | Typical name |
//! |-----------|-------------|--------------|
//! | JSON      | leading `[` or `{` | `.sig`, `.json` |
//! | gzip JSON | gzip magic bytes | `.sig.gz` |
//! | zip       | zip magic bytes | `.zip`, `.sig.zip` |

use serde::Deserialize;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::sketch::signature::{Signature, SignatureError, SignatureRecord};
use crate::utils::validation::{check_signature_limit, is_valid_md5};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const ZIP_MAGIC: [u8; 4] = [b'P', b'K', 0x03, 0x04];

/// Archive member suffixes holding signatures
const SIGNATURE_SUFFIXES: [&str; 4] = [".sig", ".sig.gz", ".json", ".json.gz"];

/// Supported signature container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    Json,
    Gzip,
    Zip,
}

impl ContainerFormat {
    /// Detect the container format from the leading bytes of a file
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&ZIP_MAGIC) {
            return Some(Self::Zip);
        }
        if bytes.starts_with(&GZIP_MAGIC) {
            return Some(Self::Gzip);
        }
        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'[' | b'{') => Some(Self::Json),
            _ => None,
        }
    }

    #[must_use]
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Json => "JSON signature",
            Self::Gzip => "gzip-compressed signature",
            Self::Zip => "zip signature archive",
        }
    }
}

/// A signature file holds either one record or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordList {
    Many(Vec<SignatureRecord>),
    One(SignatureRecord),
}

impl From<RecordList> for Vec<SignatureRecord> {
    fn from(list: RecordList) -> Self {
        match list {
            RecordList::Many(records) => records,
            RecordList::One(record) => vec![record],
        }
    }
}

fn invalid(message: impl Into<String>) -> SignatureError {
    SignatureError::InvalidInput(message.into())
}

/// Decode plain or gzip-compressed JSON into signature records
fn decode_records(bytes: &[u8]) -> Result<Vec<SignatureRecord>, String> {
    if bytes.starts_with(&GZIP_MAGIC) {
        let mut json = Vec::new();
        flate2::read::MultiGzDecoder::new(bytes)
            .read_to_end(&mut json)
            .map_err(|e| format!("gzip decoding failed: {e}"))?;
        return decode_records(&json);
    }

    serde_json::from_slice::<RecordList>(bytes)
        .map(Vec::<SignatureRecord>::from)
        .map_err(|e| format!("invalid signature JSON: {e}"))
}

/// Decode every signature member of a zip archive
fn read_zip_records(bytes: Vec<u8>) -> Result<Vec<SignatureRecord>, String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| format!("invalid zip archive: {e}"))?;

    let mut records = Vec::new();
    for i in 0..archive.len() {
        let mut member = archive
            .by_index(i)
            .map_err(|e| format!("unreadable zip member #{i}: {e}"))?;

        let name = member.name().to_string();
        if member.is_dir() || !SIGNATURE_SUFFIXES.iter().any(|s| name.ends_with(s)) {
            continue;
        }

        let mut buf = Vec::new();
        member
            .read_to_end(&mut buf)
            .map_err(|e| format!("{name}: {e}"))?;
        records.extend(decode_records(&buf).map_err(|e| format!("{name}: {e}"))?);
    }

    Ok(records)
}

/// Load every signature stored in a container, one per sketch
///
/// # Errors
///
/// Returns `SignatureError::InvalidInput` if the file does not exist, cannot be
/// read, is not a recognized container, or holds no signatures.
pub fn load_signatures(path: &Path) -> Result<Vec<Signature>, SignatureError> {
    if !path.exists() {
        return Err(invalid(format!(
            "Signature file not found: {}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| invalid(format!("Failed to read {}: {e}", path.display())))?;

    let format = ContainerFormat::detect(&bytes).ok_or_else(|| {
        invalid(format!(
            "{} is not a recognized signature container",
            path.display()
        ))
    })?;

    let records = match format {
        ContainerFormat::Json | ContainerFormat::Gzip => decode_records(&bytes),
        ContainerFormat::Zip => read_zip_records(bytes),
    }
    .map_err(|e| invalid(format!("Failed to load {}: {e}", path.display())))?;

    let mut signatures = Vec::new();
    for record in records {
        for signature in Signature::from_record(record) {
            if check_signature_limit(signatures.len()).is_some() {
                return Err(invalid(format!(
                    "{} holds too many signatures",
                    path.display()
                )));
            }
            check_md5sum(&signature);
            signatures.push(signature);
        }
    }

    if signatures.is_empty() {
        return Err(invalid(format!(
            "{} contains no signatures",
            path.display()
        )));
    }

    debug!(
        path = %path.display(),
        format = format.display_name(),
        count = signatures.len(),
        "Loaded signatures"
    );

    Ok(signatures)
}

/// Warn when a stored checksum disagrees with the sketch contents
fn check_md5sum(signature: &Signature) {
    let Some(stored) = &signature.minhash.md5sum else {
        return;
    };

    if !is_valid_md5(stored) {
        warn!(
            signature = %signature.display_name(),
            md5sum = %stored,
            "Invalid md5sum format, ignoring"
        );
        return;
    }

    let computed = signature.minhash.compute_md5sum();
    if !stored.eq_ignore_ascii_case(&computed) {
        warn!(
            signature = %signature.display_name(),
            stored = %stored,
            computed = %computed,
            "Stored md5sum does not match sketch contents"
        );
    }
}

/// Load the single signature with the given k-mer size from a container
///
/// # Errors
///
/// Returns `SignatureError::InvalidInput` if `ksize` is zero, the container
/// cannot be loaded, or it holds zero or more than one signature at `ksize`.
pub fn load_signature(path: &Path, ksize: u32) -> Result<Signature, SignatureError> {
    if ksize == 0 {
        return Err(invalid("k-mer size must be a positive integer"));
    }

    let signatures = load_signatures(path)?;
    let total = signatures.len();

    let mut available: Vec<u32> = signatures.iter().map(Signature::ksize).collect();
    available.sort_unstable();
    available.dedup();

    let mut matching: Vec<Signature> = signatures
        .into_iter()
        .filter(|s| s.ksize() == ksize)
        .collect();

    if matching.len() > 1 {
        return Err(invalid(format!(
            "{} holds {} signatures with k-mer size {ksize}; expected exactly one",
            path.display(),
            matching.len()
        )));
    }

    matching.pop().ok_or_else(|| {
        invalid(format!(
            "No signature with k-mer size {ksize} in {} ({total} signatures, k-mer sizes: {available:?})",
            path.display()
        ))
    })
}
