use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Incompatible signatures: {0}")]
    Incompatible(String),
}

/// Safely convert usize to f64 for overlap ratios
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

fn default_hash_function() -> String {
    "0.murmur64".to_string()
}

fn default_seed() -> u64 {
    42
}

fn default_molecule() -> String {
    "DNA".to_string()
}

/// On-disk signature record (sourmash JSON layout).
///
/// One record can carry several sketches, typically one per k-mer size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default = "default_hash_function")]
    pub hash_function: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    pub signatures: Vec<MinHash>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<f64>,
}

/// A MinHash sketch at a single k-mer size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinHash {
    /// Sketch size for bottom-k sketches; 0 for scaled sketches
    #[serde(default)]
    pub num: u32,

    pub ksize: u32,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Largest retained hash for scaled sketches; 0 for bottom-k sketches
    #[serde(default)]
    pub max_hash: u64,

    /// Retained hash values, ascending
    pub mins: Vec<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abundances: Option<Vec<u64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5sum: Option<String>,

    #[serde(default = "default_molecule")]
    pub molecule: String,
}

impl MinHash {
    /// Scaled factor implied by `max_hash` (0 for bottom-k sketches)
    #[must_use]
    pub fn scaled(&self) -> u64 {
        if self.max_hash == 0 {
            return 0;
        }
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            (2f64.powi(64) / self.max_hash as f64).round() as u64
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mins.is_empty()
    }

    /// Checksum over the k-mer size and every retained hash, as decimal text
    #[must_use]
    pub fn compute_md5sum(&self) -> String {
        let mut ctx = md5::Context::new();
        ctx.consume(self.ksize.to_string());
        for hash in &self.mins {
            ctx.consume(hash.to_string());
        }
        format!("{:x}", ctx.compute())
    }

    fn check_compatible(&self, other: &MinHash) -> Result<(), SignatureError> {
        if self.ksize != other.ksize {
            return Err(SignatureError::Incompatible(format!(
                "k-mer sizes differ ({} vs {})",
                self.ksize, other.ksize
            )));
        }
        if self.seed != other.seed {
            return Err(SignatureError::Incompatible(format!(
                "seeds differ ({} vs {})",
                self.seed, other.seed
            )));
        }
        if !self.molecule.eq_ignore_ascii_case(&other.molecule) {
            return Err(SignatureError::Incompatible(format!(
                "molecule types differ ({} vs {})",
                self.molecule, other.molecule
            )));
        }
        if (self.max_hash == 0) != (other.max_hash == 0) {
            return Err(SignatureError::Incompatible(
                "cannot compare a scaled sketch with a bottom-k sketch".to_string(),
            ));
        }
        Ok(())
    }

    /// Hash sets of both sketches reduced to a common resolution
    fn comparable_hashes(&self, other: &MinHash) -> (HashSet<u64>, HashSet<u64>) {
        if self.max_hash > 0 {
            // Downsample to the coarser of the two scaled sketches
            let threshold = self.max_hash.min(other.max_hash);
            let keep = |mh: &MinHash| -> HashSet<u64> {
                mh.mins.iter().copied().filter(|&h| h <= threshold).collect()
            };
            (keep(self), keep(other))
        } else {
            let num = self.mins.len().min(other.mins.len());
            let keep =
                |mh: &MinHash| -> HashSet<u64> { mh.mins.iter().copied().take(num).collect() };
            (keep(self), keep(other))
        }
    }
}

/// A single loaded sketch together with the metadata of its record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    pub hash_function: String,

    pub minhash: MinHash,
}

impl Signature {
    /// Split a record into one signature per sketch
    #[must_use]
    pub fn from_record(record: SignatureRecord) -> Vec<Signature> {
        let SignatureRecord {
            name,
            filename,
            license,
            hash_function,
            signatures,
            ..
        } = record;

        signatures
            .into_iter()
            .map(|minhash| Signature {
                name: name.clone(),
                filename: filename.clone(),
                license: license.clone(),
                hash_function: hash_function.clone(),
                minhash,
            })
            .collect()
    }

    #[must_use]
    pub fn ksize(&self) -> u32 {
        self.minhash.ksize
    }

    /// Name, falling back to the source filename, then to a checksum prefix
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.name, &self.filename) {
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(filename)) if !filename.is_empty() => filename.clone(),
            _ => self.md5sum().chars().take(8).collect(),
        }
    }

    /// Stored checksum, or a freshly computed one if the record had none
    #[must_use]
    pub fn md5sum(&self) -> String {
        self.minhash
            .md5sum
            .clone()
            .unwrap_or_else(|| self.minhash.compute_md5sum())
    }

    /// Jaccard index of the two hash sets: |A ∩ B| / |A ∪ B|
    ///
    /// # Errors
    ///
    /// Returns `SignatureError::Incompatible` if k-mer size, seed, molecule or
    /// sketch type differ.
    pub fn jaccard(&self, other: &Signature) -> Result<f64, SignatureError> {
        self.minhash.check_compatible(&other.minhash)?;
        let (a, b) = self.minhash.comparable_hashes(&other.minhash);

        let union = a.union(&b).count();
        if union == 0 {
            return Ok(0.0);
        }
        Ok(count_to_f64(a.intersection(&b).count()) / count_to_f64(union))
    }

    /// Similarity ignoring abundances; equal to [`Signature::jaccard`]
    ///
    /// # Errors
    ///
    /// See [`Signature::jaccard`].
    pub fn similarity(&self, other: &Signature) -> Result<f64, SignatureError> {
        self.jaccard(other)
    }

    /// Fraction of this signature's hashes found in `other`: |A ∩ B| / |A|
    ///
    /// # Errors
    ///
    /// See [`Signature::jaccard`].
    pub fn contained_by(&self, other: &Signature) -> Result<f64, SignatureError> {
        self.minhash.check_compatible(&other.minhash)?;
        let (a, b) = self.minhash.comparable_hashes(&other.minhash);

        if a.is_empty() {
            return Ok(0.0);
        }
        Ok(count_to_f64(a.intersection(&b).count()) / count_to_f64(a.len()))
    }

    /// Larger of the two directional containments
    ///
    /// # Errors
    ///
    /// See [`Signature::jaccard`].
    pub fn max_containment(&self, other: &Signature) -> Result<f64, SignatureError> {
        Ok(self.contained_by(other)?.max(other.contained_by(self)?))
    }
}
