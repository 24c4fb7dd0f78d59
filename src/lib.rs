//! # taxprofile
//!
//! A library for reading taxonomic profiling inputs: CAMI-format abundance
//! profiles and k-mer sketch signatures.
//!
//! Profiles submitted by different tools follow the CAMI text format but differ in
//! column order, header metadata, and the number of samples per file. `taxprofile`
//! parses them into per-sample blocks with a validated column layout, so they can be
//! compared and written back out in one standard form.
//!
//! ## Features
//!
//! - **Multi-sample parsing**: Every `@SampleID` starts its own block
//! - **Per-block column layout**: Each `@@` line is resolved independently
//! - **Strict rows**: Malformed rows fail the whole parse with the offending line number
//! - **Signature loading**: Picks exactly one sketch at a k-mer size from JSON, gzip, or zip containers
//! - **Overlap estimates**: Jaccard and containment between loaded signatures
//!
//! ## Example
//!
//! ```rust,no_run
//! use taxprofile::parsing::cami::parse_profile_file;
//! use taxprofile::sketch::loader::load_signature;
//! use std::path::Path;
//!
//! let blocks = parse_profile_file(Path::new("sample_cami.txt")).unwrap();
//! for block in &blocks {
//!     println!("{}: {} predictions", block.sample_id, block.predictions.len());
//! }
//!
//! let sig = load_signature(Path::new("sample.sig.zip"), 31).unwrap();
//! println!("{} hashes at k={}", sig.minhash.len(), sig.ksize());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Profile blocks, prediction records, and the rank vocabulary
//! - [`parsing`]: CAMI parser and column-index resolution
//! - [`sketch`]: Signature model and container loader
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod sketch;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::prediction::PredictionRecord;
pub use crate::core::profile::{ProfileBlock, ProfileHeader};
pub use crate::core::types::Rank;
pub use crate::parsing::cami::{parse_profiles, ProfileError};
pub use crate::parsing::columns::{resolve_indices, ColumnIndexMap, MissingColumnError, ResolvedIndices};
pub use crate::sketch::loader::load_signature;
pub use crate::sketch::signature::{Signature, SignatureError};
