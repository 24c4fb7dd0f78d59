//! Core data types for taxonomic profiles.
//!
//! - [`PredictionRecord`]: One abundance row (rank, taxid, percentage, taxpath)
//! - [`ProfileBlock`]: One sample from a CAMI profile with its header and rows
//! - [`ProfileHeader`]: Ordered `@KEY:VALUE` metadata of a block
//! - [`Rank`]: The CAMI rank vocabulary
//!
//! [`PredictionRecord`]: prediction::PredictionRecord
//! [`ProfileBlock`]: profile::ProfileBlock
//! [`ProfileHeader`]: profile::ProfileHeader
//! [`Rank`]: types::Rank

pub mod prediction;
pub mod profile;
pub mod types;
