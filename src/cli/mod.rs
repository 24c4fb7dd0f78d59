//! Command-line interface for taxprofile.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **profile**: Parse a CAMI profile, summarize it, and optionally write it back in standard form
//! - **signature**: Load the single signature with a given k-mer size from a container
//! - **compare**: Estimate Jaccard and containment between two signatures
//!
//! ## Usage
//!
//! ```text
//! # Summarize a CAMI profile
//! taxprofile profile sample_cami.txt
//!
//! # One row per prediction, for scripting
//! taxprofile profile sample_cami.txt --format tsv
//!
//! # Rewrite a profile with the canonical column order
//! taxprofile profile submitted.profile --output standardized.cami
//!
//! # Inspect a signature
//! taxprofile signature sample.sig.zip -k 31
//!
//! # Compare two signatures
//! taxprofile compare sample.sig.zip genome.sig.gz -k 31 --format json
//! ```

use clap::{Parser, Subcommand};

pub mod compare;
pub mod profile;
pub mod signature;

#[derive(Parser)]
#[command(name = "taxprofile")]
#[command(version)]
#[command(about = "Parse CAMI taxonomic profiles and load k-mer sketch signatures")]
#[command(
    long_about = "taxprofile reads community-submitted taxonomic profiles in the CAMI format and k-mer sketch signatures.\n\nIt provides:\n- Validation of CAMI column declarations and data rows\n- Per-sample summaries and standardized CAMI output\n- Selection of exactly one signature per k-mer size, with Jaccard and containment estimates"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and summarize a CAMI taxonomic profile
    Profile(profile::ProfileArgs),

    /// Show the signature stored at a k-mer size
    Signature(signature::SignatureArgs),

    /// Compare two signatures at a k-mer size
    Compare(compare::CompareArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
