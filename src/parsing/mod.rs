//! Parsers for taxonomic profile files.
//!
//! - **CAMI profiles**: Multi-sample taxonomic abundance profiles
//! - **Column declarations**: The `@@` line that fixes a block's column order
//!
//! ## Example
//!
//! ```rust
//! use taxprofile::parsing::cami::parse_profile_text;
//!
//! let text = "@SampleID:S1\n@@TAXID\tRANK\tPERCENTAGE\tTAXPATH\n2157\tsuperkingdom\t0.029528\t2157\n";
//! let blocks = parse_profile_text(text).unwrap();
//! assert_eq!(blocks[0].sample_id, "S1");
//! assert_eq!(blocks[0].predictions[0].taxid, "2157");
//! ```
//!
//! ## Columns
//!
//! | Column | Description | Required |
//! |--------|-------------|----------|
//! | RANK | Taxonomic rank | Yes |
//! | TAXID | Taxon identifier | Yes |
//! | PERCENTAGE | Relative abundance | Yes |
//! | TAXPATH | `\|`-joined ancestor taxids | Yes |
//! | TAXPATHSN | `\|`-joined ancestor names | No |

pub mod cami;
pub mod columns;
