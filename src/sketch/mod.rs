//! K-mer sketch signatures.
//!
//! - [`loader`]: Enumerate the signatures of a container and select one by k-mer size
//! - [`signature`]: The signature model and overlap estimates (Jaccard, containment)
//!
//! ## Example
//!
//! ```rust,no_run
//! use taxprofile::sketch::loader::load_signature;
//! use std::path::Path;
//!
//! let sig = load_signature(Path::new("sample.sig.zip"), 31).unwrap();
//! assert_eq!(sig.similarity(&sig).unwrap(), 1.0);
//! ```

pub mod loader;
pub mod signature;
