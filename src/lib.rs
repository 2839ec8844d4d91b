// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-protchange: protein change notation classifier
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Reads the short protein-level notations found in mutation tables
//! (`p.A267C`, `p.G12del`, `p.R97fs*13`, `p.?_?ins?`) and classifies each
//! into a mutation category, extracting residue positions, wild-type and
//! mutated residues and the stop offset where present. Parsing never fails:
//! unreadable input comes back tagged [`MutationCategory::Invalid`].
//!
//! # Example
//!
//! ```
//! use ferro_protchange::{parse_notation, MutationCategory};
//!
//! let notation = parse_notation("p.R97fs*13");
//! assert_eq!(notation.category(), MutationCategory::Frameshift);
//! assert_eq!(notation.positions(), &[97]);
//! assert_eq!(notation.initial_residues(), &['R']);
//! assert_eq!(notation.stop_offset(), Some(13));
//! assert!(notation.is_non_silent());
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod notation;

// Re-export commonly used types
pub use batch::{classify_all, BatchProcessor};
pub use error::ProtChangeError;
pub use notation::parser::{
    parse_notation, parse_notation_weighted, parse_optional_notation, MarkerMatching,
};
pub use notation::{EvidenceStatus, MutationCategory, MutationNotation, NotationParser, ParseConfig};

/// Result type alias for ferro-protchange operations
pub type Result<T> = std::result::Result<T, ProtChangeError>;
