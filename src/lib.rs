//! # nt2complexity
//! Syntactic complexity features for texts written by learners of Dutch.
//!
//! Combines two external analyzers: T-Scan's document and sentence statistics (CSV)
//! and Alpino's per-sentence dependency parses (XML). Alpino trees are canonicalized
//! into bracket strings and compared with tree edit distance, yielding a syntactic
//! similarity index next to phrase incidences and the T-Scan columns.

#![deny(
  missing_docs,
  trivial_casts,
  trivial_numeric_casts,
  unused_import_braces,
  unused_qualifications
)]

pub mod alpino;
pub mod c14n;
pub mod data;
pub mod error;
pub mod features;
pub mod parameters;
pub mod similarity;
pub mod stats;
pub mod syntax;
pub mod ted;
