//! Error types shared by the tree reader, the canonicalizer and the feature registry
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A requested source of feature values does not exist
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MissingSource {
  /// No feature is registered under this name
  #[error("no feature registered under the name '{0}'")]
  Feature(String),
  /// No statistics table of that granularity was supplied
  #[error("no {0} statistics table was loaded")]
  StatisticsTable(&'static str),
  /// The statistics table has no row for the text
  #[error("no row for text {text} in the {table} statistics table")]
  StatisticsRow {
    /// text number that was looked up
    text: usize,
    /// which table was consulted ("document" or "sentence")
    table: &'static str,
  },
  /// The statistics table has no column of that name
  #[error("no column '{column}' in the {table} statistics table")]
  StatisticsColumn {
    /// column that was looked up
    column: String,
    /// which table was consulted
    table: &'static str,
  },
  /// No Alpino output directory exists for the text
  #[error("no parse directory for text {text} ({path:?})")]
  ParseDirectory {
    /// text number that was looked up
    text: usize,
    /// the expected directory
    path: PathBuf,
  },
}

/// Failures while reading one Alpino XML document
#[derive(Debug, Error)]
pub enum ParseTreeError {
  /// libxml could not parse the file or string
  #[error("could not parse XML in {path}: {reason}")]
  Xml {
    /// file (or `<string>`) being parsed
    path: String,
    /// libxml's error description
    reason: String,
  },
  /// The document has no `<node>` below its root element
  #[error("no <node> element found in {0}")]
  MissingRoot(String),
  /// `begin`/`end` is absent or not an integer
  #[error("invalid span attribute '{attribute}' = {value:?} on node {id}")]
  InvalidSpan {
    /// attribute name
    attribute: &'static str,
    /// raw attribute value, if any
    value: Option<String>,
    /// the node's `id` attribute, or "?"
    id: String,
  },
  /// A node has children but no phrasal category
  #[error("node {0} has children but no 'cat' attribute")]
  UnlabeledPhrase(String),
}

/// A canonicalized tree closes more brackets than it opened
#[derive(Debug, Clone, PartialEq, Error)]
#[error("span nesting closes more brackets than were opened (at token {position})")]
pub struct StructuralInconsistency {
  /// span end of the child whose close found nothing to pop
  pub position: usize,
}

/// A bracket string could not be read as a tree
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BracketError {
  /// A `}` without a matching `{`
  #[error("unmatched closing bracket at byte {0}")]
  UnmatchedClose(usize),
  /// Label text outside of any bracket
  #[error("label text outside of any bracket at byte {0}")]
  StrayLabel(usize),
}

/// Everything that can go wrong while extracting features
#[derive(Debug, Error)]
pub enum FeatureError {
  /// see [`MissingSource`]
  #[error(transparent)]
  MissingSource(#[from] MissingSource),
  /// see [`ParseTreeError`]
  #[error(transparent)]
  ParseTree(#[from] ParseTreeError),
  /// see [`StructuralInconsistency`]
  #[error(transparent)]
  StructuralInconsistency(#[from] StructuralInconsistency),
  /// see [`BracketError`]
  #[error(transparent)]
  Bracket(#[from] BracketError),
  /// Reading or writing a CSV table failed
  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),
  /// Serializing a sequence cell failed
  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
  /// Filesystem access failed
  #[error("I/O error on {path:?}: {source}")]
  Io {
    /// path being accessed
    path: PathBuf,
    /// the underlying error
    source: io::Error,
  },
}

impl FeatureError {
  /// Lookup failures are propagated to the caller rather than recorded per text
  pub fn is_missing_source(&self) -> bool { matches!(self, FeatureError::MissingSource(_)) }
}

/// Result alias for feature extraction
pub type Result<T> = std::result::Result<T, FeatureError>;
