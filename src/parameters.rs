//! The `parameters` module provides data structures for customizing canonicalization
//! and tree comparison

use tracing::warn;

/// Specifies how to deal with a tree whose spans close more brackets than were opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InconsistencyPolicy {
  /// Skip the superfluous close, log a warning and continue (default behaviour)
  Recover,
  /// Abort canonicalization of the offending tree with an error
  Strict,
}

impl Default for InconsistencyPolicy {
  fn default() -> Self { InconsistencyPolicy::Recover }
}

/// Parameters for canonicalization and pairwise comparison
#[derive(Debug, Clone)]
pub struct AnalysisParameters {
  /// How to deal with malformed span nesting
  pub inconsistency_policy: InconsistencyPolicy,
  /// Evaluate all-pairs comparisons on the rayon thread pool
  pub parallel_pairs: bool,
  /// Categories starting with this prefix are multi-word units
  pub mwu_prefix: String,
  /// The single label all multi-word unit categories are normalized to
  pub mwu_label: String,
  /// File extension of the per-sentence parse files
  pub sentence_extension: String,
}

impl Default for AnalysisParameters {
  fn default() -> AnalysisParameters {
    AnalysisParameters {
      inconsistency_policy: InconsistencyPolicy::default(),
      parallel_pairs: false,
      mwu_prefix: "mwu".to_string(),
      mwu_label: "mwu".to_string(),
      sentence_extension: "xml".to_string(),
    }
  }
}

impl AnalysisParameters {
  /// Fail hard on malformed trees, otherwise default
  pub fn strict() -> AnalysisParameters {
    AnalysisParameters {
      inconsistency_policy: InconsistencyPolicy::Strict,
      ..Default::default()
    }
  }

  /// Normalize the category label of a phrase
  pub fn normalize_category<'a>(&'a self, cat: &'a str) -> &'a str {
    if !self.mwu_prefix.is_empty() && cat.starts_with(&self.mwu_prefix) {
      self.mwu_label.as_str()
    } else {
      cat
    }
  }

  /// Logs warnings, if the parameter settings don't make sense.
  /// Doesn't check for every possible stupidity
  pub fn check(&self) {
    if self.mwu_label.contains(|c: char| c == '{' || c == '}') {
      warn!(
        label = %self.mwu_label,
        "mwu_label contains bracket characters, canonical trees will not read back"
      );
    }
    if self.sentence_extension.starts_with('.') {
      warn!(
        extension = %self.sentence_extension,
        "sentence_extension should be given without the leading dot"
      );
    }
  }
}
