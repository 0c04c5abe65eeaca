//! Recover document order from the numbering Alpino encodes in sentence file names,
//! e.g. `text_3.p.2.s.1.xml` (paragraph 2, sentence 1) or plain `4.xml`
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::FeatureError;

lazy_static! {
  static ref PARAGRAPH_SENTENCE: Regex = Regex::new(r"\.p\.(\d+)\.s\.(\d+)(?:\.|$)").unwrap();
  static ref TRAILING_NUMBER: Regex = Regex::new(r"(\d+)$").unwrap();
}

/// Position of a sentence within its text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentenceId {
  /// 1-based paragraph number
  pub paragraph: usize,
  /// 1-based sentence number within the paragraph
  pub sentence: usize,
}

impl Ord for SentenceId {
  fn cmp(&self, other: &Self) -> Ordering {
    (self.paragraph, self.sentence).cmp(&(other.paragraph, other.sentence))
  }
}
impl PartialOrd for SentenceId {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl SentenceId {
  /// Read the position from a file stem (the name without its extension).
  /// Stems without a paragraph marker count as paragraph 1.
  pub fn from_stem(stem: &str) -> Option<SentenceId> {
    if let Some(caps) = PARAGRAPH_SENTENCE.captures(stem) {
      return Some(SentenceId {
        paragraph: caps[1].parse().ok()?,
        sentence: caps[2].parse().ok()?,
      });
    }
    TRAILING_NUMBER.captures(stem).and_then(|caps| {
      caps[1].parse().ok().map(|sentence| SentenceId {
        paragraph: 1,
        sentence,
      })
    })
  }

  /// Both sentences occupy the same index within their paragraphs
  pub fn same_relative_position(&self, other: &SentenceId) -> bool { self.sentence == other.sentence }
}

/// List the sentence parse files of one text directory in document order.
/// Files whose names carry no numbering are skipped with a warning.
pub fn sentence_files<P: AsRef<Path>>(
  dir: P,
  extension: &str,
) -> Result<Vec<(SentenceId, PathBuf)>, FeatureError> {
  let mut files = Vec::new();
  for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1) {
    let entry = entry.map_err(|e| FeatureError::Io {
      path: dir.as_ref().to_path_buf(),
      source: e.into(),
    })?;
    if !entry.file_type().is_file() {
      continue;
    }
    let path = entry.path();
    if path.extension().and_then(|e| e.to_str()) != Some(extension) {
      continue;
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    match SentenceId::from_stem(stem) {
      Some(id) => files.push((id, path.to_path_buf())),
      None => warn!(file = ?path, "sentence file name carries no numbering, skipped"),
    }
  }
  files.sort_by(|a, b| a.0.cmp(&b.0));
  Ok(files)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn paragraph_numbering() {
    assert_eq!(
      SentenceId::from_stem("text_12.p.3.s.2"),
      Some(SentenceId {
        paragraph: 3,
        sentence: 2
      })
    );
  }

  #[test]
  fn plain_numbering() {
    assert_eq!(
      SentenceId::from_stem("10"),
      Some(SentenceId {
        paragraph: 1,
        sentence: 10
      })
    );
    assert_eq!(SentenceId::from_stem("sentence"), None);
  }

  #[test]
  fn natural_order() {
    let mut ids: Vec<SentenceId> = ["10", "2", "1"]
      .iter()
      .filter_map(|s| SentenceId::from_stem(s))
      .collect();
    ids.sort();
    let order: Vec<usize> = ids.iter().map(|id| id.sentence).collect();
    assert_eq!(order, vec![1, 2, 10]);
  }
}
