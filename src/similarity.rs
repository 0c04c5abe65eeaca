//! Pairwise syntactic similarity between the sentences of one text, as tree edit distances
//! between their canonical bracket trees
use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::alpino::SentenceId;
use crate::error::BracketError;
use crate::parameters::AnalysisParameters;
use crate::ted::{BracketTree, TreeEditDistance};

/// Which sentence pairs of a text are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonMode {
  /// every unordered pair of distinct sentences
  AllPairs,
  /// each sentence with its successor in document order
  Adjacent,
}

/// A canonicalized sentence, with its position in the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceTree {
  /// paragraph and sentence number
  pub id: SentenceId,
  /// the canonical bracket string
  pub brackets: String,
}

/// Edit distances between sentence pairs, keyed by unordered sentence-index pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistanceMatrix {
  distances: BTreeMap<(usize, usize), usize>,
}

fn unordered(i: usize, j: usize) -> (usize, usize) {
  if i <= j {
    (i, j)
  } else {
    (j, i)
  }
}

impl DistanceMatrix {
  /// Record the distance between sentences `i` and `j` (0-based, either order)
  pub fn insert(&mut self, i: usize, j: usize, distance: usize) { self.distances.insert(unordered(i, j), distance); }

  /// The distance between sentences `i` and `j`, if it was computed
  pub fn get(&self, i: usize, j: usize) -> Option<usize> { self.distances.get(&unordered(i, j)).copied() }

  /// Whether the pair was already computed, in either order
  pub fn contains(&self, i: usize, j: usize) -> bool { self.distances.contains_key(&unordered(i, j)) }

  /// Number of comparisons recorded
  pub fn len(&self) -> usize { self.distances.len() }

  /// No comparison was recorded
  pub fn is_empty(&self) -> bool { self.distances.is_empty() }

  /// Pairs and distances in ascending pair order
  pub fn iter(&self) -> impl Iterator<Item = (&(usize, usize), &usize)> { self.distances.iter() }

  /// Distances in ascending pair order (1-2, 1-3, ..., 2-3, ...)
  pub fn distances(&self) -> Vec<usize> { self.distances.values().copied().collect() }

  /// Arithmetic mean of the distances, `None` for an empty matrix
  pub fn mean(&self) -> Option<f64> {
    if self.distances.is_empty() {
      None
    } else {
      let total: usize = self.distances.values().sum();
      Some(total as f64 / self.distances.len() as f64)
    }
  }
}

/// Outcome of comparing the sentences of one text
#[derive(Debug, Clone, PartialEq)]
pub enum Similarity {
  /// fewer than two sentences (or no comparable pair): there is no distance to report
  Undefined,
  /// the computed distances
  Defined(DistanceMatrix),
}

impl Similarity {
  /// Document-level score: the mean distance
  pub fn mean(&self) -> Option<f64> {
    match self {
      Similarity::Undefined => None,
      Similarity::Defined(matrix) => matrix.mean(),
    }
  }

  /// Sentence-level score: every computed distance
  pub fn distances(&self) -> Option<Vec<usize>> {
    match self {
      Similarity::Undefined => None,
      Similarity::Defined(matrix) => Some(matrix.distances()),
    }
  }
}

/// The sentence pairs a mode compares, as 0-based indices with `i < j`
pub fn comparison_pairs(sentences: &[SentenceTree], mode: ComparisonMode) -> Vec<(usize, usize)> {
  let count = sentences.len();
  match mode {
    ComparisonMode::AllPairs => (0..count)
      .flat_map(|i| (i + 1..count).map(move |j| (i, j)))
      .collect(),
    ComparisonMode::Adjacent => (1..count)
      .filter(|&j| {
        let (previous, current) = (&sentences[j - 1].id, &sentences[j].id);
        // TODO: this drops e.g. the transition between two one-sentence paragraphs;
        // confirm with the annotators whether that is intended
        if previous.same_relative_position(current) {
          debug!(?previous, ?current, "same within-paragraph index, pair skipped");
          false
        } else {
          true
        }
      })
      .map(|j| (j - 1, j))
      .collect(),
  }
}

/// Compare the sentences of a text
pub fn compare(
  sentences: &[SentenceTree],
  mode: ComparisonMode,
  parameters: &AnalysisParameters,
) -> Result<Similarity, BracketError> {
  if sentences.len() < 2 {
    return Ok(Similarity::Undefined);
  }
  let trees = sentences
    .iter()
    .map(|s| BracketTree::parse(&s.brackets))
    .collect::<Result<Vec<_>, _>>()?;
  let pairs = comparison_pairs(sentences, mode);

  let measure = |&(i, j): &(usize, usize)| {
    let distance = if sentences[i].brackets == sentences[j].brackets {
      0
    } else {
      TreeEditDistance::compute(&trees[i], &trees[j]).distance()
    };
    (i, j, distance)
  };
  let measured: Vec<(usize, usize, usize)> = if parameters.parallel_pairs {
    pairs.par_iter().map(measure).collect()
  } else {
    pairs.iter().map(measure).collect()
  };

  let mut matrix = DistanceMatrix::default();
  for (i, j, distance) in measured {
    matrix.insert(i, j, distance);
  }
  if matrix.is_empty() {
    Ok(Similarity::Undefined)
  } else {
    Ok(Similarity::Defined(matrix))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sentence(paragraph: usize, number: usize, brackets: &str) -> SentenceTree {
    SentenceTree {
      id: SentenceId {
        paragraph,
        sentence: number,
      },
      brackets: brackets.to_string(),
    }
  }

  #[test]
  fn matrix_is_undirected() {
    let mut matrix = DistanceMatrix::default();
    matrix.insert(2, 0, 5);
    assert!(matrix.contains(0, 2));
    assert_eq!(matrix.get(0, 2), Some(5));
    matrix.insert(0, 2, 5);
    assert_eq!(matrix.len(), 1);
  }

  #[test]
  fn adjacent_skips_same_relative_position() {
    let sentences = vec![
      sentence(1, 1, "{np{hd}}"),
      sentence(2, 1, "{np{hd}}"),
      sentence(2, 2, "{pp{hd}}"),
    ];
    assert_eq!(comparison_pairs(&sentences, ComparisonMode::Adjacent), vec![(1, 2)]);
  }

  #[test]
  fn parallel_matches_sequential() {
    let sentences = vec![
      sentence(1, 1, "{top{smain{su}{hd}}}"),
      sentence(1, 2, "{top{smain{su}{hd}{obj1}}}"),
      sentence(1, 3, "{top{np{det}{hd}}}"),
      sentence(1, 4, "{top{ssub{cmp}{body{su}{hd}}}}"),
    ];
    let sequential = compare(&sentences, ComparisonMode::AllPairs, &AnalysisParameters::default()).unwrap();
    let parameters = AnalysisParameters {
      parallel_pairs: true,
      ..Default::default()
    };
    let parallel = compare(&sentences, ComparisonMode::AllPairs, &parameters).unwrap();
    assert_eq!(sequential, parallel);
  }
}
