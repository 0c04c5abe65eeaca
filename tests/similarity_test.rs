//! Tests for pairwise sentence comparison within one text
use nt2complexity::alpino::SentenceId;
use nt2complexity::parameters::AnalysisParameters;
use nt2complexity::similarity::{compare, comparison_pairs, ComparisonMode, SentenceTree, Similarity};

fn text(trees: &[(usize, usize, &str)]) -> Vec<SentenceTree> {
  trees
    .iter()
    .map(|&(paragraph, sentence, brackets)| SentenceTree {
      id: SentenceId {
        paragraph,
        sentence,
      },
      brackets: brackets.to_string(),
    })
    .collect()
}

#[test]
fn three_sentence_scenario() {
  let sentences = text(&[(1, 1, "{np{hd}}"), (1, 2, "{np{hd}}{pp{hd}}"), (1, 3, "{np{hd}}")]);
  let similarity = compare(&sentences, ComparisonMode::AllPairs, &AnalysisParameters::default()).unwrap();
  let matrix = match similarity {
    Similarity::Defined(ref matrix) => matrix,
    Similarity::Undefined => panic!("three sentences must be comparable"),
  };
  assert_eq!(matrix.len(), 3);
  assert_eq!(matrix.get(0, 1), Some(2));
  assert_eq!(matrix.get(0, 2), Some(0));
  assert_eq!(matrix.get(1, 2), Some(2));
  assert_eq!(similarity.distances(), Some(vec![2, 0, 2]));
  let mean = similarity.mean().unwrap();
  assert!((mean - 4.0 / 3.0).abs() < 1e-9);
}

#[test]
fn single_sentence_is_undefined() {
  let sentences = text(&[(1, 1, "{top{smain{su}{hd}}}")]);
  for mode in [ComparisonMode::AllPairs, ComparisonMode::Adjacent].iter() {
    let similarity = compare(&sentences, *mode, &AnalysisParameters::default()).unwrap();
    assert_eq!(similarity, Similarity::Undefined);
    assert_eq!(similarity.mean(), None);
    assert_eq!(similarity.distances(), None);
  }
}

#[test]
fn identical_sentences_are_defined_zero() {
  let sentences = text(&[(1, 1, "{np{hd}}"), (1, 2, "{np{hd}}")]);
  let similarity = compare(&sentences, ComparisonMode::AllPairs, &AnalysisParameters::default()).unwrap();
  assert_eq!(similarity.mean(), Some(0.0));
  assert_ne!(similarity, Similarity::Undefined);
}

#[test]
fn all_pairs_compares_each_pair_once() {
  let shapes = ["{np{hd}}", "{pp{hd}{obj1}}", "{smain{su}{hd}}", "{np{det}{hd}}", "{ap{hd}}", "{cp{cmp}{body}}"];
  for n in 2..=shapes.len() {
    let trees: Vec<(usize, usize, &str)> = shapes[..n]
      .iter()
      .enumerate()
      .map(|(i, brackets)| (1, i + 1, *brackets))
      .collect();
    let sentences = text(&trees);
    let pairs = comparison_pairs(&sentences, ComparisonMode::AllPairs);
    assert_eq!(pairs.len(), n * (n - 1) / 2);
    assert!(pairs.iter().all(|&(i, j)| i < j));
    let similarity = compare(&sentences, ComparisonMode::AllPairs, &AnalysisParameters::default()).unwrap();
    assert_eq!(similarity.distances().map(|d| d.len()), Some(n * (n - 1) / 2));
  }
}

#[test]
fn adjacent_pairs_in_one_paragraph() {
  let sentences = text(&[
    (1, 1, "{np{hd}}"),
    (1, 2, "{pp{hd}}"),
    (1, 3, "{np{det}{hd}}"),
    (1, 4, "{np{hd}}"),
  ]);
  assert_eq!(
    comparison_pairs(&sentences, ComparisonMode::Adjacent),
    vec![(0, 1), (1, 2), (2, 3)]
  );
  let similarity = compare(&sentences, ComparisonMode::Adjacent, &AnalysisParameters::default()).unwrap();
  assert_eq!(similarity.distances(), Some(vec![1, 2, 1]));
}

#[test]
fn adjacent_pairs_skip_same_relative_position() {
  // one-sentence paragraphs: every transition repeats sentence index 1
  let sentences = text(&[(1, 1, "{np{hd}}"), (2, 1, "{pp{hd}}"), (3, 1, "{np{hd}}"), (3, 2, "{ap{hd}}")]);
  assert_eq!(comparison_pairs(&sentences, ComparisonMode::Adjacent), vec![(2, 3)]);

  let skipped = text(&[(1, 1, "{np{hd}}"), (2, 1, "{pp{hd}}")]);
  let similarity = compare(&skipped, ComparisonMode::Adjacent, &AnalysisParameters::default()).unwrap();
  assert_eq!(similarity, Similarity::Undefined);
}
