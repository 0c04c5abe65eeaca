//! Tests for walking the Alpino output directory
use nt2complexity::alpino::SentenceId;
use nt2complexity::data::Corpus;
use nt2complexity::error::{FeatureError, MissingSource};
use nt2complexity::parameters::AnalysisParameters;
use nt2complexity::similarity::{ComparisonMode, Similarity};

#[test]
fn can_iterate_corpus() {
  let corpus = Corpus::new("tests/resources/output");
  let texts = corpus.texts().unwrap();
  let numbers: Vec<usize> = texts.iter().map(|text| text.text_n).collect();
  assert_eq!(numbers, vec![1, 2, 4]);
  assert_eq!(texts[0].len(), 3);
  assert_eq!(texts[1].len(), 1);
}

#[test]
fn sentences_follow_document_order() {
  let corpus = Corpus::new("tests/resources/output");
  let text = corpus.load_text(1).unwrap();
  let ids: Vec<SentenceId> = text.sentences.iter().map(|(id, _)| *id).collect();
  assert_eq!(
    ids,
    vec![
      SentenceId {
        paragraph: 1,
        sentence: 1
      },
      SentenceId {
        paragraph: 1,
        sentence: 2
      },
      SentenceId {
        paragraph: 2,
        sentence: 1
      },
    ]
  );
  let sentences: Vec<String> = text
    .parse_trees(&corpus.xml_parser)
    .map(|parsed| parsed.unwrap().1.sentence)
    .collect();
  assert_eq!(sentences[2], "Mijn broer werkt in een winkel .");
}

#[test]
fn missing_text_directory() {
  let corpus = Corpus::new("tests/resources/output");
  match corpus.load_text(3) {
    Err(FeatureError::MissingSource(MissingSource::ParseDirectory { text, .. })) => assert_eq!(text, 3),
    other => panic!("expected a missing directory, found {:?}", other),
  }
}

#[test]
fn text_similarity() {
  let corpus = Corpus::new("tests/resources/output");
  let single = corpus.load_text(2).unwrap().analyse(&corpus).unwrap();
  assert_eq!(
    single.similarity(ComparisonMode::AllPairs, &corpus.parameters).unwrap(),
    Similarity::Undefined
  );

  let text = corpus.load_text(1).unwrap().analyse(&corpus).unwrap();
  let all_pairs = text.similarity(ComparisonMode::AllPairs, &corpus.parameters).unwrap();
  let adjacent = text.similarity(ComparisonMode::Adjacent, &corpus.parameters).unwrap();
  let all_distances = all_pairs.distances().unwrap();
  let adjacent_distances = adjacent.distances().unwrap();
  assert_eq!(all_distances.len(), 3);
  // adjacent pairs (1-2, 2-3) are a subset of all pairs (1-2, 1-3, 2-3)
  assert_eq!(adjacent_distances, vec![all_distances[0], all_distances[2]]);
}

#[test]
fn analysis_reads_each_sentence_once() {
  let corpus = Corpus::new("tests/resources/output");
  let analysis = corpus.load_text(1).unwrap().analyse(&corpus).unwrap();
  assert_eq!(analysis.text_n, 1);
  assert_eq!(analysis.syntax.sentences.len(), 3);
  assert_eq!(analysis.canonical.trees.len(), 3);
  assert_eq!(
    analysis.canonical.trees[0].brackets,
    "{top{smain{su}{hd}{pp{hd}{obj1}}}{--}}"
  );
  assert_eq!(analysis.canonical.skipped_closes, 0);
}

#[test]
fn malformed_nesting_is_summed_per_text() {
  let corpus = Corpus::new("tests/resources/malformed");
  let analysis = corpus.load_text(1).unwrap().analyse(&corpus).unwrap();
  assert_eq!(analysis.canonical.trees[0].brackets, "{top{np{hd}}{mod}}");
  assert_eq!(analysis.canonical.skipped_closes, 1);
  assert_eq!(analysis.canonical.unclosed, 0);

  let strict = Corpus::with_parameters("tests/resources/malformed", AnalysisParameters::strict());
  match strict.load_text(1).unwrap().analyse(&strict) {
    Err(FeatureError::StructuralInconsistency(inconsistency)) => assert_eq!(inconsistency.position, 3),
    other => panic!("expected a structural inconsistency, found {:?}", other),
  }
}
