//! Named linguistic indices and the feature tables built from them.
//!
//! Every index is extracted at one of two granularities: one value per text
//! (document level) or one value per sentence, or per compared sentence pair,
//! of a text (sentence level).
mod registry;
mod table;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::data::{Corpus, TextAnalysis};
use crate::error::{self, MissingSource};
use crate::similarity::{ComparisonMode, Similarity};
use crate::stats::{StatisticsTable, TableKind};

pub use crate::features::registry::{Extraction, FeatureIndex, ParseExtractor, Registry, Source, REGISTRY};
pub use crate::features::table::{
  build_tables, select_texts, FeatureFailure, FeatureRow, FeatureTable, TextSelection, WHOLE_TEXT,
};

/// The two output granularities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
  /// one value per text
  Document,
  /// one value per sentence (or sentence pair) of a text
  Sentence,
}

impl Granularity {
  /// Short name used in file names and logs
  pub fn name(self) -> &'static str {
    match self {
      Granularity::Document => "doc",
      Granularity::Sentence => "sen",
    }
  }
}

/// The content of one feature table cell
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
  /// a document-level number
  Scalar(f64),
  /// sentence-level numbers; `None` marks an empty statistics cell
  Sequence(Vec<Option<f64>>),
  /// the value cannot exist, e.g. sentence similarity of a one-sentence text
  Undefined,
  /// the index is registered but has no extractor yet
  NotAvailable,
  /// the statistics table holds no usable value
  Missing,
  /// extraction failed for this text; see the table's failure list
  Failed,
}

impl FeatureValue {
  /// The scalar, if this is one
  pub fn as_scalar(&self) -> Option<f64> {
    match self {
      FeatureValue::Scalar(value) => Some(*value),
      _ => None,
    }
  }

  /// The sequence, if this is one
  pub fn as_sequence(&self) -> Option<&[Option<f64>]> {
    match self {
      FeatureValue::Sequence(values) => Some(values),
      _ => None,
    }
  }

  /// Build a sentence-level value from counts or distances
  pub fn from_counts<I: IntoIterator<Item = usize>>(counts: I) -> FeatureValue {
    FeatureValue::Sequence(counts.into_iter().map(|count| Some(count as f64)).collect())
  }
}

/// Everything an extractor may consult: the T-Scan tables and the Alpino corpus.
pub struct FeatureContext<'c> {
  /// Alpino output and canonicalization settings
  pub corpus: &'c Corpus,
  /// T-Scan document-level table, if loaded
  pub document_stats: Option<&'c StatisticsTable>,
  /// T-Scan sentence-level table, if loaded
  pub sentence_stats: Option<&'c StatisticsTable>,
  analyses: RefCell<HashMap<usize, Rc<TextAnalysis>>>,
  similarities: RefCell<HashMap<(usize, ComparisonMode), Rc<Similarity>>>,
}

impl<'c> FeatureContext<'c> {
  /// A context with parse trees only
  pub fn new(corpus: &'c Corpus) -> Self {
    FeatureContext {
      corpus,
      document_stats: None,
      sentence_stats: None,
      analyses: RefCell::default(),
      similarities: RefCell::default(),
    }
  }

  /// A context with both T-Scan tables
  pub fn with_statistics(
    corpus: &'c Corpus,
    document_stats: &'c StatisticsTable,
    sentence_stats: &'c StatisticsTable,
  ) -> Self {
    FeatureContext {
      corpus,
      document_stats: Some(document_stats),
      sentence_stats: Some(sentence_stats),
      analyses: RefCell::default(),
      similarities: RefCell::default(),
    }
  }

  /// The statistics table of a granularity
  pub fn statistics(&self, granularity: Granularity) -> Result<&'c StatisticsTable, MissingSource> {
    let (table, kind) = match granularity {
      Granularity::Document => (self.document_stats, TableKind::Document),
      Granularity::Sentence => (self.sentence_stats, TableKind::Sentence),
    };
    table.ok_or_else(|| MissingSource::StatisticsTable(kind.name()))
  }

  /// The parses of a text, read on first request and kept for the other features.
  /// Failed analyses are not kept.
  pub fn analysis(&self, text_n: usize) -> error::Result<Rc<TextAnalysis>> {
    if let Some(analysis) = self.analyses.borrow().get(&text_n) {
      return Ok(Rc::clone(analysis));
    }
    let text = self.corpus.load_text(text_n)?;
    let analysis = Rc::new(text.analyse(self.corpus)?);
    self.analyses.borrow_mut().insert(text_n, Rc::clone(&analysis));
    Ok(analysis)
  }

  /// Tree edit distances of a text, computed once per comparison mode
  pub fn similarity(&self, text_n: usize, mode: ComparisonMode) -> error::Result<Rc<Similarity>> {
    if let Some(similarity) = self.similarities.borrow().get(&(text_n, mode)) {
      return Ok(Rc::clone(similarity));
    }
    let analysis = self.analysis(text_n)?;
    let similarity = Rc::new(analysis.similarity(mode, &self.corpus.parameters)?);
    self
      .similarities
      .borrow_mut()
      .insert((text_n, mode), Rc::clone(&similarity));
    Ok(similarity)
  }

  /// Number of texts whose parses are held
  pub fn analysed_texts(&self) -> usize { self.analyses.borrow().len() }

  /// Warn about failed upstream parses in either table. Returns whether any were found.
  pub fn check_parsing(&self) -> bool {
    let document = self.document_stats.map_or(false, |t| t.check_parsing());
    let sentence = self.sentence_stats.map_or(false, |t| t.check_parsing());
    document || sentence
  }
}
