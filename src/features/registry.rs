//! The fixed registry of linguistic indices, each tagged with where its values come from
use lazy_static::lazy_static;

use crate::error::{MissingSource, Result};
use crate::features::{FeatureContext, FeatureValue, Granularity};
use crate::similarity::{ComparisonMode, Similarity};
use crate::syntax::PhraseKind;

/// Computes a feature from the parses of one text
pub type ParseExtractor = fn(&FeatureContext, usize, Granularity) -> Result<FeatureValue>;

/// How the values of an index are obtained
#[derive(Clone, Copy)]
pub enum Extraction {
  /// read from a T-Scan column (same name in the document and sentence tables)
  Statistics {
    /// column name
    column: &'static str,
  },
  /// computed from the text's Alpino parses
  ParseTree(ParseExtractor),
  /// documented index without an extractor yet, always `NotAvailable`
  Placeholder,
}

/// The data source an index resolves to at a given granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
  /// T-Scan document table row
  DocStats,
  /// T-Scan sentence table rows
  SentStats,
  /// the text's parse directory
  ParseTree,
  /// nothing to consult
  Placeholder,
}

/// A named index
#[derive(Clone, Copy)]
pub struct FeatureIndex {
  /// column name in the feature tables
  pub name: &'static str,
  /// one-line description
  pub description: &'static str,
  /// value source and extractor
  pub extraction: Extraction,
}

impl FeatureIndex {
  /// Where values come from at a granularity
  pub fn source(&self, granularity: Granularity) -> Source {
    match (self.extraction, granularity) {
      (Extraction::Statistics { .. }, Granularity::Document) => Source::DocStats,
      (Extraction::Statistics { .. }, Granularity::Sentence) => Source::SentStats,
      (Extraction::ParseTree(_), _) => Source::ParseTree,
      (Extraction::Placeholder, _) => Source::Placeholder,
    }
  }

  /// Extract the value of this index for one text
  pub fn extract(
    &self,
    text_n: usize,
    granularity: Granularity,
    context: &FeatureContext,
  ) -> Result<FeatureValue> {
    match self.extraction {
      Extraction::Statistics { column } => {
        let table = context.statistics(granularity)?;
        Ok(match granularity {
          Granularity::Document => match table.value(text_n, column)? {
            Some(value) => FeatureValue::Scalar(value),
            None => FeatureValue::Missing,
          },
          Granularity::Sentence => FeatureValue::Sequence(table.values(text_n, column)?),
        })
      },
      Extraction::ParseTree(extractor) => extractor(context, text_n, granularity),
      Extraction::Placeholder => Ok(FeatureValue::NotAvailable),
    }
  }
}

/// An immutable collection of indices, looked up by name
pub struct Registry {
  indices: Vec<FeatureIndex>,
}

impl Registry {
  /// A registry of the given indices; later duplicates of a name are ignored
  pub fn new(indices: Vec<FeatureIndex>) -> Registry {
    let mut unique: Vec<FeatureIndex> = Vec::with_capacity(indices.len());
    for index in indices {
      if !unique.iter().any(|known| known.name == index.name) {
        unique.push(index);
      }
    }
    Registry { indices: unique }
  }

  /// Look up an index by name
  pub fn get(&self, name: &str) -> std::result::Result<&FeatureIndex, MissingSource> {
    self
      .indices
      .iter()
      .find(|index| index.name == name)
      .ok_or_else(|| MissingSource::Feature(name.to_string()))
  }

  /// Registered names, in registration order
  pub fn names(&self) -> Vec<&'static str> { self.indices.iter().map(|index| index.name).collect() }

  /// All indices, in registration order
  pub fn iter(&self) -> impl Iterator<Item = &FeatureIndex> { self.indices.iter() }

  /// The indices computed for learner texts
  pub fn standard() -> Registry {
    Registry::new(vec![
      FeatureIndex {
        name: "sentence_length",
        description: "mean number of words per sentence",
        extraction: Extraction::Statistics {
          column: "Wrd_per_zin",
        },
      },
      FeatureIndex {
        name: "word_frequency",
        description: "mean log frequency of the words",
        extraction: Extraction::Statistics {
          column: "Wrd_freq_log_zn_corr",
        },
      },
      FeatureIndex {
        name: "clause_incidence",
        description: "subordinate clauses per sentence",
        extraction: Extraction::Statistics {
          column: "Bijzin_per_zin",
        },
      },
      FeatureIndex {
        name: "subj_rel_clauses",
        description: "relative clauses per sentence",
        extraction: Extraction::Statistics {
          column: "Betr_bijzin_per_zin",
        },
      },
      FeatureIndex {
        name: "infinitive_clause_incidence",
        description: "infinitival clauses per sentence",
        extraction: Extraction::Statistics {
          column: "Infin_bijzin_per_zin",
        },
      },
      FeatureIndex {
        name: "vp_incidence",
        description: "verbs in head position per labeled node",
        extraction: Extraction::ParseTree(vp_incidence),
      },
      FeatureIndex {
        name: "np_incidence",
        description: "noun phrases per labeled node",
        extraction: Extraction::ParseTree(np_incidence),
      },
      FeatureIndex {
        name: "pp_incidence",
        description: "prepositional phrases per labeled node",
        extraction: Extraction::ParseTree(pp_incidence),
      },
      FeatureIndex {
        name: "mean_ted",
        description: "tree edit distance over all sentence pairs",
        extraction: Extraction::ParseTree(mean_ted),
      },
      FeatureIndex {
        name: "synstut_adjacent",
        description: "tree edit distance between adjacent sentences",
        extraction: Extraction::ParseTree(synstut_adjacent),
      },
      FeatureIndex {
        name: "s_bars",
        description: "complementizer phrases",
        extraction: Extraction::Placeholder,
      },
      FeatureIndex {
        name: "n_mod_np",
        description: "modifiers per noun phrase",
        extraction: Extraction::Placeholder,
      },
      FeatureIndex {
        name: "n_words_main_verb",
        description: "words before the main verb",
        extraction: Extraction::Placeholder,
      },
      FeatureIndex {
        name: "incidence_negation",
        description: "negations per sentence",
        extraction: Extraction::Placeholder,
      },
    ])
  }
}

lazy_static! {
  /// The standard registry, built once
  pub static ref REGISTRY: Registry = Registry::standard();
}

fn phrase_feature(
  kind: PhraseKind,
  context: &FeatureContext,
  text_n: usize,
  granularity: Granularity,
) -> Result<FeatureValue> {
  let analysis = context.analysis(text_n)?;
  let syntax = &analysis.syntax;
  Ok(match granularity {
    Granularity::Document => match syntax.incidence(kind) {
      Some(rate) => FeatureValue::Scalar(rate),
      None => FeatureValue::Undefined,
    },
    Granularity::Sentence => FeatureValue::from_counts(syntax.per_sentence(kind)),
  })
}

fn vp_incidence(context: &FeatureContext, text_n: usize, granularity: Granularity) -> Result<FeatureValue> {
  phrase_feature(PhraseKind::VerbGroup, context, text_n, granularity)
}

fn np_incidence(context: &FeatureContext, text_n: usize, granularity: Granularity) -> Result<FeatureValue> {
  phrase_feature(PhraseKind::NounPhrase, context, text_n, granularity)
}

fn pp_incidence(context: &FeatureContext, text_n: usize, granularity: Granularity) -> Result<FeatureValue> {
  phrase_feature(PhraseKind::PrepositionalPhrase, context, text_n, granularity)
}

fn similarity_feature(
  mode: ComparisonMode,
  context: &FeatureContext,
  text_n: usize,
  granularity: Granularity,
) -> Result<FeatureValue> {
  let similarity = context.similarity(text_n, mode)?;
  Ok(match (&*similarity, granularity) {
    (Similarity::Undefined, _) => FeatureValue::Undefined,
    (Similarity::Defined(matrix), Granularity::Document) => match matrix.mean() {
      Some(mean) => FeatureValue::Scalar(mean),
      None => FeatureValue::Undefined,
    },
    (Similarity::Defined(matrix), Granularity::Sentence) => FeatureValue::from_counts(matrix.distances()),
  })
}

fn mean_ted(context: &FeatureContext, text_n: usize, granularity: Granularity) -> Result<FeatureValue> {
  similarity_feature(ComparisonMode::AllPairs, context, text_n, granularity)
}

fn synstut_adjacent(context: &FeatureContext, text_n: usize, granularity: Granularity) -> Result<FeatureValue> {
  similarity_feature(ComparisonMode::Adjacent, context, text_n, granularity)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_name_is_a_missing_source() {
    assert_eq!(
      REGISTRY.get("flesch_douma").err(),
      Some(MissingSource::Feature("flesch_douma".to_string()))
    );
  }

  #[test]
  fn sources_follow_granularity() {
    let length = REGISTRY.get("sentence_length").unwrap();
    assert_eq!(length.source(Granularity::Document), Source::DocStats);
    assert_eq!(length.source(Granularity::Sentence), Source::SentStats);
    let ted = REGISTRY.get("mean_ted").unwrap();
    assert_eq!(ted.source(Granularity::Sentence), Source::ParseTree);
    let negation = REGISTRY.get("incidence_negation").unwrap();
    assert_eq!(negation.source(Granularity::Document), Source::Placeholder);
  }

  #[test]
  fn duplicate_names_keep_the_first() {
    let registry = Registry::new(vec![
      FeatureIndex {
        name: "x",
        description: "first",
        extraction: Extraction::Placeholder,
      },
      FeatureIndex {
        name: "x",
        description: "second",
        extraction: Extraction::Statistics { column: "X" },
      },
    ]);
    assert_eq!(registry.names(), vec!["x"]);
    assert_eq!(registry.get("x").unwrap().description, "first");
  }
}
