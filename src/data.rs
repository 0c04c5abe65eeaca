//! Data structures for walking Alpino output: a corpus directory with one
//! `text_<n>.txt/` folder per text, each holding one parse file per sentence
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use libxml::parser::Parser;
use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::alpino::{sentence_files, ParseTree, SentenceId};
use crate::c14n;
use crate::error::{FeatureError, MissingSource, Result};
use crate::parameters::AnalysisParameters;
use crate::similarity::{self, ComparisonMode, Similarity, SentenceTree};
use crate::syntax::TextSyntax;

lazy_static! {
  static ref TEXT_DIRECTORY: Regex = Regex::new(r"^text_([0-9]+)(?:\.txt)?$").unwrap();
}

/// A directory of Alpino output, one sub-directory per text
pub struct Corpus {
  /// root directory
  pub path: PathBuf,
  /// XML parser for the sentence files
  pub xml_parser: Parser,
  /// Canonicalization and comparison settings
  pub parameters: AnalysisParameters,
}

/// Canonical trees of a text, with the nesting anomalies summed over its sentences
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalText {
  /// one bracket tree per sentence, in document order
  pub trees: Vec<SentenceTree>,
  /// superfluous closes dropped under `InconsistencyPolicy::Recover`
  pub skipped_closes: usize,
  /// brackets left open at the end of a sentence
  pub unclosed: usize,
}

/// What the features of a text are computed from
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnalysis {
  /// the text number
  pub text_n: usize,
  /// phrase counts per sentence
  pub syntax: TextSyntax,
  /// canonical trees per sentence
  pub canonical: CanonicalText,
}

/// One source text: its number and its sentence parses in document order
#[derive(Debug, Clone, PartialEq)]
pub struct TextRecord {
  /// the text number
  pub text_n: usize,
  /// directory holding the sentence parses
  pub path: PathBuf,
  /// sentence positions and their parse files, in document order
  pub sentences: Vec<(SentenceId, PathBuf)>,
}

impl Default for Corpus {
  fn default() -> Corpus {
    Corpus {
      path: PathBuf::from("./output"),
      xml_parser: Parser::default(),
      parameters: AnalysisParameters::default(),
    }
  }
}

impl Corpus {
  /// Create a corpus rooted at `dirpath`
  pub fn new<P: Into<PathBuf>>(dirpath: P) -> Self {
    Corpus {
      path: dirpath.into(),
      ..Corpus::default()
    }
  }

  /// Create a corpus with custom settings
  pub fn with_parameters<P: Into<PathBuf>>(dirpath: P, parameters: AnalysisParameters) -> Self {
    parameters.check();
    Corpus {
      path: dirpath.into(),
      parameters,
      ..Corpus::default()
    }
  }

  /// The parse directory of a text; `text_<n>.txt` is preferred over `text_<n>`
  pub fn text_dir(&self, text_n: usize) -> std::result::Result<PathBuf, MissingSource> {
    let with_suffix = self.path.join(format!("text_{}.txt", text_n));
    if with_suffix.is_dir() {
      return Ok(with_suffix);
    }
    let bare = self.path.join(format!("text_{}", text_n));
    if bare.is_dir() {
      return Ok(bare);
    }
    Err(MissingSource::ParseDirectory {
      text: text_n,
      path: with_suffix,
    })
  }

  /// Load the sentence listing of one text
  pub fn load_text(&self, text_n: usize) -> Result<TextRecord> {
    let path = self.text_dir(text_n)?;
    TextRecord::from_dir(text_n, path, &self.parameters)
  }

  /// All texts in the corpus, ordered by text number
  pub fn texts(&self) -> Result<Vec<TextRecord>> {
    let mut texts = Vec::new();
    for entry in WalkDir::new(&self.path).min_depth(1).max_depth(1) {
      let entry = entry.map_err(|e| FeatureError::Io {
        path: self.path.clone(),
        source: e.into(),
      })?;
      if !entry.file_type().is_dir() {
        continue;
      }
      let name = entry.file_name().to_str().unwrap_or("");
      if let Some(caps) = TEXT_DIRECTORY.captures(name) {
        if let Ok(text_n) = caps[1].parse() {
          texts.push(TextRecord::from_dir(
            text_n,
            entry.path().to_path_buf(),
            &self.parameters,
          )?);
        }
      }
    }
    texts.sort_by_key(|text| text.text_n);
    Ok(texts)
  }
}

impl TextRecord {
  /// List the sentence files of a text directory
  pub fn from_dir(text_n: usize, path: PathBuf, parameters: &AnalysisParameters) -> Result<Self> {
    let sentences = sentence_files(&path, &parameters.sentence_extension)?;
    debug!(text_n, sentences = sentences.len(), "loaded text");
    Ok(TextRecord {
      text_n,
      path,
      sentences,
    })
  }

  /// Number of sentences of the text
  pub fn len(&self) -> usize { self.sentences.len() }

  /// The text has no sentence files
  pub fn is_empty(&self) -> bool { self.sentences.is_empty() }

  /// Read the parse of every sentence, one file at a time, in document order
  pub fn parse_trees<'a>(
    &'a self,
    parser: &'a Parser,
  ) -> impl Iterator<Item = Result<(SentenceId, ParseTree)>> + 'a {
    self.sentences.iter().map(move |(id, path)| {
      let tree = read_tree(path, parser)?;
      Ok((*id, tree))
    })
  }

  /// Read every sentence parse once, collecting phrase counts and canonical trees
  pub fn analyse(&self, corpus: &Corpus) -> Result<TextAnalysis> {
    let mut syntax = TextSyntax::default();
    let mut canonical = CanonicalText::default();
    for parsed in self.parse_trees(&corpus.xml_parser) {
      let (id, tree) = parsed?;
      syntax.push(&tree);
      let brackets = c14n::canonicalize(&tree, &corpus.parameters)?;
      canonical.skipped_closes += brackets.skipped_closes;
      canonical.unclosed += brackets.unclosed;
      canonical.trees.push(SentenceTree {
        id,
        brackets: brackets.brackets,
      });
    }
    if canonical.skipped_closes > 0 {
      warn!(
        text_n = self.text_n,
        skipped_closes = canonical.skipped_closes,
        "text has malformed span nesting, superfluous closes were skipped"
      );
    }
    if canonical.unclosed > 0 {
      debug!(text_n = self.text_n, unclosed = canonical.unclosed, "text leaves brackets open");
    }
    Ok(TextAnalysis {
      text_n: self.text_n,
      syntax,
      canonical,
    })
  }
}

impl TextAnalysis {
  /// Tree edit distances between the text's sentences
  pub fn similarity(&self, mode: ComparisonMode, parameters: &AnalysisParameters) -> Result<Similarity> {
    if self.canonical.trees.len() < 2 {
      debug!(
        text_n = self.text_n,
        "text has a single sentence (or was parsed as such), no distance"
      );
      return Ok(Similarity::Undefined);
    }
    Ok(similarity::compare(&self.canonical.trees, mode, parameters)?)
  }
}

fn read_tree(path: &Path, parser: &Parser) -> Result<ParseTree> { Ok(ParseTree::from_file(path, parser)?) }
