//! Counts of verb groups, noun phrases and prepositional phrases over the parses of a text
use std::ops::AddAssign;

use crate::alpino::{Node, ParseTree};

/// The phrase types counted per sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseKind {
  /// a verb heading its mother (`pos="verb"`, `rel="hd"`)
  VerbGroup,
  /// a phrase with `cat="np"`
  NounPhrase,
  /// a phrase with `cat="pp"`
  PrepositionalPhrase,
}

/// Phrase counts of one sentence, or summed over a text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhraseCounts {
  /// verbs in head relation
  pub verb_groups: usize,
  /// noun phrases
  pub noun_phrases: usize,
  /// prepositional phrases
  pub prepositional_phrases: usize,
  /// nodes carrying any phrasal category
  pub labeled_nodes: usize,
}

impl AddAssign for PhraseCounts {
  fn add_assign(&mut self, other: PhraseCounts) {
    self.verb_groups += other.verb_groups;
    self.noun_phrases += other.noun_phrases;
    self.prepositional_phrases += other.prepositional_phrases;
    self.labeled_nodes += other.labeled_nodes;
  }
}

impl PhraseCounts {
  /// Count the phrases of one parse
  pub fn of_tree(tree: &ParseTree) -> PhraseCounts {
    let mut counts = PhraseCounts::default();
    for node in tree.nodes() {
      match node {
        Node::Terminal(t) => {
          if t.pos.as_deref() == Some("verb") && t.rel == "hd" {
            counts.verb_groups += 1;
          }
        },
        Node::Phrase(p) => {
          counts.labeled_nodes += 1;
          match p.cat.as_str() {
            "np" => counts.noun_phrases += 1,
            "pp" => counts.prepositional_phrases += 1,
            _ => {},
          }
        },
      }
    }
    counts
  }

  /// The count of one phrase type
  pub fn get(&self, kind: PhraseKind) -> usize {
    match kind {
      PhraseKind::VerbGroup => self.verb_groups,
      PhraseKind::NounPhrase => self.noun_phrases,
      PhraseKind::PrepositionalPhrase => self.prepositional_phrases,
    }
  }

  /// The count of a phrase type per labeled node; `None` without labeled nodes
  pub fn incidence(&self, kind: PhraseKind) -> Option<f64> {
    if self.labeled_nodes == 0 {
      None
    } else {
      Some(self.get(kind) as f64 / self.labeled_nodes as f64)
    }
  }
}

/// Per-sentence phrase counts of a text, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSyntax {
  /// one entry per sentence
  pub sentences: Vec<PhraseCounts>,
}

impl TextSyntax {
  /// Record the counts of the next sentence
  pub fn push(&mut self, tree: &ParseTree) { self.sentences.push(PhraseCounts::of_tree(tree)); }

  /// Totals over the whole text
  pub fn total(&self) -> PhraseCounts {
    let mut total = PhraseCounts::default();
    for counts in &self.sentences {
      total += *counts;
    }
    total
  }

  /// Document level: text total of a phrase type over the text's labeled nodes
  pub fn incidence(&self, kind: PhraseKind) -> Option<f64> { self.total().incidence(kind) }

  /// Sentence level: the raw count of a phrase type in each sentence
  pub fn per_sentence(&self, kind: PhraseKind) -> Vec<usize> {
    self.sentences.iter().map(|counts| counts.get(kind)).collect()
  }
}
