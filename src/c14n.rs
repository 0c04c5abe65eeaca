//! The `c14n` module offers the bracket canonicalization of a parse tree.
//!      The core purpose for canonicalization is structural comparison,
//!      so only phrasal categories and the relations of leaves are kept; words, tags and ids are dropped.
//!
//! A phrase opens `{cat`, a leaf emits `{rel}`, and after each daughter whose span ends where its
//! mother's span ends one pending bracket is closed. Right-branching constituents ending at the same
//! token hence close several levels at a single position.
use tracing::{debug, warn};

use crate::alpino::{Node, ParseTree};
use crate::error::StructuralInconsistency;
use crate::parameters::{AnalysisParameters, InconsistencyPolicy};

/// The canonical form of a tree, together with the nesting anomalies met on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonical {
  /// the bracket string
  pub brackets: String,
  /// closes that found no pending bracket and were dropped
  pub skipped_closes: usize,
  /// brackets still open when the traversal finished
  pub unclosed: usize,
}

/// Bracket bookkeeping handed down and back up the recursion
#[derive(Debug, Clone, Copy, Default)]
struct Closes {
  pending: usize,
  skipped: usize,
}

/// Canonicalize a whole sentence parse
pub fn canonicalize(
  tree: &ParseTree,
  parameters: &AnalysisParameters,
) -> Result<Canonical, StructuralInconsistency> {
  node_c14n(&tree.root, parameters)
}

/// Canonicalize a single node of choice
pub fn node_c14n(
  node: &Node,
  parameters: &AnalysisParameters,
) -> Result<Canonical, StructuralInconsistency> {
  let mut brackets = String::new();
  let closes = canonical_internal(node, parameters, Closes::default(), &mut brackets)?;
  if closes.pending > 0 {
    debug!(unclosed = closes.pending, "canonical tree leaves brackets open");
  }
  Ok(Canonical {
    brackets,
    skipped_closes: closes.skipped,
    unclosed: closes.pending,
  })
}

fn canonical_internal(
  node: &Node,
  parameters: &AnalysisParameters,
  mut closes: Closes,
  canonical: &mut String,
) -> Result<Closes, StructuralInconsistency> {
  match node {
    Node::Terminal(terminal) => {
      canonical.push('{');
      canonical.push_str(&terminal.rel);
      canonical.push('}');
    },
    Node::Phrase(phrase) => {
      canonical.push('{');
      canonical.push_str(parameters.normalize_category(&phrase.cat));
      closes.pending += 1;
      if phrase.children.is_empty() {
        canonical.push('{');
        canonical.push_str(&phrase.rel);
        canonical.push('}');
      }

      for child in &phrase.children {
        closes = canonical_internal(child, parameters, closes, canonical)?;
        let child_end = child.span().end;
        if child_end != phrase.span.end {
          continue;
        }
        if closes.pending > 0 {
          closes.pending -= 1;
          canonical.push('}');
        } else {
          match parameters.inconsistency_policy {
            InconsistencyPolicy::Recover => {
              warn!(position = child_end, "nothing to close, skipping bracket");
              closes.skipped += 1;
            },
            InconsistencyPolicy::Strict => {
              return Err(StructuralInconsistency {
                position: child_end,
              })
            },
          }
        }
      }
    },
  }
  Ok(closes)
}
