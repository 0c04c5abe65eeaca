//! Ordered tree edit distance over canonical bracket strings
//!
//! Bracket strings are read under a virtual, unlabeled root, so that a forest such as
//! `{np{hd}}{pp{hd}}` compares as an ordered forest. Since both sides carry the same
//! virtual root, the distance of two single trees is unaffected by it.
mod zhang_shasha;

use crate::error::BracketError;
pub use crate::ted::zhang_shasha::{EditMapping, EditOperation, TreeEditDistance};

/// An ordered labeled tree in post-order layout, ready for edit distance computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTree {
  /// node labels, indexed by post-order position
  pub labels: Vec<String>,
  /// post-order index of the leftmost leaf descendant of each node
  pub leftmost: Vec<usize>,
  /// nodes without a left sibling on the path to their leftmost leaf, ascending
  pub keyroots: Vec<usize>,
}

struct RawNode {
  label: String,
  children: Vec<usize>,
}

impl BracketTree {
  /// Read a bracket string, e.g. `{top{smain{su}{hd}}}`.
  /// Brackets left open at the end of input are closed implicitly.
  pub fn parse(brackets: &str) -> Result<BracketTree, BracketError> {
    let mut arena = vec![RawNode {
      label: String::new(),
      children: Vec::new(),
    }];
    let mut open = vec![0];
    for (offset, c) in brackets.char_indices() {
      match c {
        '{' => {
          let id = arena.len();
          arena.push(RawNode {
            label: String::new(),
            children: Vec::new(),
          });
          let parent = open[open.len() - 1];
          arena[parent].children.push(id);
          open.push(id);
        },
        '}' => {
          if open.len() == 1 {
            return Err(BracketError::UnmatchedClose(offset));
          }
          open.pop();
        },
        other => {
          let current = open[open.len() - 1];
          if current == 0 {
            if !other.is_whitespace() {
              return Err(BracketError::StrayLabel(offset));
            }
          } else {
            arena[current].label.push(other);
          }
        },
      }
    }
    Ok(BracketTree::from_arena(arena))
  }

  fn from_arena(mut arena: Vec<RawNode>) -> BracketTree {
    let size = arena.len();
    let mut labels = Vec::with_capacity(size);
    let mut leftmost = Vec::with_capacity(size);
    // (arena id, children visited?) pairs of an iterative post-order walk
    let mut walk = vec![(0, false)];
    // leftmost leaf of the first child, recorded per arena id once it is numbered
    let mut first_leaf = vec![usize::MAX; size];
    while let Some((id, expanded)) = walk.pop() {
      if expanded || arena[id].children.is_empty() {
        let post = labels.len();
        let lml = match arena[id].children.first() {
          Some(&first) => first_leaf[first],
          None => post,
        };
        first_leaf[id] = lml;
        leftmost.push(lml);
        labels.push(std::mem::take(&mut arena[id].label));
      } else {
        walk.push((id, true));
        for &child in arena[id].children.iter().rev() {
          walk.push((child, false));
        }
      }
    }

    let mut highest = vec![None; size];
    for (node, &lml) in leftmost.iter().enumerate() {
      highest[lml] = Some(node);
    }
    let mut keyroots: Vec<usize> = highest.into_iter().flatten().collect();
    keyroots.sort_unstable();

    BracketTree {
      labels,
      leftmost,
      keyroots,
    }
  }

  /// Number of nodes, including the virtual root
  pub fn len(&self) -> usize { self.labels.len() }

  /// Only the virtual root is present
  pub fn is_empty(&self) -> bool { self.labels.len() <= 1 }

  /// Post-order index of the virtual root
  pub fn root(&self) -> usize { self.labels.len() - 1 }
}

/// Edit distance between two bracket strings, with unit costs
pub fn distance(left: &str, right: &str) -> Result<usize, BracketError> {
  if left == right {
    BracketTree::parse(left)?;
    return Ok(0);
  }
  let left = BracketTree::parse(left)?;
  let right = BracketTree::parse(right)?;
  Ok(TreeEditDistance::compute(&left, &right).distance())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn post_order_layout() {
    let tree = BracketTree::parse("{a{b}{c{d}}}").unwrap();
    assert_eq!(tree.labels, vec!["b", "d", "c", "a", ""]);
    assert_eq!(tree.leftmost, vec![0, 1, 1, 0, 0]);
    assert_eq!(tree.keyroots, vec![2, 4]);
    assert_eq!(tree.root(), 4);
  }

  #[test]
  fn open_brackets_close_at_end() {
    let closed = BracketTree::parse("{np{hd}}").unwrap();
    let open = BracketTree::parse("{np{hd}").unwrap();
    assert_eq!(closed, open);
  }

  #[test]
  fn rejects_unmatched_close() {
    assert_eq!(
      BracketTree::parse("{np}}"),
      Err(BracketError::UnmatchedClose(4))
    );
    assert_eq!(BracketTree::parse("np{hd}"), Err(BracketError::StrayLabel(0)));
  }
}
