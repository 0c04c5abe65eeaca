//! Zhang & Shasha's keyroot algorithm for ordered tree edit distance, with unit costs
//! for insertion, deletion and relabeling, plus reconstruction of an optimal edit mapping.
use std::cmp::min;

use crate::ted::BracketTree;

/// One step of an edit script, in post-order node indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
  /// node of the left tree is removed
  Delete(usize),
  /// node of the right tree is added
  Insert(usize),
  /// left node maps onto right node (relabeled when the labels differ)
  Map(usize, usize),
}

/// An optimal edit script between two trees
pub type EditMapping = Vec<EditOperation>;

/// Tree distances between all subtree pairs of two trees
pub struct TreeEditDistance<'t> {
  left: &'t BracketTree,
  right: &'t BracketTree,
  /// `subtree[i][j]` is the distance between the subtrees rooted at `i` and `j`
  subtree: Vec<Vec<usize>>,
}

impl<'t> TreeEditDistance<'t> {
  /// Run the keyroot dynamic program over both trees
  pub fn compute(left: &'t BracketTree, right: &'t BracketTree) -> Self {
    let mut ted = TreeEditDistance {
      left,
      right,
      subtree: vec![vec![0; right.len()]; left.len()],
    };
    for &i in &left.keyroots {
      for &j in &right.keyroots {
        ted.forest_distances(i, j, true);
      }
    }
    ted
  }

  /// Distance between the two whole trees
  pub fn distance(&self) -> usize { self.subtree[self.left.root()][self.right.root()] }

  fn relabel_cost(&self, i: usize, j: usize) -> usize {
    if self.left.labels[i] == self.right.labels[j] {
      0
    } else {
      1
    }
  }

  /// Forest distance table for the subtrees rooted at `i` and `j`. Row `x` stands for the
  /// left forest `leftmost(i) ..= leftmost(i) + x - 1`, column `y` likewise for the right.
  fn forest_distances(&mut self, i: usize, j: usize, record: bool) -> Vec<Vec<usize>> {
    let (li, lj) = (self.left.leftmost[i], self.right.leftmost[j]);
    let rows = i - li + 2;
    let cols = j - lj + 2;
    let mut forest = vec![vec![0; cols]; rows];
    for x in 1..rows {
      forest[x][0] = forest[x - 1][0] + 1;
    }
    for y in 1..cols {
      forest[0][y] = forest[0][y - 1] + 1;
    }
    for x in 1..rows {
      let i1 = li + x - 1;
      for y in 1..cols {
        let j1 = lj + y - 1;
        let delete = forest[x - 1][y] + 1;
        let insert = forest[x][y - 1] + 1;
        if self.left.leftmost[i1] == li && self.right.leftmost[j1] == lj {
          let relabel = forest[x - 1][y - 1] + self.relabel_cost(i1, j1);
          forest[x][y] = min(min(delete, insert), relabel);
          if record {
            self.subtree[i1][j1] = forest[x][y];
          }
        } else {
          let p = self.left.leftmost[i1] - li;
          let q = self.right.leftmost[j1] - lj;
          forest[x][y] = min(min(delete, insert), forest[p][q] + self.subtree[i1][j1]);
        }
      }
    }
    forest
  }

  /// Reconstruct one optimal edit script. Its cost (deletions, insertions and
  /// mappings between differing labels) equals `distance()`.
  pub fn mapping(&mut self) -> EditMapping {
    let mut operations = Vec::new();
    let mut pending = vec![(self.left.root(), self.right.root())];
    while let Some((i, j)) = pending.pop() {
      let forest = self.forest_distances(i, j, false);
      let (li, lj) = (self.left.leftmost[i], self.right.leftmost[j]);
      let (mut x, mut y) = (i - li + 1, j - lj + 1);
      while x > 0 || y > 0 {
        if x > 0 && forest[x][y] == forest[x - 1][y] + 1 {
          operations.push(EditOperation::Delete(li + x - 1));
          x -= 1;
        } else if y > 0 && forest[x][y] == forest[x][y - 1] + 1 {
          operations.push(EditOperation::Insert(lj + y - 1));
          y -= 1;
        } else {
          let (i1, j1) = (li + x - 1, lj + y - 1);
          if self.left.leftmost[i1] == li && self.right.leftmost[j1] == lj {
            operations.push(EditOperation::Map(i1, j1));
            x -= 1;
            y -= 1;
          } else {
            pending.push((i1, j1));
            x = self.left.leftmost[i1] - li;
            y = self.right.leftmost[j1] - lj;
          }
        }
      }
    }
    operations.reverse();
    operations
  }

  /// Cost of an edit script under unit costs
  pub fn cost(&self, mapping: &[EditOperation]) -> usize {
    mapping
      .iter()
      .map(|operation| match *operation {
        EditOperation::Delete(_) | EditOperation::Insert(_) => 1,
        EditOperation::Map(i, j) => self.relabel_cost(i, j),
      })
      .sum()
  }
}
