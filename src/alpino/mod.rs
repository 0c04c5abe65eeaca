//! Typed representation of Alpino dependency parses (`alpino_ds` XML),
//! one `ParseTree` per sentence file
mod naming;

use std::path::Path;

use libxml::parser::Parser;
use libxml::readonly::RoNode;

use crate::error::ParseTreeError;
pub use crate::alpino::naming::{sentence_files, SentenceId};

/// Relation label used when a node carries no `rel` attribute
pub const DEFAULT_RELATION: &str = "--";

/// A half-open token interval `[begin, end)` covering a node's yield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
  /// first token index
  pub begin: usize,
  /// one past the last token index
  pub end: usize,
}

/// A lexical leaf of the parse
#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
  /// dependency relation to the parent
  pub rel: String,
  /// part-of-speech tag, absent on co-indexed empty leaves
  pub pos: Option<String>,
  /// surface word, absent on co-indexed empty leaves
  pub word: Option<String>,
  /// lexical category projected by the word
  pub lcat: Option<String>,
  /// token interval
  pub span: Span,
}

/// A node carrying a phrasal category
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
  /// phrasal category (`np`, `pp`, `smain`, ...)
  pub cat: String,
  /// dependency relation to the parent
  pub rel: String,
  /// token interval
  pub span: Span,
  /// daughters in document order
  pub children: Vec<Node>,
}

/// A node of the parse tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
  /// leaf
  Terminal(Terminal),
  /// categorized constituent
  Phrase(Phrase),
}

/// The parse of one sentence
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTree {
  /// the top node (usually `cat="top"`)
  pub root: Node,
  /// the raw sentence as given to the parser
  pub sentence: String,
}

/// Pre-order iterator over a node and its descendants
pub struct Descendants<'t> {
  stack: Vec<&'t Node>,
}

impl<'t> Iterator for Descendants<'t> {
  type Item = &'t Node;
  fn next(&mut self) -> Option<&'t Node> {
    let node = self.stack.pop()?;
    if let Node::Phrase(phrase) = node {
      self.stack.extend(phrase.children.iter().rev());
    }
    Some(node)
  }
}

impl Node {
  /// The node's token interval
  pub fn span(&self) -> Span {
    match self {
      Node::Terminal(t) => t.span,
      Node::Phrase(p) => p.span,
    }
  }

  /// The node's dependency relation
  pub fn rel(&self) -> &str {
    match self {
      Node::Terminal(t) => &t.rel,
      Node::Phrase(p) => &p.rel,
    }
  }

  /// The node and all of its descendants, in document (pre-)order
  pub fn descendants(&self) -> Descendants {
    Descendants { stack: vec![self] }
  }

  /// Terminals and phrases without children are leaves
  pub fn is_leaf(&self) -> bool {
    match self {
      Node::Terminal(_) => true,
      Node::Phrase(p) => p.children.is_empty(),
    }
  }
}

impl ParseTree {
  /// Load the parse stored in an Alpino XML file.
  /// The DOM (and its file handle) is released before returning.
  pub fn from_file<P: AsRef<Path>>(path: P, parser: &Parser) -> Result<Self, ParseTreeError> {
    let display = path.as_ref().to_string_lossy().into_owned();
    let dom = parser
      .parse_file(&display)
      .map_err(|e| ParseTreeError::Xml {
        path: display.clone(),
        reason: format!("{:?}", e),
      })?;
    match dom.get_root_readonly() {
      Some(root) => ParseTree::from_root(root, &display),
      None => Err(ParseTreeError::MissingRoot(display)),
    }
  }

  /// Load a parse from an in-memory Alpino XML string
  pub fn from_xml_str(xml: &str) -> Result<Self, ParseTreeError> {
    let parser = Parser::default();
    let dom = parser.parse_string(xml).map_err(|e| ParseTreeError::Xml {
      path: "<string>".to_string(),
      reason: format!("{:?}", e),
    })?;
    match dom.get_root_readonly() {
      Some(root) => ParseTree::from_root(root, "<string>"),
      None => Err(ParseTreeError::MissingRoot("<string>".to_string())),
    }
  }

  fn from_root(root: RoNode, origin: &str) -> Result<Self, ParseTreeError> {
    // bare <node> fragments are accepted as well as full alpino_ds documents
    let top = if root.get_name() == "node" {
      Some(root)
    } else {
      root
        .get_child_elements()
        .into_iter()
        .find(|child| child.get_name() == "node")
    };
    let top = match top {
      Some(node) => node,
      None => return Err(ParseTreeError::MissingRoot(origin.to_string())),
    };
    let sentence = root
      .get_child_elements()
      .into_iter()
      .find(|child| child.get_name() == "sentence")
      .map(|s| s.get_content().trim().to_string())
      .unwrap_or_default();

    Ok(ParseTree {
      root: read_node(top)?,
      sentence,
    })
  }

  /// All nodes of the tree in document order
  pub fn nodes(&self) -> Descendants { self.root.descendants() }
}

fn read_span_attribute(node: RoNode, attribute: &'static str) -> Result<usize, ParseTreeError> {
  let value = node.get_attribute(attribute);
  match value.as_ref().and_then(|v| v.trim().parse::<usize>().ok()) {
    Some(offset) => Ok(offset),
    None => Err(ParseTreeError::InvalidSpan {
      attribute,
      value,
      id: node.get_attribute("id").unwrap_or_else(|| "?".to_string()),
    }),
  }
}

fn read_node(node: RoNode) -> Result<Node, ParseTreeError> {
  let span = Span {
    begin: read_span_attribute(node, "begin")?,
    end: read_span_attribute(node, "end")?,
  };
  let rel = node
    .get_attribute("rel")
    .unwrap_or_else(|| DEFAULT_RELATION.to_string());
  // newer Alpino versions interleave <ud> annotation elements, only <node> counts
  let children = node
    .get_child_elements()
    .into_iter()
    .filter(|child| child.get_name() == "node")
    .map(read_node)
    .collect::<Result<Vec<_>, _>>()?;

  match node.get_attribute("cat") {
    Some(cat) => Ok(Node::Phrase(Phrase {
      cat,
      rel,
      span,
      children,
    })),
    None if children.is_empty() => Ok(Node::Terminal(Terminal {
      rel,
      pos: node.get_attribute("pos"),
      word: node.get_attribute("word"),
      lcat: node.get_attribute("lcat"),
      span,
    })),
    None => Err(ParseTreeError::UnlabeledPhrase(
      node.get_attribute("id").unwrap_or_else(|| "?".to_string()),
    )),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reads_nested_nodes_in_document_order() {
    let tree = ParseTree::from_xml_str(
      r#"<alpino_ds version="1.3">
        <node begin="0" cat="top" end="2" id="0" rel="--">
          <node begin="0" cat="np" end="2" id="1" rel="--">
            <node begin="0" end="1" id="2" lemma="de" pos="det" rel="det" word="De"/>
            <node begin="1" end="2" id="3" lcat="np" pos="noun" rel="hd" word="man"/>
          </node>
        </node>
        <sentence>De man</sentence>
      </alpino_ds>"#,
    )
    .unwrap();
    assert_eq!(tree.sentence, "De man");
    let rels: Vec<&str> = tree.nodes().map(|n| n.rel()).collect();
    assert_eq!(rels, vec!["--", "--", "det", "hd"]);
    assert_eq!(tree.root.span(), Span { begin: 0, end: 2 });
  }

  #[test]
  fn rejects_unlabeled_inner_node() {
    let result = ParseTree::from_xml_str(
      r#"<alpino_ds><node begin="0" end="1" id="0" rel="--">
           <node begin="0" end="1" id="1" pos="noun" rel="hd" word="Jan"/>
         </node></alpino_ds>"#,
    );
    assert!(matches!(result, Err(ParseTreeError::UnlabeledPhrase(ref id)) if id == "0"));
  }

  #[test]
  fn rejects_non_numeric_span() {
    let result = ParseTree::from_xml_str(
      r#"<alpino_ds><node begin="x" end="1" id="4" rel="--" cat="top"/></alpino_ds>"#,
    );
    assert!(matches!(
      result,
      Err(ParseTreeError::InvalidSpan {
        attribute: "begin",
        ..
      })
    ));
  }
}
