//! Tests for the bracket canonicalization of Alpino parses
use libxml::parser::Parser;
use nt2complexity::alpino::ParseTree;
use nt2complexity::c14n::canonicalize;
use nt2complexity::parameters::AnalysisParameters;

fn load(path: &str) -> ParseTree {
  let parser = Parser::default();
  ParseTree::from_file(path, &parser).unwrap()
}

#[test]
fn test_c14n_basic() {
  let tree = load("tests/resources/output/text_1.txt/text_1.p.1.s.1.xml");
  assert_eq!(tree.sentence, "Ik woon in Amsterdam .");
  let canonical = canonicalize(&tree, &AnalysisParameters::default()).unwrap();
  assert_eq!(canonical.brackets, "{top{smain{su}{hd}{pp{hd}{obj1}}}{--}}");
  assert_eq!(canonical.skipped_closes, 0);
  assert_eq!(canonical.unclosed, 0);
}

#[test]
fn test_c14n_nested_right_edge() {
  let tree = load("tests/resources/output/text_1.txt/text_1.p.2.s.1.xml");
  let canonical = canonicalize(&tree, &AnalysisParameters::default()).unwrap();
  // np, pp and smain all end at token 6 and close together
  assert_eq!(
    canonical.brackets,
    "{top{smain{np{det}{hd}}{hd}{pp{hd}{np{det}{hd}}}}{--}}"
  );
}

#[test]
fn test_c14n_deterministic() {
  let tree = load("tests/resources/output/text_1.txt/text_1.p.1.s.2.xml");
  let before = tree.clone();
  let parameters = AnalysisParameters::default();
  let first = canonicalize(&tree, &parameters).unwrap();
  let second = canonicalize(&tree, &parameters).unwrap();
  assert_eq!(first, second);
  assert_eq!(tree, before, "canonicalization must not alter the tree");
}

#[test]
fn test_c14n_bracket_depth_matches_tree() {
  let tree = load("tests/resources/output/text_1.txt/text_1.p.2.s.1.xml");
  let canonical = canonicalize(&tree, &AnalysisParameters::default()).unwrap();
  let mut depth = 0;
  let mut max_depth = 0;
  for c in canonical.brackets.chars() {
    match c {
      '{' => {
        depth += 1;
        max_depth = max_depth.max(depth);
      },
      '}' => depth -= 1,
      _ => {},
    }
  }
  assert_eq!(depth, 0);
  // top > smain > pp > np > hd
  assert_eq!(max_depth, 5);
}
