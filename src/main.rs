//! Builds the document- and sentence-level feature tables for a batch of learner texts
//! $ nt2complexity /path/to/alpino/output /path/to/tscan_output [output_prefix]
//! writes <output_prefix>.doc.csv and <output_prefix>.sen.csv (plus failure reports, if any),
//! the prefix defaults to `features`
use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nt2complexity::data::Corpus;
use nt2complexity::error::{FeatureError, Result};
use nt2complexity::features::{build_tables, select_texts, FeatureContext, FeatureTable, REGISTRY};
use nt2complexity::stats::{StatisticsTable, TableKind};

fn write_failures(table: &FeatureTable, prefix: &str) -> Result<()> {
  if table.failures.is_empty() {
    return Ok(());
  }
  let path = format!("{}.{}.failures.csv", prefix, table.granularity.name());
  let file = std::fs::File::create(&path).map_err(|source| FeatureError::Io {
    path: PathBuf::from(&path),
    source,
  })?;
  table.write_failures_csv(file)
}

fn run() -> Result<()> {
  let start = Instant::now();
  // Read input arguments
  let mut input_args = env::args();
  let _ = input_args.next(); // skip process name
  let alpino_path = match input_args.next() {
    Some(path) => path,
    None => "./output".to_string(),
  };
  let tscan_path = match input_args.next() {
    Some(path) => PathBuf::from(path),
    None => PathBuf::from("./tscan_output"),
  };
  let prefix = match input_args.next() {
    Some(prefix) => prefix,
    None => "features".to_string(),
  };

  let corpus = Corpus::new(alpino_path);
  let document_stats = StatisticsTable::from_path(tscan_path.join("total.doc.csv"), TableKind::Document)?;
  let sentence_stats = StatisticsTable::from_path(tscan_path.join("total.sen.csv"), TableKind::Sentence)?;
  let context = FeatureContext::with_statistics(&corpus, &document_stats, &sentence_stats);

  let selection = select_texts(&corpus, &document_stats)?;
  let names = REGISTRY.names();
  info!(
    texts = selection.texts.len(),
    skipped = selection.skipped.len(),
    features = names.len(),
    "building feature tables"
  );

  let (mut document, mut sentence) = build_tables(&REGISTRY, &names, &selection.texts, &context)?;
  document.record_skipped(&selection.skipped);
  sentence.record_skipped(&selection.skipped);
  document.to_path(format!("{}.doc.csv", prefix))?;
  sentence.to_path(format!("{}.sen.csv", prefix))?;
  write_failures(&document, &prefix)?;
  write_failures(&sentence, &prefix)?;

  info!(
    seconds = start.elapsed().as_secs(),
    failures = document.failures.len() + sentence.failures.len(),
    "feature tables finished"
  );
  Ok(())
}

pub fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();
  if let Err(e) = run() {
    error!(error = %e, "aborted");
    process::exit(1);
  }
}
