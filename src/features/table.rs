//! Feature tables: one row per text, one column per index
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::data::Corpus;
use crate::error::{FeatureError, Result};
use crate::features::{FeatureContext, FeatureIndex, FeatureValue, Granularity, Registry};
use crate::stats::StatisticsTable;

static BUFFER_CAPACITY: usize = 1_048_576;

/// Feature name recorded for a text left out of the batch altogether
pub const WHOLE_TEXT: &str = "*";

/// The feature values of one text, in column order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
  /// the text number
  pub text_n: usize,
  /// one value per column
  pub values: Vec<FeatureValue>,
}

/// A per-text extraction failure that did not stop the batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureFailure {
  /// the text number
  pub text_n: usize,
  /// the index being extracted
  pub feature: String,
  /// what went wrong
  pub message: String,
}

/// Feature values of a batch of texts at one granularity
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
  /// granularity of every cell
  pub granularity: Granularity,
  /// index names, in column order
  pub columns: Vec<String>,
  /// one row per text, in the order requested
  pub rows: Vec<FeatureRow>,
  /// failures recorded as `FeatureValue::Failed` cells
  pub failures: Vec<FeatureFailure>,
}

impl FeatureTable {
  /// Fill a table column by column. Unknown index names, missing table rows and missing
  /// parse directories abort with a `MissingSource` error; any other failure is logged,
  /// recorded in `failures` and leaves a `Failed` cell.
  pub fn build(
    registry: &Registry,
    names: &[&str],
    texts: &[usize],
    granularity: Granularity,
    context: &FeatureContext,
  ) -> Result<FeatureTable> {
    let indices = names
      .iter()
      .map(|name| registry.get(name))
      .collect::<std::result::Result<Vec<&FeatureIndex>, _>>()?;
    let mut table = FeatureTable {
      granularity,
      columns: indices.iter().map(|index| index.name.to_string()).collect(),
      rows: texts
        .iter()
        .map(|&text_n| FeatureRow {
          text_n,
          values: vec![FeatureValue::Missing; indices.len()],
        })
        .collect(),
      failures: Vec::new(),
    };

    for (column, index) in indices.iter().enumerate() {
      debug!(feature = index.name, granularity = granularity.name(), "filling column");
      for row in table.rows.iter_mut() {
        row.values[column] = match index.extract(row.text_n, granularity, context) {
          Ok(value) => value,
          Err(e) if e.is_missing_source() => return Err(e),
          Err(e) => {
            warn!(text_n = row.text_n, feature = index.name, error = %e, "feature extraction failed");
            table.failures.push(FeatureFailure {
              text_n: row.text_n,
              feature: index.name.to_string(),
              message: e.to_string(),
            });
            FeatureValue::Failed
          },
        };
      }
    }
    Ok(table)
  }

  /// The value of an index for a text
  pub fn get(&self, text_n: usize, feature: &str) -> Option<&FeatureValue> {
    let column = self.columns.iter().position(|name| name == feature)?;
    self
      .rows
      .iter()
      .find(|row| row.text_n == text_n)
      .map(|row| &row.values[column])
  }

  /// Write the table as CSV: scalars as numbers, sequences as JSON arrays,
  /// `undefined`, `NA`, an empty cell or `error` for the remaining cases
  pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut header = vec!["text_n".to_string()];
    header.extend(self.columns.iter().cloned());
    csv_writer.write_record(&header)?;
    for row in &self.rows {
      let mut record = vec![row.text_n.to_string()];
      for value in &row.values {
        record.push(match value {
          FeatureValue::Scalar(number) => number.to_string(),
          FeatureValue::Sequence(values) => serde_json::to_string(values)?,
          FeatureValue::Undefined => "undefined".to_string(),
          FeatureValue::NotAvailable => "NA".to_string(),
          FeatureValue::Missing => String::new(),
          FeatureValue::Failed => "error".to_string(),
        });
      }
      csv_writer.write_record(&record)?;
    }
    csv_writer.flush().map_err(|source| FeatureError::Io {
      path: Default::default(),
      source,
    })?;
    Ok(())
  }

  /// Write the table to a CSV file
  pub fn to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(|source| FeatureError::Io {
      path: path.as_ref().to_path_buf(),
      source,
    })?;
    self.write_csv(BufWriter::with_capacity(BUFFER_CAPACITY, file))
  }

  /// Record texts left out of the batch in the failure list
  pub fn record_skipped(&mut self, skipped: &[FeatureFailure]) { self.failures.extend(skipped.iter().cloned()); }

  /// Write the failure list as CSV
  pub fn write_failures_csv<W: Write>(&self, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for failure in &self.failures {
      csv_writer.serialize(failure)?;
    }
    csv_writer.flush().map_err(|source| FeatureError::Io {
      path: Default::default(),
      source,
    })?;
    Ok(())
  }
}

/// Build the document-level table to completion, then the sentence-level one
pub fn build_tables(
  registry: &Registry,
  names: &[&str],
  texts: &[usize],
  context: &FeatureContext,
) -> Result<(FeatureTable, FeatureTable)> {
  context.check_parsing();
  let document = FeatureTable::build(registry, names, texts, Granularity::Document, context)?;
  let sentence = FeatureTable::build(registry, names, texts, Granularity::Sentence, context)?;
  Ok((document, sentence))
}

/// The texts a batch runs on, and those present in only one of the two analyses
#[derive(Debug, Clone, PartialEq)]
pub struct TextSelection {
  /// texts with a T-Scan document row and an Alpino directory, ascending
  pub texts: Vec<usize>,
  /// texts left out, one `WHOLE_TEXT` failure each
  pub skipped: Vec<FeatureFailure>,
}

/// Select the texts known to both T-Scan and Alpino. Every other text is logged
/// and recorded as skipped, with the missing source as message.
pub fn select_texts(corpus: &Corpus, document_stats: &StatisticsTable) -> Result<TextSelection> {
  let mut candidates: BTreeSet<usize> = document_stats.texts().collect();
  candidates.extend(corpus.texts()?.iter().map(|text| text.text_n));

  let mut selection = TextSelection {
    texts: Vec::new(),
    skipped: Vec::new(),
  };
  for text_n in candidates {
    let missing = match (corpus.text_dir(text_n), document_stats.rows(text_n)) {
      (Ok(_), Ok(_)) => {
        selection.texts.push(text_n);
        continue;
      },
      (Err(e), _) | (Ok(_), Err(e)) => e,
    };
    warn!(text_n, error = %missing, "text skipped");
    selection.skipped.push(FeatureFailure {
      text_n,
      feature: WHOLE_TEXT.to_string(),
      message: missing.to_string(),
    });
  }
  Ok(selection)
}
