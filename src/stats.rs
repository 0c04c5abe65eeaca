//! Document- and sentence-level surface statistics computed by T-Scan,
//! read from its `total.doc.csv` / `total.sen.csv` exports and keyed by text number
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::error::{FeatureError, MissingSource, Result};

/// Column holding the path of the analysed input file
pub const INPUT_FILE_COLUMN: &str = "Inputfile";
/// Column where T-Scan flags sentences Alpino failed to parse
pub const PARSE_STATUS_COLUMN: &str = "Alpino_status";

lazy_static! {
  static ref INPUT_TEXT_NUMBER: Regex = Regex::new(r"input/text_([0-9]+)\.txt").unwrap();
  static ref ANY_TEXT_NUMBER: Regex = Regex::new(r"text_([0-9]+)").unwrap();
}

/// Extract the text number from an `Inputfile` value such as `input/text_12.txt`
pub fn text_number(input_file: &str) -> Option<usize> {
  INPUT_TEXT_NUMBER
    .captures(input_file)
    .or_else(|| ANY_TEXT_NUMBER.captures(input_file))
    .and_then(|caps| caps[1].parse().ok())
}

/// The two granularities T-Scan reports at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
  /// one row per text
  Document,
  /// one row per sentence, several per text
  Sentence,
}

impl TableKind {
  /// Human readable name, for error messages
  pub fn name(self) -> &'static str {
    match self {
      TableKind::Document => "document",
      TableKind::Sentence => "sentence",
    }
  }
}

/// A T-Scan table with its rows grouped by text number
#[derive(Debug, Clone)]
pub struct StatisticsTable {
  /// granularity of the rows
  pub kind: TableKind,
  columns: HashMap<String, usize>,
  rows: BTreeMap<usize, Vec<StringRecord>>,
}

fn numeric_cell(record: &StringRecord, index: usize) -> Option<f64> {
  record
    .get(index)
    .map(str::trim)
    .filter(|cell| !cell.is_empty())
    .and_then(|cell| cell.parse::<f64>().ok())
}

impl StatisticsTable {
  /// Load a comma separated T-Scan export
  pub fn from_path<P: AsRef<Path>>(path: P, kind: TableKind) -> Result<Self> {
    let file = File::open(path.as_ref()).map_err(|source| FeatureError::Io {
      path: path.as_ref().to_path_buf(),
      source,
    })?;
    StatisticsTable::from_reader(file, kind)
  }

  /// Load a T-Scan export from any reader
  pub fn from_reader<R: Read>(reader: R, kind: TableKind) -> Result<Self> {
    let mut csv_reader = csv::ReaderBuilder::new()
      .delimiter(b',')
      .flexible(true)
      .from_reader(reader);
    let columns: HashMap<String, usize> = csv_reader
      .headers()?
      .iter()
      .enumerate()
      .map(|(index, name)| (name.trim().to_string(), index))
      .collect();
    let input_index = match columns.get(INPUT_FILE_COLUMN) {
      Some(index) => *index,
      None => {
        return Err(
          MissingSource::StatisticsColumn {
            column: INPUT_FILE_COLUMN.to_string(),
            table: kind.name(),
          }
          .into(),
        )
      },
    };

    let mut rows: BTreeMap<usize, Vec<StringRecord>> = BTreeMap::new();
    for record in csv_reader.records() {
      let record = record?;
      let input_file = record.get(input_index).unwrap_or("");
      match text_number(input_file) {
        Some(text) => rows.entry(text).or_default().push(record),
        None => warn!(input_file, table = kind.name(), "row without a text number, skipped"),
      }
    }
    Ok(StatisticsTable {
      kind,
      columns,
      rows,
    })
  }

  /// Text numbers present in the table, ascending
  pub fn texts(&self) -> impl Iterator<Item = usize> + '_ { self.rows.keys().copied() }

  /// All rows of a text (one for document tables)
  pub fn rows(&self, text: usize) -> std::result::Result<&[StringRecord], MissingSource> {
    match self.rows.get(&text) {
      Some(rows) => Ok(rows.as_slice()),
      None => Err(MissingSource::StatisticsRow {
        text,
        table: self.kind.name(),
      }),
    }
  }

  fn column(&self, column: &str) -> std::result::Result<usize, MissingSource> {
    match self.columns.get(column) {
      Some(index) => Ok(*index),
      None => Err(MissingSource::StatisticsColumn {
        column: column.to_string(),
        table: self.kind.name(),
      }),
    }
  }

  /// The value of a column in the first row of a text. `Ok(None)` when the cell is empty
  /// or not numeric, an error when the text or column is absent.
  pub fn value(&self, text: usize, column: &str) -> std::result::Result<Option<f64>, MissingSource> {
    let index = self.column(column)?;
    let rows = self.rows(text)?;
    Ok(rows.first().and_then(|row| numeric_cell(row, index)))
  }

  /// The values of a column over all rows of a text, in table order
  pub fn values(&self, text: usize, column: &str) -> std::result::Result<Vec<Option<f64>>, MissingSource> {
    let index = self.column(column)?;
    let rows = self.rows(text)?;
    Ok(rows.iter().map(|row| numeric_cell(row, index)).collect())
  }

  /// Texts with at least one row flagged as an unsuccessful Alpino parse
  pub fn parse_failures(&self) -> Vec<usize> {
    let index = match self.columns.get(PARSE_STATUS_COLUMN) {
      Some(index) => *index,
      None => return Vec::new(),
    };
    self
      .rows
      .iter()
      .filter(|(_, rows)| rows.iter().any(|row| numeric_cell(row, index) == Some(1.0)))
      .map(|(text, _)| *text)
      .collect()
  }

  /// Warn when T-Scan reports failed parses. Returns whether any were found.
  pub fn check_parsing(&self) -> bool {
    let failures = self.parse_failures();
    if failures.is_empty() {
      false
    } else {
      warn!(
        table = self.kind.name(),
        texts = ?failures,
        "Alpino parsing was unsuccessful for one or more sentences"
      );
      true
    }
  }
}
