//! # Dated tables
//!
//! [`DatedTable`] is the in-memory form of both persisted artifacts:
//!
//! * the **daily table**: one dense row per civil day of a year,
//! * the **minima table**: sparse rows, one per date on which at least one pair reaches a
//!   local minimum.
//!
//! Rows are keyed by `YYYY-MM-DD` strings, which sort chronologically, and kept in a
//! `BTreeMap`. Columns are the pair labels in catalog order. A cell is `None` when no value
//! was recorded. Writing a cell twice keeps the last value.
//!
//! The CSV layout is `date,<label_1>,…,<label_n>`, one row per date, empty fields for
//! absent cells.
use std::{collections::BTreeMap, fmt, io};

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::{conjunction_errors::ConjunctionError, constants::DateString, constants::Degree};

/// Name of the key column.
pub const DATE_COLUMN: &str = "date";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatedTable {
    columns: Vec<String>,
    rows: BTreeMap<DateString, Vec<Option<Degree>>>,
}

/// One populated cell of a table, in long format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConjunctionEvent {
    pub date: DateString,
    pub pair: String,
    pub degrees: Degree,
}

/// Round to `decimals` digits, the precision kept in the tables.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

impl DatedTable {
    pub fn new(columns: Vec<String>) -> Self {
        DatedTable {
            columns,
            rows: BTreeMap::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = &DateString> {
        self.rows.keys()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&DateString, &[Option<Degree>])> {
        self.rows.iter().map(|(d, r)| (d, r.as_slice()))
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Record `value` in the cell `(date, column)`, replacing any previous value.
    pub fn set(&mut self, date: &str, column: &str, value: Degree) -> Result<(), ConjunctionError> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| ConjunctionError::MalformedTable(format!("unknown column {column}")))?;
        let width = self.columns.len();
        let row = self
            .rows
            .entry(date.to_string())
            .or_insert_with(|| vec![None; width]);
        row[idx] = Some(value);
        Ok(())
    }

    pub fn get(&self, date: &str, column: &str) -> Option<Degree> {
        let idx = self.column_index(column)?;
        self.rows.get(date).and_then(|row| row[idx])
    }

    /// Values of one column, in date order, skipping absent cells.
    pub fn column(&self, column: &str) -> Vec<(&DateString, Degree)> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|(date, row)| row[idx].map(|v| (date, v)))
            .collect()
    }

    /// Rows whose date lies in `[start, end]`, both bounds inclusive.
    pub fn window(&self, start: &str, end: &str) -> DatedTable {
        let rows = if start <= end {
            self.rows
                .range(start.to_string()..=end.to_string())
                .map(|(d, r)| (d.clone(), r.clone()))
                .collect()
        } else {
            BTreeMap::new()
        };
        DatedTable {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Append the rows of `other`, which must have the same columns.
    ///
    /// Rows of `other` replace rows of `self` with the same date.
    pub fn merge(&mut self, other: DatedTable) -> Result<(), ConjunctionError> {
        if other.columns != self.columns {
            return Err(ConjunctionError::MalformedTable(
                "cannot merge tables with different columns".to_string(),
            ));
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// Every populated cell, in date then column order.
    pub fn events(&self) -> Vec<ConjunctionEvent> {
        self.rows
            .iter()
            .flat_map(|(date, row)| {
                row.iter()
                    .zip(&self.columns)
                    .filter_map(move |(cell, pair)| {
                        cell.map(|degrees| ConjunctionEvent {
                            date: date.clone(),
                            pair: pair.clone(),
                            degrees,
                        })
                    })
            })
            .collect()
    }

    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), ConjunctionError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(std::iter::once(DATE_COLUMN).chain(self.columns.iter().map(String::as_str)))?;
        for (date, row) in &self.rows {
            let mut record = Vec::with_capacity(row.len() + 1);
            record.push(date.clone());
            record.extend(row.iter().map(|cell| cell.map(|v| v.to_string()).unwrap_or_default()));
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn read_from<R: io::Read>(reader: R) -> Result<Self, ConjunctionError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();
        let mut fields = headers.iter();
        if fields.next() != Some(DATE_COLUMN) {
            return Err(ConjunctionError::MalformedTable(format!(
                "first column must be {DATE_COLUMN:?}"
            )));
        }
        let mut table = DatedTable::new(fields.map(str::to_string).collect());

        for record in rdr.records() {
            let record = record?;
            let mut fields = record.iter();
            let date = fields
                .next()
                .ok_or_else(|| ConjunctionError::MalformedTable("empty row".to_string()))?;
            let row = fields
                .map(|cell| match cell.trim() {
                    "" => Ok(None),
                    value => value.parse::<f64>().map(Some).map_err(|_| {
                        ConjunctionError::MalformedTable(format!(
                            "cell {value:?} on {date} is not a number"
                        ))
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if row.len() != table.columns.len() {
                return Err(ConjunctionError::MalformedTable(format!(
                    "row {date} has {} cells, expected {}",
                    row.len(),
                    table.columns.len()
                )));
            }
            table.rows.insert(date.to_string(), row);
        }
        Ok(table)
    }

    pub fn write_csv(&self, path: &Utf8Path) -> Result<(), ConjunctionError> {
        let file = std::fs::File::create(path)?;
        self.write_to(io::BufWriter::new(file))
    }

    pub fn read_csv(path: &Utf8Path) -> Result<Self, ConjunctionError> {
        let file = std::fs::File::open(path)?;
        Self::read_from(io::BufReader::new(file))
    }
}

impl fmt::Display for DatedTable {
    /// Fixed-width text rendering, one line per date.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10}", DATE_COLUMN)?;
        for column in &self.columns {
            write!(f, " {column:>w$}", w = column.len().max(7))?;
        }
        writeln!(f)?;
        for (date, row) in &self.rows {
            write!(f, "{date:<10}")?;
            for (column, cell) in self.columns.iter().zip(row) {
                let w = column.len().max(7);
                match cell {
                    Some(v) => write!(f, " {v:>w$.2}")?,
                    None => write!(f, " {:>w$}", "")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
