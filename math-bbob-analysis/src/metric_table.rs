//! Metric tables: the unit persisted between the two stages
//!
//! One table holds the [`MetricRow`]s of every (algorithm, function) pair at
//! a single dimension. On disk it is a plain CSV file named
//! `bbob_fall_{dim}d.csv`. A missing value is written as an empty cell and
//! read back as `NaN`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};
use crate::metrics::{
    ERROR_AVG_COLUMN, ERROR_BOUNDED_AVG_COLUMN, ERT_AREA_COLUMN, FunctionLabel, MetricRow,
    NUM_PRECISIONS, ert_column, parse_precision_label,
};

const NUM_COLUMNS: usize = 2 + NUM_PRECISIONS + 3;

/// File name of the metric table for `dimension`.
pub fn table_file_name(dimension: usize) -> String {
    format!("bbob_fall_{dimension}d.csv")
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{value:?}")
    }
}

fn parse_value(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        Some(f64::NAN)
    } else {
        cell.parse().ok()
    }
}

/// Metric rows of every (algorithm, function) pair at one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    /// Problem dimension shared by every row
    pub dimension: usize,
    /// Target precisions of the three ERT columns
    pub precisions: [f64; NUM_PRECISIONS],
    /// Rows, in extraction order
    pub rows: Vec<MetricRow>,
}

impl MetricTable {
    /// Empty table for `dimension`.
    pub fn new(dimension: usize, precisions: [f64; NUM_PRECISIONS]) -> Self {
        Self {
            dimension,
            precisions,
            rows: Vec::new(),
        }
    }

    /// Column names, in file order.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = vec!["algorithm".to_string(), "function".to_string()];
        columns.extend(self.precisions.iter().map(|&p| ert_column(p)));
        columns.push(ERT_AREA_COLUMN.to_string());
        columns.push(ERROR_AVG_COLUMN.to_string());
        columns.push(ERROR_BOUNDED_AVG_COLUMN.to_string());
        columns
    }

    /// Algorithm names in first-appearance order.
    pub fn algorithms(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for row in &self.rows {
            if !names.contains(&row.algorithm) {
                names.push(row.algorithm.clone());
            }
        }
        names
    }

    /// Functions in first-appearance order.
    pub fn functions(&self) -> Vec<FunctionLabel> {
        let mut labels: Vec<FunctionLabel> = Vec::new();
        for row in &self.rows {
            if !labels.contains(&row.function) {
                labels.push(row.function);
            }
        }
        labels
    }

    /// Row for `algorithm` on `function`, if any.
    pub fn row(&self, algorithm: &str, function: FunctionLabel) -> Option<&MetricRow> {
        self.rows
            .iter()
            .find(|row| row.algorithm == algorithm && row.function == function)
    }

    /// Write the table as CSV to `path`.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = BufWriter::new(File::create(path)?);

        writeln!(file, "{}", self.columns().join(","))?;
        for row in &self.rows {
            write!(file, "{},{},", row.algorithm, row.function)?;
            for &ert in &row.ert {
                write!(file, "{},", format_value(ert))?;
            }
            writeln!(
                file,
                "{},{},{}",
                format_value(row.log10_ert_area),
                format_value(row.error_avg),
                format_value(row.error_bounded_avg)
            )?;
        }

        file.flush()?;
        log::info!("Wrote {} metric rows to {}", self.rows.len(), path.display());
        Ok(())
    }

    /// Write the table into `dir` under its conventional name.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        fs::create_dir_all(dir.as_ref())?;
        let path = dir.as_ref().join(table_file_name(self.dimension));
        self.write_csv(&path)?;
        Ok(path)
    }

    /// Read a table written by [`write_csv`](Self::write_csv).
    ///
    /// The dimension is taken from the function labels, the precisions from
    /// the ERT column names.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let parse_error = |line: usize, message: String| AnalysisError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        };

        let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());
        let (_, header) = lines
            .next()
            .ok_or_else(|| parse_error(1, "empty metric table".to_string()))?;
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns.len() != NUM_COLUMNS {
            return Err(parse_error(
                1,
                format!("expected {NUM_COLUMNS} columns, got {}", columns.len()),
            ));
        }

        let mut precisions = [0.0; NUM_PRECISIONS];
        for (slot, precision) in precisions.iter_mut().enumerate() {
            let name = columns[2 + slot];
            *precision = name
                .strip_prefix("ert_")
                .and_then(parse_precision_label)
                .ok_or_else(|| parse_error(1, format!("'{name}' is not an ERT column")))?;
        }

        let mut table = MetricTable::new(0, precisions);
        if columns != table.columns() {
            return Err(parse_error(
                1,
                format!("unexpected header, expected {}", table.columns().join(",")),
            ));
        }

        for (idx, line) in lines {
            let line_no = idx + 1;
            let cells: Vec<&str> = line.split(',').collect();
            if cells.len() != NUM_COLUMNS {
                return Err(parse_error(
                    line_no,
                    format!("expected {NUM_COLUMNS} cells, got {}", cells.len()),
                ));
            }

            let function: FunctionLabel = cells[1]
                .trim()
                .parse()
                .map_err(|e: String| parse_error(line_no, e))?;
            let mut values = [0.0; NUM_COLUMNS - 2];
            for (value, cell) in values.iter_mut().zip(&cells[2..]) {
                *value = parse_value(cell)
                    .ok_or_else(|| parse_error(line_no, format!("invalid number '{cell}'")))?;
            }

            if table.rows.is_empty() {
                table.dimension = function.dimension;
            } else if function.dimension != table.dimension {
                return Err(parse_error(
                    line_no,
                    format!(
                        "{function} does not match the table dimension {}",
                        table.dimension
                    ),
                ));
            }

            table.rows.push(MetricRow {
                algorithm: cells[0].trim().to_string(),
                function,
                ert: [values[0], values[1], values[2]],
                log10_ert_area: values[3],
                error_avg: values[4],
                error_bounded_avg: values[5],
            });
        }

        log::debug!(
            "Read {} metric rows ({}D) from {}",
            table.rows.len(),
            table.dimension,
            path.display()
        );
        Ok(table)
    }
}
