use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::error::BenchError;
use crate::output::SolveMetrics;

/// One row of the result table: the outcome of benchmarking one instance.
#[derive(Clone, Debug, PartialEq)]
pub struct RunResult {
    pub instance: String,
    pub min_cost: Option<i64>,
    pub abs_error: Option<i64>,
    pub rel_error: Option<f64>,
    /// Wall-clock seconds for the whole solver process, startup included.
    pub elapsed: f64,
}

impl RunResult {
    pub fn new(instance: &str, metrics: SolveMetrics, elapsed: f64) -> Self {
        RunResult {
            instance: instance.to_string(),
            min_cost: metrics.min_cost,
            abs_error: metrics.abs_error,
            rel_error: metrics.rel_error,
            elapsed,
        }
    }
}

/// Column order is fixed; both report formats share it.
pub const HEADER: [&str; 5] = [
    "instance",
    "average cost",
    "absolute error",
    "relative error (%)",
    "average time (s)",
];

/// Renders a metric cell; a metric the solver never reported stays empty.
pub fn cell<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(String::new, |v| v.to_string())
}

/// Writes the table to both destinations, workbook first.
///
/// A failure on either side aborts the export; a workbook that was already
/// saved is not rolled back when the text report fails afterwards. An empty
/// table still produces both files, header row only.
pub fn export(table: &[RunResult], workbook: &Path, text: &Path) -> Result<(), BenchError> {
    write_workbook(table, workbook).map_err(|e| serialization(workbook, e))?;
    write_text(table, text).map_err(|e| serialization(text, e))
}

fn serialization(path: &Path, detail: impl ToString) -> BenchError {
    BenchError::Serialization {
        path: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

fn write_workbook(table: &[RunResult], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in HEADER.iter().enumerate() {
        sheet.write(0, col as u16, *name)?;
    }
    for (i, row) in table.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write(r, 0, row.instance.as_str())?;
        if let Some(v) = row.min_cost {
            sheet.write(r, 1, v)?;
        }
        if let Some(v) = row.abs_error {
            sheet.write(r, 2, v)?;
        }
        if let Some(v) = row.rel_error {
            sheet.write(r, 3, v)?;
        }
        sheet.write(r, 4, row.elapsed)?;
    }
    workbook.save(path)?;
    Ok(())
}

fn write_text(table: &[RunResult], path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{}", HEADER.join("\t"))?;
    for row in table {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            row.instance,
            cell(&row.min_cost),
            cell(&row.abs_error),
            cell(&row.rel_error),
            row.elapsed,
        )?;
    }
    out.flush()
}
