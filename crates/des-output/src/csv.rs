//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `completions.csv` (`entry_time,duration,fuel_litres`)
//! - `run_summary.csv`
//!
//! Time columns always carry a decimal point (`85.0`, never `85`) so the
//! files match the layout of historical `sim.csv` exports.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{CompletionRow, OutputResult, RunSummaryRow};
use crate::writer::OutputWriter;

pub const COMPLETIONS_FILE: &str = "completions.csv";
pub const SUMMARY_FILE: &str = "run_summary.csv";

fn secs(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

/// Writes run output to two CSV files.
pub struct CsvWriter {
    completions: Writer<File>,
    summary:     Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Create (truncating) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut completions = Writer::from_path(dir.join(COMPLETIONS_FILE))?;
        completions.write_record(["entry_time", "duration", "fuel_litres"])?;

        let mut summary = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summary.write_record([
            "end_time",
            "planes_arrived",
            "planes_refueled",
            "planes_failed",
            "trucks_called",
        ])?;

        Ok(Self {
            completions,
            summary,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_completions(&mut self, rows: &[CompletionRow]) -> OutputResult<()> {
        for row in rows {
            self.completions.write_record(&[
                secs(row.entry_time),
                secs(row.duration),
                row.fuel_litres.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            secs(row.end_time),
            row.planes_arrived.to_string(),
            row.planes_refueled.to_string(),
            row.planes_failed.to_string(),
            row.trucks_called.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.completions.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
