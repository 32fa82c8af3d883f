//! The `OutputWriter` trait implemented by all backend writers.

use crate::{CompletionRow, OutputResult, RunSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are not surfaced through the observer callbacks; they are stored
/// and retrieved with [`RecordExportObserver::take_error`][crate::RecordExportObserver::take_error].
pub trait OutputWriter {
    /// Append completion rows, preserving their order.
    fn write_completions(&mut self, rows: &[CompletionRow]) -> OutputResult<()>;

    /// Write the single run summary row.
    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
