//! `RecordExportObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use des_core::{ProcessId, SimTime};
use des_engine::{ProcessOutcome, SimObserver};
use des_station::StationState;

use crate::row::{CompletionRow, RunSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that exports the station's completion records to any
/// [`OutputWriter`] backend once the run ends.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `env.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct RecordExportObserver<W: OutputWriter> {
    writer:        W,
    planes_failed: u64,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> RecordExportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            planes_failed: 0,
            last_error:    None,
        }
    }

    /// Take the stored write error (if any) after `env.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver<StationState> for RecordExportObserver<W> {
    fn on_process_end(
        &mut self,
        _now:    SimTime,
        _pid:    ProcessId,
        name:    &str,
        outcome: &ProcessOutcome,
    ) {
        if matches!(outcome, ProcessOutcome::Failed(_)) && name.starts_with("Plane") {
            self.planes_failed += 1;
        }
    }

    fn on_sim_end(&mut self, now: SimTime, state: &StationState) {
        let rows: Vec<CompletionRow> = state.records().iter().map(CompletionRow::from).collect();
        let result = self.writer.write_completions(&rows);
        self.store_err(result);

        let summary = RunSummaryRow {
            end_time:        now.as_secs(),
            planes_arrived:  state.planes_arrived,
            planes_refueled: rows.len() as u64,
            planes_failed:   self.planes_failed,
            trucks_called:   state.trucks_called,
        };
        let result = self.writer.write_summary(&summary);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
