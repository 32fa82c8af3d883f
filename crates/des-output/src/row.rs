//! Plain data row types written by output backends.

use des_station::CompletionRecord;

/// One refueled plane.  Columns: `entry_time,duration,fuel_litres`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionRow {
    pub entry_time:  f64,
    pub duration:    f64,
    pub fuel_litres: f64,
}

impl From<&CompletionRecord> for CompletionRow {
    fn from(r: &CompletionRecord) -> Self {
        Self {
            entry_time:  r.entry_time,
            duration:    r.duration,
            fuel_litres: r.fuel_litres,
        }
    }
}

/// Totals for one run, written once at the end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummaryRow {
    pub end_time:        f64,
    pub planes_arrived:  u64,
    pub planes_refueled: u64,
    /// Planes whose process ended in an error (fuel request larger than the
    /// reservoir).
    pub planes_failed:   u64,
    pub trucks_called:   u64,
}
