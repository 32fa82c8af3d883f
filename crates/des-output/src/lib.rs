//! `des-output` — run output writers for the airport fuel station.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend     | Files created                          |
//! |-----------|-------------|----------------------------------------|
//! | *(none)*  | CSV         | `completions.csv`, `run_summary.csv`   |
//! | `sqlite`  | SQLite      | `output.db`                            |
//!
//! Both implement [`OutputWriter`] and are driven by
//! [`RecordExportObserver`], which implements
//! `des_engine::SimObserver<StationState>`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use des_output::{CsvWriter, RecordExportObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = RecordExportObserver::new(writer);
//! run_station(&config, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RecordExportObserver;
pub use row::{CompletionRow, RunSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
