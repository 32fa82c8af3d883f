//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `completions` and `run_summary`.

use std::path::Path;

use rusqlite::Connection;

use crate::{CompletionRow, OutputResult, RunSummaryRow};
use crate::writer::OutputWriter;

pub const DB_FILE: &str = "output.db";

/// Writes run output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    ///
    /// Rows from earlier runs in the same database are kept; `seq` orders
    /// completions within the file.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join(DB_FILE))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS completions (
                 seq         INTEGER PRIMARY KEY AUTOINCREMENT,
                 entry_time  REAL NOT NULL,
                 duration    REAL NOT NULL,
                 fuel_litres REAL NOT NULL
             );
             CREATE TABLE IF NOT EXISTS run_summary (
                 end_time        REAL    NOT NULL,
                 planes_arrived  INTEGER NOT NULL,
                 planes_refueled INTEGER NOT NULL,
                 planes_failed   INTEGER NOT NULL,
                 trucks_called   INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_completions(&mut self, rows: &[CompletionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO completions (entry_time, duration, fuel_litres) \
                 VALUES (?1, ?2, ?3)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.entry_time, row.duration, row.fuel_litres])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO run_summary \
             (end_time, planes_arrived, planes_refueled, planes_failed, trucks_called) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                row.end_time,
                row.planes_arrived as i64,
                row.planes_refueled as i64,
                row.planes_failed as i64,
                row.trucks_called as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
