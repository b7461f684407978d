//! JSON-lines storage
//!
//! Keeps each table in its own `.jsonl` file under the data directory.
//!
//! ## Responsibilities
//! - Create the data directory and seed missing tables on first run
//! - Parse each line independently; a bad line never aborts the load
//! - Run the legacy migration and rewrite the files when it changed anything
//! - Replace files atomically (temp file in the same directory, then rename)

use std::collections::HashSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::Config;
use crate::error::{CorruptRecord, Result};
use crate::record::{Airline, Client, Flight, Record, RecordRef, Row, Table};

use super::migrate::{migrate_airlines, migrate_clients, migrate_flights};
use super::{LoadReport, Persistence, Tables};

/// Raw rows of one file with the line each came from
#[derive(Debug, Default)]
struct RawTable {
    lines: Vec<usize>,
    rows: Vec<Row>,
}

/// Disk-backed [`Persistence`]
#[derive(Debug)]
pub struct JsonlStorage {
    /// Directory holding the three table files
    data_dir: PathBuf,
}

impl JsonlStorage {
    /// Prefix of in-flight temporary files
    const TMP_PREFIX: &'static str = ".tmp_";

    /// Open or create storage for the configured data directory
    ///
    /// On startup:
    /// 1. Create the directory if it doesn't exist
    /// 2. Make sure it can be listed (an unreadable directory is fatal)
    /// 3. Copy missing table files from the seed directory, if any
    pub fn open(config: &Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;
        fs::read_dir(&config.data_dir)?;

        let storage = Self {
            data_dir: config.data_dir.clone(),
        };

        if let Some(seed_dir) = &config.seed_dir {
            storage.seed_from(seed_dir)?;
        }

        tracing::info!("JSONL storage data root: {}", storage.data_dir.display());
        Ok(storage)
    }

    /// Open with a path (convenience method)
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(&Config::builder().data_dir(path).build())
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of one table's file
    pub fn table_path(&self, table: Table) -> PathBuf {
        self.data_dir.join(table.file_name())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Copy bundled template files for tables that don't exist yet
    fn seed_from(&self, seed_dir: &Path) -> Result<()> {
        if !seed_dir.is_dir() {
            return Ok(());
        }

        for table in Table::ALL {
            let dst = self.table_path(table);
            let src = seed_dir.join(table.file_name());
            if !dst.exists() && src.is_file() {
                fs::copy(&src, &dst)?;
                tracing::info!("Seeded {} from {}", table.file_name(), seed_dir.display());
            }
        }
        Ok(())
    }

    /// Read every non-blank line of a table file as a JSON object
    ///
    /// A missing file is an empty table.
    fn read_rows(&self, table: Table, report: &mut LoadReport) -> Result<RawTable> {
        let path = self.table_path(table);
        let mut raw = RawTable::default();
        if !path.exists() {
            return Ok(raw);
        }

        let content = fs::read_to_string(&path)?;

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<Value>(line) {
                Ok(Value::Object(row)) => {
                    raw.lines.push(idx + 1);
                    raw.rows.push(row);
                }
                Ok(other) => skip(report, &path, idx + 1, format!("expected an object, got {other}")),
                Err(e) => skip(report, &path, idx + 1, e.to_string()),
            }
        }

        Ok(raw)
    }

    /// Turn migrated rows into typed records of one table
    ///
    /// Rows tagged with another table's kind and rows that fail conversion
    /// are skipped. Repeated primary keys are kept and logged.
    fn decode<T>(
        &self,
        table: Table,
        raw: RawTable,
        report: &mut LoadReport,
        pick: impl Fn(Record) -> Option<T>,
        key_of: impl Fn(&T) -> u64,
    ) -> Vec<T> {
        let path = self.table_path(table);
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(raw.rows.len());

        for (line, row) in raw.lines.into_iter().zip(raw.rows) {
            let record = match Record::from_row(row) {
                Ok(record) => record,
                Err(e) => {
                    skip(report, &path, line, e.to_string());
                    continue;
                }
            };

            let kind = record.table();
            let Some(typed) = pick(record) else {
                skip(report, &path, line, format!("{kind} record in the {table} file"));
                continue;
            };

            let id = key_of(&typed);
            if !seen.insert(id) {
                tracing::warn!(
                    "{}:{}: duplicate {} {}; kept, lookups resolve to the first",
                    path.display(),
                    line,
                    table.key(),
                    id
                );
            }
            out.push(typed);
        }

        out
    }

    /// Write records to a temp file beside `table`'s file, then rename over it
    fn write_atomic<'a, I>(&self, table: Table, records: I) -> Result<()>
    where
        I: IntoIterator<Item = RecordRef<'a>>,
    {
        let path = self.table_path(table);
        let mut tmp = tempfile::Builder::new()
            .prefix(Self::TMP_PREFIX)
            .tempfile_in(&self.data_dir)?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            for record in records {
                serde_json::to_writer(&mut writer, &record)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;

        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Persistence for JsonlStorage {
    fn load_all(&mut self) -> Result<Tables> {
        let mut report = LoadReport::default();

        let mut clients = self.read_rows(Table::Clients, &mut report)?;
        let mut airlines = self.read_rows(Table::Airlines, &mut report)?;
        let mut flights = self.read_rows(Table::Flights, &mut report)?;

        let mut migrated = false;
        migrated |= migrate_clients(&mut clients.rows);
        migrated |= migrate_airlines(&mut airlines.rows);
        migrated |= migrate_flights(&mut flights.rows);

        let clients = self.decode(
            Table::Clients,
            clients,
            &mut report,
            |r| match r {
                Record::Client(c) => Some(c),
                _ => None,
            },
            |c: &Client| c.client_id,
        );
        let airlines = self.decode(
            Table::Airlines,
            airlines,
            &mut report,
            |r| match r {
                Record::Airline(a) => Some(a),
                _ => None,
            },
            |a: &Airline| a.airline_id,
        );
        let flights = self.decode(
            Table::Flights,
            flights,
            &mut report,
            |r| match r {
                Record::Flight(f) => Some(f),
                _ => None,
            },
            |f: &Flight| f.id,
        );

        if migrated {
            tracing::warn!("JSONL storage: migrated legacy fields -> new schema");
            self.write_clients(&clients)?;
            self.write_airlines(&airlines)?;
            self.write_flights(&flights)?;
        }
        report.migrated = migrated;

        tracing::info!(
            "Loaded: clients={} airlines={} flights={} skipped={}",
            clients.len(),
            airlines.len(),
            flights.len(),
            report.skipped.len()
        );

        Ok(Tables {
            clients,
            airlines,
            flights,
            report,
        })
    }

    fn write_clients(&mut self, rows: &[Client]) -> Result<()> {
        self.write_atomic(Table::Clients, rows.iter().map(RecordRef::Client))
    }

    fn write_airlines(&mut self, rows: &[Airline]) -> Result<()> {
        self.write_atomic(Table::Airlines, rows.iter().map(RecordRef::Airline))
    }

    fn write_flights(&mut self, rows: &[Flight]) -> Result<()> {
        self.write_atomic(Table::Flights, rows.iter().map(RecordRef::Flight))
    }
}

fn skip(report: &mut LoadReport, path: &Path, line: usize, reason: String) {
    let corrupt = CorruptRecord {
        path: path.to_path_buf(),
        line,
        reason,
    };
    tracing::warn!("Skipping bad line: {}", corrupt);
    report.skipped.push(corrupt);
}
