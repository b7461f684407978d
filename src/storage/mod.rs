//! Storage Module
//!
//! Persistence layer: one JSON-lines file per table.
//!
//! ## Responsibilities
//! - Load every table on startup, skipping lines that do not parse
//! - Migrate records written under the legacy field names
//! - Replace a table's file atomically on every write
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ {"Type":"client","client_id":1,"Name":"Alice",...}\n     │
//! ├──────────────────────────────────────────────────────────┤
//! │ {"Type":"client","client_id":2,"Name":"Bob",...}\n       │
//! ├──────────────────────────────────────────────────────────┤
//! │ ... (one standalone object per line, no header)          │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod jsonl;
mod memory;
mod migrate;

pub use jsonl::JsonlStorage;
pub use memory::MemoryStorage;
pub use migrate::{migrate_airlines, migrate_clients, migrate_flights};

use crate::error::{CorruptRecord, Result, StoreError};
use crate::record::{Airline, Client, Flight};

/// Durable home of the three tables
///
/// Every write replaces one table's full contents; implementations must never
/// expose a half-written table to the next `load_all`.
pub trait Persistence: Send {
    /// Read all three tables
    fn load_all(&mut self) -> Result<Tables>;

    /// Replace the client table
    fn write_clients(&mut self, rows: &[Client]) -> Result<()>;

    /// Replace the airline table
    fn write_airlines(&mut self, rows: &[Airline]) -> Result<()>;

    /// Replace the flight table
    fn write_flights(&mut self, rows: &[Flight]) -> Result<()>;
}

/// Contents of all three tables as loaded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    pub clients: Vec<Client>,
    pub airlines: Vec<Airline>,
    pub flights: Vec<Flight>,
    pub report: LoadReport,
}

/// What happened during a load besides the records themselves
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines skipped because they could not be turned into records
    pub skipped: Vec<CorruptRecord>,

    /// Legacy records were rewritten in the current format
    pub migrated: bool,
}

impl LoadReport {
    /// Fail with the first skipped line, if any
    pub fn ensure_clean(&self) -> Result<()> {
        match self.skipped.first() {
            Some(corrupt) => Err(StoreError::CorruptRecord(corrupt.clone())),
            None => Ok(()),
        }
    }
}
