//! In-memory storage
//!
//! A [`Persistence`] that never touches the filesystem. Used to embed a
//! store without a data directory and to run isolated stores in tests.

use crate::error::Result;
use crate::record::{Airline, Client, Flight};

use super::{Persistence, Tables};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    tables: Tables,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing rows, as if they had been loaded from disk
    pub fn with_tables(clients: Vec<Client>, airlines: Vec<Airline>, flights: Vec<Flight>) -> Self {
        Self {
            tables: Tables {
                clients,
                airlines,
                flights,
                ..Tables::default()
            },
            writes: 0,
        }
    }

    /// What has been persisted so far
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Number of table writes received
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Persistence for MemoryStorage {
    fn load_all(&mut self) -> Result<Tables> {
        Ok(self.tables.clone())
    }

    fn write_clients(&mut self, rows: &[Client]) -> Result<()> {
        self.tables.clients = rows.to_vec();
        self.writes += 1;
        Ok(())
    }

    fn write_airlines(&mut self, rows: &[Airline]) -> Result<()> {
        self.tables.airlines = rows.to_vec();
        self.writes += 1;
        Ok(())
    }

    fn write_flights(&mut self, rows: &[Flight]) -> Result<()> {
        self.tables.flights = rows.to_vec();
        self.writes += 1;
        Ok(())
    }
}
