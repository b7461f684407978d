//! Store Module
//!
//! The record store that owns the three tables.
//!
//! ## Responsibilities
//! - Allocate identifiers and keep them unique per table
//! - Validate every record before it is accepted
//! - Enforce flight foreign keys and cascade deletes
//! - Persist every accepted mutation before returning (write-through)
//!
//! ## Mutation Shape
//! Every mutation is *validate → persist candidate table → commit in memory*.
//! When any step fails the in-memory tables are left exactly as they were.

mod airlines;
mod clients;
mod flights;

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{BuiltinCatalog, Catalog};
use crate::config::Config;
use crate::error::{FieldError, Result, StoreError};
use crate::record::{normalize_query, Airline, AirlineChoice, Client, ClientChoice, Flight};
use crate::storage::{JsonlStorage, LoadReport, Persistence};
use crate::validate::{FieldResult, ValidationRules};

/// Row counts of the three tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub clients: usize,
    pub airlines: usize,
    pub flights: usize,
}

/// The in-memory record store
///
/// ## Ownership
/// A store exclusively owns its tables for its whole lifetime; nothing else
/// mutates them. Reads take `&self`, mutations take `&mut self`, so a read
/// always observes every mutation that returned before it. For several
/// threads, wrap the store in a [`SharedStore`](crate::shared::SharedStore).
pub struct RecordStore<P: Persistence = JsonlStorage> {
    /// Durable home of the tables
    persistence: P,

    /// Countries and cities for cross-field checks
    catalog: Arc<dyn Catalog>,

    /// Validator knobs
    rules: ValidationRules,

    clients: Vec<Client>,
    airlines: Vec<Airline>,
    flights: Vec<Flight>,

    /// Skipped lines and migration status of the initial load
    load_report: LoadReport,
}

impl RecordStore<JsonlStorage> {
    /// Open or create a store in the configured data directory
    ///
    /// On startup:
    /// 1. Check the configuration
    /// 2. Open the data directory (seeding it on first run)
    /// 3. Load all tables, migrating legacy records
    pub fn open(config: Config) -> Result<Self> {
        if config.validation.minute_step == 0 {
            return Err(StoreError::Config(
                "minute_step must be at least 1".to_string(),
            ));
        }

        let storage = JsonlStorage::open(&config)?;
        Self::with_persistence(storage, config.validation)
    }
}

impl<P: Persistence> RecordStore<P> {
    /// Build a store on top of any persistence backend and load its tables
    pub fn with_persistence(mut persistence: P, rules: ValidationRules) -> Result<Self> {
        let tables = persistence.load_all()?;

        tracing::info!(
            "Record store ready: clients={} airlines={} flights={}",
            tables.clients.len(),
            tables.airlines.len(),
            tables.flights.len()
        );

        Ok(Self {
            persistence,
            catalog: Arc::new(BuiltinCatalog),
            rules,
            clients: tables.clients,
            airlines: tables.airlines,
            flights: tables.flights,
            load_report: tables.report,
        })
    }

    /// Swap the reference catalog
    pub fn with_catalog(mut self, catalog: Arc<dyn Catalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Rewrite all three tables from memory
    pub fn save_all(&mut self) -> Result<TableCounts> {
        self.persistence.write_clients(&self.clients)?;
        self.persistence.write_airlines(&self.airlines)?;
        self.persistence.write_flights(&self.flights)?;
        Ok(self.counts())
    }

    // =========================================================================
    // Selection Lists
    // =========================================================================

    /// Every country, sorted
    pub fn list_countries(&self) -> Vec<String> {
        let mut countries = self.catalog.countries();
        countries.sort();
        countries
    }

    /// Every known city, sorted and deduplicated
    pub fn list_cities(&self) -> Vec<String> {
        let mut cities = self.catalog.all_cities();
        cities.sort();
        cities.dedup();
        cities
    }

    /// Cities registered for one country (empty when it has none)
    pub fn list_cities_by_country(&self, country: &str) -> Vec<String> {
        self.catalog.cities_for(country).unwrap_or_default()
    }

    /// Clients as `id - name (phone)` choices
    pub fn client_choices(&self) -> Vec<ClientChoice> {
        self.clients.iter().map(ClientChoice::from).collect()
    }

    /// Airlines as `id - name` choices
    pub fn airline_choices(&self) -> Vec<AirlineChoice> {
        self.airlines.iter().map(AirlineChoice::from).collect()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// All clients in table order
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// All airlines in table order
    pub fn airlines(&self) -> &[Airline] {
        &self.airlines
    }

    /// All flights in table order
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn counts(&self) -> TableCounts {
        TableCounts {
            clients: self.clients.len(),
            airlines: self.airlines.len(),
            flights: self.flights.len(),
        }
    }

    /// What the initial load skipped or migrated
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// The persistence backend
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn rules(&self) -> ValidationRules {
        self.rules
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Write the flight table and then a parent table, undoing the flight
    /// write when the parent write fails
    ///
    /// Called with candidate tables only; memory is committed by the caller
    /// after this returns `Ok`.
    fn write_cascade(
        &mut self,
        flights_next: &[Flight],
        write_parent: impl FnOnce(&mut P) -> Result<()>,
    ) -> Result<()> {
        self.persistence.write_flights(flights_next)?;

        if let Err(e) = write_parent(&mut self.persistence) {
            if let Err(restore) = self.persistence.write_flights(&self.flights) {
                tracing::error!("Failed to restore flights after cascade error: {}", restore);
            }
            return Err(e);
        }
        Ok(())
    }
}

// =============================================================================
// Shared Primitives
// =============================================================================

/// Position of the first row whose key equals `id`
fn position_of<T>(rows: &[T], id: u64, key: impl Fn(&T) -> u64) -> Option<usize> {
    rows.iter().position(|row| key(row) == id)
}

/// Search needle: lowercased text plus the integer form when it is all digits
struct Query {
    text: String,
    id: Option<u64>,
}

impl Query {
    fn parse(raw: &str) -> Option<Self> {
        let text = normalize_query(raw)?;
        let id = if text.bytes().all(|b| b.is_ascii_digit()) {
            text.parse().ok()
        } else {
            None
        };
        Some(Self { text, id })
    }

    fn matches_id(&self, id: u64) -> bool {
        self.id == Some(id)
    }

    fn matches_text(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.text)
    }
}

/// Run one field through its validator, recording a missing or malformed value
///
/// Optional fields that are blank are cleared and skip validation.
fn check_field(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    slot: &mut String,
    required: bool,
    validator: impl FnOnce(&str) -> FieldResult,
) {
    if slot.trim().is_empty() {
        if required {
            errors.push(FieldError::missing(field));
        } else {
            slot.clear();
        }
        return;
    }

    match validator(slot) {
        Ok(normalized) => *slot = normalized,
        Err(reason) => errors.push(FieldError::new(field, reason)),
    }
}
