//! # rms
//!
//! An embedded record store for clients, airlines and flights with:
//! - Write-through persistence to one JSON-lines file per table
//! - Atomic whole-file replacement on every write
//! - Transparent migration of legacy field names on load
//! - Foreign-key checks and cascading deletes
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Caller (CLI / UI layer)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  create / update / delete / get / search
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     RecordStore                              │
//! │       (validate → persist candidate → commit in memory)      │
//! └──────┬──────────────────────┬───────────────────────┬───────┘
//!        │                      │                       │
//!        ▼                      ▼                       ▼
//!  ┌────────────┐        ┌────────────┐         ┌─────────────┐
//!  │ Validators │        │  Catalog   │         │ Persistence │
//!  │  (fields)  │        │ (countries)│         │   (JSONL)   │
//!  └────────────┘        └────────────┘         └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use rms::record::{AirlineDraft, ClientDraft, FlightDraft};
//! use rms::storage::MemoryStorage;
//! use rms::validate::ValidationRules;
//! use rms::RecordStore;
//!
//! let mut store = RecordStore::with_persistence(MemoryStorage::new(), ValidationRules::default())?;
//! let client = store.create_client(ClientDraft {
//!     name: "Alice".into(),
//!     address1: "A".into(),
//!     city: "Tokyo".into(),
//!     state: "TK".into(),
//!     zip: "100".into(),
//!     country: "Japan".into(),
//!     phone: "1234567".into(),
//!     ..ClientDraft::default()
//! })?;
//! let airline = store.create_airline(AirlineDraft::new("Cathay"))?;
//! let flight = store.create_flight(FlightDraft {
//!     client_id: client.client_id,
//!     airline_id: airline.airline_id,
//!     date: "2024-12-31 23:59".into(),
//!     start_city: "Tokyo".into(),
//!     end_city: "London".into(),
//! })?;
//! assert_eq!(flight.id, 1);
//!
//! store.delete_client(client.client_id)?;
//! assert!(store.flights().is_empty());
//! # Ok::<(), rms::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod catalog;
pub mod record;
pub mod shared;
pub mod storage;
pub mod store;
pub mod validate;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::Config;
pub use store::RecordStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rms
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
