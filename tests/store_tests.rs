//! Tests for RecordStore
//!
//! These tests verify:
//! - Create/update/delete/get per table
//! - Identifier allocation and uniqueness
//! - Validation errors listing every offending field
//! - Foreign-key checks and cascading deletes
//! - Search semantics
//! - Rollback of in-memory state when persistence fails

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use rms::catalog::MapCatalog;
use rms::record::{
    AirlineDraft, AirlinePatch, Client, ClientDraft, ClientPatch, Flight, FlightDraft,
    FlightPatch, Table,
};
use rms::shared::SharedStore;
use rms::storage::{MemoryStorage, Persistence, Tables};
use rms::validate::ValidationRules;
use rms::{Config, RecordStore, StoreError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, RecordStore) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().data_dir(temp_dir.path()).build();
    let store = RecordStore::open(config).unwrap();
    (temp_dir, store)
}

fn memory_store() -> RecordStore<MemoryStorage> {
    RecordStore::with_persistence(MemoryStorage::new(), ValidationRules::default()).unwrap()
}

fn client(name: &str, phone: &str) -> ClientDraft {
    ClientDraft {
        name: name.to_string(),
        address1: "A".to_string(),
        city: "Tokyo".to_string(),
        state: "TK".to_string(),
        zip: "100".to_string(),
        country: "Japan".to_string(),
        phone: phone.to_string(),
        ..ClientDraft::default()
    }
}

fn alice() -> ClientDraft {
    client("Alice", "1234567")
}

fn flight(client_id: u64, airline_id: u64) -> FlightDraft {
    FlightDraft {
        client_id,
        airline_id,
        date: "2025-01-02 08:30".to_string(),
        start_city: "Tokyo".to_string(),
        end_city: "London".to_string(),
    }
}

fn read_lines(dir: &TempDir, table: Table) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(dir.path().join(table.file_name())).unwrap_or_default();
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

/// Memory storage whose writes can be made to fail per table
struct FlakyStorage {
    inner: MemoryStorage,
    fail_clients: Arc<AtomicBool>,
    fail_flights: Arc<AtomicBool>,
}

impl FlakyStorage {
    fn new() -> (Self, Arc<AtomicBool>, Arc<AtomicBool>) {
        let fail_clients = Arc::new(AtomicBool::new(false));
        let fail_flights = Arc::new(AtomicBool::new(false));
        let storage = Self {
            inner: MemoryStorage::new(),
            fail_clients: Arc::clone(&fail_clients),
            fail_flights: Arc::clone(&fail_flights),
        };
        (storage, fail_clients, fail_flights)
    }
}

fn disk_full() -> StoreError {
    StoreError::Io(io::Error::new(io::ErrorKind::Other, "disk full"))
}

impl Persistence for FlakyStorage {
    fn load_all(&mut self) -> rms::Result<Tables> {
        self.inner.load_all()
    }

    fn write_clients(&mut self, rows: &[Client]) -> rms::Result<()> {
        if self.fail_clients.load(Ordering::SeqCst) {
            return Err(disk_full());
        }
        self.inner.write_clients(rows)
    }

    fn write_airlines(&mut self, rows: &[rms::record::Airline]) -> rms::Result<()> {
        self.inner.write_airlines(rows)
    }

    fn write_flights(&mut self, rows: &[Flight]) -> rms::Result<()> {
        if self.fail_flights.load(Ordering::SeqCst) {
            return Err(disk_full());
        }
        self.inner.write_flights(rows)
    }
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_create_then_cascade_delete_scenario() {
    let (temp, mut store) = setup_temp_store();

    let c = store.create_client(alice()).unwrap();
    assert_eq!(c.client_id, 1);

    let a = store.create_airline(AirlineDraft::new("Cathay")).unwrap();
    assert_eq!(a.airline_id, 1);

    let f = store
        .create_flight(FlightDraft {
            client_id: 1,
            airline_id: 1,
            date: "2024-12-31 23:59".to_string(),
            start_city: "Tokyo".to_string(),
            end_city: "London".to_string(),
        })
        .unwrap();
    assert_eq!(f.id, 1);

    let cascaded = store.delete_client(1).unwrap();
    assert_eq!(cascaded, 1);
    assert!(store.clients().is_empty());
    assert!(store.flights().is_empty());

    assert!(read_lines(&temp, Table::Clients).is_empty());
    assert!(read_lines(&temp, Table::Flights).is_empty());
    assert_eq!(read_lines(&temp, Table::Airlines).len(), 1);
}

// =============================================================================
// Client Tests
// =============================================================================

#[test]
fn test_create_client_persists_immediately() {
    let (temp, mut store) = setup_temp_store();

    store.create_client(alice()).unwrap();

    let lines = read_lines(&temp, Table::Clients);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["client_id"], 1);
    assert_eq!(lines[0]["Type"], "client");
    assert_eq!(lines[0]["Name"], "Alice");
}

#[test]
fn test_create_client_normalizes_fields() {
    let mut store = memory_store();

    let mut draft = client("  Alice   Smith ", "090-1234-5678");
    draft.zip = "abc-12".to_string();
    let c = store.create_client(draft).unwrap();

    assert_eq!(c.name, "Alice Smith");
    assert_eq!(c.phone, "09012345678");
    assert_eq!(c.zip, "ABC-12");
}

#[test]
fn test_client_ids_increase() {
    let mut store = memory_store();

    let ids: Vec<u64> = (0..3)
        .map(|_| store.create_client(alice()).unwrap().client_id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    store.delete_client(2).unwrap();
    let next = store.create_client(alice()).unwrap();
    assert_eq!(next.client_id, 4);
}

#[test]
fn test_deleted_client_is_not_found() {
    let mut store = memory_store();

    let c = store.create_client(alice()).unwrap();
    store.delete_client(c.client_id).unwrap();

    assert!(store.get_client(c.client_id).is_none());
}

#[test]
fn test_create_client_reports_every_missing_field() {
    let mut store = memory_store();

    let err = store
        .create_client(ClientDraft {
            name: "Alice".to_string(),
            ..ClientDraft::default()
        })
        .unwrap_err();

    let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field).collect();
    assert_eq!(
        fields,
        vec!["Address1", "City", "State", "Zip", "Country", "Phone"]
    );
    assert!(matches!(
        err,
        StoreError::Validation {
            table: Table::Clients,
            ..
        }
    ));
    assert!(store.clients().is_empty());
}

#[test]
fn test_create_client_reports_every_invalid_field() {
    let mut store = memory_store();

    let mut draft = client("Al1ce", "12ab");
    draft.zip = "!".to_string();
    let err = store.create_client(draft).unwrap_err();

    let errors = err.field_errors();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0].field, "Name");
    assert_eq!(errors[0].reason, "Name contains invalid characters");
    assert_eq!(errors[1].field, "Zip");
    assert_eq!(errors[2].field, "Phone");
    assert_eq!(errors[2].reason, "Phone must contain digits only");
}

#[test]
fn test_create_client_rejects_unknown_country() {
    let mut store = memory_store();

    let mut draft = alice();
    draft.country = "Atlantis".to_string();
    let err = store.create_client(draft).unwrap_err();

    assert_eq!(err.field_errors().len(), 1);
    assert_eq!(err.field_errors()[0].field, "Country");
    assert_eq!(err.field_errors()[0].reason, "Unknown country: Atlantis");
}

#[test]
fn test_create_client_rejects_city_outside_country() {
    let mut store = memory_store();

    let mut draft = alice();
    draft.city = "Paris".to_string();
    let err = store.create_client(draft).unwrap_err();

    assert_eq!(err.field_errors()[0].field, "City");
    assert!(err.to_string().contains("not in country 'Japan'"));
}

#[test]
fn test_country_without_city_list_accepts_any_city() {
    let catalog = MapCatalog::new()
        .with_cities("Japan", ["Tokyo"])
        .with_country("Atlantis");
    let mut store = memory_store().with_catalog(Arc::new(catalog));

    let mut draft = alice();
    draft.country = "Atlantis".to_string();
    draft.city = "Poseidonia".to_string();

    let c = store.create_client(draft).unwrap();
    assert_eq!(c.city, "Poseidonia");
}

#[test]
fn test_update_client_merges_patch() {
    let mut store = memory_store();
    store.create_client(alice()).unwrap();

    let updated = store
        .update_client(
            1,
            ClientPatch {
                name: Some("Alice X".to_string()),
                phone: Some("7654321".to_string()),
                ..ClientPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.client_id, 1);
    assert_eq!(updated.name, "Alice X");
    assert_eq!(updated.phone, "7654321");
    assert_eq!(updated.city, "Tokyo");
    assert_eq!(store.get_client(1).unwrap(), &updated);
}

#[test]
fn test_update_client_rejects_removing_required_field() {
    let mut store = memory_store();
    store.create_client(alice()).unwrap();

    let err = store
        .update_client(
            1,
            ClientPatch {
                phone: Some("   ".to_string()),
                ..ClientPatch::default()
            },
        )
        .unwrap_err();

    assert_eq!(err.field_errors()[0].field, "Phone");
    assert_eq!(store.get_client(1).unwrap().phone, "1234567");
}

#[test]
fn test_update_and_delete_missing_client() {
    let mut store = memory_store();

    let err = store.update_client(99, ClientPatch::default()).unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound {
            table: Table::Clients,
            id: 99
        }
    ));

    let err = store.delete_client(99).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 99, .. }));
}

#[test]
fn test_insert_client_rejects_duplicate_id() {
    let mut store = memory_store();
    store.create_client(alice()).unwrap();

    let err = store.insert_client(alice().into_client(1)).unwrap_err();
    assert!(matches!(
        err,
        StoreError::DuplicateKey {
            table: Table::Clients,
            id: 1
        }
    ));
    assert_eq!(store.clients().len(), 1);
}

#[test]
fn test_insert_client_drops_shadowing_extra_keys() {
    let (temp, mut store) = setup_temp_store();

    let mut imported = alice().into_client(5);
    imported.extra.insert("Type".to_string(), "airline".into());
    imported.extra.insert("Name".to_string(), "Mallory".into());
    imported.extra.insert("client_id".to_string(), 99.into());
    imported.extra.insert("Loyalty".to_string(), "gold".into());

    let stored = store.insert_client(imported).unwrap();
    assert_eq!(stored.extra.len(), 1);

    let content = std::fs::read_to_string(temp.path().join("clients.jsonl")).unwrap();
    assert_eq!(content.matches("\"Name\"").count(), 1);
    assert_eq!(content.matches("\"Type\"").count(), 1);

    let lines = read_lines(&temp, Table::Clients);
    assert_eq!(lines[0]["Type"], "client");
    assert_eq!(lines[0]["Name"], "Alice");
    assert_eq!(lines[0]["client_id"], 5);
    assert_eq!(lines[0]["Loyalty"], "gold");
}

#[test]
fn test_insert_client_keeps_id_and_moves_allocation() {
    let mut store = memory_store();

    let imported = store.insert_client(alice().into_client(10)).unwrap();
    assert_eq!(imported.client_id, 10);

    let next = store.create_client(alice()).unwrap();
    assert_eq!(next.client_id, 11);
}

// =============================================================================
// Search Tests
// =============================================================================

#[test]
fn test_search_clients_empty_query() {
    let mut store = memory_store();
    store.create_client(alice()).unwrap();

    assert!(store.search_clients("").is_empty());
    assert!(store.search_clients("   ").is_empty());
}

#[test]
fn test_search_clients_by_name_case_insensitive() {
    let mut store = memory_store();
    store.create_client(client("Alice", "1111111")).unwrap();
    store.create_client(client("Natalie", "2222222")).unwrap();
    store.create_client(client("Bob", "3333333")).unwrap();

    let names: Vec<&str> = store
        .search_clients("ALI")
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Alice", "Natalie"]);
}

#[test]
fn test_search_clients_by_phone() {
    let mut store = memory_store();
    store.create_client(client("Alice", "1111111")).unwrap();
    store.create_client(client("Bob", "2222222")).unwrap();

    let found = store.search_clients("2222");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Bob");
}

#[test]
fn test_search_clients_by_id() {
    let mut store = memory_store();
    for name in ["Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf"] {
        store.create_client(client(name, "1234560")).unwrap();
    }

    let found = store.search_clients("7");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].client_id, 7);
    assert_eq!(found[0].name, "Golf");
}

#[test]
fn test_search_clients_signed_query_is_not_an_id() {
    let mut store = memory_store();
    store.create_client(client("Alice", "2345678")).unwrap();

    assert!(store.search_clients("+1").is_empty());
    assert!(store.search_airlines("+1").is_empty());
    assert_eq!(store.search_clients("1").len(), 1);
}

#[test]
fn test_search_clients_matches_once() {
    let mut store = memory_store();
    store.create_client(client("Alice", "1234567")).unwrap();

    // id 1 and phone containing "1" both match
    assert_eq!(store.search_clients("1").len(), 1);
}

#[test]
fn test_search_airlines() {
    let mut store = memory_store();
    store.create_airline(AirlineDraft::new("Cathay Pacific")).unwrap();
    store.create_airline(AirlineDraft::new("Delta")).unwrap();

    assert_eq!(store.search_airlines("pacific").len(), 1);
    assert_eq!(store.search_airlines("2")[0].company_name, "Delta");
    assert!(store.search_airlines("").is_empty());
}

// =============================================================================
// Airline Tests
// =============================================================================

#[test]
fn test_airline_crud() {
    let (temp, mut store) = setup_temp_store();

    let a = store.create_airline(AirlineDraft::new("UA")).unwrap();
    assert_eq!(a.airline_id, 1);

    let updated = store
        .update_airline(
            1,
            AirlinePatch {
                company_name: Some("United".to_string()),
            },
        )
        .unwrap();
    assert_eq!(updated.company_name, "United");
    assert_eq!(read_lines(&temp, Table::Airlines)[0]["CompanyName"], "United");

    store.delete_airline(1).unwrap();
    assert!(store.get_airline(1).is_none());
    assert!(read_lines(&temp, Table::Airlines).is_empty());
}

#[test]
fn test_create_airline_requires_company_name() {
    let mut store = memory_store();

    let err = store.create_airline(AirlineDraft::new(" ")).unwrap_err();
    assert_eq!(err.field_errors()[0].field, "CompanyName");
    assert_eq!(err.field_errors()[0].reason, "is required");
}

#[test]
fn test_delete_airline_cascades_only_its_flights() {
    let mut store = memory_store();
    store.create_client(alice()).unwrap();
    store.create_airline(AirlineDraft::new("UA")).unwrap();
    store.create_airline(AirlineDraft::new("DL")).unwrap();
    store.create_flight(flight(1, 1)).unwrap();
    store.create_flight(flight(1, 2)).unwrap();
    store.create_flight(flight(1, 1)).unwrap();

    let cascaded = store.delete_airline(1).unwrap();

    assert_eq!(cascaded, 2);
    let remaining: Vec<u64> = store.flights().iter().map(|f| f.id).collect();
    assert_eq!(remaining, vec![2]);
}

// =============================================================================
// Flight Tests
// =============================================================================

#[test]
fn test_flight_crud() {
    let (temp, mut store) = setup_temp_store();
    store.create_client(alice()).unwrap();
    store.create_airline(AirlineDraft::new("DL")).unwrap();

    let f = store.create_flight(flight(1, 1)).unwrap();
    assert_eq!(f.id, 1);

    let updated = store
        .update_flight(
            1,
            FlightPatch {
                end_city: Some("Paris".to_string()),
                ..FlightPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.end_city, "Paris");
    assert_eq!(updated.start_city, "Tokyo");
    assert_eq!(read_lines(&temp, Table::Flights)[0]["EndCity"], "Paris");

    store.delete_flight(1).unwrap();
    assert!(read_lines(&temp, Table::Flights).is_empty());
}

#[test]
fn test_create_flight_with_missing_airline() {
    let mut store = memory_store();
    store.create_client(alice()).unwrap();

    let err = store.create_flight(flight(1, 99)).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Referential {
            table: Table::Airlines,
            id: 99
        }
    ));
    assert!(store.flights().is_empty());
    assert!(store.persistence().tables().flights.is_empty());
}

#[test]
fn test_create_flight_with_missing_client() {
    let mut store = memory_store();
    store.create_airline(AirlineDraft::new("LH")).unwrap();

    let err = store.create_flight(flight(999, 1)).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Referential {
            table: Table::Clients,
            id: 999
        }
    ));
}

#[test]
fn test_update_flight_to_missing_client() {
    let mut store = memory_store();
    store.create_client(alice()).unwrap();
    store.create_airline(AirlineDraft::new("LH")).unwrap();
    store.create_flight(flight(1, 1)).unwrap();

    let err = store
        .update_flight(
            1,
            FlightPatch {
                client_id: Some(5),
                ..FlightPatch::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, StoreError::Referential { id: 5, .. }));
    assert_eq!(store.get_flight(1).unwrap().client_id, 1);
}

#[test]
fn test_create_flight_rejects_bad_date() {
    let mut store = memory_store();
    store.create_client(alice()).unwrap();
    store.create_airline(AirlineDraft::new("LH")).unwrap();

    let mut draft = flight(1, 1);
    draft.date = "31/12/2024".to_string();
    let err = store.create_flight(draft).unwrap_err();

    assert_eq!(err.field_errors()[0].field, "Date");
    assert_eq!(err.field_errors()[0].reason, "Date must be 'YYYY-MM-DD HH:MM'");
}

#[test]
fn test_minute_step_rule() {
    let rules = ValidationRules {
        minute_step: 5,
        ..ValidationRules::default()
    };
    let mut store = RecordStore::with_persistence(MemoryStorage::new(), rules).unwrap();
    store.create_client(alice()).unwrap();
    store.create_airline(AirlineDraft::new("LH")).unwrap();

    let mut draft = flight(1, 1);
    draft.date = "2024-12-31 23:59".to_string();
    assert!(store.create_flight(draft).is_err());

    let mut draft = flight(1, 1);
    draft.date = "2024-12-31 23:55".to_string();
    assert!(store.create_flight(draft).is_ok());
}

#[test]
fn test_search_flights_joins_client_and_airline() {
    let mut store = memory_store();
    store.create_client(client("Alice", "1111111")).unwrap();
    store.create_client(client("Bob", "2222222")).unwrap();
    store.create_airline(AirlineDraft::new("UA")).unwrap();
    store.create_airline(AirlineDraft::new("DL")).unwrap();
    store.create_flight(flight(1, 1)).unwrap();
    store.create_flight(flight(1, 2)).unwrap();
    store.create_flight(flight(2, 2)).unwrap();

    let found = store.search_flights("alice");
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|v| v.client_name == "Alice"));
    assert_eq!(found[0].airline, "UA");
    assert_eq!(found[1].airline, "DL");

    let found = store.search_flights("2222");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].client_name, "Bob");
    assert_eq!(found[0].phone, "2222222");

    assert!(store.search_flights("").is_empty());
}

#[test]
fn test_search_flights_does_not_persist_join() {
    let (temp, mut store) = setup_temp_store();
    store.create_client(alice()).unwrap();
    store.create_airline(AirlineDraft::new("UA")).unwrap();
    store.create_flight(flight(1, 1)).unwrap();

    assert_eq!(store.search_flights("alice").len(), 1);
    store.save_all().unwrap();

    let lines = read_lines(&temp, Table::Flights);
    assert!(lines[0].get("ClientName").is_none());
    assert!(lines[0].get("Airline").is_none());
}

#[test]
fn test_search_flights_by_fk() {
    let mut store = memory_store();
    store.create_client(client("Alice", "1111111")).unwrap();
    store.create_client(client("Bob", "2222222")).unwrap();
    store.create_airline(AirlineDraft::new("UA")).unwrap();
    store.create_airline(AirlineDraft::new("DL")).unwrap();
    store.create_flight(flight(1, 1)).unwrap();
    store.create_flight(flight(1, 2)).unwrap();
    store.create_flight(flight(2, 2)).unwrap();

    let found = store.search_flights_by_fk(Some(1), Some(2));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].airline, "DL");

    assert_eq!(store.search_flights_by_fk(None, Some(2)).len(), 2);
    assert_eq!(store.search_flights_by_fk(Some(1), None).len(), 2);
    assert!(store.search_flights_by_fk(None, None).is_empty());
}

// =============================================================================
// Rollback Tests
// =============================================================================

#[test]
fn test_failed_write_leaves_table_unchanged() {
    let (storage, fail_clients, _) = FlakyStorage::new();
    let mut store = RecordStore::with_persistence(storage, ValidationRules::default()).unwrap();

    fail_clients.store(true, Ordering::SeqCst);
    let err = store.create_client(alice()).unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
    assert!(store.clients().is_empty());

    fail_clients.store(false, Ordering::SeqCst);
    assert_eq!(store.create_client(alice()).unwrap().client_id, 1);
}

#[test]
fn test_failed_cascade_restores_flights() {
    let (storage, fail_clients, _) = FlakyStorage::new();
    let mut store = RecordStore::with_persistence(storage, ValidationRules::default()).unwrap();
    store.create_client(alice()).unwrap();
    store.create_airline(AirlineDraft::new("UA")).unwrap();
    store.create_flight(flight(1, 1)).unwrap();

    fail_clients.store(true, Ordering::SeqCst);
    assert!(store.delete_client(1).is_err());

    assert_eq!(store.clients().len(), 1);
    assert_eq!(store.flights().len(), 1);
    let persisted = store.persistence().inner.tables();
    assert_eq!(persisted.clients.len(), 1);
    assert_eq!(persisted.flights.len(), 1);
}

#[test]
fn test_failed_flight_write_keeps_parent() {
    let (storage, _, fail_flights) = FlakyStorage::new();
    let mut store = RecordStore::with_persistence(storage, ValidationRules::default()).unwrap();
    store.create_client(alice()).unwrap();

    fail_flights.store(true, Ordering::SeqCst);
    assert!(store.delete_client(1).is_err());
    assert_eq!(store.clients().len(), 1);
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_reopen_sees_persisted_records() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder().data_dir(temp.path()).build();

    {
        let mut store = RecordStore::open(config.clone()).unwrap();
        store.create_client(alice()).unwrap();
        store.create_airline(AirlineDraft::new("UA")).unwrap();
        store.create_flight(flight(1, 1)).unwrap();
    }

    let store = RecordStore::open(config).unwrap();
    assert_eq!(store.counts().clients, 1);
    assert_eq!(store.get_client(1).unwrap().name, "Alice");
    assert_eq!(store.get_flight(1).unwrap().airline_id, 1);
    assert!(!store.load_report().migrated);
}

#[test]
fn test_open_rejects_zero_minute_step() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp.path())
        .minute_step(0)
        .build();

    assert!(matches!(RecordStore::open(config), Err(StoreError::Config(_))));
}

#[test]
fn test_save_all_returns_counts() {
    let (_temp, mut store) = setup_temp_store();
    store.create_client(alice()).unwrap();
    store.create_airline(AirlineDraft::new("UA")).unwrap();

    let counts = store.save_all().unwrap();
    assert_eq!(counts.clients, 1);
    assert_eq!(counts.airlines, 1);
    assert_eq!(counts.flights, 0);
}

#[test]
fn test_every_mutation_writes_through() {
    let mut store = memory_store();

    store.create_client(alice()).unwrap();
    assert_eq!(store.persistence().write_count(), 1);
    assert_eq!(store.persistence().tables().clients.len(), 1);

    store.delete_client(1).unwrap();
    assert_eq!(store.persistence().write_count(), 3);
    assert!(store.persistence().tables().clients.is_empty());
}

// =============================================================================
// Selection List Tests
// =============================================================================

#[test]
fn test_selection_lists() {
    let mut store = memory_store();
    store.create_client(alice()).unwrap();
    store.create_airline(AirlineDraft::new("Cathay")).unwrap();

    let countries = store.list_countries();
    assert!(countries.contains(&"Japan".to_string()));
    assert!(countries.windows(2).all(|w| w[0] <= w[1]));

    let cities = store.list_cities();
    assert!(cities.contains(&"Tokyo".to_string()));
    assert!(cities.windows(2).all(|w| w[0] < w[1]));

    assert!(store.list_cities_by_country("Japan").contains(&"Osaka".to_string()));
    assert!(store.list_cities_by_country("Atlantis").is_empty());

    assert_eq!(store.client_choices()[0].to_string(), "1 - Alice (1234567)");
    assert_eq!(store.airline_choices()[0].to_string(), "1 - Cathay");
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_shared_store_serializes_writers() {
    let shared = SharedStore::new(memory_store());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..5 {
                    shared
                        .write(|s| s.create_airline(AirlineDraft::new("UA")))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mut ids: Vec<u64> = shared.read(|s| s.airlines().iter().map(|a| a.airline_id).collect());
    ids.sort();
    assert_eq!(ids, (1..=20).collect::<Vec<_>>());
}
