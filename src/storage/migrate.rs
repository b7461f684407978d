//! Legacy Schema Migration
//!
//! Older files used `ID` as every table's key and `Client_ID`/`Airline_ID`
//! as flight foreign keys. These functions rewrite raw rows in place and
//! report whether anything changed; running them twice is a no-op.

use serde_json::Value;

use crate::record::{next_id_in_rows, parse_id, Row, Table};

const LEGACY_KEY: &str = "ID";
const LEGACY_CLIENT_FK: &str = "Client_ID";
const LEGACY_AIRLINE_FK: &str = "Airline_ID";

/// `ID` → `client_id`
pub fn migrate_clients(rows: &mut [Row]) -> bool {
    migrate_keyed(rows, Table::Clients)
}

/// `ID` → `airline_id`
pub fn migrate_airlines(rows: &mut [Row]) -> bool {
    migrate_keyed(rows, Table::Airlines)
}

/// `Client_ID`/`Airline_ID` → `client_id`/`airline_id`, then number every
/// flight lacking a usable `ID`, in file order, after the largest one present
pub fn migrate_flights(rows: &mut [Row]) -> bool {
    let mut migrated = false;

    for row in rows.iter_mut() {
        migrated |= rename_key(row, LEGACY_CLIENT_FK, "client_id");
        migrated |= rename_key(row, LEGACY_AIRLINE_FK, "airline_id");
        tag_kind(row, Table::Flights);
    }

    let key = Table::Flights.key();
    let mut next = next_id_in_rows(rows.iter(), key);
    for row in rows.iter_mut() {
        if row.get(key).and_then(parse_id).is_none() {
            row.insert(key.to_string(), Value::from(next));
            next += 1;
            migrated = true;
        }
    }

    migrated
}

fn migrate_keyed(rows: &mut [Row], table: Table) -> bool {
    let mut migrated = false;
    for row in rows.iter_mut() {
        migrated |= rename_key(row, LEGACY_KEY, table.key());
        tag_kind(row, table);
    }
    migrated
}

/// Move `from` to `to` unless `to` is already present
fn rename_key(row: &mut Row, from: &str, to: &str) -> bool {
    if row.contains_key(to) {
        return false;
    }
    match row.remove(from) {
        Some(value) => {
            row.insert(to.to_string(), value);
            true
        }
        None => false,
    }
}

/// Records written before the kind tag existed get the table's kind
fn tag_kind(row: &mut Row, table: Table) {
    row.entry("Type")
        .or_insert_with(|| Value::from(table.kind()));
}
