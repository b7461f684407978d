//! Record Module
//!
//! Typed records for the three tables and their JSON line representation.
//!
//! ## On-Disk Shape
//! Every line is one self-describing object tagged with `Type`:
//! ```text
//! {"Type":"client","client_id":1,"Name":"Alice","Address1":"A",...}
//! {"Type":"airline","airline_id":1,"CompanyName":"Cathay"}
//! {"Type":"flight","ID":1,"client_id":1,"airline_id":1,"Date":"2024-12-31 23:59",...}
//! ```
//! Keys the store does not know about are kept in each record's `extra` map
//! and written back untouched.

mod airline;
mod client;
mod flight;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use airline::{Airline, AirlineChoice, AirlineDraft, AirlinePatch};
pub use client::{Client, ClientChoice, ClientDraft, ClientPatch};
pub use flight::{Flight, FlightDraft, FlightPatch, FlightView};

/// Free-form key/value object as stored on one line
pub type Row = serde_json::Map<String, Value>;

/// The three record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Clients,
    Airlines,
    Flights,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Clients, Table::Airlines, Table::Flights];

    /// File name inside the data directory
    pub fn file_name(self) -> &'static str {
        match self {
            Table::Clients => "clients.jsonl",
            Table::Airlines => "airlines.jsonl",
            Table::Flights => "flights.jsonl",
        }
    }

    /// Primary key field
    pub fn key(self) -> &'static str {
        match self {
            Table::Clients => "client_id",
            Table::Airlines => "airline_id",
            Table::Flights => "ID",
        }
    }

    /// Value of the `Type` tag for records of this table
    pub fn kind(self) -> &'static str {
        match self {
            Table::Clients => "client",
            Table::Airlines => "airline",
            Table::Flights => "flight",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Table::Clients => "client",
            Table::Airlines => "airline",
            Table::Flights => "flight",
        })
    }
}

/// Owned record of any kind, as read from a line
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "Type", rename_all = "lowercase")]
pub enum Record {
    Client(Client),
    Airline(Airline),
    Flight(Flight),
}

impl Record {
    pub fn table(&self) -> Table {
        match self {
            Record::Client(_) => Table::Clients,
            Record::Airline(_) => Table::Airlines,
            Record::Flight(_) => Table::Flights,
        }
    }

    /// Convert a raw row into a typed record; the row must carry its `Type`
    pub fn from_row(row: Row) -> serde_json::Result<Self> {
        serde_json::from_value(Value::Object(row))
    }
}

/// Borrowed record used when writing, so tables serialize without cloning
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "Type", rename_all = "lowercase")]
pub enum RecordRef<'a> {
    Client(&'a Client),
    Airline(&'a Airline),
    Flight(&'a Flight),
}

impl RecordRef<'_> {
    /// One compact JSON line (no trailing newline)
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Read an identifier stored either as a JSON integer or a numeric string
pub fn parse_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Next free identifier: one past the largest, or 1 for an empty table
pub fn next_id<I>(ids: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    ids.into_iter().max().map_or(1, |max| max + 1)
}

/// [`next_id`] over raw rows; rows whose key is missing or non-numeric are ignored
pub fn next_id_in_rows<'a, I>(rows: I, key: &str) -> u64
where
    I: IntoIterator<Item = &'a Row>,
{
    next_id(rows.into_iter().filter_map(|row| row.get(key).and_then(parse_id)))
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_id(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("identifier must be a non-negative integer, got {value}"))
    })
}

/// Read a text field written as a string, number or bool; `null` is empty
///
/// Older files hold values such as `"Zip": 10001`. They load as their
/// string form instead of failing the whole record.
pub(crate) fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Drop entries of `extra` that collide with a record's own keys
pub(crate) fn scrub_extra(extra: &mut Row, known: &[&str]) {
    extra.retain(|key, _| key != "Type" && !known.contains(&key.as_str()));
}

/// Case-insensitive search needle; `None` for a blank query
pub(crate) fn normalize_query(query: &str) -> Option<String> {
    let q = query.trim().to_lowercase();
    (!q.is_empty()).then_some(q)
}

/// Overwrite `slot` when the patch carries a value
pub(crate) fn merge<T>(slot: &mut T, patch: Option<T>) {
    if let Some(value) = patch {
        *slot = value;
    }
}
