//! Flight records
//!
//! A flight books one client on one airline; both references are foreign
//! keys checked by the store.

use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_text, merge, scrub_extra, Row};

/// A stored flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Primary key, assigned by the store
    #[serde(rename = "ID", deserialize_with = "deserialize_id")]
    pub id: u64,

    /// Foreign key into the client table
    #[serde(deserialize_with = "deserialize_id")]
    pub client_id: u64,

    /// Foreign key into the airline table
    #[serde(deserialize_with = "deserialize_id")]
    pub airline_id: u64,

    /// `YYYY-MM-DD HH:MM`
    #[serde(rename = "Date", default, deserialize_with = "deserialize_text")]
    pub date: String,

    #[serde(rename = "StartCity", default, deserialize_with = "deserialize_text")]
    pub start_city: String,

    #[serde(rename = "EndCity", default, deserialize_with = "deserialize_text")]
    pub end_city: String,

    /// Unknown keys carried through from disk
    #[serde(flatten)]
    pub extra: Row,
}

impl Flight {
    /// Keys written for every flight besides `Type`
    pub const KEYS: &'static [&'static str] =
        &["ID", "client_id", "airline_id", "Date", "StartCity", "EndCity"];

    pub(crate) fn scrub_extra(&mut self) {
        scrub_extra(&mut self.extra, Self::KEYS);
    }
}

/// Field values for a new flight
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightDraft {
    pub client_id: u64,
    pub airline_id: u64,
    pub date: String,
    pub start_city: String,
    pub end_city: String,
}

impl FlightDraft {
    pub fn into_flight(self, id: u64) -> Flight {
        Flight {
            id,
            client_id: self.client_id,
            airline_id: self.airline_id,
            date: self.date,
            start_city: self.start_city,
            end_city: self.end_city,
            extra: Row::new(),
        }
    }
}

/// Fields to replace on an existing flight
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightPatch {
    pub client_id: Option<u64>,
    pub airline_id: Option<u64>,
    pub date: Option<String>,
    pub start_city: Option<String>,
    pub end_city: Option<String>,
}

impl FlightPatch {
    pub fn apply_to(self, flight: &mut Flight) {
        merge(&mut flight.client_id, self.client_id);
        merge(&mut flight.airline_id, self.airline_id);
        merge(&mut flight.date, self.date);
        merge(&mut flight.start_city, self.start_city);
        merge(&mut flight.end_city, self.end_city);
    }
}

/// A flight joined with its client and airline for display
///
/// Built on every search and never written back to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightView {
    #[serde(flatten)]
    pub flight: Flight,

    #[serde(rename = "ClientName")]
    pub client_name: String,

    #[serde(rename = "Phone")]
    pub phone: String,

    #[serde(rename = "Airline")]
    pub airline: String,
}
