//! Airline records

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_text, merge, scrub_extra, Row};

/// A stored airline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    /// Primary key, assigned by the store
    #[serde(deserialize_with = "deserialize_id")]
    pub airline_id: u64,

    #[serde(rename = "CompanyName", default, deserialize_with = "deserialize_text")]
    pub company_name: String,

    /// Unknown keys carried through from disk
    #[serde(flatten)]
    pub extra: Row,
}

impl Airline {
    /// Keys written for every airline besides `Type`
    pub const KEYS: &'static [&'static str] = &["airline_id", "CompanyName"];

    pub(crate) fn scrub_extra(&mut self) {
        scrub_extra(&mut self.extra, Self::KEYS);
    }
}

/// Field values for a new airline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AirlineDraft {
    pub company_name: String,
}

impl AirlineDraft {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
        }
    }

    pub fn into_airline(self, airline_id: u64) -> Airline {
        Airline {
            airline_id,
            company_name: self.company_name,
            extra: Row::new(),
        }
    }
}

/// Fields to replace on an existing airline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AirlinePatch {
    pub company_name: Option<String>,
}

impl AirlinePatch {
    pub fn apply_to(self, airline: &mut Airline) {
        merge(&mut airline.company_name, self.company_name);
    }
}

/// Airline summary for selection lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirlineChoice {
    pub airline_id: u64,
    pub company_name: String,
}

impl From<&Airline> for AirlineChoice {
    fn from(airline: &Airline) -> Self {
        Self {
            airline_id: airline.airline_id,
            company_name: airline.company_name.clone(),
        }
    }
}

impl fmt::Display for AirlineChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.airline_id, self.company_name)
    }
}
