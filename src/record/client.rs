//! Client records
//!
//! A client is a customer with a postal address and a phone number.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_text, merge, scrub_extra, Row};

/// A stored client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Client {
    /// Primary key, assigned by the store
    #[serde(rename = "client_id", deserialize_with = "deserialize_id")]
    pub client_id: u64,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub address1: String,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub address2: String,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub address3: String,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub city: String,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub state: String,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub zip: String,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub country: String,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub phone: String,

    /// Unknown keys carried through from disk
    #[serde(flatten)]
    pub extra: Row,
}

impl Client {
    /// Keys written for every client besides `Type`
    pub const KEYS: &'static [&'static str] = &[
        "client_id", "Name", "Address1", "Address2", "Address3", "City", "State", "Zip",
        "Country", "Phone",
    ];

    /// Remove unknown-key entries that would shadow a field on write
    pub(crate) fn scrub_extra(&mut self) {
        scrub_extra(&mut self.extra, Self::KEYS);
    }
}

/// Field values for a new client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDraft {
    pub name: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
}

impl ClientDraft {
    /// Attach an identifier, producing the record to validate and store
    pub fn into_client(self, client_id: u64) -> Client {
        Client {
            client_id,
            name: self.name,
            address1: self.address1,
            address2: self.address2,
            address3: self.address3,
            city: self.city,
            state: self.state,
            zip: self.zip,
            country: self.country,
            phone: self.phone,
            extra: Row::new(),
        }
    }
}

/// Fields to replace on an existing client; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

impl ClientPatch {
    /// Merge over `client`; the identifier and unknown keys are retained
    pub fn apply_to(self, client: &mut Client) {
        merge(&mut client.name, self.name);
        merge(&mut client.address1, self.address1);
        merge(&mut client.address2, self.address2);
        merge(&mut client.address3, self.address3);
        merge(&mut client.city, self.city);
        merge(&mut client.state, self.state);
        merge(&mut client.zip, self.zip);
        merge(&mut client.country, self.country);
        merge(&mut client.phone, self.phone);
    }
}

/// Client summary for selection lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientChoice {
    pub client_id: u64,
    pub name: String,
    pub phone: String,
}

impl From<&Client> for ClientChoice {
    fn from(client: &Client) -> Self {
        Self {
            client_id: client.client_id,
            name: client.name.clone(),
            phone: client.phone.clone(),
        }
    }
}

impl fmt::Display for ClientChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.client_id, self.name, self.phone)
    }
}
