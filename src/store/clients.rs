//! Client operations

use crate::error::{FieldError, Result, StoreError};
use crate::record::{next_id, Client, ClientDraft, ClientPatch, Table};
use crate::storage::Persistence;
use crate::validate::{
    validate_address, validate_city, validate_country, validate_name, validate_phone,
    validate_state, validate_zip,
};

use super::{check_field, position_of, Query, RecordStore};

impl<P: Persistence> RecordStore<P> {
    /// Create a client with a fresh `client_id`
    pub fn create_client(&mut self, draft: ClientDraft) -> Result<Client> {
        let id = next_id(self.clients.iter().map(|c| c.client_id));
        let mut client = draft.into_client(id);
        self.validate_client(&mut client)?;

        let mut next = self.clients.clone();
        next.push(client.clone());
        self.persistence.write_clients(&next)?;
        self.clients = next;

        tracing::info!("Create client: {} ({})", client.client_id, client.name);
        Ok(client)
    }

    /// Import a client keeping its identifier
    ///
    /// Fails with `DuplicateKey` when the identifier is taken.
    pub fn insert_client(&mut self, mut client: Client) -> Result<Client> {
        if self.get_client(client.client_id).is_some() {
            return Err(StoreError::DuplicateKey {
                table: Table::Clients,
                id: client.client_id,
            });
        }
        self.validate_client(&mut client)?;

        let mut next = self.clients.clone();
        next.push(client.clone());
        self.persistence.write_clients(&next)?;
        self.clients = next;

        tracing::info!("Insert client: {} ({})", client.client_id, client.name);
        Ok(client)
    }

    /// Merge `patch` over a client and re-validate the result
    pub fn update_client(&mut self, client_id: u64, patch: ClientPatch) -> Result<Client> {
        let idx = self.client_index(client_id)?;

        let mut merged = self.clients[idx].clone();
        patch.apply_to(&mut merged);
        self.validate_client(&mut merged)?;

        let mut next = self.clients.clone();
        next[idx] = merged.clone();
        self.persistence.write_clients(&next)?;
        self.clients = next;

        tracing::info!("Update client {}", client_id);
        Ok(merged)
    }

    /// Delete a client and every flight booked for it
    ///
    /// Returns the number of flights removed with it.
    pub fn delete_client(&mut self, client_id: u64) -> Result<usize> {
        let idx = self.client_index(client_id)?;

        let mut clients_next = self.clients.clone();
        clients_next.remove(idx);
        let flights_next: Vec<_> = self
            .flights
            .iter()
            .filter(|f| f.client_id != client_id)
            .cloned()
            .collect();
        let cascaded = self.flights.len() - flights_next.len();

        self.write_cascade(&flights_next, |p| p.write_clients(&clients_next))?;
        self.clients = clients_next;
        self.flights = flights_next;

        tracing::info!("Delete client {} (cascaded {} flights)", client_id, cascaded);
        Ok(cascaded)
    }

    pub fn get_client(&self, client_id: u64) -> Option<&Client> {
        self.clients.iter().find(|c| c.client_id == client_id)
    }

    /// Clients whose id equals the query, or whose name or phone contains it
    ///
    /// Case-insensitive; a blank query matches nothing.
    pub fn search_clients(&self, query: &str) -> Vec<&Client> {
        let Some(q) = Query::parse(query) else {
            return Vec::new();
        };

        let out: Vec<&Client> = self
            .clients
            .iter()
            .filter(|c| client_matches(&q, c))
            .collect();

        tracing::debug!("Search clients q={:?} -> {}", q.text, out.len());
        out
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn client_index(&self, client_id: u64) -> Result<usize> {
        position_of(&self.clients, client_id, |c| c.client_id).ok_or(StoreError::NotFound {
            table: Table::Clients,
            id: client_id,
        })
    }

    /// Normalize every field in place, collecting every failure
    ///
    /// Country must be in the catalog. City must belong to the country's
    /// city list; a country without a list only gets a logged warning for a
    /// city missing from the global list.
    fn validate_client(&self, client: &mut Client) -> Result<()> {
        client.scrub_extra();
        let mut errors = Vec::new();
        let allow_plus = self.rules.allow_plus_phone;

        check_field(&mut errors, "Name", &mut client.name, true, validate_name);
        check_field(&mut errors, "Address1", &mut client.address1, true, validate_address);
        check_field(&mut errors, "Address2", &mut client.address2, false, validate_address);
        check_field(&mut errors, "Address3", &mut client.address3, false, validate_address);
        check_field(&mut errors, "City", &mut client.city, true, validate_city);
        check_field(&mut errors, "State", &mut client.state, true, validate_state);
        check_field(&mut errors, "Zip", &mut client.zip, true, validate_zip);
        check_field(&mut errors, "Country", &mut client.country, true, validate_country);
        check_field(&mut errors, "Phone", &mut client.phone, true, |s| {
            validate_phone(s, allow_plus)
        });

        let country_ok = !errors.iter().any(|e| e.field == "Country");
        let city_ok = !errors.iter().any(|e| e.field == "City");

        if country_ok && !self.catalog.has_country(&client.country) {
            errors.push(FieldError::new(
                "Country",
                format!("Unknown country: {}", client.country),
            ));
        } else if country_ok && city_ok {
            match self.catalog.cities_for(&client.country) {
                Some(cities) if !cities.is_empty() => {
                    if !cities.contains(&client.city) {
                        errors.push(FieldError::new(
                            "City",
                            format!(
                                "City '{}' is not in country '{}' allowed city list",
                                client.city, client.country
                            ),
                        ));
                    }
                }
                _ => {
                    let known = self.catalog.all_cities();
                    if !known.is_empty() && !known.contains(&client.city) {
                        tracing::warn!(
                            "City '{}' not found in global city catalog; accepted as free text",
                            client.city
                        );
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation {
                table: Table::Clients,
                errors,
            })
        }
    }
}

/// Search rule shared by client and flight searches
pub(super) fn client_matches(q: &Query, client: &Client) -> bool {
    q.matches_id(client.client_id) || q.matches_text(&client.name) || q.matches_text(&client.phone)
}
