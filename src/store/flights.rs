//! Flight operations
//!
//! Flights reference a client and an airline; both must exist whenever a
//! flight is created or updated.

use std::collections::HashSet;

use crate::error::{Result, StoreError};
use crate::record::{next_id, Flight, FlightDraft, FlightPatch, FlightView, Table};
use crate::storage::Persistence;
use crate::validate::{validate_city, validate_datetime};

use super::clients::client_matches;
use super::{check_field, position_of, Query, RecordStore};

impl<P: Persistence> RecordStore<P> {
    /// Create a flight with a fresh `ID`
    ///
    /// Fails with `Referential` when the client or airline doesn't exist.
    pub fn create_flight(&mut self, draft: FlightDraft) -> Result<Flight> {
        let id = next_id(self.flights.iter().map(|f| f.id));
        let mut flight = draft.into_flight(id);
        self.validate_flight(&mut flight)?;

        let mut next = self.flights.clone();
        next.push(flight.clone());
        self.persistence.write_flights(&next)?;
        self.flights = next;

        tracing::info!(
            "Create flight: {} (client {}, airline {})",
            flight.id,
            flight.client_id,
            flight.airline_id
        );
        Ok(flight)
    }

    /// Import a flight keeping its identifier
    pub fn insert_flight(&mut self, mut flight: Flight) -> Result<Flight> {
        if self.get_flight(flight.id).is_some() {
            return Err(StoreError::DuplicateKey {
                table: Table::Flights,
                id: flight.id,
            });
        }
        self.validate_flight(&mut flight)?;

        let mut next = self.flights.clone();
        next.push(flight.clone());
        self.persistence.write_flights(&next)?;
        self.flights = next;

        tracing::info!("Insert flight: {}", flight.id);
        Ok(flight)
    }

    pub fn update_flight(&mut self, flight_id: u64, patch: FlightPatch) -> Result<Flight> {
        let idx = self.flight_index(flight_id)?;

        let mut merged = self.flights[idx].clone();
        patch.apply_to(&mut merged);
        self.validate_flight(&mut merged)?;

        let mut next = self.flights.clone();
        next[idx] = merged.clone();
        self.persistence.write_flights(&next)?;
        self.flights = next;

        tracing::info!("Update flight {}", flight_id);
        Ok(merged)
    }

    pub fn delete_flight(&mut self, flight_id: u64) -> Result<()> {
        let idx = self.flight_index(flight_id)?;

        let mut next = self.flights.clone();
        next.remove(idx);
        self.persistence.write_flights(&next)?;
        self.flights = next;

        tracing::info!("Delete flight {}", flight_id);
        Ok(())
    }

    pub fn get_flight(&self, flight_id: u64) -> Option<&Flight> {
        self.flights.iter().find(|f| f.id == flight_id)
    }

    /// Flights of every client matching `query` (same rule as
    /// [`search_clients`](Self::search_clients)), joined for display
    pub fn search_flights(&self, query: &str) -> Vec<FlightView> {
        let Some(q) = Query::parse(query) else {
            return Vec::new();
        };

        let ids: HashSet<u64> = self
            .clients
            .iter()
            .filter(|c| client_matches(&q, c))
            .map(|c| c.client_id)
            .collect();

        let out: Vec<FlightView> = self
            .flights
            .iter()
            .filter(|f| ids.contains(&f.client_id))
            .map(|f| self.view(f))
            .collect();

        tracing::debug!("Search flights q={:?} -> {}", q.text, out.len());
        out
    }

    /// Flights booked for a client, on an airline, or both
    ///
    /// With neither key given nothing matches.
    pub fn search_flights_by_fk(
        &self,
        client_id: Option<u64>,
        airline_id: Option<u64>,
    ) -> Vec<FlightView> {
        if client_id.is_none() && airline_id.is_none() {
            return Vec::new();
        }

        self.flights
            .iter()
            .filter(|f| client_id.map_or(true, |id| f.client_id == id))
            .filter(|f| airline_id.map_or(true, |id| f.airline_id == id))
            .map(|f| self.view(f))
            .collect()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn flight_index(&self, flight_id: u64) -> Result<usize> {
        position_of(&self.flights, flight_id, |f| f.id).ok_or(StoreError::NotFound {
            table: Table::Flights,
            id: flight_id,
        })
    }

    /// Join a flight with its client and airline
    fn view(&self, flight: &Flight) -> FlightView {
        let client = self.get_client(flight.client_id);
        let airline = self.get_airline(flight.airline_id);

        FlightView {
            flight: flight.clone(),
            client_name: client.map(|c| c.name.clone()).unwrap_or_default(),
            phone: client.map(|c| c.phone.clone()).unwrap_or_default(),
            airline: airline.map(|a| a.company_name.clone()).unwrap_or_default(),
        }
    }

    /// Check fields first, then resolve both foreign keys
    fn validate_flight(&self, flight: &mut Flight) -> Result<()> {
        flight.scrub_extra();
        let mut errors = Vec::new();
        let step = self.rules.minute_step;

        check_field(&mut errors, "Date", &mut flight.date, true, |s| {
            validate_datetime(s, step)
        });
        check_field(&mut errors, "StartCity", &mut flight.start_city, true, validate_city);
        check_field(&mut errors, "EndCity", &mut flight.end_city, true, validate_city);

        if !errors.is_empty() {
            return Err(StoreError::Validation {
                table: Table::Flights,
                errors,
            });
        }

        let known = self.catalog.all_cities();
        if !known.is_empty() {
            for (field, city) in [("StartCity", &flight.start_city), ("EndCity", &flight.end_city)] {
                if !known.contains(city) {
                    tracing::warn!("{} '{}' not in city catalog; accepted", field, city);
                }
            }
        }

        if self.get_client(flight.client_id).is_none() {
            return Err(StoreError::Referential {
                table: Table::Clients,
                id: flight.client_id,
            });
        }
        if self.get_airline(flight.airline_id).is_none() {
            return Err(StoreError::Referential {
                table: Table::Airlines,
                id: flight.airline_id,
            });
        }

        Ok(())
    }
}
