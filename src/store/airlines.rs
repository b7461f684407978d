//! Airline operations

use crate::error::{Result, StoreError};
use crate::record::{next_id, Airline, AirlineDraft, AirlinePatch, Table};
use crate::storage::Persistence;
use crate::validate::validate_company_name;

use super::{check_field, position_of, Query, RecordStore};

impl<P: Persistence> RecordStore<P> {
    /// Create an airline with a fresh `airline_id`
    pub fn create_airline(&mut self, draft: AirlineDraft) -> Result<Airline> {
        let id = next_id(self.airlines.iter().map(|a| a.airline_id));
        let mut airline = draft.into_airline(id);
        validate_airline(&mut airline)?;

        let mut next = self.airlines.clone();
        next.push(airline.clone());
        self.persistence.write_airlines(&next)?;
        self.airlines = next;

        tracing::info!("Create airline: {} ({})", airline.airline_id, airline.company_name);
        Ok(airline)
    }

    /// Import an airline keeping its identifier
    pub fn insert_airline(&mut self, mut airline: Airline) -> Result<Airline> {
        if self.get_airline(airline.airline_id).is_some() {
            return Err(StoreError::DuplicateKey {
                table: Table::Airlines,
                id: airline.airline_id,
            });
        }
        validate_airline(&mut airline)?;

        let mut next = self.airlines.clone();
        next.push(airline.clone());
        self.persistence.write_airlines(&next)?;
        self.airlines = next;

        tracing::info!("Insert airline: {} ({})", airline.airline_id, airline.company_name);
        Ok(airline)
    }

    pub fn update_airline(&mut self, airline_id: u64, patch: AirlinePatch) -> Result<Airline> {
        let idx = self.airline_index(airline_id)?;

        let mut merged = self.airlines[idx].clone();
        patch.apply_to(&mut merged);
        validate_airline(&mut merged)?;

        let mut next = self.airlines.clone();
        next[idx] = merged.clone();
        self.persistence.write_airlines(&next)?;
        self.airlines = next;

        tracing::info!("Update airline {}", airline_id);
        Ok(merged)
    }

    /// Delete an airline and every flight it operates
    ///
    /// Returns the number of flights removed with it.
    pub fn delete_airline(&mut self, airline_id: u64) -> Result<usize> {
        let idx = self.airline_index(airline_id)?;

        let mut airlines_next = self.airlines.clone();
        airlines_next.remove(idx);
        let flights_next: Vec<_> = self
            .flights
            .iter()
            .filter(|f| f.airline_id != airline_id)
            .cloned()
            .collect();
        let cascaded = self.flights.len() - flights_next.len();

        self.write_cascade(&flights_next, |p| p.write_airlines(&airlines_next))?;
        self.airlines = airlines_next;
        self.flights = flights_next;

        tracing::info!("Delete airline {} (cascaded {} flights)", airline_id, cascaded);
        Ok(cascaded)
    }

    pub fn get_airline(&self, airline_id: u64) -> Option<&Airline> {
        self.airlines.iter().find(|a| a.airline_id == airline_id)
    }

    /// Airlines whose id equals the query or whose name contains it
    pub fn search_airlines(&self, query: &str) -> Vec<&Airline> {
        let Some(q) = Query::parse(query) else {
            return Vec::new();
        };

        let out: Vec<&Airline> = self
            .airlines
            .iter()
            .filter(|a| q.matches_id(a.airline_id) || q.matches_text(&a.company_name))
            .collect();

        tracing::debug!("Search airlines q={:?} -> {}", q.text, out.len());
        out
    }

    fn airline_index(&self, airline_id: u64) -> Result<usize> {
        position_of(&self.airlines, airline_id, |a| a.airline_id).ok_or(StoreError::NotFound {
            table: Table::Airlines,
            id: airline_id,
        })
    }
}

fn validate_airline(airline: &mut Airline) -> Result<()> {
    airline.scrub_extra();
    let mut errors = Vec::new();
    check_field(
        &mut errors,
        "CompanyName",
        &mut airline.company_name,
        true,
        validate_company_name,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation {
            table: Table::Airlines,
            errors,
        })
    }
}
