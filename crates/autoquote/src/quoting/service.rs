use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::domain::{PrefillSummary, PremiumBreakdown, QuoteRecord, QuoteRequest};
use super::matcher::PersonIdentity;
use super::rating::rate_quote;
use super::roster::CustomerRoster;
use super::store::{QuoteStore, StoreError};

/// Fixed follow-up blurb attached to every issued quote.
pub const NEXT_STEPS: &str =
    "Review coverages and bind. A licensed agent will contact you to finalize.";

/// Service composing the roster matcher, the rating engine, and a quote
/// store.
pub struct QuoteService<S> {
    roster: CustomerRoster,
    store: Arc<S>,
}

impl<S> QuoteService<S>
where
    S: QuoteStore + 'static,
{
    pub fn new(roster: CustomerRoster, store: Arc<S>) -> Self {
        Self { roster, store }
    }

    /// Issue a quote: resolve the identity aliases, prefill from a roster
    /// match where the request left gaps, rate, and persist. Explicit request
    /// fields always win over prefilled history; drivers and vehicles are
    /// substituted wholesale only when the request supplied none.
    pub fn create_quote(&self, request: QuoteRequest) -> Result<QuoteRecord, QuoteServiceError> {
        let identity = PersonIdentity::from_request(&request);
        let outcome = self.roster.find(&identity);
        debug!(basis = outcome.basis.label(), "customer match evaluated");

        let prefill = PrefillSummary {
            matched: outcome.hit.is_some(),
            basis: outcome.basis,
            customer_id: outcome.hit.map(|record| record.customer_id.clone()),
        };

        let base_person = outcome
            .hit
            .map(|record| record.person.clone())
            .unwrap_or_default();
        let rated_person = request.person.merged_into(base_person);

        let rated_drivers = match outcome.hit {
            Some(record) if request.drivers.is_empty() => record.drivers.clone(),
            _ => request.drivers,
        };
        let rated_vehicles = match outcome.hit {
            Some(record) if request.vehicles.is_empty() => record.vehicles.clone(),
            _ => request.vehicles,
        };

        if rated_vehicles.is_empty() {
            return Err(QuoteServiceError::NoVehicles);
        }

        let rated = rate_quote(&rated_person, &rated_drivers, &rated_vehicles, &request.bundle);

        let record = QuoteRecord {
            quote_id: Uuid::new_v4().to_string(),
            prefill,
            rated_person,
            rated_drivers,
            rated_vehicles,
            discounts_applied: rated.discounts_applied,
            premium_breakdown: PremiumBreakdown {
                per_vehicle: rated.per_vehicle,
                policy_fee: rated.policy_fee,
                state_surcharge: rated.state_surcharge,
                final_6mo: rated.final_6mo,
                final_12mo: rated.final_12mo,
            },
            created_at: Utc::now(),
            next_steps: NEXT_STEPS.to_string(),
        };

        self.store.insert(record.clone())?;
        Ok(record)
    }

    /// Retrieve a previously issued quote, unmodified.
    pub fn quote(&self, quote_id: &str) -> Result<QuoteRecord, QuoteServiceError> {
        self.store
            .fetch(quote_id)?
            .ok_or(QuoteServiceError::QuoteNotFound)
    }

    /// Direct roster lookup by customer id.
    pub fn customer(
        &self,
        customer_id: &str,
    ) -> Result<&super::domain::CustomerRecord, QuoteServiceError> {
        self.roster
            .customer(customer_id)
            .ok_or(QuoteServiceError::CustomerNotFound)
    }

    pub fn roster(&self) -> &CustomerRoster {
        &self.roster
    }
}

/// Error raised by the quote service.
#[derive(Debug, thiserror::Error)]
pub enum QuoteServiceError {
    #[error("no vehicles to rate: supply vehicles or identity fields that match a known customer")]
    NoVehicles,
    #[error("quote not found")]
    QuoteNotFound,
    #[error("customer not found")]
    CustomerNotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}
