use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::quoting::domain::{
    Bundle, Driver, Person, PersonInput, PrimaryUse, QuoteRecord, QuoteRequest, Vehicle,
};
use crate::quoting::roster::CustomerRoster;
use crate::quoting::service::QuoteService;
use crate::quoting::store::{QuoteStore, StoreError};

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<HashMap<String, QuoteRecord>>>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl QuoteStore for MemoryStore {
    fn insert(&self, record: QuoteRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.quote_id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.quote_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, quote_id: &str) -> Result<Option<QuoteRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(quote_id).cloned())
    }
}

pub(super) struct UnavailableStore;

impl QuoteStore for UnavailableStore {
    fn insert(&self, _record: QuoteRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("maintenance window".to_string()))
    }

    fn fetch(&self, _quote_id: &str) -> Result<Option<QuoteRecord>, StoreError> {
        Err(StoreError::Unavailable("maintenance window".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<QuoteService<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(QuoteService::new(CustomerRoster::demo(), store.clone()));
    (service, store)
}

pub(super) fn clean_driver(years_licensed: u32) -> Driver {
    Driver {
        first_name: "Avery".to_string(),
        last_name: "Stone".to_string(),
        dob: "1985-01-15".to_string(),
        license_state: "GA".to_string(),
        years_licensed,
        accidents_last_5y: 0,
        violations_last_3y: 0,
    }
}

pub(super) fn driver_with_history(accidents: u32, violations: u32) -> Driver {
    Driver {
        accidents_last_5y: accidents,
        violations_last_3y: violations,
        ..clean_driver(10)
    }
}

pub(super) fn vehicle(year: i32, primary_use: PrimaryUse) -> Vehicle {
    Vehicle {
        vin: None,
        year,
        make: "Subaru".to_string(),
        model: "Outback".to_string(),
        ownership: "own".to_string(),
        primary_use,
        annual_miles: 10000,
        garaging_zip: "30301".to_string(),
    }
}

pub(super) fn insured_person(zipcode: &str) -> Person {
    Person {
        first_name: "Avery".to_string(),
        last_name: "Stone".to_string(),
        zipcode: zipcode.to_string(),
        prior_insurance: Some(true),
        lapse_days: 0,
        ..Person::default()
    }
}

/// Scenario: identity only, matching the first roster customer by email+zip.
pub(super) fn prefill_request() -> QuoteRequest {
    QuoteRequest {
        person: PersonInput {
            email: Some("john@example.com".to_string()),
            zipcode: Some("20871".to_string()),
            ..PersonInput::default()
        },
        ..QuoteRequest::default()
    }
}

pub(super) fn standalone_request() -> QuoteRequest {
    QuoteRequest {
        person: PersonInput {
            first_name: Some("Avery".to_string()),
            last_name: Some("Stone".to_string()),
            zipcode: Some("30301".to_string()),
            prior_insurance: Some(true),
            lapse_days: Some(0),
            ..PersonInput::default()
        },
        drivers: vec![clean_driver(10)],
        vehicles: vec![vehicle(2015, PrimaryUse::Pleasure)],
        bundle: Bundle::default(),
        ..QuoteRequest::default()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
