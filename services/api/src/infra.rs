use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use autoquote::quoting::{QuoteRecord, QuoteStore, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-lifetime quote storage. No eviction: the service is demo scale
/// and quotes never expire.
#[derive(Default, Clone)]
pub(crate) struct InMemoryQuoteStore {
    records: Arc<Mutex<HashMap<String, QuoteRecord>>>,
}

impl QuoteStore for InMemoryQuoteStore {
    fn insert(&self, record: QuoteRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("quote store mutex poisoned");
        if guard.contains_key(&record.quote_id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.quote_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, quote_id: &str) -> Result<Option<QuoteRecord>, StoreError> {
        let guard = self.records.lock().expect("quote store mutex poisoned");
        Ok(guard.get(quote_id).cloned())
    }
}
