use super::domain::QuoteRecord;

/// Storage abstraction for issued quotes so the service can be exercised in
/// isolation. Implementations must provide insert-then-read consistency per
/// key; ids are fresh per request, so keys never contend.
pub trait QuoteStore: Send + Sync {
    fn insert(&self, record: QuoteRecord) -> Result<(), StoreError>;
    fn fetch(&self, quote_id: &str) -> Result<Option<QuoteRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("quote already exists")]
    Conflict,
    #[error("quote store unavailable: {0}")]
    Unavailable(String),
}
