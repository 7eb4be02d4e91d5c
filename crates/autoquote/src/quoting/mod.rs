//! Quote issuance pipeline: identity normalization, the roster matcher, the
//! deterministic rating engine, and the service tying them to a quote store.

pub mod domain;
pub mod matcher;
pub mod normalize;
pub mod rating;
pub mod roster;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    Bundle, CustomerRecord, Driver, Person, PersonInput, PrefillSummary, PremiumBreakdown,
    PrimaryUse, QuoteRecord, QuoteRequest, Vehicle, VehiclePremium,
};
pub use matcher::{find_customer, MatchBasis, MatchOutcome, PersonIdentity};
pub use rating::{rate_quote, zip_band, RatedQuote, ZipBand, POLICY_FEE};
pub use roster::CustomerRoster;
pub use router::quote_router;
pub use service::{QuoteService, QuoteServiceError, NEXT_STEPS};
pub use store::{QuoteStore, StoreError};
