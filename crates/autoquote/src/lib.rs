//! Core library for the autoquote demo service: customer matching, premium
//! rating, quote persistence contracts, and the shared service plumbing
//! (configuration, telemetry, token signing, top-level errors).

pub mod auth;
pub mod config;
pub mod error;
pub mod quoting;
pub mod telemetry;
