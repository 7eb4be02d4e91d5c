use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use autoquote::error::AppError;
use autoquote::quoting::{CustomerRoster, PersonInput, QuoteRequest, QuoteService};
use clap::Args;

use crate::infra::InMemoryQuoteStore;

#[derive(Args, Debug, Default)]
pub(crate) struct QuoteArgs {
    /// Path to a JSON quote request; defaults to a bundled sample that
    /// matches a roster customer
    #[arg(long)]
    pub(crate) request: Option<PathBuf>,
}

/// Rate a single quote through the real service stack and print the issued
/// record as pretty JSON.
pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let request = match args.request {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => sample_request(),
    };

    let service = QuoteService::new(
        CustomerRoster::demo(),
        Arc::new(InMemoryQuoteStore::default()),
    );
    let record = service.create_quote(request)?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn sample_request() -> QuoteRequest {
    QuoteRequest {
        person: PersonInput {
            email: Some("john@example.com".to_string()),
            zipcode: Some("20871".to_string()),
            ..PersonInput::default()
        },
        ..QuoteRequest::default()
    }
}
