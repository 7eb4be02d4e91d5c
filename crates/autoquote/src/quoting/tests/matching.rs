use serde_json::json;

use crate::quoting::domain::QuoteRequest;
use crate::quoting::matcher::{MatchBasis, PersonIdentity};
use crate::quoting::roster::CustomerRoster;

fn identity(
    first: &str,
    last: &str,
    email: &str,
    phone: &str,
    zipcode: &str,
) -> PersonIdentity {
    PersonIdentity {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        zipcode: zipcode.to_string(),
    }
}

#[test]
fn strong_tier_wins_even_when_name_and_zip_also_match() {
    let roster = CustomerRoster::demo();
    let outcome = roster.find(&identity(
        "John",
        "Sherman",
        "JOHN@EXAMPLE.COM",
        "",
        "20871",
    ));

    assert_eq!(outcome.basis, MatchBasis::EmailZip);
    assert_eq!(
        outcome.hit.map(|record| record.customer_id.as_str()),
        Some("cust-001")
    );
}

#[test]
fn strong_tier_reports_phone_basis_when_email_absent() {
    let roster = CustomerRoster::demo();
    let outcome = roster.find(&identity("", "", "", "+1 (301) 555-1122", "20871-4402"));

    assert_eq!(outcome.basis, MatchBasis::PhoneZip);
    assert_eq!(
        outcome.hit.map(|record| record.customer_id.as_str()),
        Some("cust-001")
    );
}

#[test]
fn email_only_tier_matches_without_zip() {
    let roster = CustomerRoster::demo();
    let outcome = roster.find(&identity("", "", "Rhea@Example.com", "", ""));

    assert_eq!(outcome.basis, MatchBasis::Email);
    assert_eq!(
        outcome.hit.map(|record| record.customer_id.as_str()),
        Some("cust-002")
    );
}

#[test]
fn phone_only_tier_matches_on_digits() {
    let roster = CustomerRoster::demo();
    let outcome = roster.find(&identity("", "", "", "1-469-555-7788", ""));

    assert_eq!(outcome.basis, MatchBasis::Phone);
    assert_eq!(
        outcome.hit.map(|record| record.customer_id.as_str()),
        Some("cust-002")
    );
}

#[test]
fn name_zip_tier_requires_all_three_fields() {
    let roster = CustomerRoster::demo();

    let outcome = roster.find(&identity("rhea", "PATEL", "", "", "75035"));
    assert_eq!(outcome.basis, MatchBasis::NameZip);
    assert_eq!(
        outcome.hit.map(|record| record.customer_id.as_str()),
        Some("cust-002")
    );

    let missing_last = roster.find(&identity("rhea", "", "", "", "75035"));
    assert_eq!(missing_last.basis, MatchBasis::Unmatched);
    assert!(missing_last.hit.is_none());
}

#[test]
fn unknown_email_falls_through_to_name_zip() {
    let roster = CustomerRoster::demo();
    let outcome = roster.find(&identity(
        "John",
        "Sherman",
        "stranger@example.com",
        "",
        "20871",
    ));

    // The unknown email disqualifies the strong and email tiers but the
    // name+zip tier still resolves.
    assert_eq!(outcome.basis, MatchBasis::NameZip);
    assert_eq!(
        outcome.hit.map(|record| record.customer_id.as_str()),
        Some("cust-001")
    );
}

#[test]
fn empty_identity_reports_none() {
    let roster = CustomerRoster::demo();
    let outcome = roster.find(&PersonIdentity::default());

    assert_eq!(outcome.basis, MatchBasis::Unmatched);
    assert!(outcome.hit.is_none());
}

#[test]
fn repeated_lookups_return_the_same_customer() {
    let roster = CustomerRoster::demo();
    let fragment = identity("", "", "john@example.com", "", "");

    let first = roster.find(&fragment);
    let second = roster.find(&fragment);
    assert_eq!(
        first.hit.map(|record| record.customer_id.as_str()),
        second.hit.map(|record| record.customer_id.as_str())
    );
    assert_eq!(first.basis, second.basis);
}

#[test]
fn identity_resolution_prefers_person_fields_over_top_level_aliases() {
    let request: QuoteRequest = serde_json::from_value(json!({
        "person": { "email": "nested@example.com", "zip": "75035" },
        "user_email": "top@example.com",
        "zipcode": "99999",
        "unexpected_extra": { "ignored": true }
    }))
    .expect("request parses");

    let resolved = PersonIdentity::from_request(&request);
    assert_eq!(resolved.email, "nested@example.com");
    assert_eq!(resolved.zipcode, "75035");
}

#[test]
fn blank_person_fields_fall_through_to_aliases() {
    let request: QuoteRequest = serde_json::from_value(json!({
        "person": { "email": "  " },
        "user_email": "top@example.com",
        "user_phone": "301-555-0000"
    }))
    .expect("request parses");

    let resolved = PersonIdentity::from_request(&request);
    assert_eq!(resolved.email, "top@example.com");
    assert_eq!(resolved.phone, "301-555-0000");
}

#[test]
fn legacy_survey_answers_feed_email_and_zip() {
    let request: QuoteRequest = serde_json::from_value(json!({
        "q1": "legacy@example.com",
        "q2": "20871-4402"
    }))
    .expect("request parses");

    let resolved = PersonIdentity::from_request(&request);
    assert_eq!(resolved.email, "legacy@example.com");
    assert_eq!(resolved.zipcode, "20871");
}

#[test]
fn survey_answers_without_the_expected_shape_are_ignored() {
    let request: QuoteRequest = serde_json::from_value(json!({
        "q1": "no at sign here",
        "q2": "2087a"
    }))
    .expect("request parses");

    let resolved = PersonIdentity::from_request(&request);
    assert_eq!(resolved.email, "");
    assert_eq!(resolved.zipcode, "");
}
