use serde::{Deserialize, Serialize};

use super::domain::{CustomerRecord, QuoteRequest};
use super::normalize::{normalize_email, normalize_name, normalize_phone, normalize_zip};

/// Identity fragment with all request aliases already resolved, ready for the
/// match cascade. Fields may be empty; empty fields never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonIdentity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub zipcode: String,
}

impl PersonIdentity {
    /// Resolve the aliasing contract of the intake shape: the nested person
    /// fragment wins, then the top-level fields, then the legacy `q1`/`q2`
    /// survey answers when they look like an email or a ZIP respectively.
    /// Blank candidates fall through to the next alias.
    pub fn from_request(request: &QuoteRequest) -> Self {
        let person = &request.person;

        let email = non_blank(&person.email)
            .or_else(|| non_blank(&request.email))
            .or_else(|| non_blank(&request.q1).filter(|value| value.contains('@')))
            .unwrap_or_default();
        let phone = non_blank(&person.phone)
            .or_else(|| non_blank(&request.phone))
            .unwrap_or_default();
        let zipcode = non_blank(&person.zipcode)
            .or_else(|| non_blank(&request.zipcode))
            .or_else(|| request.q2.as_deref().and_then(leading_zip5))
            .unwrap_or_default();

        Self {
            first_name: non_blank(&person.first_name).unwrap_or_default(),
            last_name: non_blank(&person.last_name).unwrap_or_default(),
            email,
            phone,
            zipcode,
        }
    }
}

/// The rule that produced a customer match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchBasis {
    #[serde(rename = "email+zip")]
    EmailZip,
    #[serde(rename = "phone+zip")]
    PhoneZip,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "phone")]
    Phone,
    #[serde(rename = "name+zip")]
    NameZip,
    #[serde(rename = "none")]
    Unmatched,
}

impl MatchBasis {
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmailZip => "email+zip",
            Self::PhoneZip => "phone+zip",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::NameZip => "name+zip",
            Self::Unmatched => "none",
        }
    }
}

/// Matcher result: the first roster record the winning tier produced, if any.
#[derive(Debug, Clone, Copy)]
pub struct MatchOutcome<'a> {
    pub hit: Option<&'a CustomerRecord>,
    pub basis: MatchBasis,
}

/// Priority cascade over the roster, first matching tier wins:
/// 1. (email or phone) + zip, 2. email only, 3. phone only, 4. name + zip.
/// Roster order is fixed, so the result is deterministic.
pub fn find_customer<'a>(
    roster: &'a [CustomerRecord],
    identity: &PersonIdentity,
) -> MatchOutcome<'a> {
    let email = normalize_email(&identity.email);
    let phone = normalize_phone(&identity.phone);
    let zip = normalize_zip(&identity.zipcode);
    let first = normalize_name(&identity.first_name);
    let last = normalize_name(&identity.last_name);

    for record in roster {
        let record_email = normalize_email(&record.person.email);
        let record_phone = normalize_phone(&record.person.phone);
        let record_zip = normalize_zip(&record.person.zipcode);

        let email_match = !email.is_empty() && !record_email.is_empty() && email == record_email;
        let phone_match = !phone.is_empty() && !record_phone.is_empty() && phone == record_phone;
        let zip_match = !zip.is_empty() && !record_zip.is_empty() && zip == record_zip;

        if (email_match || phone_match) && zip_match {
            let basis = if email_match {
                MatchBasis::EmailZip
            } else {
                MatchBasis::PhoneZip
            };
            return MatchOutcome {
                hit: Some(record),
                basis,
            };
        }
    }

    if !email.is_empty() {
        if let Some(record) = roster
            .iter()
            .find(|record| normalize_email(&record.person.email) == email)
        {
            return MatchOutcome {
                hit: Some(record),
                basis: MatchBasis::Email,
            };
        }
    }

    if !phone.is_empty() {
        if let Some(record) = roster
            .iter()
            .find(|record| normalize_phone(&record.person.phone) == phone)
        {
            return MatchOutcome {
                hit: Some(record),
                basis: MatchBasis::Phone,
            };
        }
    }

    if !first.is_empty() && !last.is_empty() && !zip.is_empty() {
        if let Some(record) = roster.iter().find(|record| {
            normalize_name(&record.person.first_name) == first
                && normalize_name(&record.person.last_name) == last
                && normalize_zip(&record.person.zipcode) == zip
        }) {
            return MatchOutcome {
                hit: Some(record),
                basis: MatchBasis::NameZip,
            };
        }
    }

    MatchOutcome {
        hit: None,
        basis: MatchBasis::Unmatched,
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .filter(|candidate| !candidate.trim().is_empty())
        .cloned()
}

fn leading_zip5(value: &str) -> Option<String> {
    let prefix: String = value.trim().chars().take(5).collect();
    (prefix.len() == 5 && prefix.chars().all(|c| c.is_ascii_digit())).then_some(prefix)
}
