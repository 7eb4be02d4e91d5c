use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::matcher::MatchBasis;

/// Identity fragment as submitted on a quote request. Every field is
/// optional; the legacy intake shape spelled the zip several ways.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PersonInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "zip", alias = "postal_code", alias = "post_code")]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub prior_insurance: Option<bool>,
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub lapse_days: Option<u32>,
    #[serde(default)]
    pub home_owner: Option<bool>,
}

impl PersonInput {
    /// Merge this fragment over `base`. Explicitly supplied fields always win;
    /// everything else keeps the base value (typically a matched customer).
    pub fn merged_into(&self, mut base: Person) -> Person {
        if let Some(value) = &self.first_name {
            base.first_name = value.clone();
        }
        if let Some(value) = &self.last_name {
            base.last_name = value.clone();
        }
        if let Some(value) = &self.dob {
            base.dob = value.clone();
        }
        if let Some(value) = &self.email {
            base.email = value.clone();
        }
        if let Some(value) = &self.phone {
            base.phone = value.clone();
        }
        if let Some(value) = &self.zipcode {
            base.zipcode = value.clone();
        }
        if let Some(value) = &self.address1 {
            base.address1 = value.clone();
        }
        if let Some(value) = &self.city {
            base.city = value.clone();
        }
        if let Some(value) = &self.state {
            base.state = value.clone();
        }
        if let Some(value) = self.prior_insurance {
            base.prior_insurance = Some(value);
        }
        if let Some(value) = self.lapse_days {
            base.lapse_days = value;
        }
        if let Some(value) = self.home_owner {
            base.home_owner = value;
        }
        base
    }
}

/// Inbound quote request. Arbitrary extra fields are tolerated; the top-level
/// identity fields and `q1`/`q2` are aliases kept from earlier intake forms
/// and are only consulted when the nested person fragment leaves a gap.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub person: PersonInput,
    #[serde(default)]
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub bundle: Bundle,
    #[serde(default, alias = "user_email")]
    pub email: Option<String>,
    #[serde(default, alias = "user_phone")]
    pub phone: Option<String>,
    #[serde(default, alias = "zip", alias = "postal_code", alias = "post_code")]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub q1: Option<String>,
    #[serde(default)]
    pub q2: Option<String>,
}

/// Fully resolved person identity as rated and persisted. `prior_insurance`
/// stays optional: an unknown history is distinct from a declared lapse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub prior_insurance: Option<bool>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub lapse_days: u32,
    #[serde(default)]
    pub home_owner: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub license_state: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub years_licensed: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub accidents_last_5y: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub violations_last_3y: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub year: i32,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub ownership: String,
    #[serde(default)]
    pub primary_use: PrimaryUse,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub annual_miles: u32,
    #[serde(default)]
    pub garaging_zip: String,
}

/// Declared vehicle usage. Unrecognized values fold into `Other`, which rates
/// at the neutral use factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryUse {
    Commute,
    Business,
    Pleasure,
    #[default]
    Other,
}

impl<'de> Deserialize<'de> for PrimaryUse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let raw = value.as_str().unwrap_or_default();
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "commute" => Self::Commute,
            "business" => Self::Business,
            "pleasure" => Self::Pleasure,
            _ => Self::Other,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default)]
    pub homeowners_selected: bool,
}

/// One roster entry: a known customer with their drivers and vehicles on
/// file. The roster is fixed at process start and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: String,
    pub person: Person,
    pub drivers: Vec<Driver>,
    pub vehicles: Vec<Vehicle>,
}

/// How a quote's drivers/vehicles were sourced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefillSummary {
    pub matched: bool,
    pub basis: MatchBasis,
    pub customer_id: Option<String>,
}

/// Per-vehicle premium line. Monetary figures are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePremium {
    pub year: i32,
    pub make: String,
    pub model: String,
    pub base: f64,
    pub surcharges: f64,
    pub discounts: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub per_vehicle: Vec<VehiclePremium>,
    pub policy_fee: f64,
    pub state_surcharge: f64,
    pub final_6mo: f64,
    pub final_12mo: f64,
}

/// Persisted quote. Created once per request; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub quote_id: String,
    pub prefill: PrefillSummary,
    pub rated_person: Person,
    pub rated_drivers: Vec<Driver>,
    pub rated_vehicles: Vec<Vehicle>,
    pub discounts_applied: Vec<String>,
    pub premium_breakdown: PremiumBreakdown,
    pub created_at: DateTime<Utc>,
    pub next_steps: String,
}

// The legacy intake accepted whatever arrived on numeric fields; anything
// that is not a usable number coerces to zero rather than failing the
// request.
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_u32(&value))
}

fn lenient_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| !v.is_null())
        .map(|v| coerce_u32(&v)))
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(number) => number.as_f64().map(|n| n as i32).unwrap_or(0),
        serde_json::Value::String(raw) => raw.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn coerce_u32(value: &serde_json::Value) -> u32 {
    match value {
        serde_json::Value::Number(number) => number.as_f64().map(|n| n as u32).unwrap_or(0),
        serde_json::Value::String(raw) => raw.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
