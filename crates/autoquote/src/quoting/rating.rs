//! Deterministic premium rating. Pure function of the resolved
//! person/drivers/vehicles/bundle record; no I/O, no hidden state.

use serde::Serialize;

use super::domain::{Bundle, Driver, Person, PrimaryUse, Vehicle, VehiclePremium};

pub const POLICY_FEE: f64 = 25.0;

const LOW_RISK_ZIPS: [&str; 3] = ["20871", "75035", "75070"];
const HIGH_RISK_ZIPS: [&str; 3] = ["10001", "94103", "60601"];

/// Coarse ZIP risk classification. Membership is exact 5-character string
/// equality, not numeric or prefix comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZipBand {
    Low,
    Neutral,
    High,
}

impl ZipBand {
    pub(crate) fn factor(self) -> f64 {
        match self {
            Self::Low => 0.95,
            Self::Neutral => 1.00,
            Self::High => 1.10,
        }
    }
}

pub fn zip_band(zip: &str) -> ZipBand {
    if LOW_RISK_ZIPS.contains(&zip) {
        ZipBand::Low
    } else if HIGH_RISK_ZIPS.contains(&zip) {
        ZipBand::High
    } else {
        ZipBand::Neutral
    }
}

/// Rating output: per-vehicle lines plus policy totals and the discount
/// labels in check order.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedQuote {
    pub per_vehicle: Vec<VehiclePremium>,
    pub policy_fee: f64,
    pub state_surcharge: f64,
    pub final_6mo: f64,
    pub final_12mo: f64,
    pub discounts_applied: Vec<String>,
}

pub fn rate_quote(
    person: &Person,
    drivers: &[Driver],
    vehicles: &[Vehicle],
    bundle: &Bundle,
) -> RatedQuote {
    let rating_zip = if !person.zipcode.is_empty() {
        person.zipcode.as_str()
    } else {
        vehicles
            .first()
            .map(|vehicle| vehicle.garaging_zip.as_str())
            .unwrap_or("")
    };
    let zip_factor = zip_band(rating_zip).factor();
    let surcharge_factor = driver_surcharge_factor(person, drivers);

    let mut per_vehicle: Vec<VehiclePremium> = vehicles
        .iter()
        .map(|vehicle| {
            let base = vehicle_base(vehicle.year);
            let use_factor = match vehicle.primary_use {
                PrimaryUse::Commute => 1.08,
                PrimaryUse::Business => 1.12,
                PrimaryUse::Pleasure | PrimaryUse::Other => 1.00,
            };
            let surcharged = base * use_factor * zip_factor * surcharge_factor;
            VehiclePremium {
                year: vehicle.year,
                make: vehicle.make.clone(),
                model: vehicle.model.clone(),
                base,
                surcharges: round2(surcharged - base),
                discounts: 0.0,
                subtotal: round2(surcharged),
            }
        })
        .collect();

    let mut discounts_applied = Vec::new();
    let mut discount_pct = 0.0;
    if vehicles.len() >= 2 {
        discount_pct += 0.08;
        discounts_applied.push("Multi-vehicle (8%)".to_string());
    }
    if drivers.len() >= 2 {
        discount_pct += 0.04;
        discounts_applied.push("Multi-driver (4%)".to_string());
    }
    if bundle.homeowners_selected {
        discount_pct += 0.12;
        discounts_applied.push("Auto + Home bundle (12%)".to_string());
    }
    let safe = drivers
        .iter()
        .all(|driver| driver.accidents_last_5y == 0 && driver.violations_last_3y == 0);
    if safe {
        discount_pct += 0.05;
        discounts_applied.push("Safe driver (5%)".to_string());
    } else if person.prior_insurance == Some(true) && person.lapse_days <= 30 {
        discount_pct += 0.05;
        discounts_applied.push("Continuous insurance (5%)".to_string());
    }

    for premium in &mut per_vehicle {
        let discount = round2(premium.subtotal * discount_pct);
        premium.discounts = discount;
        premium.subtotal = round2(premium.subtotal - discount);
    }

    // Totals sum the already-rounded vehicle subtotals; each derived figure
    // rounds independently.
    let subtotal: f64 = per_vehicle.iter().map(|premium| premium.subtotal).sum();
    let state_surcharge = round2(subtotal * 0.02);
    let final_6mo = round2(subtotal + POLICY_FEE + state_surcharge);
    let final_12mo = round2(final_6mo * 1.95);

    RatedQuote {
        per_vehicle,
        policy_fee: POLICY_FEE,
        state_surcharge,
        final_6mo,
        final_12mo,
        discounts_applied,
    }
}

fn vehicle_base(year: i32) -> f64 {
    if year >= 2020 {
        620.0
    } else if year >= 2010 {
        560.0
    } else {
        520.0
    }
}

fn driver_surcharge_factor(person: &Person, drivers: &[Driver]) -> f64 {
    let mut max_pct: f64 = 0.0;
    for driver in drivers {
        let mut pct = f64::from(driver.accidents_last_5y.min(2)) * 0.12;
        pct += f64::from(driver.violations_last_3y.min(3)) * 0.07;
        if driver.years_licensed < 3 {
            pct += 0.15;
        }
        max_pct = max_pct.max(pct);
    }
    if person.prior_insurance == Some(false) || person.lapse_days > 30 {
        // The lapse penalty stacks on top of the running max. Kept verbatim
        // from the legacy rater so previously issued quotes reproduce.
        max_pct = max_pct.max(0.10 + max_pct);
    }
    1.0 + max_pct
}

/// Half-up rounding to cents.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
