use super::domain::{CustomerRecord, Driver, Person, PrimaryUse, Vehicle};
use super::matcher::{find_customer, MatchOutcome, PersonIdentity};

/// The fixed reference list of known customers. Immutable for the process
/// lifetime; roster order drives matcher determinism.
#[derive(Debug, Clone)]
pub struct CustomerRoster {
    customers: Vec<CustomerRecord>,
}

impl CustomerRoster {
    pub fn new(customers: Vec<CustomerRecord>) -> Self {
        Self { customers }
    }

    /// The bundled demo roster.
    pub fn demo() -> Self {
        Self::new(demo_customers())
    }

    pub fn find(&self, identity: &PersonIdentity) -> MatchOutcome<'_> {
        find_customer(&self.customers, identity)
    }

    pub fn customer(&self, customer_id: &str) -> Option<&CustomerRecord> {
        self.customers
            .iter()
            .find(|record| record.customer_id == customer_id)
    }

    pub fn customers(&self) -> &[CustomerRecord] {
        &self.customers
    }
}

fn demo_customers() -> Vec<CustomerRecord> {
    vec![
        CustomerRecord {
            customer_id: "cust-001".to_string(),
            person: Person {
                first_name: "John".to_string(),
                last_name: "Sherman".to_string(),
                dob: "1980-05-10".to_string(),
                email: "John@example.com".to_string(),
                phone: "+1-301-555-1122".to_string(),
                address1: "123 Maple Ave".to_string(),
                city: "Clarksburg".to_string(),
                state: "MD".to_string(),
                zipcode: "20871".to_string(),
                prior_insurance: Some(true),
                lapse_days: 0,
                home_owner: true,
            },
            drivers: vec![Driver {
                first_name: "John".to_string(),
                last_name: "Sherman".to_string(),
                dob: "1980-05-10".to_string(),
                license_state: "MD".to_string(),
                years_licensed: 10,
                accidents_last_5y: 0,
                violations_last_3y: 0,
            }],
            vehicles: vec![Vehicle {
                vin: Some("JT4BG22K6Y0123456".to_string()),
                year: 2011,
                make: "Toyota".to_string(),
                model: "Camry".to_string(),
                ownership: "own".to_string(),
                primary_use: PrimaryUse::Commute,
                annual_miles: 12000,
                garaging_zip: "20871".to_string(),
            }],
        },
        CustomerRecord {
            customer_id: "cust-002".to_string(),
            person: Person {
                first_name: "Rhea".to_string(),
                last_name: "Patel".to_string(),
                dob: "1990-04-12".to_string(),
                email: "rhea@example.com".to_string(),
                phone: "+1-469-555-7788".to_string(),
                address1: "55 Meadow Ln".to_string(),
                city: "Frisco".to_string(),
                state: "TX".to_string(),
                zipcode: "75035".to_string(),
                prior_insurance: Some(true),
                lapse_days: 0,
                home_owner: false,
            },
            drivers: vec![Driver {
                first_name: "Rhea".to_string(),
                last_name: "Patel".to_string(),
                dob: "1990-04-12".to_string(),
                license_state: "TX".to_string(),
                years_licensed: 6,
                accidents_last_5y: 1,
                violations_last_3y: 0,
            }],
            vehicles: vec![Vehicle {
                vin: None,
                year: 2020,
                make: "Honda".to_string(),
                model: "Odyssey".to_string(),
                ownership: "finance".to_string(),
                primary_use: PrimaryUse::Pleasure,
                annual_miles: 9000,
                garaging_zip: "75035".to_string(),
            }],
        },
    ]
}
