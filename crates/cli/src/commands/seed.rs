//! Seed the data directory with demo data.
//!
//! Creates an admin and a driver account plus a handful of customers so a
//! fresh installation has something to route. Skips anything that already
//! exists, so running it twice is harmless.

use tracing::info;

use dispatch_core::{Email, UserRole};
use dispatch_server::models::{NewCustomer, NewUser};
use dispatch_server::store::RecordStore;

const SEED_USERS: &[(&str, &str, &str, UserRole)] = &[
    ("admin@dispatch.local", "admin123", "Dispatch Admin", UserRole::Admin),
    ("driver@dispatch.local", "driver123", "Demo Driver", UserRole::Driver),
];

const SEED_CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Corner Bakery", "+36 1 234 5678", "Kossuth Lajos utca 12, Budapest, 1053"),
    ("Green Grocer", "+36 1 345 6789", "Váci út 45, Budapest, 1134"),
    ("City Pharmacy", "+36 1 456 7890", "Andrássy út 3, Budapest, 1061"),
    ("Riverside Cafe", "+36 1 567 8901", "Bem rakpart 20, Budapest, 1011"),
];

/// Seed demo users and customers.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or written.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store()?;

    for &(email, password, name, role) in SEED_USERS {
        seed_user(&store, email, password, name, role)?;
    }

    let existing: Vec<String> = store.customers().into_iter().map(|c| c.name).collect();
    for &(name, phone, address) in SEED_CUSTOMERS {
        if existing.iter().any(|n| n == name) {
            info!(name, "Customer already present, skipping");
            continue;
        }
        let customer = store.add_customer(NewCustomer {
            name: name.to_owned(),
            contact_person: None,
            phone: phone.to_owned(),
            address_full: address.to_owned(),
            street: None,
            city: Some("Budapest".to_owned()),
            zip: None,
            latitude: None,
            longitude: None,
            notes: None,
            is_active: true,
        })?;
        info!(customer_id = %customer.id, name, "Customer seeded");
    }

    println!("Seed complete.");
    Ok(())
}

fn seed_user(
    store: &RecordStore,
    email: &str,
    password: &str,
    name: &str,
    role: UserRole,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;
    if store.user_record_by_email(&email).is_some() {
        info!(email = %email, "User already present, skipping");
        return Ok(());
    }
    let user = store.add_user(NewUser {
        email,
        password: password.to_owned(),
        name: name.to_owned(),
        role,
        phone: None,
    })?;
    info!(user_id = %user.id, role = %user.role, "User seeded");
    Ok(())
}
