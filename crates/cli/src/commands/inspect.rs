//! Print collection counts from the data directory.

/// Print a summary of what the data directory holds.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store()?;

    let users = store.users();
    let drivers = users
        .iter()
        .filter(|u| u.role == dispatch_core::UserRole::Driver)
        .count();
    let customers = store.customers();
    let active = customers.iter().filter(|c| c.is_active).count();
    let routes = store.routes();
    let stops: usize = routes.iter().map(|r| store.route_stops(r.id).len()).sum();

    println!("users:       {} ({drivers} drivers)", users.len());
    println!("customers:   {} ({active} active)", customers.len());
    println!("routes:      {}", routes.len());
    println!("route stops: {stops}");
    match store.session()? {
        Some(user_id) => println!("session:     {user_id}"),
        None => println!("session:     none"),
    }

    Ok(())
}
