//! Integration tests for Dispatch.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server against a throwaway data directory
//! DISPATCH_DATA_DIR=$(mktemp -d) cargo run -p dispatch-server
//!
//! # Run integration tests
//! cargo test -p dispatch-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_auth` - Registration, login, session tests
//! - `api_customers` - Customer CRUD tests
//! - `api_routes` - Route, stop, and stats tests
//! - `api_nav` - Navigation deep-link redirect tests
//!
//! All tests are `#[ignore]`d: they exercise a live server named by
//! `DISPATCH_BASE_URL` (default `http://localhost:3000`) and mutate its
//! data directory. Route-building tests additionally need a configured
//! `GOOGLE_MAPS_API_KEY` on the server side.
