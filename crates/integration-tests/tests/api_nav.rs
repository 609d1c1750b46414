//! Integration tests for navigation redirects.
//!
//! These tests require a running dispatch server pointed at a throwaway
//! data directory. No Maps key is needed; the redirect targets are built
//! locally from stored addresses.
//!
//! Run with: cargo test -p dispatch-integration-tests -- --ignored

use chrono::Utc;
use reqwest::{Client, StatusCode, redirect};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the dispatch API (configurable via environment).
fn base_url() -> String {
    std::env::var("DISPATCH_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client that reports redirects instead of following them into Google.
fn no_redirect_client() -> Client {
    Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Register (and thereby log in) a fresh user with the given role.
async fn login_as(client: &Client, role: &str) -> Value {
    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({
            "email": format!("test-{}@dispatch.test", Uuid::new_v4()),
            "password": "integration-secret",
            "name": "Integration Tester",
            "role": role,
        }))
        .send()
        .await
        .expect("Failed to register user");
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to read register body")
}

#[tokio::test]
#[ignore = "Requires running dispatch server"]
async fn route_navigation_redirects_to_google_maps() {
    let client = no_redirect_client();
    let driver = login_as(&client, "driver").await;
    login_as(&client, "admin").await;

    let resp = client
        .post(format!("{}/routes", base_url()))
        .json(&json!({
            "date": Utc::now().date_naive(),
            "driver_id": driver["id"],
            "start_location_address": "Depot, Fehérvári út 100, Budapest",
        }))
        .send()
        .await
        .expect("Failed to create route");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let route: Value = resp.json().await.expect("Failed to read route body");
    let route_id = route["id"].as_str().expect("route id");

    // A route without stops still navigates to its start address.
    let resp = client
        .get(format!("{}/routes/{route_id}/navigate", base_url()))
        .send()
        .await
        .expect("Failed to request navigation");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Location header");
    assert!(location.starts_with("https://www.google.com/maps/dir/"));
    assert!(location.contains("destination="));
}

#[tokio::test]
#[ignore = "Requires running dispatch server"]
async fn unknown_route_navigation_is_not_found() {
    let client = no_redirect_client();
    login_as(&client, "admin").await;

    let resp = client
        .get(format!("{}/routes/{}/navigate", base_url(), Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to request navigation");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running dispatch server"]
async fn unknown_stop_waze_navigation_is_not_found() {
    let client = no_redirect_client();
    login_as(&client, "admin").await;

    let resp = client
        .get(format!(
            "{}/stops/{}/navigate/waze",
            base_url(),
            Uuid::new_v4()
        ))
        .send()
        .await
        .expect("Failed to request navigation");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
