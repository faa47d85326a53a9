//! Integration tests for the booking flow.
//!
//! These tests require a running storefront and a migrated database.
//!
//! Run with: cargo test -p solara-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use solara_integration_tests::{session_client, storefront_base_url};

/// A unique throwaway email so reruns don't collide.
fn test_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_slots_are_weekdays_only() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/bookings/slots"))
        .send()
        .await
        .expect("Failed to get slots");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    let times = body["times"].as_array().expect("times missing");
    assert!(times.iter().any(|t| t == "09:00"));
    // Lunch break is not offered
    assert!(!times.iter().any(|t| t == "13:00"));

    let dates = body["dates"].as_array().expect("dates missing");
    assert!(!dates.is_empty());
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_booking_creates_appointment_and_invite() {
    let client = session_client();
    let base_url = storefront_base_url();
    let email = test_email();

    // Use the first offered date and time so the request is always valid
    let slots: Value = client
        .get(format!("{base_url}/bookings/slots"))
        .send()
        .await
        .expect("Failed to get slots")
        .json()
        .await
        .expect("Failed to parse slots");

    let date = slots["dates"][0].as_str().expect("no dates").to_string();
    let time = slots["times"][0].as_str().expect("no times").to_string();

    let resp = client
        .post(format!("{base_url}/bookings"))
        .json(&json!({
            "name": "Cliente de Prueba",
            "email": email,
            "date": date,
            "time": format!("{time}:00"),
            "skin_problems": "manchas",
        }))
        .send()
        .await
        .expect("Failed to create booking");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["appointment"]["service"], "Scanner Facial");
    assert_eq!(body["appointment"]["status"], "pending");

    let ics = body["ics"].as_str().expect("ics missing");
    assert!(ics.contains("BEGIN:VCALENDAR"));
    assert!(ics.contains(&format!("ATTENDEE:MAILTO:{email}")));

    // The booking shows up under the customer's email
    let bookings: Value = client
        .get(format!("{base_url}/bookings?email={email}"))
        .send()
        .await
        .expect("Failed to list bookings")
        .json()
        .await
        .expect("Failed to parse bookings");

    assert_eq!(bookings.as_array().map(Vec::len), Some(1));

    // And the account view now exists
    let resp = client
        .get(format!("{base_url}/account/{email}"))
        .send()
        .await
        .expect("Failed to get account");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_weekend_booking_is_rejected() {
    let client = session_client();
    let base_url = storefront_base_url();

    // 2026-08-15 is a Saturday
    let resp = client
        .post(format!("{base_url}/bookings"))
        .json(&json!({
            "name": "Cliente de Prueba",
            "email": test_email(),
            "date": "2026-08-15",
            "time": "09:00:00",
        }))
        .send()
        .await
        .expect("Failed to post booking");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_invalid_email_is_rejected() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/bookings"))
        .json(&json!({
            "name": "Cliente",
            "email": "sin-arroba",
            "date": "2026-08-17",
            "time": "09:00:00",
        }))
        .send()
        .await
        .expect("Failed to post booking");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
