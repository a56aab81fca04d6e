//! API integration tests
//!
//! These tests expect a running server with a fresh database.
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

async fn post(client: &Client, path: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
}

/// Create the lookup rows a room depends on, returning (location_id, status_id)
async fn setup_room_lookups(client: &Client, marker: &str) -> (i64, i64) {
    let location: Value = post(
        client,
        "/room-locations",
        json!({ "name": format!("Floor {}", marker) }),
    )
    .await
    .json()
    .await
    .expect("Failed to parse location response");

    let status: Value = post(
        client,
        "/room-statuses",
        json!({ "name": format!("OPEN-{}", marker) }),
    )
    .await
    .json()
    .await
    .expect("Failed to parse status response");

    (
        location["id"].as_i64().expect("No location id"),
        status["id"].as_i64().expect("No status id"),
    )
}

async fn create_user(client: &Client, marker: &str) -> i64 {
    let user: Value = post(
        client,
        "/users",
        json!({
            "firstname": "Test",
            "lastname": format!("User {}", marker),
            "email": format!("user-{}@example.org", marker)
        }),
    )
    .await
    .json()
    .await
    .expect("Failed to parse user response");
    user["id"].as_i64().expect("No user id")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_room_crud() {
    let client = Client::new();
    let (location_id, status_id) = setup_room_lookups(&client, "crud").await;

    // Create
    let response = post(
        &client,
        "/rooms",
        json!({
            "name": "Study Room CRUD",
            "location_id": location_id,
            "status_id": status_id,
            "min_people": 2,
            "max_people": 6
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    let room: Value = response.json().await.expect("Failed to parse response");
    let room_id = room["id"].as_i64().expect("No room id");
    assert_eq!(room["max_people"], 6);

    // Duplicate name is rejected, case-insensitively
    let response = post(
        &client,
        "/rooms",
        json!({
            "name": "study room crud",
            "location_id": location_id,
            "status_id": status_id,
            "min_people": 1,
            "max_people": 4
        }),
    )
    .await;
    assert_eq!(response.status(), 409);

    // Read
    let response = client
        .get(format!("{}/rooms/{}", BASE_URL, room_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Update
    let response = client
        .put(format!("{}/rooms/{}", BASE_URL, room_id))
        .json(&json!({ "max_people": 8 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["max_people"], 8);

    // Delete
    let response = client
        .delete(format!("{}/rooms/{}", BASE_URL, room_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/rooms/{}", BASE_URL, room_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_list_rooms_pagination_metadata() {
    let client = Client::new();

    let response = client
        .get(format!("{}/rooms?page=1&limit=5", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["totalItems"].is_number());
    assert!(body["totalPages"].is_number());
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["pageSize"], 5);
}

#[tokio::test]
#[ignore]
async fn test_filter_on_disallowed_field_fails() {
    let client = Client::new();

    for path in [
        "/users", "/authors", "/editorials", "/plans", "/equipment", "/rooms",
        "/reservations", "/active-plans", "/genders",
    ] {
        let response = client
            .get(format!("{}{}?field=password&value=x", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 400, "expected 400 for {}", path);
    }
}

#[tokio::test]
#[ignore]
async fn test_invalid_pagination_is_rejected() {
    let client = Client::new();

    let response = client
        .get(format!("{}/rooms?page=0&limit=5", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/rooms?page=1&limit=0", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // -1 is the documented no-limit sentinel
    let response = client
        .get(format!("{}/rooms?limit=-1", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_overlapping_reservations_conflict() {
    let client = Client::new();
    let (location_id, status_id) = setup_room_lookups(&client, "overlap").await;
    let user_id = create_user(&client, "overlap").await;

    let room: Value = post(
        &client,
        "/rooms",
        json!({
            "name": "Overlap Room",
            "location_id": location_id,
            "status_id": status_id,
            "min_people": 2,
            "max_people": 6
        }),
    )
    .await
    .json()
    .await
    .expect("Failed to parse room response");
    let room_id = room["id"].as_i64().expect("No room id");

    // 10:00 - 12:00 succeeds
    let response = post(
        &client,
        "/reservations",
        json!({
            "user_id": user_id,
            "room_id": room_id,
            "start_date": "2030-01-01T10:00:00Z",
            "finish_date": "2030-01-01T12:00:00Z",
            "people": 4
        }),
    )
    .await;
    assert_eq!(response.status(), 201);

    // 11:00 - 13:00 overlaps by one hour and must conflict
    let response = post(
        &client,
        "/reservations",
        json!({
            "user_id": user_id,
            "room_id": room_id,
            "start_date": "2030-01-01T11:00:00Z",
            "finish_date": "2030-01-01T13:00:00Z",
            "people": 4
        }),
    )
    .await;
    assert_eq!(response.status(), 409);

    // Back-to-back booking starting exactly at the finish is fine
    let response = post(
        &client,
        "/reservations",
        json!({
            "user_id": user_id,
            "room_id": room_id,
            "start_date": "2030-01-01T12:00:00Z",
            "finish_date": "2030-01-01T14:00:00Z",
            "people": 4
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_reservation_rules() {
    let client = Client::new();
    let (location_id, status_id) = setup_room_lookups(&client, "rules").await;
    let user_id = create_user(&client, "rules").await;

    let room: Value = post(
        &client,
        "/rooms",
        json!({
            "name": "Rules Room",
            "location_id": location_id,
            "status_id": status_id,
            "min_people": 2,
            "max_people": 6
        }),
    )
    .await
    .json()
    .await
    .expect("Failed to parse room response");
    let room_id = room["id"].as_i64().expect("No room id");

    // Too many people for the room
    let response = post(
        &client,
        "/reservations",
        json!({
            "user_id": user_id,
            "room_id": room_id,
            "start_date": "2030-02-01T10:00:00Z",
            "finish_date": "2030-02-01T12:00:00Z",
            "people": 10
        }),
    )
    .await;
    assert_eq!(response.status(), 400);

    // Start in the past
    let response = post(
        &client,
        "/reservations",
        json!({
            "user_id": user_id,
            "room_id": room_id,
            "start_date": "2020-01-01T10:00:00Z",
            "finish_date": "2020-01-01T12:00:00Z",
            "people": 4
        }),
    )
    .await;
    assert_eq!(response.status(), 400);

    // Longer than the configured maximum
    let response = post(
        &client,
        "/reservations",
        json!({
            "user_id": user_id,
            "room_id": room_id,
            "start_date": "2030-02-01T09:00:00Z",
            "finish_date": "2030-02-01T19:00:00Z",
            "people": 4
        }),
    )
    .await;
    assert_eq!(response.status(), 400);

    // Outside working hours
    let response = post(
        &client,
        "/reservations",
        json!({
            "user_id": user_id,
            "room_id": room_id,
            "start_date": "2030-02-01T05:00:00Z",
            "finish_date": "2030-02-01T07:00:00Z",
            "people": 4
        }),
    )
    .await;
    assert_eq!(response.status(), 400);

    // Unknown room
    let response = post(
        &client,
        "/reservations",
        json!({
            "user_id": user_id,
            "room_id": 999999,
            "start_date": "2030-02-01T10:00:00Z",
            "finish_date": "2030-02-01T12:00:00Z",
            "people": 4
        }),
    )
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_active_plan_lifecycle() {
    let client = Client::new();
    let user_id = create_user(&client, "plan").await;

    let plan: Value = post(
        &client,
        "/plans",
        json!({
            "name": "Lifecycle Monthly",
            "description": "Monthly subscription",
            "price": 19.90
        }),
    )
    .await
    .json()
    .await
    .expect("Failed to parse plan response");
    let plan_id = plan["id"].as_i64().expect("No plan id");

    // Subscribe with defaults: status ACTIVE, ending_date now + configured days
    let response = post(
        &client,
        "/active-plans",
        json!({ "user_id": user_id, "plan_id": plan_id }),
    )
    .await;
    assert_eq!(response.status(), 201);
    let subscription: Value = response.json().await.expect("Failed to parse response");
    let subscription_id = subscription["id"].as_i64().expect("No subscription id");
    assert!(subscription["ending_date"].is_string());
    assert_eq!(subscription["status"], "ACTIVE");

    // A second concurrent subscription for the same user conflicts
    let response = post(
        &client,
        "/active-plans",
        json!({ "user_id": user_id, "plan_id": plan_id }),
    )
    .await;
    assert_eq!(response.status(), 409);

    // Renewal pushes ending_date forward
    let response = post(
        &client,
        &format!("/active-plans/{}/renew", subscription_id),
        json!({}),
    )
    .await;
    assert!(response.status().is_success());
    let renewed: Value = response.json().await.expect("Failed to parse response");
    assert!(
        renewed["ending_date"].as_str().unwrap() > subscription["ending_date"].as_str().unwrap()
    );

    // Finish, then any further transition fails
    let response = post(
        &client,
        &format!("/active-plans/{}/finish", subscription_id),
        json!({}),
    )
    .await;
    assert!(response.status().is_success());
    let finished: Value = response.json().await.expect("Failed to parse response");
    assert!(finished["finished_date"].is_string());

    let response = post(
        &client,
        &format!("/active-plans/{}/cancel", subscription_id),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), 409);

    let response = post(
        &client,
        &format!("/active-plans/{}/renew", subscription_id),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_author_requires_existing_gender() {
    let client = Client::new();

    let response = post(
        &client,
        "/authors",
        json!({
            "firstname": "Jorge",
            "lastname": "Borges",
            "gender_id": 999999
        }),
    )
    .await;
    assert_eq!(response.status(), 404);
}
