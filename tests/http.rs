//! HTTP surface integration tests.
//!
//! Starts an axum server over a scratch data directory and exercises it
//! with reqwest.

use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;

use backoffice::{http, AppState, FileStore};

/// Bind to port 0 and return the base URL plus the data dir guard.
async fn start_server() -> (String, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());
    let state = Arc::new(AppState::load(&store).unwrap());

    let app = http::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), dir)
}

#[tokio::test]
async fn health_check() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["collections"], json!(["products", "coupons", "users"]));
}

#[tokio::test]
async fn product_lifecycle() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    // Create
    let resp = client
        .post(format!("{base}/products"))
        .json(&json!({ "name": "Widget", "price": 9.9, "image": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created, json!({ "name": "Widget", "price": 9.9, "image": "" }));

    // List holds exactly the created record
    let listed: Value = client
        .get(format!("{base}/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!([{ "name": "Widget", "price": 9.9, "image": "" }]));

    // Partial update: omitted fields keep prior values
    let resp = client
        .put(format!("{base}/products/Widget"))
        .json(&json!({ "price": 12.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["name"], "Widget");
    assert_eq!(updated["price"], 12.5);

    // Delete returns the removed record
    let resp = client
        .delete(format!("{base}/products/Widget"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let removed: Value = resp.json().await.unwrap();
    assert_eq!(removed["name"], "Widget");

    // Collection is empty again
    let listed: Value = client
        .get(format!("{base}/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn put_with_empty_image_clears_it() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/products"))
        .json(&json!({ "name": "Widget", "price": 9.9, "image": "w.png" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client
        .put(format!("{base}/products/Widget"))
        .json(&json!({ "image": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated, json!({ "name": "Widget", "price": 9.9, "image": "" }));
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/products"))
        .json(&json!({ "price": 9.9 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "missing required field: name");
}

#[tokio::test]
async fn create_rejects_duplicate_key() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let payload = json!({ "name": "Widget", "price": 9.9 });
    let resp = client
        .post(format!("{base}/products"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client
        .post(format!("{base}/products"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("already exists"));

    // Collection unchanged
    let listed: Value = client
        .get(format!("{base}/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn coupon_with_non_numeric_discount_is_rejected() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/coupons"))
        .json(&json!({ "code": "SAVE10", "discount": "abc" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "field 'discount' must be a number");

    let listed: Value = client
        .get(format!("{base}/coupons"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn numeric_strings_are_accepted() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/coupons"))
        .json(&json!({ "code": "SAVE10", "discount": "10" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created, json!({ "code": "SAVE10", "discount": 10 }));
}

#[tokio::test]
async fn update_and_delete_of_absent_key_return_404() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/users/ghost@example.com"))
        .json(&json!({ "username": "ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("no record"));

    let resp = client
        .delete(format!("{base}/users/ghost@example.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn user_create_and_list() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/users"))
        .json(&json!({
            "email": "ada@example.com",
            "username": "ada",
            "password": "hunter2"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client
        .post(format!("{base}/users"))
        .json(&json!({ "email": "ada@example.com", "username": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let listed: Value = client
        .get(format!("{base}/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        listed,
        json!([{
            "email": "ada@example.com",
            "username": "ada",
            "password": "hunter2"
        }])
    );
}

#[tokio::test]
async fn list_preserves_insertion_order_across_key_rename() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    for name in ["A", "B", "C"] {
        let resp = client
            .post(format!("{base}/products"))
            .json(&json!({ "name": name, "price": 1 }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    // Renaming B keeps its slot in the middle
    let resp = client
        .put(format!("{base}/products/B"))
        .json(&json!({ "name": "Z" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let listed: Value = client
        .get(format!("{base}/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "Z", "C"]);
}

#[tokio::test]
async fn malformed_body_is_a_validation_failure() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/products"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "missing required field: name");
}

#[tokio::test]
async fn put_with_malformed_numeric_is_rejected_before_mutation() {
    let (base, _dir) = start_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/coupons"))
        .json(&json!({ "code": "SAVE10", "discount": 10 }))
        .send()
        .await
        .unwrap();

    let resp = client
        .put(format!("{base}/coupons/SAVE10"))
        .json(&json!({ "discount": "lots" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let listed: Value = client
        .get(format!("{base}/coupons"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed[0]["discount"], 10);
}
