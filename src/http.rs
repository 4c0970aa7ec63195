//! HTTP transport - maps verbs and paths to repository operations.
//!
//! Uses axum for routing. Each entity kind gets the same four routes:
//!
//! - `GET /<kind>` — 200, the full collection in repository order.
//! - `POST /<kind>` — 201 + created record, or 400 (missing/invalid fields,
//!   duplicate key).
//! - `PUT /<kind>/:key` — 200 + updated record (partial payloads merge onto
//!   the existing record), or 404.
//! - `DELETE /<kind>/:key` — 200 + removed record, or 404.
//!
//! Plus `GET /health` returning `{ "ok": true, "collections": [...] }`.
//!
//! Error responses are JSON with a `message` field. A request body that is
//! not valid JSON is treated as an empty payload, so it surfaces as the
//! relevant missing-field validation error rather than a transport error.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use backoffice::{http, AppState, FileStore};
//!
//! let store = FileStore::new("data");
//! let state = Arc::new(AppState::load(&store)?);
//! http::serve(state, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::Error;
use crate::record::{Coupon, Product, Record, UserAccount};
use crate::repository::Repository;
use crate::service::{AppState, Collections};

/// Build the axum `Router` serving all three collections.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/products", get(list::<Product>).post(create::<Product>))
        .route(
            "/products/:key",
            put(update::<Product>).delete(remove::<Product>),
        )
        .route("/coupons", get(list::<Coupon>).post(create::<Coupon>))
        .route(
            "/coupons/:key",
            put(update::<Coupon>).delete(remove::<Coupon>),
        )
        .route("/users", get(list::<UserAccount>).post(create::<UserAccount>))
        .route(
            "/users/:key",
            put(update::<UserAccount>).delete(remove::<UserAccount>),
        )
        .with_state(state)
}

/// Serve the record store over HTTP at the given address.
pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<(), std::io::Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

/// `GET /health` — liveness probe for the operator UI.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true, "collections": AppState::collections() }))
}

/// `GET /<kind>` — the full collection, in repository order.
async fn list<R>(State(state): State<Arc<AppState>>) -> Result<Json<Vec<R>>, Error>
where
    R: Record,
    AppState: Collections<R>,
{
    let repo: &Repository<R> = state.repo();
    Ok(Json(repo.all()?))
}

/// `POST /<kind>` — validate, insert, flush; 201 with the created record.
async fn create<R>(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<R>), Error>
where
    R: Record,
    AppState: Collections<R>,
{
    let body = json_body(payload);
    let record = R::from_payload(&body)?;
    let repo: &Repository<R> = state.repo();
    let created = repo.insert(record)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /<kind>/:key` — merge the partial payload onto the stored record.
async fn update<R>(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<R>, Error>
where
    R: Record,
    AppState: Collections<R>,
{
    let body = json_body(payload);
    let repo: &Repository<R> = state.repo();
    Ok(Json(repo.update_by_key(&key, &body)?))
}

/// `DELETE /<kind>/:key` — remove and return the record.
async fn remove<R>(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<R>, Error>
where
    R: Record,
    AppState: Collections<R>,
{
    let repo: &Repository<R> = state.repo();
    Ok(Json(repo.delete_by_key(&key)?))
}

/// Unwrap an extracted JSON body, degrading malformed bodies to `Null` so
/// validation reports the missing required fields.
fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Value {
    match payload {
        Ok(Json(value)) => value,
        Err(_) => Value::Null,
    }
}
