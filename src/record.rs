//! Record - the three entity kinds and the trait that binds them to storage.
//!
//! A record is a flat field-name-to-value mapping. Each kind knows its
//! collection name (which doubles as the durable file stem), its field order
//! (the header row), which field is its unique key, and how to build itself
//! from an HTTP payload or a decoded row.
//!
//! ## Example
//!
//! ```ignore
//! use backoffice::{Product, Record};
//! use serde_json::json;
//!
//! let product = Product::from_payload(&json!({ "name": "Widget", "price": 9.9 }))?;
//! assert_eq!(product.key(), "Widget");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Trait for entity kinds stored as flat record collections.
pub trait Record: Serialize + Clone + Send + Sync + 'static {
    /// The collection name for this kind (e.g. "products"). Also the stem of
    /// the durable file name and the route segment.
    const COLLECTION: &'static str;

    /// Field names in header / encoding order. The first field is the key.
    const FIELDS: &'static [&'static str];

    /// The unique key value identifying this record within its collection.
    fn key(&self) -> &str;

    /// Field values in `FIELDS` order, as written to the durable store.
    fn to_row(&self) -> Vec<String>;

    /// Build a record from a decoded row of exactly `FIELDS.len()` values.
    ///
    /// Load-side parsing is lossy: malformed numeric text coerces to zero
    /// rather than failing, matching what the durable format tolerates.
    fn from_row(row: &[&str]) -> Self;

    /// Build a record from a create payload, validating required fields.
    fn from_payload(body: &Value) -> Result<Self, Error>;

    /// Apply a partial-update payload on top of this record. Fields present
    /// in the payload override; absent (or null) fields keep prior values.
    fn merge(&self, body: &Value) -> Result<Self, Error>;
}

/// A product for sale. Keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

impl Record for Product {
    const COLLECTION: &'static str = "products";
    const FIELDS: &'static [&'static str] = &["name", "price", "image"];

    fn key(&self) -> &str {
        &self.name
    }

    fn to_row(&self) -> Vec<String> {
        vec![self.name.clone(), self.price.to_string(), self.image.clone()]
    }

    fn from_row(row: &[&str]) -> Self {
        Self {
            name: row[0].to_string(),
            price: row[1].parse().unwrap_or(0.0),
            image: row[2].to_string(),
        }
    }

    fn from_payload(body: &Value) -> Result<Self, Error> {
        Ok(Self {
            name: require_string(body, "name")?,
            price: require_decimal(body, "price")?,
            image: optional_string(body, "image")?.unwrap_or_default(),
        })
    }

    fn merge(&self, body: &Value) -> Result<Self, Error> {
        Ok(Self {
            name: optional_string(body, "name")?.unwrap_or_else(|| self.name.clone()),
            price: optional_decimal(body, "price")?.unwrap_or(self.price),
            // A present empty string clears the image; it is the one optional
            // field, so "" is a real value rather than a missing one.
            image: optional_string_allow_empty(body, "image")?
                .unwrap_or_else(|| self.image.clone()),
        })
    }
}

/// A discount coupon. Keyed by code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub discount: i64,
}

impl Record for Coupon {
    const COLLECTION: &'static str = "coupons";
    const FIELDS: &'static [&'static str] = &["code", "discount"];

    fn key(&self) -> &str {
        &self.code
    }

    fn to_row(&self) -> Vec<String> {
        vec![self.code.clone(), self.discount.to_string()]
    }

    fn from_row(row: &[&str]) -> Self {
        Self {
            code: row[0].to_string(),
            discount: row[1].parse().unwrap_or(0),
        }
    }

    fn from_payload(body: &Value) -> Result<Self, Error> {
        Ok(Self {
            code: require_string(body, "code")?,
            discount: require_integer(body, "discount")?,
        })
    }

    fn merge(&self, body: &Value) -> Result<Self, Error> {
        Ok(Self {
            code: optional_string(body, "code")?.unwrap_or_else(|| self.code.clone()),
            discount: optional_integer(body, "discount")?.unwrap_or(self.discount),
        })
    }
}

/// An operator-managed user account. Keyed by email.
///
/// The password is stored plaintext — inherited from the durable format,
/// which has no room for anything better. Not an authentication system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl Record for UserAccount {
    const COLLECTION: &'static str = "users";
    const FIELDS: &'static [&'static str] = &["email", "username", "password"];

    fn key(&self) -> &str {
        &self.email
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.email.clone(),
            self.username.clone(),
            self.password.clone(),
        ]
    }

    fn from_row(row: &[&str]) -> Self {
        Self {
            email: row[0].to_string(),
            username: row[1].to_string(),
            password: row[2].to_string(),
        }
    }

    fn from_payload(body: &Value) -> Result<Self, Error> {
        Ok(Self {
            email: require_string(body, "email")?,
            username: require_string(body, "username")?,
            password: require_string(body, "password")?,
        })
    }

    fn merge(&self, body: &Value) -> Result<Self, Error> {
        Ok(Self {
            email: optional_string(body, "email")?.unwrap_or_else(|| self.email.clone()),
            username: optional_string(body, "username")?.unwrap_or_else(|| self.username.clone()),
            password: optional_string(body, "password")?.unwrap_or_else(|| self.password.clone()),
        })
    }
}

// =============================================================================
// Payload field extraction
// =============================================================================
//
// Request-side parsing is strict, unlike load-side parsing: a payload value
// that should be numeric but is not parses to a Validation error, never to
// zero. Numeric fields accept a JSON number or a numeric string.

fn missing(field: &str) -> Error {
    Error::Validation(format!("missing required field: {}", field))
}

fn require_string(body: &Value, field: &str) -> Result<String, Error> {
    optional_string(body, field)?.ok_or_else(|| missing(field))
}

fn optional_string(body: &Value, field: &str) -> Result<Option<String>, Error> {
    match optional_string_allow_empty(body, field)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

fn optional_string_allow_empty(body: &Value, field: &str) -> Result<Option<String>, Error> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::Validation(format!(
            "field '{}' must be a string",
            field
        ))),
    }
}

fn require_decimal(body: &Value, field: &str) -> Result<f64, Error> {
    optional_decimal(body, field)?.ok_or_else(|| missing(field))
}

fn optional_decimal(body: &Value, field: &str) -> Result<Option<f64>, Error> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => Err(not_numeric(field)),
        },
        Some(_) => Err(not_numeric(field)),
    }
}

fn require_integer(body: &Value, field: &str) -> Result<i64, Error> {
    optional_integer(body, field)?.ok_or_else(|| missing(field))
}

fn optional_integer(body: &Value, field: &str) -> Result<Option<i64>, Error> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        // A fractional JSON number truncates, as integer parsing of "7.5"
        // style input did in the durable format's lineage.
        Some(Value::Number(n)) => Ok(n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))),
        Some(Value::String(s)) => match s.trim().parse::<i64>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => Err(not_numeric(field)),
        },
        Some(_) => Err(not_numeric(field)),
    }
}

fn not_numeric(field: &str) -> Error {
    Error::Validation(format!("field '{}' must be a number", field))
}
