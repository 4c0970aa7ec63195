//! Minimal administrative backend: CRUD HTTP endpoints over three flat
//! record collections — products, coupons, user accounts — persisted to
//! delimited text files.
//!
//! Layers, leaves first:
//!
//! - [`codec`]: one collection ↔ delimited text with a fixed header row.
//! - [`Collection`]: ordered in-memory records with unique keys.
//! - [`FileStore`]: durable files, loaded at startup and rewritten in full
//!   after every mutation.
//! - [`Repository`]: a collection behind a lock with synchronous flushing.
//! - [`http`]: axum routes translating repository outcomes into status
//!   codes and JSON bodies.

pub mod codec;
pub mod http;

mod collection;
mod error;
mod persist;
mod record;
mod repository;
mod service;

pub use collection::Collection;
pub use error::Error;
pub use persist::FileStore;
pub use record::{Coupon, Product, Record, UserAccount};
pub use repository::Repository;
pub use service::{AppState, Collections};
