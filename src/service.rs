//! Service state - the composition root owning the three repositories.
//!
//! No ambient globals: the binary builds one [`AppState`] at startup, after
//! the persistence gateway has populated every collection, and shares it
//! with the handler layer via `Arc`. Generic handlers reach the repository
//! for their record type through the [`Collections`] trait.

use crate::error::Error;
use crate::persist::FileStore;
use crate::record::{Coupon, Product, Record, UserAccount};
use crate::repository::Repository;

/// The three collection repositories, loaded and ready to serve.
pub struct AppState {
    pub products: Repository<Product>,
    pub coupons: Repository<Coupon>,
    pub users: Repository<UserAccount>,
}

impl AppState {
    /// Load all collections from durable storage. Runs once at startup,
    /// before the server accepts connections; missing stores are created
    /// header-only and start empty.
    pub fn load(store: &FileStore) -> Result<Self, Error> {
        Ok(Self {
            products: Repository::load(store.clone())?,
            coupons: Repository::load(store.clone())?,
            users: Repository::load(store.clone())?,
        })
    }

    /// The collection names this service manages.
    pub fn collections() -> [&'static str; 3] {
        [
            Product::COLLECTION,
            Coupon::COLLECTION,
            UserAccount::COLLECTION,
        ]
    }
}

/// Access to the repository holding records of kind `R`.
pub trait Collections<R: Record> {
    fn repo(&self) -> &Repository<R>;
}

impl Collections<Product> for AppState {
    fn repo(&self) -> &Repository<Product> {
        &self.products
    }
}

impl Collections<Coupon> for AppState {
    fn repo(&self) -> &Repository<Coupon> {
        &self.coupons
    }
}

impl Collections<UserAccount> for AppState {
    fn repo(&self) -> &Repository<UserAccount> {
        &self.users
    }
}
