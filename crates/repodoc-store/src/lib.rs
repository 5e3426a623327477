//! Persistent user-record store for repodoc.
//!
//! Stores one record per provider identity: profile fields captured at
//! first login plus the provider credential, which is overwritten on every
//! successful OAuth exchange. Backed by SQLite via rusqlite.

pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use store::UserStore;
pub use types::{ProviderProfile, UserRecord};
