//! Database layer - connection pool, schema, and the pet store
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - One transaction per mutating operation, committed once or rolled back on drop
//! - Referenced owners are checked inside the same transaction as the write

pub mod pool;
pub mod migrations;
pub mod store;
pub mod postgres;
pub mod memory;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use store::{PetStore, StoreError};
pub use postgres::PgStore;
pub use memory::MemoryStore;
