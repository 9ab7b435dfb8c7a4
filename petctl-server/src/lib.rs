//! petctl-server: owners, pets, and the HTTP API over them
//!
//! Layers, bottom-up:
//! - `models`: records and validated input types
//! - `db`: connection pool, schema migration, and the `PetStore` backends
//! - `http`: axum router, extractors, and error mapping

pub mod db;
pub mod http;
pub mod models;

pub use db::{MemoryStore, PetStore, PgStore, StoreError};
pub use http::{build_router, connect_postgres, run_server, ApiError, AppState, ServerConfig};
