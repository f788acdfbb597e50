//! Lookup master: CRUD REST backend for prefixed-id lookup tables on PostgreSQL.

pub mod allocator;
pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod wire;

pub use allocator::{allocate_next, IdentifierError};
pub use config::{builtin_resources, load_resources, resolve, ResourceConfig, ResourceRegistry, Settings, StorageKind};
pub use error::{AppError, ConfigError};
pub use migration::{ensure_database_exists, ensure_tables};
pub use model::{Entry, EntryPatch, NewEntry};
pub use repository::{EntryRepository, InMemoryEntryRepository, PgEntryRepository};
pub use routes::{app, Limits};
pub use state::AppState;
