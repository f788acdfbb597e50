//! HTTP handlers for lookup-table CRUD.

pub mod entry;
pub use entry::*;
