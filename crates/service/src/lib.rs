//! Service layer owning the in-memory record store.
//! - Keeps the map and id generator private behind the four CRUD operations.
//! - No HTTP awareness; the server crate maps verbs onto these calls.

pub mod errors;
pub mod store;
