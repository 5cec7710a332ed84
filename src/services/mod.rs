//! Service layer for Classify business logic.
//!
//! Domain logic separated from transport concerns, shared by the CLI and the
//! web server.

pub mod query;

pub use query::{MatchMode, QueryError, QueryService, RawBounds};
