//! Core types for eventdesk.
//!
//! This crate holds everything below the presentation layer:
//! - `event`, `ids` for the records exchanged with the REST backend
//! - `store` for the canonical event state and its transitions
//! - `filter` for the derived, searchable and sortable view of that state
//! - `validate` for event form checks and defaults
//! - `remote`, `sync` for talking to the backend and feeding the store
//! - `session` for the selected user

pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod ids;
pub mod remote;
pub mod session;
pub mod store;
pub mod sync;
pub mod validate;

pub use error::{CoreResult, EventDeskError};
pub use event::{Category, Event, NewEvent, Role, User};
pub use ids::Id;
