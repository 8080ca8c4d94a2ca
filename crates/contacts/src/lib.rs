//! Rolodex Contacts library.
//!
//! Owns the authoritative in-memory contact collection and everything
//! around it:
//!
//! - [`backend`] - The asynchronous [`ContactBackend`](backend::ContactBackend)
//!   adapter contract, an in-memory implementation with simulated latency,
//!   and the HTTP client for the random-person source
//! - [`filter`] - Pure functions computing derived views from a collection
//! - [`store`] - The [`ContactStore`](store::ContactStore), sole mutator of
//!   the collection and the entire surface a presentation layer may use
//! - [`config`] - Environment-variable configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod filter;
pub mod store;

pub use backend::{BackendError, ContactBackend, MemoryBackend, RandomUserClient};
pub use config::{ConfigError, ContactsConfig};
pub use store::ContactStore;
