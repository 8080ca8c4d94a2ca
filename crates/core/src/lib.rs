//! Rolodex Core - Shared types library.
//!
//! This crate provides common types used across all Rolodex components:
//! - `contacts` - Collection store, backend adapters, filtering
//! - `cli` - Command-line frontend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - The [`Contact`](types::Contact) record and its newtype
//!   wrappers for IDs and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
