//! Core types for Rolodex.
//!
//! This module provides the contact record and type-safe wrappers for
//! common domain concepts.

pub mod contact;
pub mod email;
pub mod id;

pub use contact::Contact;
pub use email::{Email, EmailError};
pub use id::ContactId;
