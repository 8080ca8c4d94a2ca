//! Backend adapters for the contact collection.
//!
//! # Architecture
//!
//! The store talks to an opaque asynchronous service through the
//! [`ContactBackend`] trait. Every operation suspends the caller and may
//! fail; there is no cancellation, timeout, or retry at this layer. The
//! bundled [`MemoryBackend`] simulates network latency so that callers are
//! forced to handle pending state - the store's loading-flag contract
//! depends on operations never completing synchronously.
//!
//! Bulk generation pulls synthetic people from a
//! [`PersonSource`](random_user::PersonSource), by default the
//! [randomuser.me](https://randomuser.me) HTTP API.

pub mod memory;
pub mod random_user;

pub use memory::{LatencyProfile, MemoryBackend};
pub use random_user::{GeneratedPerson, PersonSource, RandomUserClient};

use async_trait::async_trait;
use thiserror::Error;

use rolodex_core::{Contact, ContactId};

/// Errors that can occur when talking to a contact backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// No record with the given id exists on the backend.
    #[error("contact not found: {0}")]
    NotFound(ContactId),

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The random-person source returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// A response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

/// The asynchronous backend adapter contract.
///
/// Implementations own their backing collection; the store never reaches
/// around the trait. All operations echo the stored record back so the
/// store can append/replace exactly what the backend persisted.
#[async_trait]
pub trait ContactBackend: Send + Sync {
    /// Return the backend's full current collection.
    async fn fetch_all(&self) -> Result<Vec<Contact>, BackendError>;

    /// Append a contact and echo back the stored record.
    async fn create(&self, contact: Contact) -> Result<Contact, BackendError>;

    /// Replace the record sharing `contact.id`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when no record shares the id.
    async fn update(&self, contact: Contact) -> Result<Contact, BackendError>;

    /// Remove the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when no record carries the id.
    async fn delete(&self, id: ContactId) -> Result<(), BackendError>;

    /// Generate `count` synthetic contacts tagged `"Random"`, append them
    /// to the backing collection, and return the new records.
    ///
    /// All-or-nothing: a fetch or decode failure produces no new records.
    async fn generate_random(&self, count: usize) -> Result<Vec<Contact>, BackendError>;
}

// Shared handles are backends too; test harnesses rely on this to keep a
// reference to the adapter they hand to a store.
#[async_trait]
impl<T: ContactBackend + ?Sized> ContactBackend for std::sync::Arc<T> {
    async fn fetch_all(&self) -> Result<Vec<Contact>, BackendError> {
        (**self).fetch_all().await
    }

    async fn create(&self, contact: Contact) -> Result<Contact, BackendError> {
        (**self).create(contact).await
    }

    async fn update(&self, contact: Contact) -> Result<Contact, BackendError> {
        (**self).update(contact).await
    }

    async fn delete(&self, id: ContactId) -> Result<(), BackendError> {
        (**self).delete(id).await
    }

    async fn generate_random(&self, count: usize) -> Result<Vec<Contact>, BackendError> {
        (**self).generate_random(count).await
    }
}
