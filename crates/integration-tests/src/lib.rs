//! Test support for store integration tests.
//!
//! Provides [`ScriptedBackend`], an adapter implementation that mirrors
//! the in-memory backend's semantics without real latency, records every
//! call it receives, and can be switched into a failing mode to exercise
//! the store's error contract.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use rolodex_contacts::backend::{BackendError, ContactBackend};
use rolodex_core::{Contact, ContactId};

/// One recorded adapter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchAll,
    Create(ContactId),
    Update(ContactId),
    Delete(ContactId),
    GenerateRandom(usize),
}

/// A scripted [`ContactBackend`] for integration tests.
///
/// Every operation suspends (via a timer when a delay is configured, via
/// a bare yield otherwise), records itself, and then either applies the
/// in-memory semantics or fails when the backend has been switched into
/// failing mode.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    contacts: Mutex<Vec<Contact>>,
    calls: Mutex<Vec<Call>>,
    failing: AtomicBool,
    delay: Duration,
}

impl ScriptedBackend {
    /// Create a backend seeded with `contacts`.
    #[must_use]
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: Mutex::new(contacts),
            ..Self::default()
        }
    }

    /// Create a backend seeded with [`Contact::sample_data`].
    #[must_use]
    pub fn with_sample_data() -> Self {
        Self::new(Contact::sample_data())
    }

    /// Make every operation sleep `delay` before completing.
    ///
    /// Pair with `#[tokio::test(start_paused = true)]` so the time is
    /// simulated.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Switch the backend into (or out of) failing mode.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All calls recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Peek at the backing collection, bypassing the adapter contract.
    #[must_use]
    pub fn backing_contacts(&self) -> Vec<Contact> {
        self.contacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn begin(&self, call: Call) -> Result<(), BackendError> {
        if self.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.delay).await;
        }

        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);

        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendError::Api {
                status: 503,
                message: "injected failure".to_owned(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContactBackend for ScriptedBackend {
    async fn fetch_all(&self) -> Result<Vec<Contact>, BackendError> {
        self.begin(Call::FetchAll).await?;
        Ok(self.backing_contacts())
    }

    async fn create(&self, contact: Contact) -> Result<Contact, BackendError> {
        self.begin(Call::Create(contact.id)).await?;
        self.contacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(contact.clone());
        Ok(contact)
    }

    async fn update(&self, contact: Contact) -> Result<Contact, BackendError> {
        self.begin(Call::Update(contact.id)).await?;
        let mut contacts = self.contacts.lock().unwrap_or_else(PoisonError::into_inner);
        let existing = contacts
            .iter_mut()
            .find(|c| c.id == contact.id)
            .ok_or(BackendError::NotFound(contact.id))?;
        *existing = contact.clone();
        Ok(contact)
    }

    async fn delete(&self, id: ContactId) -> Result<(), BackendError> {
        self.begin(Call::Delete(id)).await?;
        let mut contacts = self.contacts.lock().unwrap_or_else(PoisonError::into_inner);
        let index = contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or(BackendError::NotFound(id))?;
        contacts.remove(index);
        Ok(())
    }

    async fn generate_random(&self, count: usize) -> Result<Vec<Contact>, BackendError> {
        self.begin(Call::GenerateRandom(count)).await?;
        let new_contacts: Vec<Contact> = (0..count)
            .map(|i| Contact {
                tags: vec!["Random".to_owned()],
                ..Contact::new(format!("Random Person {i}"), format!("random{i}@example.com"))
            })
            .collect();
        self.contacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(new_contacts.iter().cloned());
        Ok(new_contacts)
    }
}
