//! In-memory backend with simulated latency.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::Mutex;
use tracing::debug;

use rolodex_core::{Contact, ContactId};

use super::random_user::{PersonSource, RandomUserClient};
use super::{BackendError, ContactBackend};

/// Bounds for the simulated per-operation latency.
///
/// Every backend call sleeps a duration sampled uniformly from
/// `min..=max` before touching the collection, so callers always observe
/// a pending state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    min: Duration,
    max: Duration,
}

impl LatencyProfile {
    /// Create a profile from millisecond bounds. `max` is raised to `min`
    /// if the bounds are inverted.
    #[must_use]
    pub fn from_millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(min.max(max)),
        }
    }

    /// Sample a delay from the profile.
    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            self.min
        } else {
            rand::rng().random_range(self.min..=self.max)
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::from_millis(300, 700)
    }
}

/// An in-memory [`ContactBackend`].
///
/// Holds its own backing collection behind a mutex and simulates network
/// latency on every operation. No durability beyond process lifetime.
/// Bulk generation delegates person synthesis to the injected
/// [`PersonSource`].
#[derive(Debug)]
pub struct MemoryBackend<S = RandomUserClient> {
    contacts: Mutex<Vec<Contact>>,
    latency: LatencyProfile,
    people: S,
}

impl<S: PersonSource> MemoryBackend<S> {
    /// Create an empty backend.
    #[must_use]
    pub fn new(people: S, latency: LatencyProfile) -> Self {
        Self::with_contacts(Vec::new(), people, latency)
    }

    /// Create a backend seeded with `contacts`.
    #[must_use]
    pub fn with_contacts(contacts: Vec<Contact>, people: S, latency: LatencyProfile) -> Self {
        Self {
            contacts: Mutex::new(contacts),
            latency,
            people,
        }
    }

    /// Create a backend seeded with [`Contact::sample_data`].
    #[must_use]
    pub fn with_sample_data(people: S, latency: LatencyProfile) -> Self {
        Self::with_contacts(Contact::sample_data(), people, latency)
    }

    async fn simulate_latency(&self) {
        let delay = self.latency.sample();
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl<S: PersonSource> ContactBackend for MemoryBackend<S> {
    async fn fetch_all(&self) -> Result<Vec<Contact>, BackendError> {
        self.simulate_latency().await;
        Ok(self.contacts.lock().await.clone())
    }

    async fn create(&self, contact: Contact) -> Result<Contact, BackendError> {
        self.simulate_latency().await;
        let mut contacts = self.contacts.lock().await;
        contacts.push(contact.clone());
        debug!(id = %contact.id, "created contact");
        Ok(contact)
    }

    async fn update(&self, contact: Contact) -> Result<Contact, BackendError> {
        self.simulate_latency().await;
        let mut contacts = self.contacts.lock().await;
        let existing = contacts
            .iter_mut()
            .find(|c| c.id == contact.id)
            .ok_or(BackendError::NotFound(contact.id))?;
        *existing = contact.clone();
        debug!(id = %contact.id, "updated contact");
        Ok(contact)
    }

    async fn delete(&self, id: ContactId) -> Result<(), BackendError> {
        self.simulate_latency().await;
        let mut contacts = self.contacts.lock().await;
        let index = contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or(BackendError::NotFound(id))?;
        contacts.remove(index);
        debug!(%id, "deleted contact");
        Ok(())
    }

    async fn generate_random(&self, count: usize) -> Result<Vec<Contact>, BackendError> {
        self.simulate_latency().await;

        // Fetch everything before touching the collection: a failure here
        // must not partially apply.
        let people = self.people.fetch_people(count).await?;
        let new_contacts: Vec<Contact> = people
            .into_iter()
            .map(super::random_user::GeneratedPerson::into_contact)
            .collect();

        let mut contacts = self.contacts.lock().await;
        contacts.extend(new_contacts.iter().cloned());
        debug!(count = new_contacts.len(), "generated random contacts");
        Ok(new_contacts)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::NaiveDate;

    use super::super::random_user::GeneratedPerson;
    use super::*;

    /// Person source serving a fixed roster, or failing on demand.
    struct FakePeople {
        fail: bool,
    }

    #[async_trait]
    impl PersonSource for FakePeople {
        async fn fetch_people(&self, count: usize) -> Result<Vec<GeneratedPerson>, BackendError> {
            if self.fail {
                return Err(BackendError::Decode("bad payload".to_owned()));
            }
            Ok((0..count)
                .map(|i| GeneratedPerson {
                    name: format!("Person {i}"),
                    email: format!("person{i}@example.com"),
                    phone: String::new(),
                    avatar_url: String::new(),
                    address: String::new(),
                    birthday: NaiveDate::from_ymd_opt(1990, 1, 1),
                })
                .collect())
        }
    }

    fn backend(fail: bool) -> MemoryBackend<FakePeople> {
        MemoryBackend::with_sample_data(FakePeople { fail }, LatencyProfile::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_all_returns_seed() {
        let backend = backend(false);
        let contacts = backend.fetch_all().await.unwrap();
        assert_eq!(contacts.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_echoes_and_appends() {
        let backend = backend(false);
        let contact = Contact::new("Sam Pope", "sam@example.com");

        let echoed = backend.create(contact.clone()).await.unwrap();
        assert_eq!(echoed, contact);

        let contacts = backend.fetch_all().await.unwrap();
        assert_eq!(contacts.len(), 4);
        assert!(contacts.iter().any(|c| c.id == contact.id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_replaces_by_id() {
        let backend = backend(false);
        let mut contact = backend.fetch_all().await.unwrap().remove(0);
        contact.notes = "changed".to_owned();

        backend.update(contact.clone()).await.unwrap();

        let contacts = backend.fetch_all().await.unwrap();
        let stored = contacts.iter().find(|c| c.id == contact.id).unwrap();
        assert_eq!(stored.notes, "changed");
        assert_eq!(contacts.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_missing_id_is_not_found() {
        let backend = backend(false);
        let stray = Contact::new("Nobody", "nobody@example.com");

        let result = backend.update(stray.clone()).await;
        assert!(matches!(result, Err(BackendError::NotFound(id)) if id == stray.id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_removes_exactly_one() {
        let backend = backend(false);
        let contacts = backend.fetch_all().await.unwrap();
        let target = contacts[1].id;

        backend.delete(target).await.unwrap();

        let remaining = backend.fetch_all().await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|c| c.id != target));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_missing_id_is_not_found() {
        let backend = backend(false);
        let stray = ContactId::new();

        let result = backend.delete(stray).await;
        assert!(matches!(result, Err(BackendError::NotFound(id)) if id == stray));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_random_appends_tagged_contacts() {
        let backend = backend(false);
        let generated = backend.generate_random(5).await.unwrap();

        assert_eq!(generated.len(), 5);
        for contact in &generated {
            assert_eq!(contact.tags, vec!["Random".to_owned()]);
        }

        let mut ids: Vec<_> = backend
            .fetch_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids.len(), 8);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8, "ids must not collide");
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_random_failure_is_all_or_nothing() {
        let backend = backend(true);

        let result = backend.generate_random(5).await;
        assert!(matches!(result, Err(BackendError::Decode(_))));

        let contacts = backend.fetch_all().await.unwrap();
        assert_eq!(contacts.len(), 3, "no partial append on failure");
    }

    #[test]
    fn test_latency_profile_bounds() {
        let profile = LatencyProfile::from_millis(100, 200);
        for _ in 0..32 {
            let d = profile.sample();
            assert!(d >= Duration::from_millis(100));
            assert!(d <= Duration::from_millis(200));
        }

        // Inverted bounds collapse to the minimum.
        let inverted = LatencyProfile::from_millis(300, 100);
        assert_eq!(inverted.sample(), Duration::from_millis(300));
    }
}
