//! The collection store: sole mutator of the authoritative contact list.
//!
//! # Contract
//!
//! Every mutation goes through the backend adapter and is awaited to
//! completion; failures never escape - they are recorded in the
//! single-slot `last_error` and the collection keeps its last-known-good
//! contents. Derived views are recomputed on demand from the current
//! collection plus the transient query state (search text, selected tag).
//!
//! # Concurrency
//!
//! Operations are expected to be driven from one cooperative context, but
//! several may be pending at once (notably concurrent deletes). State
//! lives behind a `std::sync::RwLock` that is only ever held between
//! await points, and consumers observe changes through a watch-channel
//! version counter or by polling cloned snapshots.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use futures::future::join_all;
use tokio::sync::watch;
use tracing::{instrument, warn};

use rolodex_core::{Contact, ContactId};

use crate::backend::{BackendError, ContactBackend};
use crate::filter;

#[derive(Debug, Default)]
struct StoreState {
    contacts: Vec<Contact>,
    is_loading: bool,
    last_error: Option<Arc<BackendError>>,
    search_text: String,
    selected_tag: Option<String>,
}

/// Authoritative in-memory contact collection plus transient UI state.
///
/// The read accessors and the operations below are the entire surface a
/// presentation layer may use; there is no other access to the
/// collection.
#[derive(Debug)]
pub struct ContactStore<B> {
    backend: B,
    state: RwLock<StoreState>,
    changes: watch::Sender<u64>,
}

impl<B: ContactBackend> ContactStore<B> {
    /// Create a store over the given backend, with an empty collection.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: RwLock::new(StoreState::default()),
            changes: watch::Sender::new(0),
        }
    }

    // -------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------

    /// Replace the collection with the backend's current contents.
    ///
    /// Sets the loading flag for the duration of the call and clears the
    /// error slot up front. On failure the collection is left unchanged
    /// and the error is recorded; the loading flag is lowered regardless
    /// of outcome.
    #[instrument(skip(self))]
    pub async fn load(&self) {
        self.mutate(|s| {
            s.is_loading = true;
            s.last_error = None;
        });

        match self.backend.fetch_all().await {
            Ok(contacts) => self.mutate(|s| {
                s.contacts = contacts;
                s.is_loading = false;
            }),
            Err(e) => {
                warn!(error = %e, "load failed");
                self.mutate(|s| {
                    s.last_error = Some(Arc::new(e));
                    s.is_loading = false;
                });
            }
        }
    }

    /// Create `contact` on the backend and append the echoed record.
    #[instrument(skip(self, contact), fields(id = %contact.id))]
    pub async fn add_contact(&self, contact: Contact) {
        match self.backend.create(contact).await {
            Ok(stored) => self.mutate(|s| s.contacts.push(stored)),
            Err(e) => self.record_error(e),
        }
    }

    /// Update `contact` on the backend and replace the local entry by id.
    #[instrument(skip(self, contact), fields(id = %contact.id))]
    pub async fn update_contact(&self, contact: Contact) {
        match self.backend.update(contact).await {
            Ok(stored) => self.mutate(|s| {
                if let Some(existing) = s.contacts.iter_mut().find(|c| c.id == stored.id) {
                    *existing = stored;
                }
            }),
            Err(e) => self.record_error(e),
        }
    }

    /// Delete the given ids on the backend, then reconcile.
    ///
    /// All deletes are issued concurrently and awaited together; a single
    /// reload afterwards reconciles the collection, so a stale interleaved
    /// refresh can never resurrect an already-deleted entry. The first
    /// delete failure is recorded after the reload so the refresh does not
    /// wipe it.
    #[instrument(skip(self))]
    pub async fn delete_contacts(&self, ids: &[ContactId]) {
        let outcomes = join_all(ids.iter().map(|&id| self.backend.delete(id))).await;

        let any_succeeded = outcomes.iter().any(Result::is_ok);
        let first_error = outcomes.into_iter().find_map(Result::err);

        if any_succeeded {
            self.load().await;
        }

        if let Some(e) = first_error {
            self.record_error(e);
        }
    }

    /// Flip `favorite` on the matching local entry.
    ///
    /// Deliberately never calls the backend: favorite status is
    /// client-local unless [`update_contact`](Self::update_contact) is
    /// separately invoked. Unknown ids are a no-op.
    pub fn toggle_favorite(&self, id: ContactId) {
        self.mutate(|s| {
            if let Some(contact) = s.contacts.iter_mut().find(|c| c.id == id) {
                contact.favorite = !contact.favorite;
            }
        });
    }

    /// Generate `count` synthetic contacts and append them.
    #[instrument(skip(self))]
    pub async fn generate_random(&self, count: usize) {
        match self.backend.generate_random(count).await {
            Ok(new_contacts) => self.mutate(|s| s.contacts.extend(new_contacts)),
            Err(e) => self.record_error(e),
        }
    }

    // -------------------------------------------------------------------
    // Query state
    // -------------------------------------------------------------------

    /// Set the search text used by [`filtered_contacts`](Self::filtered_contacts).
    pub fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.mutate(|s| s.search_text = text);
    }

    /// Set the selected tag used by [`filtered_contacts`](Self::filtered_contacts).
    pub fn set_selected_tag(&self, tag: Option<String>) {
        self.mutate(|s| s.selected_tag = tag);
    }

    // -------------------------------------------------------------------
    // Read surface
    // -------------------------------------------------------------------

    /// Snapshot of the authoritative collection.
    #[must_use]
    pub fn contacts(&self) -> Vec<Contact> {
        self.read().contacts.clone()
    }

    /// Whether a [`load`](Self::load) is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().is_loading
    }

    /// The most recent failure, if any. Overwritten, not accumulated.
    #[must_use]
    pub fn last_error(&self) -> Option<Arc<BackendError>> {
        self.read().last_error.clone()
    }

    /// Current search text.
    #[must_use]
    pub fn search_text(&self) -> String {
        self.read().search_text.clone()
    }

    /// Currently selected tag.
    #[must_use]
    pub fn selected_tag(&self) -> Option<String> {
        self.read().selected_tag.clone()
    }

    /// Search-filtered, tag-filtered, name-sorted view for display.
    #[must_use]
    pub fn filtered_contacts(&self) -> Vec<Contact> {
        let s = self.read();
        let by_search = filter::search_filter(&s.contacts, &s.search_text);
        let by_tag = filter::tag_filter(&by_search, s.selected_tag.as_deref());
        filter::sorted_by_name(&by_tag)
    }

    /// Contacts with `favorite == true`, in collection order.
    #[must_use]
    pub fn favorite_contacts(&self) -> Vec<Contact> {
        filter::favorites(&self.read().contacts)
    }

    /// Distinct tags across the collection, sorted ascending.
    #[must_use]
    pub fn all_tags(&self) -> Vec<String> {
        filter::all_tags(&self.read().contacts)
    }

    /// Subscribe to change notifications.
    ///
    /// The value is a version counter bumped after every state change;
    /// consumers re-read the accessors above when it moves.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate(&self, apply: impl FnOnce(&mut StoreState)) {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            apply(&mut state);
        }
        self.changes.send_modify(|version| *version += 1);
    }

    fn record_error(&self, e: BackendError) {
        warn!(error = %e, "store operation failed");
        self.mutate(|s| s.last_error = Some(Arc::new(e)));
    }
}
