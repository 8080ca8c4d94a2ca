//! Delete semantics: concurrent deletes followed by a single reconciling
//! reload, so stale refreshes can never resurrect a removed entry.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;
use std::time::Duration;

use rolodex_contacts::backend::BackendError;
use rolodex_contacts::ContactStore;
use rolodex_core::ContactId;
use rolodex_integration_tests::{Call, ScriptedBackend};

#[tokio::test(start_paused = true)]
async fn test_delete_single_id_removes_exactly_that_entry() {
    let store = ContactStore::new(ScriptedBackend::with_sample_data());
    store.load().await;

    let contacts = store.contacts();
    let target = contacts[1].id;

    store.delete_contacts(&[target]).await;

    let remaining = store.contacts();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|c| c.id != target));
    assert!(remaining.iter().any(|c| c.id == contacts[0].id));
    assert!(remaining.iter().any(|c| c.id == contacts[2].id));
    assert!(store.last_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_deletes_reconcile_with_one_reload() {
    let backend =
        Arc::new(ScriptedBackend::with_sample_data().with_delay(Duration::from_millis(500)));
    let store = ContactStore::new(Arc::clone(&backend));
    store.load().await;

    let ids: Vec<ContactId> = store.contacts().iter().take(2).map(|c| c.id).collect();
    store.delete_contacts(&ids).await;

    assert_eq!(store.contacts().len(), 1);
    assert!(store.last_error().is_none());

    let calls = backend.calls();
    let deletes = calls.iter().filter(|c| matches!(c, Call::Delete(_))).count();
    let fetches = calls.iter().filter(|c| matches!(c, Call::FetchAll)).count();
    assert_eq!(deletes, 2);
    assert_eq!(fetches, 2, "initial load plus exactly one reconcile");
}

#[tokio::test(start_paused = true)]
async fn test_delete_missing_id_records_not_found_but_still_reconciles() {
    let store = ContactStore::new(ScriptedBackend::with_sample_data());
    store.load().await;

    let real = store.contacts()[0].id;
    let stray = ContactId::new();

    store.delete_contacts(&[real, stray]).await;

    // The reload clears the slot first; the delete failure is recorded
    // afterwards so it survives.
    assert!(matches!(
        store.last_error().as_deref(),
        Some(BackendError::NotFound(id)) if *id == stray
    ));
    let remaining = store.contacts();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|c| c.id != real));
}

#[tokio::test(start_paused = true)]
async fn test_all_deletes_failing_skips_the_reload() {
    let backend = Arc::new(ScriptedBackend::with_sample_data());
    let store = ContactStore::new(Arc::clone(&backend));
    store.load().await;

    store.delete_contacts(&[ContactId::new(), ContactId::new()]).await;

    assert_eq!(store.contacts().len(), 3, "collection untouched");
    assert!(store.last_error().is_some());

    let fetches = backend
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::FetchAll))
        .count();
    assert_eq!(fetches, 1, "only the initial load fetched");
}

#[tokio::test(start_paused = true)]
async fn test_deleted_entries_never_resurrect() {
    // Interleave a slow unrelated add with the deletes; after both
    // complete and a final load reconciles, the deleted ids stay gone.
    let backend =
        Arc::new(ScriptedBackend::with_sample_data().with_delay(Duration::from_millis(200)));
    let store = ContactStore::new(Arc::clone(&backend));
    store.load().await;

    let ids: Vec<ContactId> = store.contacts().iter().map(|c| c.id).collect();

    tokio::join!(
        store.delete_contacts(&ids),
        store.generate_random(2),
    );
    store.load().await;

    let remaining = store.contacts();
    assert!(remaining.iter().all(|c| !ids.contains(&c.id)));
    assert_eq!(remaining.len(), 2);
}
