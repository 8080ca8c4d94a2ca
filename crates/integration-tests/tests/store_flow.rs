//! End-to-end store scenarios over a scripted backend.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;
use std::time::Duration;

use rolodex_contacts::ContactStore;
use rolodex_core::Contact;
use rolodex_integration_tests::ScriptedBackend;

fn store_with_sample_data() -> ContactStore<ScriptedBackend> {
    ContactStore::new(ScriptedBackend::with_sample_data())
}

#[tokio::test(start_paused = true)]
async fn test_load_add_search_scenario() {
    let backend = ScriptedBackend::with_sample_data().with_delay(Duration::from_millis(500));
    let store = ContactStore::new(backend);

    assert!(!store.is_loading());
    assert!(store.contacts().is_empty());

    // Observe the loading flag while the fetch is in flight.
    tokio::join!(store.load(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(store.is_loading(), "flag must be raised mid-flight");
    });
    assert!(!store.is_loading());
    assert_eq!(store.contacts().len(), 3);

    store.add_contact(Contact::new("Sam Pope", "sam@example.com")).await;
    assert_eq!(store.contacts().len(), 4);
    assert_eq!(store.filtered_contacts().len(), 4);

    store.set_search_text("maria");
    let filtered = store.filtered_contacts();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Maria Garcia");
}

#[tokio::test(start_paused = true)]
async fn test_add_then_load_round_trips_the_record() {
    let store = store_with_sample_data();
    store.load().await;

    let contact = Contact {
        phone: "555-0199".to_owned(),
        favorite: true,
        tags: vec!["Work".to_owned(), "Work".to_owned()],
        ..Contact::new("Sam Pope", "sam@example.com")
    };

    store.add_contact(contact.clone()).await;
    store.load().await;

    let matches: Vec<_> = store
        .contacts()
        .into_iter()
        .filter(|c| c.id == contact.id)
        .collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0], contact, "all fields survive the round trip");
}

#[tokio::test(start_paused = true)]
async fn test_update_replaces_matching_entry() {
    let store = store_with_sample_data();
    store.load().await;

    let mut contact = store.contacts()[1].clone();
    contact.notes = "updated notes".to_owned();
    contact.tags.push("NewTag".to_owned());

    store.update_contact(contact.clone()).await;

    assert!(store.last_error().is_none());
    let stored = store
        .contacts()
        .into_iter()
        .find(|c| c.id == contact.id)
        .unwrap();
    assert_eq!(stored, contact);
    assert_eq!(store.contacts().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_favorite_never_calls_the_adapter() {
    let backend = Arc::new(ScriptedBackend::with_sample_data());
    let store = ContactStore::new(Arc::clone(&backend));
    store.load().await;

    let id = store.contacts()[2].id;
    let original = store.contacts()[2].favorite;
    let calls_before = backend.calls();

    store.toggle_favorite(id);
    assert_eq!(store.contacts()[2].favorite, !original, "flips exactly once");

    store.toggle_favorite(id);
    assert_eq!(store.contacts()[2].favorite, original, "twice restores");

    assert_eq!(backend.calls(), calls_before, "no adapter traffic");
}

#[tokio::test(start_paused = true)]
async fn test_generate_random_appends_five_tagged_contacts() {
    let store = store_with_sample_data();
    store.load().await;
    let existing_ids: Vec<_> = store.contacts().into_iter().map(|c| c.id).collect();

    store.generate_random(5).await;
    assert!(store.last_error().is_none());

    let contacts = store.contacts();
    assert_eq!(contacts.len(), 8);

    let new_contacts: Vec<_> = contacts
        .iter()
        .filter(|c| !existing_ids.contains(&c.id))
        .collect();
    assert_eq!(new_contacts.len(), 5);
    for contact in &new_contacts {
        assert_eq!(contact.tags, vec!["Random".to_owned()]);
    }

    let mut ids: Vec<_> = contacts.iter().map(|c| c.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8, "fresh ids never collide");
}

#[tokio::test(start_paused = true)]
async fn test_subscription_tracks_operations() {
    let store = store_with_sample_data();
    let mut receiver = store.subscribe();
    let start = *receiver.borrow_and_update();

    store.load().await;
    store.set_selected_tag(Some("Work".to_owned()));

    assert!(receiver.has_changed().unwrap());
    assert!(*receiver.borrow_and_update() > start);
}
