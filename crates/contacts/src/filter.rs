//! Pure functions computing derived views from a contact collection.
//!
//! Stateless by design: each function takes a slice plus query parameters
//! and returns a fresh vector. For display, consumers compose
//! [`search_filter`] then [`tag_filter`] (both independent predicates)
//! then [`sorted_by_name`].

use rolodex_core::Contact;

/// Case-insensitive substring match against `name` or `email`.
///
/// Empty `text` passes everything.
#[must_use]
pub fn search_filter(contacts: &[Contact], text: &str) -> Vec<Contact> {
    if text.is_empty() {
        return contacts.to_vec();
    }

    let needle = text.to_lowercase();
    contacts
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle) || c.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Keep contacts whose `tags` contains `tag` exactly (case-sensitive).
///
/// `None` passes everything.
#[must_use]
pub fn tag_filter(contacts: &[Contact], tag: Option<&str>) -> Vec<Contact> {
    match tag {
        None => contacts.to_vec(),
        Some(tag) => contacts
            .iter()
            .filter(|c| c.tags.iter().any(|t| t == tag))
            .cloned()
            .collect(),
    }
}

/// Keep contacts with `favorite == true`.
#[must_use]
pub fn favorites(contacts: &[Contact]) -> Vec<Contact> {
    contacts.iter().filter(|c| c.favorite).cloned().collect()
}

/// All tags across all contacts, deduplicated and sorted ascending.
#[must_use]
pub fn all_tags(contacts: &[Contact]) -> Vec<String> {
    let mut tags: Vec<String> = contacts
        .iter()
        .flat_map(|c| c.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Stable ascending ordinal sort by `name`; ties keep input order.
#[must_use]
pub fn sorted_by_name(contacts: &[Contact]) -> Vec<Contact> {
    let mut sorted = contacts.to_vec();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}
