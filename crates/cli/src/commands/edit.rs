//! Mutation commands: `add` and `remove`.
//!
//! This module is the creation boundary: name and email validity are
//! enforced here, not by the store.

use chrono::NaiveDate;
use thiserror::Error;

use rolodex_contacts::backend::ContactBackend;
use rolodex_contacts::ContactStore;
use rolodex_core::{Contact, ContactId, Email};

/// Errors that can occur during add/remove commands.
#[derive(Debug, Error)]
pub enum EditError {
    /// Name must be non-empty.
    #[error("name cannot be empty")]
    EmptyName,

    /// Email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] rolodex_core::EmailError),

    /// The store recorded a backend failure.
    #[error("{0}")]
    Backend(String),
}

/// Arguments for the `add` command.
pub struct AddArgs {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub address: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// Validate the new contact and add it through the store.
#[allow(clippy::print_stdout)]
pub async fn add<B: ContactBackend>(
    store: &ContactStore<B>,
    args: AddArgs,
) -> Result<(), EditError> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(EditError::EmptyName);
    }
    let email = Email::parse(args.email.trim())?;

    let contact = Contact {
        phone: args.phone.unwrap_or_default(),
        notes: args.notes.unwrap_or_default(),
        tags: args.tags,
        address: args.address.unwrap_or_default(),
        birthday: args.birthday,
        ..Contact::new(name, email.into_inner())
    };
    let id = contact.id;

    store.add_contact(contact).await;
    check_store(store)?;

    println!("Added {name} ({id})");
    Ok(())
}

/// Delete the given ids through the store and report the new size.
#[allow(clippy::print_stdout)]
pub async fn remove<B: ContactBackend>(
    store: &ContactStore<B>,
    ids: &[ContactId],
) -> Result<(), EditError> {
    let before = store.contacts().len();
    store.delete_contacts(ids).await;
    check_store(store)?;

    let removed = before.saturating_sub(store.contacts().len());
    println!("Removed {removed} contact(s)");
    Ok(())
}

fn check_store<B: ContactBackend>(store: &ContactStore<B>) -> Result<(), EditError> {
    match store.last_error() {
        Some(e) => Err(EditError::Backend(e.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_args_reject_bad_email() {
        assert!(Email::parse("not-an-email").is_err());
    }

    #[test]
    fn test_empty_name_error_message() {
        assert_eq!(EditError::EmptyName.to_string(), "name cannot be empty");
    }
}
