//! Listing commands: `list` and `tags`.

use rolodex_contacts::backend::ContactBackend;
use rolodex_contacts::ContactStore;
use rolodex_core::Contact;

/// Print the filtered, name-sorted contact listing.
#[allow(clippy::print_stdout)]
pub fn run<B: ContactBackend>(
    store: &ContactStore<B>,
    search: Option<String>,
    tag: Option<String>,
    favorites: bool,
) {
    if let Some(search) = search {
        store.set_search_text(search);
    }
    store.set_selected_tag(tag);

    let contacts = if favorites {
        store.favorite_contacts()
    } else {
        store.filtered_contacts()
    };

    if contacts.is_empty() {
        println!("No contacts.");
        return;
    }

    for contact in &contacts {
        println!("{}", render_row(contact));
    }
    println!("{} contact(s)", contacts.len());
}

/// Print the distinct tag set.
#[allow(clippy::print_stdout)]
pub fn tags<B: ContactBackend>(store: &ContactStore<B>) {
    let tags = store.all_tags();
    if tags.is_empty() {
        println!("No tags.");
        return;
    }
    for tag in tags {
        println!("{tag}");
    }
}

fn render_row(contact: &Contact) -> String {
    let star = if contact.favorite { "*" } else { " " };
    let tags = if contact.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", contact.tags.join(", "))
    };
    format!(
        "{star} {}  {} <{}>{tags}",
        contact.id, contact.name, contact.email
    )
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_render_row_marks_favorites_and_tags() {
        let contacts = Contact::sample_data();
        let alex = &contacts[0];

        let row = render_row(alex);
        assert!(row.starts_with('*'));
        assert!(row.contains("Alex Johnson <alex@example.com>"));
        assert!(row.contains("[Work, Tech]"));
    }

    #[test]
    fn test_render_row_plain_contact() {
        let contact = Contact::new("Sam Pope", "sam@example.com");
        let row = render_row(&contact);
        assert!(row.starts_with(' '));
        assert!(!row.contains('['));
    }
}
