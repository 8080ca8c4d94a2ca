//! The `random` command: bulk generation from the random-person source.

use rolodex_contacts::backend::ContactBackend;
use rolodex_contacts::ContactStore;

/// Generate `count` synthetic contacts and print them.
///
/// # Errors
///
/// Returns the store's recorded error message when generation failed
/// (transport failure, non-2xx response, or undecodable body).
#[allow(clippy::print_stdout)]
pub async fn run<B: ContactBackend>(
    store: &ContactStore<B>,
    count: usize,
) -> Result<(), String> {
    let before = store.contacts().len();
    store.generate_random(count).await;

    if let Some(e) = store.last_error() {
        return Err(format!("generation failed: {e}"));
    }

    let contacts = store.contacts();
    for contact in contacts.iter().skip(before) {
        println!("{}  {} <{}>", contact.id, contact.name, contact.email);
    }
    println!("Generated {} contact(s)", contacts.len() - before);
    Ok(())
}
