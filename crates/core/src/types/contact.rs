//! The contact record.

use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ContactId;

/// One person in the contact list.
///
/// The record is plain data: field validity (non-empty name, well-formed
/// email) is enforced at the creation boundary, not here. The collection
/// store owns the authoritative copy; everything else works on clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique, immutable identifier.
    pub id: ContactId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Free-form phone number, may be empty.
    pub phone: String,
    /// Avatar image URL, may be empty.
    pub avatar_url: String,
    /// Free-form notes.
    pub notes: String,
    /// Client-local favorite flag.
    pub favorite: bool,
    /// Ordered tags; duplicates are permitted.
    pub tags: Vec<String>,
    /// Free-form postal address.
    pub address: String,
    /// Date of birth; absence is a first-class state.
    pub birthday: Option<NaiveDate>,
}

impl Contact {
    /// Create a contact with a freshly minted id and defaulted optional
    /// fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: ContactId::new(),
            name: name.into(),
            email: email.into(),
            phone: String::new(),
            avatar_url: String::new(),
            notes: String::new(),
            favorite: false,
            tags: Vec::new(),
            address: String::new(),
            birthday: None,
        }
    }

    /// Whole years between `birthday` and `date`, or `None` when the
    /// birthday is unset or in the future.
    #[must_use]
    pub fn age_on(&self, date: NaiveDate) -> Option<u32> {
        date.years_since(self.birthday?)
    }

    /// Whole years between `birthday` and today.
    #[must_use]
    pub fn age(&self) -> Option<u32> {
        self.age_on(Utc::now().date_naive())
    }

    /// Human-readable birthday, `"Not set"` when absent.
    #[must_use]
    pub fn birthday_string(&self) -> String {
        self.birthday.map_or_else(
            || "Not set".to_owned(),
            |d| d.format("%b %-d, %Y").to_string(),
        )
    }

    /// The three seed records used by demos and tests.
    #[must_use]
    pub fn sample_data() -> Vec<Self> {
        let today = Utc::now().date_naive();

        vec![
            Self {
                phone: "555-0101".to_owned(),
                avatar_url: "https://randomuser.me/api/portraits/men/1.jpg".to_owned(),
                notes: "Met at the coding workshop".to_owned(),
                favorite: true,
                tags: vec!["Work".to_owned(), "Tech".to_owned()],
                address: "123 Main St, New York".to_owned(),
                ..Self::new("Alex Johnson", "alex@example.com")
            },
            Self {
                phone: "555-0102".to_owned(),
                avatar_url: "https://randomuser.me/api/portraits/women/1.jpg".to_owned(),
                notes: "College roommate".to_owned(),
                favorite: true,
                tags: vec!["School".to_owned()],
                address: "456 Oak Ave, Boston".to_owned(),
                ..Self::new("Maria Garcia", "maria@example.com")
            },
            Self {
                phone: "555-0103".to_owned(),
                avatar_url: "https://randomuser.me/api/portraits/men/2.jpg".to_owned(),
                notes: "Neighbor".to_owned(),
                tags: vec!["Neighborhood".to_owned()],
                address: "789 Pine Rd, Chicago".to_owned(),
                birthday: today.checked_sub_months(Months::new(360)),
                ..Self::new("James Smith", "james@example.com")
            },
        ]
    }
}
