//! HTTP client for the random-person source.
//!
//! Fetches synthetic people from the [randomuser.me](https://randomuser.me)
//! API and maps them into the intermediate [`GeneratedPerson`] shape. The
//! backend mints ids and applies the `"Random"` tag when it turns people
//! into contacts.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use rolodex_core::Contact;

use super::BackendError;

/// Default endpoint for the random-person source.
pub const DEFAULT_BASE_URL: &str = "https://randomuser.me/api";

/// Fields requested from the API; everything else is excluded server-side.
const INCLUDED_FIELDS: &str = "name,email,phone,picture,location,dob";

/// A source of synthetic people for bulk contact generation.
#[async_trait]
pub trait PersonSource: Send + Sync {
    /// Fetch `count` synthetic people.
    ///
    /// All-or-nothing: any transport or decode failure yields an error and
    /// no people.
    async fn fetch_people(&self, count: usize) -> Result<Vec<GeneratedPerson>, BackendError>;
}

/// One synthetic person, already mapped out of the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPerson {
    /// Full display name (`first` + `" "` + `last`).
    pub name: String,
    /// Email address as supplied by the source.
    pub email: String,
    /// Free-form phone number.
    pub phone: String,
    /// Large portrait URL.
    pub avatar_url: String,
    /// `street-number street-name, city`.
    pub address: String,
    /// Date part of the source's date of birth.
    pub birthday: Option<NaiveDate>,
}

impl GeneratedPerson {
    /// Turn the person into a contact with a fresh id, tagged `"Random"`.
    #[must_use]
    pub fn into_contact(self) -> Contact {
        Contact {
            phone: self.phone,
            avatar_url: self.avatar_url,
            tags: vec!["Random".to_owned()],
            address: self.address,
            birthday: self.birthday,
            ..Contact::new(self.name, self.email)
        }
    }
}

/// Client for the randomuser.me API.
#[derive(Debug, Clone)]
pub struct RandomUserClient {
    client: reqwest::Client,
    base_url: Url,
}

impl RandomUserClient {
    /// Create a client against the given base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

impl Default for RandomUserClient {
    fn default() -> Self {
        // The constant is a valid URL; parsing it cannot fail.
        #[allow(clippy::unwrap_used)]
        let base_url = Url::parse(DEFAULT_BASE_URL).unwrap();
        Self::new(base_url)
    }
}

#[async_trait]
impl PersonSource for RandomUserClient {
    #[instrument(skip(self))]
    async fn fetch_people(&self, count: usize) -> Result<Vec<GeneratedPerson>, BackendError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[
                ("results", count.to_string().as_str()),
                ("inc", INCLUDED_FIELDS),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: RandomUserResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        debug!(count = body.results.len(), "fetched synthetic people");

        body.results
            .into_iter()
            .map(RandomUser::into_person)
            .collect()
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct RandomUserResponse {
    results: Vec<RandomUser>,
}

#[derive(Debug, Deserialize)]
struct RandomUser {
    name: WireName,
    email: String,
    phone: String,
    picture: WirePicture,
    location: WireLocation,
    dob: WireDob,
}

#[derive(Debug, Deserialize)]
struct WireName {
    first: String,
    last: String,
}

#[derive(Debug, Deserialize)]
struct WirePicture {
    large: String,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    street: WireStreet,
    city: String,
}

#[derive(Debug, Deserialize)]
struct WireStreet {
    number: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireDob {
    /// ISO-8601 date-time string.
    date: String,
}

impl RandomUser {
    fn into_person(self) -> Result<GeneratedPerson, BackendError> {
        let birthday = DateTime::parse_from_rfc3339(&self.dob.date)
            .map_err(|e| BackendError::Decode(format!("invalid dob.date {:?}: {e}", self.dob.date)))?
            .date_naive();

        Ok(GeneratedPerson {
            name: format!("{} {}", self.name.first, self.name.last),
            email: self.email,
            phone: self.phone,
            avatar_url: self.picture.large,
            address: format!(
                "{} {}, {}",
                self.location.street.number, self.location.street.name, self.location.city
            ),
            birthday: Some(birthday),
        })
    }
}
