mod client;
mod error;
mod resource;

pub use error::TrackerError;
pub use resource::*;

use client::Client;
use log::*;
use reqwest::Method;

const ENDPOINT: &str = "entries";

/// Responsible for asynchronous interaction with the entries store including
/// transformation of response data into explicitly-defined types.
///
/// Each call is a single request/response round trip with no retries.
#[derive(Clone)]
pub struct Tracker {
    client: Client,
}

impl Tracker {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str) -> Result<Tracker, TrackerError> {
        debug!("Initializing entries client for {}...", base_url);
        Ok(Tracker {
            client: Client::new(base_url)?,
        })
    }

    /// Returns the whole entries collection.
    ///
    pub async fn list(&self) -> Result<Vec<Entry>, TrackerError> {
        debug!("Requesting all entries...");
        let entries: Vec<Entry> = self
            .client
            .json(Method::GET, ENDPOINT, None::<&()>)
            .await?;
        debug!("Retrieved {} entries", entries.len());
        Ok(entries)
    }

    /// Submits a new entry and returns the stored record with its id.
    ///
    pub async fn create(&self, draft: &EntryDraft) -> Result<Entry, TrackerError> {
        debug!("Creating entry for '{}'...", draft.employee_name);
        self.client.json(Method::POST, ENDPOINT, Some(draft)).await
    }

    /// Replaces the entry at `id` and returns the updated record.
    ///
    pub async fn update(&self, id: &EntryId, entry: &Entry) -> Result<Entry, TrackerError> {
        debug!("Updating entry {}...", id);
        self.client
            .json(Method::PUT, &format!("{}/{}", ENDPOINT, id), Some(entry))
            .await
    }

    /// Removes the entry at `id`, returning the same id on success.
    ///
    pub async fn delete(&self, id: &EntryId) -> Result<EntryId, TrackerError> {
        debug!("Deleting entry {}...", id);
        self.client
            .call(Method::DELETE, &format!("{}/{}", ENDPOINT, id), None::<&()>)
            .await?;
        Ok(id.to_owned())
    }
}
