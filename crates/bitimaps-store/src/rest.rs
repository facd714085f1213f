//! REST client for the hosted tables.
//!
//! The backend exposes a generic table surface: `select=*` reads,
//! `id=eq.{id}` updates/deletes, and equality/null predicates. Reads are
//! routed through the offline cache (network-first) when one is attached.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use bitimaps_model::{
    Assignment, AssignmentCompletion, NewAssignment, NewPublisher, NewTerritory, Publisher,
    PublisherPatch, Result, StoreError, Territory, TerritoryPatch, TerritoryStatus,
};

use crate::cache::{OfflineCache, Partition, Strategy};
use crate::store::DataStore;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the hosted data store.
pub struct RestStore {
    client: Client,
    base_url: String,
    anon_key: String,
    cache: Option<OfflineCache>,
}

impl RestStore {
    /// Build a client for the given project base URL and anon key.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| StoreError::Network(error.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            cache: None,
        })
    }

    /// Attach an offline cache; reads become network-first-fall-back-to-cache.
    #[must_use]
    pub fn with_cache(mut self, cache: OfflineCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
    }

    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .unwrap_or_else(|_| status.to_string());
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let fetch = || -> Result<Vec<u8>> {
            debug!(url, "GET");
            let response = self
                .authorize(self.client.get(url))
                .send()
                .map_err(|error| StoreError::Network(error.to_string()))?;
            let response = Self::check(response)?;
            let bytes = response
                .bytes()
                .map_err(|error| StoreError::Network(error.to_string()))?;
            Ok(bytes.to_vec())
        };
        match &self.cache {
            Some(cache) => cache.fetch(Partition::Api, Strategy::NetworkFirst, url, fetch),
            None => fetch(),
        }
    }

    fn select_all<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>> {
        let url = format!("{}?select=*", self.table_url(table));
        let bytes = self.get_bytes(&url)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn insert_returning<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.table_url(table);
        debug!(url, "POST");
        let response = self
            .authorize(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .map_err(|error| StoreError::Network(error.to_string()))?;
        let response = Self::check(response)?;
        let mut rows: Vec<T> = response
            .json()
            .map_err(|error| StoreError::Json(error.to_string()))?;
        rows.pop().ok_or_else(|| StoreError::Api {
            status: 200,
            message: format!("insert into {table} returned no rows"),
        })
    }

    fn patch_by_id<B: Serialize>(&self, table: &str, id: i64, body: &B) -> Result<()> {
        let url = format!("{}?id=eq.{}", self.table_url(table), id);
        debug!(url, "PATCH");
        let response = self
            .authorize(self.client.patch(&url))
            .json(body)
            .send()
            .map_err(|error| StoreError::Network(error.to_string()))?;
        Self::check(response)?;
        Ok(())
    }

    fn delete_by_id(&self, table: &str, id: i64) -> Result<()> {
        let url = format!("{}?id=eq.{}", self.table_url(table), id);
        debug!(url, "DELETE");
        let response = self
            .authorize(self.client.delete(&url))
            .send()
            .map_err(|error| StoreError::Network(error.to_string()))?;
        Self::check(response)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct StatusPatch {
    status: TerritoryStatus,
}

impl DataStore for RestStore {
    fn territories(&self) -> Result<Vec<Territory>> {
        self.select_all("territories")
    }

    fn publishers(&self) -> Result<Vec<Publisher>> {
        self.select_all("publishers")
    }

    fn assignments(&self) -> Result<Vec<Assignment>> {
        self.select_all("assignments")
    }

    fn insert_territory(&self, row: &NewTerritory) -> Result<Territory> {
        self.insert_returning("territories", row)
    }

    fn update_territory(&self, id: i64, patch: &TerritoryPatch) -> Result<()> {
        self.patch_by_id("territories", id, patch)
    }

    fn set_territory_status(&self, id: i64, status: TerritoryStatus) -> Result<()> {
        self.patch_by_id("territories", id, &StatusPatch { status })
    }

    fn delete_territory(&self, id: i64) -> Result<()> {
        self.delete_by_id("territories", id)
    }

    fn insert_publisher(&self, row: &NewPublisher) -> Result<Publisher> {
        self.insert_returning("publishers", row)
    }

    fn update_publisher(&self, id: i64, patch: &PublisherPatch) -> Result<()> {
        self.patch_by_id("publishers", id, patch)
    }

    fn delete_publisher(&self, id: i64) -> Result<()> {
        self.delete_by_id("publishers", id)
    }

    fn insert_assignment(&self, row: &NewAssignment) -> Result<Assignment> {
        self.insert_returning("assignments", row)
    }

    fn complete_assignment(&self, id: i64, completion: &AssignmentCompletion) -> Result<()> {
        self.patch_by_id("assignments", id, completion)
    }

    fn find_open_assignment(&self, territory_id: i64) -> Result<Option<Assignment>> {
        let url = format!(
            "{}?select=*&territory_id=eq.{}&completion_date=is.null",
            self.table_url("assignments"),
            territory_id
        );
        let bytes = self.get_bytes(&url)?;
        let mut rows: Vec<Assignment> = serde_json::from_slice(&bytes)?;
        rows.sort_by(|a, b| (a.start_date.as_str(), a.id).cmp(&(b.start_date.as_str(), b.id)));
        Ok(rows.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_urls() {
        let store = RestStore::new("https://project.supabase.co/", "anon").expect("client");
        assert_eq!(
            store.table_url("territories"),
            "https://project.supabase.co/rest/v1/territories"
        );
    }
}
