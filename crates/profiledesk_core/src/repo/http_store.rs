//! HTTP-backed profile store.
//!
//! # Responsibility
//! - Map the store contract onto the `/api/profile` JSON endpoint.
//! - Classify transport, status, and decode failures into `StoreError`.
//!
//! # Invariants
//! - No client-side timeout is configured; a hung request stays pending.
//! - Non-success bodies are surfaced verbatim as the server message.

use crate::config::{normalize_base_url, ConfigError};
use crate::model::entry::{Entry, EntryId};
use crate::model::profile::{Profile, ProfileScalars};
use crate::model::section::SectionKind;
use crate::repo::profile_store::{ProfileStore, StoreError, StoreResult};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Map, Value};
use std::fmt::Display;

const PROFILE_PATH: &str = "/api/profile";

/// Profile store speaking JSON over HTTP.
pub struct HttpProfileStore {
    http: Client,
    endpoint: String,
}

impl HttpProfileStore {
    /// Creates a store for `base_url`, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base = normalize_base_url(base_url)?;
        let http = Client::builder()
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;
        Ok(Self {
            http,
            endpoint: format!("{base}{PROFILE_PATH}"),
        })
    }

    /// Full URL of the profile resource.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> StoreResult<Response> {
        debug!("event=store_request module=store op={operation} status=start");
        let response = request.send().await.map_err(|err| {
            warn!("event=store_request module=store op={operation} status=error error_code=transport");
            StoreError::Transport(err.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = rejection_body(operation, response.text().await);
            warn!(
                "event=store_request module=store op={operation} status=error http_status={}",
                status.as_u16()
            );
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        debug!(
            "event=store_request module=store op={operation} status=ok http_status={}",
            status.as_u16()
        );
        Ok(response)
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn fetch_profile(&self) -> StoreResult<Profile> {
        let response = self
            .send("fetch_profile", self.http.get(&self.endpoint))
            .await?;
        response
            .json::<Profile>()
            .await
            .map_err(|err| StoreError::MalformedResponse(err.to_string()))
    }

    async fn replace_section(
        &self,
        section: SectionKind,
        entries: &[Entry],
    ) -> StoreResult<Vec<Entry>> {
        let mut body = Map::new();
        let list = serde_json::to_value(entries)
            .map_err(|err| StoreError::MalformedResponse(err.to_string()))?;
        body.insert(section.wire_name().to_string(), list);

        let response = self
            .send(
                "replace_section",
                self.http.put(&self.endpoint).json(&Value::Object(body)),
            )
            .await?;
        let payload = response
            .json::<Value>()
            .await
            .map_err(|err| StoreError::MalformedResponse(err.to_string()))?;
        canonical_section(section, payload)
    }

    async fn delete_item(&self, section: SectionKind, id: EntryId) -> StoreResult<()> {
        let body = json!({ "section": section.wire_name(), "id": id });
        self.send("delete_item", self.http.delete(&self.endpoint).json(&body))
            .await?;
        Ok(())
    }

    async fn replace_profile_scalars(&self, scalars: &ProfileScalars) -> StoreResult<()> {
        self.send(
            "replace_profile_scalars",
            self.http.put(&self.endpoint).json(scalars),
        )
        .await?;
        Ok(())
    }
}

/// Error body of a rejected request; an unreadable body becomes empty.
fn rejection_body(operation: &str, read: Result<String, impl Display>) -> String {
    read.unwrap_or_else(|err| {
        warn!(
            "event=store_request module=store op={operation} status=error error_code=body_read error={err}"
        );
        String::new()
    })
}

/// Extracts the canonical section list from a replace-section response.
///
/// Accepts either the whole updated profile or a bare list.
pub(crate) fn canonical_section(section: SectionKind, payload: Value) -> StoreResult<Vec<Entry>> {
    let list = match payload {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut object) => object.remove(section.wire_name()).ok_or_else(|| {
            StoreError::MalformedResponse(format!("response has no `{section}` list"))
        })?,
        other => {
            return Err(StoreError::MalformedResponse(format!(
                "expected profile object, got {other}"
            )))
        }
    };
    serde_json::from_value(list).map_err(|err| StoreError::MalformedResponse(err.to_string()))
}
