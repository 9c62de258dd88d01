//! # tt-store-http
//!
//! `DocumentStore` over the document database's REST interface.
//!
//! A collection scan is a single
//! `GET {base_url}/collections/{collection}/documents` answered with
//! `{"documents": [{"id": "...", "fields": {...}}]}`. Field values are
//! passed through untouched; turning them into trips is the core's job.

use anyhow::Context;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tt_core::models::RawDocument;
use tt_core::traits::DocumentStore;

pub struct HttpDocumentStore {
    client: reqwest::Client,
    /// e.g. "https://docs.example.com/v1/projects/trip-together"
    base_url: String,
    api_key: Option<SecretString>,
}

#[derive(Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
}

impl HttpDocumentStore {
    /// `timeout` bounds the whole request, connect included.
    pub fn new(
        base_url: &str,
        api_key: Option<SecretString>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building document store client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/collections/{}/documents", self.base_url, collection)
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn list_documents(&self, collection: &str) -> anyhow::Result<Vec<RawDocument>> {
        let url = self.collection_url(collection);
        log::debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?
            .error_for_status()
            .with_context(|| format!("document store rejected {url}"))?;

        let body: ListDocumentsResponse = response
            .json()
            .await
            .with_context(|| format!("decoding documents from {url}"))?;

        Ok(body.documents)
    }
}
