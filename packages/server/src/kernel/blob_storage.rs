// Vercel Blob client (public uploads)
//
// https://vercel.com/docs/storage/vercel-blob

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::BaseBlobStorage;

const BLOB_API_URL: &str = "https://blob.vercel-storage.com";
const BLOB_API_VERSION: &str = "7";

#[derive(Debug, Deserialize)]
struct PutBlobResponse {
    url: String,
}

pub struct VercelBlobStorage {
    client: Client,
    token: String,
}

impl VercelBlobStorage {
    pub fn new(token: String) -> Self {
        Self {
            client: Client::new(),
            token,
        }
    }
}

/// Upload URL for `key`; each `/`-separated segment is percent-encoded
fn blob_url(key: &str) -> Result<Url> {
    let mut url = Url::parse(BLOB_API_URL).context("Invalid blob API URL")?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Blob API URL cannot be a base"))?
        .clear()
        .extend(key.split('/'));
    Ok(url)
}

#[async_trait]
impl BaseBlobStorage for VercelBlobStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let url = blob_url(key)?;

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .header("x-api-version", BLOB_API_VERSION)
            .header("x-content-type", content_type)
            .header("x-add-random-suffix", "0")
            .body(bytes)
            .send()
            .await
            .context("Request to blob storage failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Blob storage returned {}: {}", status, body);
        }

        let put: PutBlobResponse = response
            .json()
            .await
            .context("Failed to parse blob storage response")?;

        Ok(put.url)
    }
}
