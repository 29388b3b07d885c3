// Copyright (c) Walrus Foundation
// SPDX-License-Identifier: Apache-2.0

//! Client for the Walrus publisher and aggregator HTTP APIs.

use std::path::Path;

use bytes::Bytes;
use futures::{Stream, TryStream};
use reqwest::{Body, Client, Response, Url, header::CONTENT_TYPE};
use serde::Serialize;
use tokio::{fs::File, io::AsyncWriteExt};
use tokio_util::io::ReaderStream;

use crate::{
    error::{BuildErrorKind, ClientBuildError, ClientError, ClientResult},
    responses::{BlobMetadata, BlobStoreResponse},
};

/// Options for storing a blob on the publisher.
///
/// Fields left at `None` are omitted from the request entirely, letting the
/// publisher apply its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreOptions {
    /// The encoding type to use for the blob.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_type: Option<String>,
    /// The number of epochs, ahead of the current one, for which to store the
    /// blob.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epochs: Option<u32>,
    /// If true, the publisher creates a deletable blob instead of a permanent
    /// one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletable: Option<bool>,
    /// If specified, the publisher sends the Blob object resulting from the
    /// store operation to this Sui address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_object_to: Option<String>,
}

/// A client for the Walrus publisher and aggregator HTTP APIs.
///
/// Blobs are stored through the publisher and read back through the
/// aggregator; each operation is a single request/response exchange. The
/// client holds no state besides its two immutable base URLs, so it is cheap
/// to clone and safe to share across tasks. Retries, timeouts, and connection
/// pooling are the underlying [`reqwest::Client`]'s concern; inject a
/// preconfigured one through [`WalrusClient::builder`] to control them.
#[derive(Debug, Clone)]
pub struct WalrusClient {
    client: Client,
    publisher_url: Url,
    aggregator_url: Url,
}

impl WalrusClient {
    /// Creates a new client from the publisher and aggregator base URLs.
    ///
    /// Fails if either URL cannot be parsed or lacks a scheme or host.
    pub fn new(publisher_url: &str, aggregator_url: &str) -> Result<Self, ClientBuildError> {
        Self::builder().build(publisher_url, aggregator_url)
    }

    /// Returns a builder to construct a client with a custom HTTP client.
    pub fn builder() -> WalrusClientBuilder {
        WalrusClientBuilder::default()
    }

    /// Stores a blob on the publisher.
    ///
    /// On success, returns the publisher's JSON response unmodified.
    pub async fn store_blob(
        &self,
        blob: impl Into<Bytes>,
        options: &StoreOptions,
    ) -> ClientResult<BlobStoreResponse> {
        self.send_store_request(Body::from(blob.into()), options)
            .await
    }

    /// Stores a blob read from the file at `path`.
    ///
    /// The file is streamed to the publisher rather than buffered in memory;
    /// the handle is scoped to this call and closed when the upload finishes
    /// or fails.
    pub async fn store_blob_from_file(
        &self,
        path: impl AsRef<Path>,
        options: &StoreOptions,
    ) -> ClientResult<BlobStoreResponse> {
        let file = File::open(path.as_ref()).await?;
        self.store_blob_from_stream(ReaderStream::new(file), options)
            .await
    }

    /// Stores a blob read from a stream of byte chunks.
    ///
    /// The stream is forwarded as a chunked request body without being fully
    /// materialized in memory.
    pub async fn store_blob_from_stream<S>(
        &self,
        stream: S,
        options: &StoreOptions,
    ) -> ClientResult<BlobStoreResponse>
    where
        S: TryStream + Send + 'static,
        S::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
        Bytes: From<S::Ok>,
    {
        self.send_store_request(Body::wrap_stream(stream), options)
            .await
    }

    /// Reads a blob from the aggregator by its blob ID, returning the full
    /// body.
    pub async fn read_blob(&self, blob_id: &str) -> ClientResult<Bytes> {
        let response = self.get_blob_response(blob_id).await?;
        Ok(response.bytes().await?)
    }

    /// Reads a blob from the aggregator by the Sui object ID of its Blob
    /// object.
    pub async fn read_blob_by_object_id(&self, object_id: &str) -> ClientResult<Bytes> {
        let url = self.blobs_url(&self.aggregator_url, &["by-object-id", object_id]);
        tracing::debug!(url = %url, "reading blob by object ID");
        let response = check_status(self.client.get(url).send().await?).await?;
        Ok(response.bytes().await?)
    }

    /// Reads a blob from the aggregator and writes it to a newly created file
    /// at `path`.
    ///
    /// The body is streamed to the file chunk by chunk. If the transfer fails
    /// partway through, the partially written file is left in place; callers
    /// that need atomicity should download to a temporary path and rename.
    pub async fn read_blob_to_file(
        &self,
        blob_id: &str,
        path: impl AsRef<Path>,
    ) -> ClientResult<()> {
        let mut response = self.get_blob_response(blob_id).await?;
        let mut file = File::create(path.as_ref()).await?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        Ok(())
    }

    /// Reads a blob from the aggregator, returning the raw response body as a
    /// stream of byte chunks.
    ///
    /// The stream is handed over unconsumed; ownership transfers to the
    /// caller, and dropping it releases the connection. This is the one
    /// operation where the client does not manage the response's lifetime.
    pub async fn read_blob_stream(
        &self,
        blob_id: &str,
    ) -> ClientResult<impl Stream<Item = reqwest::Result<Bytes>> + Send + use<>> {
        let response = self.get_blob_response(blob_id).await?;
        Ok(response.bytes_stream())
    }

    /// Retrieves the header-derived metadata of a blob through a HEAD request,
    /// without transferring the blob body.
    pub async fn blob_metadata(&self, blob_id: &str) -> ClientResult<BlobMetadata> {
        let url = self.blobs_url(&self.aggregator_url, &[blob_id]);
        tracing::debug!(url = %url, "probing blob metadata");
        let response = check_status(self.client.head(url).send().await?).await?;
        Ok(BlobMetadata::new(response.headers().clone()))
    }

    async fn send_store_request(
        &self,
        body: Body,
        options: &StoreOptions,
    ) -> ClientResult<BlobStoreResponse> {
        let url = self.blobs_url(&self.publisher_url, &[]);
        tracing::debug!(url = %url, "storing blob on the publisher");
        let response = self
            .client
            .put(url)
            .query(options)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn get_blob_response(&self, blob_id: &str) -> ClientResult<Response> {
        let url = self.blobs_url(&self.aggregator_url, &[blob_id]);
        tracing::debug!(url = %url, "reading blob from the aggregator");
        check_status(self.client.get(url).send().await?).await
    }

    /// Builds `{base}/v1/blobs[/{segments}]`, percent-encoding each segment.
    fn blobs_url(&self, base: &Url, segments: &[&str]) -> Url {
        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .expect("base URLs are validated at construction");
            path.pop_if_empty();
            path.extend(["v1", "blobs"]);
            path.extend(segments);
        }
        url
    }
}

/// Returns the response if its status is in the success range; otherwise reads
/// the body and converts it into a [`ClientError`].
async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    tracing::debug!(%status, body_len = body.len(), "the service returned an error response");
    Err(ClientError::from_error_response(status, body))
}

/// Builder for a [`WalrusClient`].
#[derive(Debug, Default)]
pub struct WalrusClientBuilder {
    client: Option<Client>,
}

impl WalrusClientBuilder {
    /// Uses the given [`reqwest::Client`] for all requests.
    ///
    /// Timeouts, proxies, TLS, and pooling are configured on that client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the client, validating both base URLs.
    pub fn build(
        self,
        publisher_url: &str,
        aggregator_url: &str,
    ) -> Result<WalrusClient, ClientBuildError> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder().build().map_err(ClientBuildError::reqwest)?,
        };
        Ok(WalrusClient {
            client,
            publisher_url: parse_base_url("publisher", publisher_url)?,
            aggregator_url: parse_base_url("aggregator", aggregator_url)?,
        })
    }
}

fn parse_base_url(role: &'static str, url: &str) -> Result<Url, ClientBuildError> {
    let parsed =
        Url::parse(url).map_err(|source| BuildErrorKind::InvalidUrl { role, source })?;
    if parsed.cannot_be_a_base() || !parsed.has_host() {
        return Err(BuildErrorKind::MissingHost { role }.into());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> WalrusClient {
        WalrusClient::new("http://publisher.local", "http://aggregator.local/")
            .expect("valid base URLs")
    }

    fn store_query(options: &StoreOptions) -> Option<String> {
        let client = test_client();
        let url = client.blobs_url(&client.publisher_url, &[]);
        let request = Client::new()
            .put(url)
            .query(options)
            .build()
            .expect("request should build");
        request.url().query().map(str::to_owned)
    }

    #[test]
    fn absent_options_are_omitted_from_the_query() {
        assert_eq!(store_query(&StoreOptions::default()), None);
    }

    #[test]
    fn present_options_appear_exactly_once() {
        let options = StoreOptions {
            encoding_type: Some("RS2".to_owned()),
            epochs: Some(5),
            deletable: Some(true),
            send_object_to: Some("0x42".to_owned()),
        };
        assert_eq!(
            store_query(&options).as_deref(),
            Some("encoding_type=RS2&epochs=5&deletable=true&send_object_to=0x42")
        );
    }

    #[test]
    fn partial_options_only_include_present_fields() {
        let options = StoreOptions {
            epochs: Some(1),
            deletable: Some(false),
            ..Default::default()
        };
        assert_eq!(
            store_query(&options).as_deref(),
            Some("epochs=1&deletable=false")
        );
    }

    #[test]
    fn option_values_are_url_encoded() {
        let options = StoreOptions {
            encoding_type: Some("a b&c".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            store_query(&options).as_deref(),
            Some("encoding_type=a+b%26c")
        );
    }

    #[test]
    fn trailing_slashes_do_not_change_request_urls() {
        let client = test_client();
        let url = client.blobs_url(&client.publisher_url, &[]);
        assert_eq!(url.as_str(), "http://publisher.local/v1/blobs");
        let url = client.blobs_url(&client.aggregator_url, &["some-blob-id"]);
        assert_eq!(url.as_str(), "http://aggregator.local/v1/blobs/some-blob-id");
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let client = test_client();
        let url = client.blobs_url(&client.aggregator_url, &["by-object-id", "a/b?c"]);
        assert_eq!(
            url.as_str(),
            "http://aggregator.local/v1/blobs/by-object-id/a%2Fb%3Fc"
        );
    }

    #[test]
    fn construction_rejects_invalid_urls() {
        assert!(WalrusClient::new("", "http://aggregator.local").is_err());
        assert!(WalrusClient::new("http://publisher.local", "not a url").is_err());
        assert!(WalrusClient::new("data:text/plain,hi", "http://aggregator.local").is_err());
    }
}
