//! The GET capability used by discovery and the fetcher.
//!
//! Everything above this module only needs a status code and a body stream,
//! so the network can be swapped for an in-memory double in tests.

use crate::error::{Error, Result};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use reqwest::{StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use tracing::debug;

/// Response body, delivered chunk by chunk.
pub type BodyStream = BoxStream<'static, Result<Bytes>>;

/// Status and body of a GET response.
pub struct Fetched {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body. Not read until polled.
    pub body: BodyStream,
}

impl Fetched {
    /// Whether the status is in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Read the whole body into memory.
    pub async fn bytes(self) -> Result<Vec<u8>> {
        self.body
            .try_fold(Vec::new(), |mut buf, chunk| async move {
                buf.extend_from_slice(&chunk);
                Ok(buf)
            })
            .await
    }
}

impl fmt::Debug for Fetched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetched")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Issues GET requests.
///
/// Implementations return `Err` only when no response was obtained at all;
/// any HTTP status, including errors, comes back as a [`Fetched`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url`.
    async fn get(&self, url: &Url) -> Result<Fetched>;
}

#[async_trait]
impl Transport for ClientWithMiddleware {
    async fn get(&self, url: &Url) -> Result<Fetched> {
        debug!("Fetching {}", url);
        let res = ClientWithMiddleware::get(self, url.clone()).send().await?;
        let status = res.status();
        let body = res
            .bytes_stream()
            .map(|chunk| chunk.map_err(Error::from))
            .boxed();

        Ok(Fetched { status, body })
    }
}
