//! HTTP module containing the client and the transport capability.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`transport`] - The [`Transport`] trait used for every GET in the pipeline
//!
//! # Examples
//!
//! ```rust,no_run
//! use mlbpipe::http::{create_http_client, HttpClientConfig, Transport};
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let url = Url::parse("http://gd2.mlb.com/components/game/mlb/")?;
//! let response = Transport::get(&client, &url).await?;
//! println!("{}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod transport;

pub use client::{create_http_client, HttpClientConfig, DEFAULT_USER_AGENT};
pub use transport::{BodyStream, Fetched, Transport};
