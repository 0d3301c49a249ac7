#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Outbound HTTP client infrastructure for the services.
//!
//! This crate provides a hyper-based HTTP client with:
//! - Connection pooling (one client per process, reused across requests)
//! - A fixed per-request timeout
//! - User-Agent header injection
//! - Lock-free concurrent use via an internal buffer (`Clone` is cheap)
//!
//! The client speaks plain HTTP: it exists for in-cluster calls to a peer
//! service, not for the public internet, so no TLS stack is wired in.
//!
//! # Example
//!
//! ```ignore
//! use svckit_http::HttpClient;
//! use std::time::Duration;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(5))
//!     .build()?;
//!
//! // reqwest-like API: response has body-reading methods
//! let data: MyData = client
//!     .get("http://aux-service:8000/version")
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod request;
mod response;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{DEFAULT_USER_AGENT, HttpClientConfig};
pub use error::{HttpError, InvalidUriKind};
pub use request::RequestBuilder;
pub use response::{HttpResponse, ResponseBody};
