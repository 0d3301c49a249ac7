#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! main-api: the public aggregating gateway.
//!
//! Mirrors the aux-service facade's operations, proxying each request over
//! one shared connection-pooled HTTP client, and wraps every successful
//! response in an envelope carrying both services' versions. Facade errors
//! are relayed verbatim; a failed version lookup degrades to a sentinel
//! instead of failing the request.

pub mod api;
pub mod config;
pub mod domain;
