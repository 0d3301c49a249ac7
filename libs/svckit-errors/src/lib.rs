//! Error response types shared by both services.
//!
//! This crate carries the RFC 9457 Problem Details model (`Problem`) as pure
//! data, with an optional `axum` feature for direct use as an HTTP response.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod problem;

pub use problem::{APPLICATION_PROBLEM_JSON, Problem};
