#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! aux-service: the internal AWS facade.
//!
//! Exposes a normalized read-only HTTP view over two AWS collections (S3
//! buckets and SSM Parameter Store parameters) and translates provider
//! failures into a uniform problem+json error contract. The public gateway
//! (`main-api`) is its only intended caller.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
