//! # Resource API
//!
//! HTTP implementation of the `ResourceClient` trait for the hackathon team service.

pub mod client;
pub mod jsonapi;

pub use client::HttpResourceClient;
