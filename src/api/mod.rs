//! Portal backend transport
//!
//! HTTP client, response envelope decoding and error mapping.

pub mod client;

pub use client::{ApiClient, EmptyBody, Envelope, Reply};
