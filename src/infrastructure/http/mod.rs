//! HTTP client abstraction over the auth backend

mod client;

pub use client::{ApiClient, ReqwestApiClient};

#[cfg(test)]
pub use client::mock;
