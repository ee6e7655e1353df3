//! Blocking REST client for the staffing backend.

pub mod client;

pub use client::{ApiClient, Method, RawResponse};
