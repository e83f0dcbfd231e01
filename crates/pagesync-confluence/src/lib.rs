//! Confluence gateway for pagesync.
//!
//! This crate provides the remote side of page synchronization:
//! - [`ConfluenceApi`]: the blocking operations the upload engine relies on
//! - [`ConfluenceClient`]: REST API client with token or basic authentication
//! - [`MockConfluence`]: in-memory server for tests (behind `mock` feature flag)
//!
//! # API Client
//!
//! ```ignore
//! use std::time::Duration;
//! use pagesync_confluence::{Auth, ConfluenceApi, ConfluenceClient};
//!
//! let client = ConfluenceClient::new(
//!     "https://confluence.example.com",
//!     Auth::Bearer("personal-access-token".to_owned()),
//!     Duration::from_secs(30),
//!     false,
//! );
//!
//! let pages = client.find_pages("DOCS", "Home", &["version"])?;
//! println!("Found {} page(s)", pages.len());
//! ```

// Gateway trait
mod api;
pub use api::ConfluenceApi;

// API client
mod client;
pub use client::{Auth, ConfluenceClient};

// In-memory gateway
#[cfg(any(test, feature = "mock"))]
mod mock;
#[cfg(any(test, feature = "mock"))]
pub use mock::{Call, MockAttachment, MockConfluence, MockPage};

// Wire types
pub mod types;

// Errors
mod error;
pub use error::ConfluenceError;
