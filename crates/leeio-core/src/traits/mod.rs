//! Core traits for the leeio plugin
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`HttpClient`]: Shared outbound HTTP client handle
//! - [`DataSource`]: Read-only entity computed on each read

pub mod data_source;
pub mod http_client;

pub use data_source::{DataSource, DataSourceFactory};
pub use http_client::{ExchangeDump, FetchFailure, HttpClient};
