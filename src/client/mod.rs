//! # TheMealDB HTTP Client
//!
//! This module provides a read-only HTTP client for the TheMealDB recipe catalog:
//! the list endpoints that populate facet choices, server-side filtering by a
//! single facet, name search, lookup by id and a random pick.
//!
//! ## Modules
//!
//! - [`client`] - HTTP client implementation with one method per catalog endpoint
//! - [`types`] - Wire envelope and recipe records
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcp_mealdb::client::{FilterFacet, MealDbClient, DEFAULT_BASE_URL};
//!
//! # async fn example() {
//! let client = MealDbClient::new(DEFAULT_BASE_URL.to_string());
//!
//! let ids = client.filter_ids(FilterFacet::Area, "Italian").await;
//! println!("Found {} Italian recipes", ids.len());
//! # }
//! ```

#[allow(clippy::module_inception)]
pub mod client;
pub mod types;

pub use client::{FilterFacet, MealDbClient, DEFAULT_BASE_URL};
pub use types::*;
