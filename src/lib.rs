//! # MealDB MCP Library
//!
//! This library provides recipe lookup over the TheMealDB catalog through the
//! Model Context Protocol (MCP). It consists of these components:
//!
//! ## Client Module
//!
//! The [`client`] module provides a read-only HTTP client for the catalog API.
//! Failures are logged and reported as empty results.
//!
//! ## Filter Module
//!
//! The [`filter`] module combines region, category, ingredient and name facets
//! into one result list, since the catalog only filters on one facet at a time.
//!
//! ## Render and Session Modules
//!
//! [`render`] turns records into cards and detail views; [`session`] holds the
//! results of the latest search for one connection.
//!
//! ## Server Module
//!
//! The [`server`] module exposes all of the above as MCP tools.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcp_mealdb::{FacetSelection, MealDbClient, MealDbMcpServer};
//! use mcp_mealdb::filter::aggregate;
//!
//! # async fn example() {
//! let client = MealDbClient::new("https://www.themealdb.com/api/json/v1/1".to_string());
//! let selection = FacetSelection::default().with_region("Italian").with_category("Seafood");
//! let found = aggregate(&client, &selection).await;
//! println!("Found {} recipes", found.meals().len());
//!
//! // Or create an MCP server
//! let _server = MealDbMcpServer::new("https://www.themealdb.com/api/json/v1/1".to_string());
//! # }
//! ```

pub mod client;
pub mod config;
pub mod filter;
pub mod render;
pub mod server;
pub mod session;

pub use client::MealDbClient;
pub use filter::FacetSelection;
pub use server::MealDbMcpServer;
