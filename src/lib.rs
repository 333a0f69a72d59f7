//! # Storefront
//!
//! A small product-catalog service: two JSON resources (categories and
//! products) over SQLite, plus the client-side view models of the
//! storefront pages — the listing with search/filter and the product
//! creation form with its composite category field.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  View models │──▶│  HTTP API    │──▶│ CatalogStore │
//! │ listing/form │   │   (axum)     │   │   (SQLite)   │
//! └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! storefront init                       # create database
//! storefront seed                       # insert sample catalog
//! storefront serve                      # start the JSON API
//! storefront list --search mango        # filtered listing
//! storefront add --name "Pad See Ew" \
//!   --description "Stir-fried wide noodles" \
//!   --price 110 --category "Main Dishes"
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`store`] | Storage abstraction (SQLite + in-memory) |
//! | [`server`] | Catalog HTTP server |
//! | [`client`] | HTTP API client used by the view models |
//! | [`listing`] | Listing view model (search + category filter) |
//! | [`form`] | Product creation form model |
//! | [`seed`] | Out-of-band seed routine |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod client;
pub mod config;
pub mod db;
pub mod form;
pub mod listing;
pub mod migrate;
pub mod models;
pub mod seed;
pub mod server;
pub mod store;
