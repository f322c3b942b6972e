//! # eventsure-gateway
//!
//! REST gateway for a parametric-insurance product: insurance episodes,
//! the risk pools that fund them, the transaction feed and aggregate
//! statistics. On-chain episode contracts are read through a block
//! explorer and user/episode associations live in a hosted database.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── Services (service/)
//!     │
//!     ├── In-memory repositories (repository/, domain/)
//!     ├── BlockExplorer → Etherscan (chain/)
//!     └── TableStore → Supabase REST (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod chain;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod repository;
pub mod seed;
pub mod service;
