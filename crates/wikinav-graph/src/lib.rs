//! Wikinav Graph - Link graph backends
//!
//! This crate provides the remote MediaWiki backend (disambiguation
//! resolution, complete link listing, visible-link extraction) and an
//! in-memory backend for tests and offline fixtures.

pub mod api;
pub mod client;
pub mod config;
pub mod disambiguation;
pub mod error;
pub mod html;
pub mod memory;
pub mod visible;
pub mod wikipedia;

pub use client::WikiClient;
pub use config::WikiConfig;
pub use error::{GraphError, GraphResult};
pub use memory::MemoryLinkGraph;
pub use wikipedia::WikipediaGraph;
