//! Edge server for a debrid web client.
//!
//! Serves the single-page application out of a content store, resolving
//! stable asset paths to content-hashed keys, and forwards the API namespace
//! to the debrid backend.

pub mod api;
pub mod assets;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod store;
