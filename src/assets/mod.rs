//! Asset index module
//!
//! Binds the stable paths a browser requests (`/assets/index-B-8WjzM4.js`,
//! `/favicon.ico`) to the content-hashed keys a build uploads to the store.

mod manifest;
mod resolver;

pub use manifest::{AssetManifest, AssetPattern, ManifestError};
pub use resolver::is_asset_path;
