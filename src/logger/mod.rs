//! Logger module
//!
//! Provides logging utilities for the edge server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error, warning and store fault logging
//! - File-based logging with reopen support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::assets::AssetManifest;
use crate::config::Config;
use crate::store::StoreError;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, manifest: &AssetManifest) {
    write_info("======================================");
    write_info("Edge server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    write_info(&format!(
        "Content store: {} (listing limit {})",
        config.store.path, config.store.list_limit
    ));
    write_info(&format!(
        "Asset manifest: {} ({} patterns), index key: {}",
        manifest.version,
        manifest.len(),
        config.assets.index_key
    ));
    match &config.api.upstream {
        Some(upstream) => write_info(&format!("API {} -> {upstream}", config.api.prefix)),
        None => write_info(&format!("API {} has no upstream configured", config.api.prefix)),
    }
    let auth = if config.auth.basic_credentials().is_some() {
        "basic auth enabled"
    } else {
        "no auth required"
    };
    write_info(&format!("API auth: {auth}"));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_api_error(message: &str) {
    write_error(&format!("[API ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_store_fault(path: &str, err: &StoreError) {
    write_error(&format!("[STORE] Static file error for {path}: {err}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    match writer::get() {
        Some(w) => w.write_access(&entry.format(format)),
        None => println!("{}", entry.format(format)),
    }
}

pub fn log_signal(name: &str, action: &str) {
    write_info(&format!("[SIGNAL] {name} received: {action}"));
}

pub fn log_shutdown_started(active: usize) {
    write_info(&format!(
        "[Shutdown] Listener closed, waiting for {active} active connection(s)"
    ));
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        write_info("[Shutdown] All connections drained, exiting");
    } else {
        write_error(&format!(
            "[WARN] Shutdown timeout reached with {remaining} connection(s) still open"
        ));
    }
}
