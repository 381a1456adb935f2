//! Request handler module
//!
//! Responsible for request routing dispatch: the API namespace goes to the
//! gateway, everything else to static asset dispatch.

pub mod debug;
pub mod dispatch;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
