//! # Actix Middleware Library
//!
//! Shared middleware for the blog's Actix services
//!
//! ## Modules
//! - `request_trace`: Request id propagation and access logging
//! - `security_headers`: Baseline browser hardening headers

pub mod request_trace;
pub mod security_headers;

pub use request_trace::{request_id, RequestId, RequestTrace, REQUEST_ID_HEADER};
pub use security_headers::SecurityHeaders;
