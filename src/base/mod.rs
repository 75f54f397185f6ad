//! Base types and error handling.
//!
//! Provides the foundational error taxonomy for the resolver:
//! - [`NetError`](neterror::NetError): terminal resolution failures
//! - [`LookupError`](neterror::LookupError): system-resolver diagnostics

pub mod neterror;
