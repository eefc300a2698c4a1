//! HTTP client module for tripwise.
//!
//! This module provides the authenticated client for the travel backend
//! and the transport it sends requests through.

pub mod api;
pub mod transport;


pub use api::{Operation, TravelClient, DEFAULT_TOP_K};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
