//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP exchanges as plain data. The core crate builds
//! `HttpRequest` values and parses `HttpResponse` values without ever
//! touching the network — the caller (host) is responsible for executing
//! the actual I/O. Every FreshBooks call is a POST to the single `xml-in`
//! endpoint, so requests carry no method field.
//!
//! All fields use owned types (`String`, `Vec`) so values can cross host
//! boundaries without lifetime concerns.

/// An HTTP POST request described as plain data.
///
/// Built by `FreshbooksClient::build_*` methods. The caller is responsible
/// for executing this request against the network and returning the
/// corresponding `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `FreshbooksClient::parse_response` for classification.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
