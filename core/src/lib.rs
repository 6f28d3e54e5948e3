//! Synchronous API client core for the FreshBooks accounting service.
//!
//! # Overview
//! Translates named operations ("create client", "find invoices", …) into
//! the FreshBooks request envelope and translates replies back, detecting
//! application failures embedded in HTTP 200 responses. Builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network
//! (host-does-IO pattern); the caller executes the actual HTTP round-trip.
//!
//! # Design
//! - `FreshbooksClient` is stateless — it holds only a `Config`.
//! - One shared `build_operation` / `parse_response` pair carries all the
//!   envelope and classification logic; the per-operation methods are thin
//!   wrappers over the static `CATALOG` table.
//! - Payloads and responses are untyped `serde_json` maps. The upstream
//!   schema is open-ended, so the core passes fields through unmodified.
//! - The upstream wire protocol is XML; rendering the mapping form to XML
//!   is the transport's concern. Everything in this crate, mock server
//!   included, exchanges the deserialized mapping form as JSON.

pub mod catalog;
pub mod classify;
pub mod client;
pub mod envelope;
pub mod error;
pub mod http;

pub use catalog::{CatalogEntry, Operation, CATALOG};
pub use classify::{classify, convert_transport_error};
pub use client::{Config, FreshbooksClient};
pub use envelope::build_request;
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse};
