#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
mod client;
pub mod errors;
mod http;
mod resource;
pub mod shape;

// --- PUBLIC API EXPORTS ---
// Transport
pub use client::core::{Client, ClientBuilder};
// Pipeline types
pub use http::{FullResponse, Reply, RequestBody, RequestOptions, ResponseBody, ResponseKind};
// Resource factory
pub use resource::{operation, Operation, OperationCall, Resource};

// Error and result
pub use errors::{BuildError, Error, ErrorPayload, RequestError, Result};

// Re-exports
pub use reqwest::{Method, StatusCode};
