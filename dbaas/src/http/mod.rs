//! The generic request/response pipeline.
//!
//! One parametrized [`query`](crate::Client::query) drives every call:
//! URL resolution, credential-mode selection, body encoding, a single
//! transport call, response parsing with text fallback, and non-2xx error
//! translation. Verb bindings and typed JSON helpers sit on top.

mod body;
mod options;
mod response;
mod verbs;

pub use body::RequestBody;
pub use options::{RequestOptions, ResponseKind};
pub use response::{FullResponse, Reply, ResponseBody};

pub(crate) use body::{file_form, multipart_form};
pub(crate) use response::{error_payload, parse_body};
