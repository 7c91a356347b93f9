//! Data-shaping utilities.
//!
//! Pure helpers the pipeline and resource layers compose into per-call
//! data transforms: object flattening, dotted-path access, declarative
//! template projection, string casing, and a debouncer. All functions are
//! referentially transparent (identical inputs, identical outputs); only
//! [`Debounce`] owns state, and that is a timer handle, not data.

mod debounce;
mod flatten;
mod path;
mod template;
mod text;

pub use debounce::Debounce;
pub use flatten::flatten;
pub use path::{dotted_path, is_truthy, path_or_path, path_to};
pub use template::{project, Template};
pub use text::kebab_case;
