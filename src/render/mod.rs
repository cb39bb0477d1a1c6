//! Rendering module for writing outline results.

mod json;

pub use json::{to_json, write_json, JsonFormat};
