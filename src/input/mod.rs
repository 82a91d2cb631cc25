//! Record input.
//!
//! Reads the records of a run from a JSONL file, one record per line:
//!
//! ```text
//! {"type": "shared_text", "ref": "c1", "contents": "app.views.index", "kind": "callable"}
//! {"type": "feature", "ref": "f1", "name": "always-via-format-string"}
//! ```
//!
//! Entities are named with `ref`; other records point at them by that name.

mod document;
mod jsonl;

pub use jsonl::{load_records, parse_records};
