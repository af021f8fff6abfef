//! Type definitions shared across crates
//!
//! - `language` - Language selection for user-visible messages

pub mod language;

pub use language::Language;
