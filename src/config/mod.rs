//! Pipeline configuration.
//!
//! All sections are plain serde structs with defaults matching the stock 400x200 animation, so a
//! caller can load partial JSON and override only what it needs.

/// Settings structs and JSON loading.
pub mod settings;
