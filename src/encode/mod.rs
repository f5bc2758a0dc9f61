//! GIF encoding: parallel per-frame compression, serial ordered assembly.

/// Animated GIF pipeline built on the `gif` crate.
pub mod gif;
