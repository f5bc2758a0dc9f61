//! Request-level entry point tying acquisition, animation, overlay and encoding together.

/// `UnboxSession` and the offline `render_unboxing`.
pub mod unboxing;
