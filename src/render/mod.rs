//! Frame rasters, drawing primitives, captions and the celebration overlay.

/// Caption text rasterized through `usvg`/`resvg`.
pub mod caption;
/// Hard-edged shape filling and image pasting.
pub mod draw;
/// Immutable composed frames.
pub mod frame;
/// Particle burst and captions over the landing frame.
pub mod overlay;
