//! Procedural "crate unboxing" GIF synthesis.
//!
//! A request flows through four stages:
//!
//! - fetch and shrink item thumbnails ([`assets`])
//! - spin a decelerating carousel that lands on the won item ([`animation`])
//! - burst rarity-colored confetti and captions over the landing frame ([`render`])
//! - encode every frame in parallel and assemble one looping GIF ([`encode`])
//!
//! [`UnboxSession`] runs the whole flow; [`render_unboxing`] skips the network when thumbnails
//! are already in hand.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Carousel motion, rarity tiers and particle simulation.
pub mod animation;
/// Thumbnail fetching and preprocessing.
pub mod assets;
/// Serde configuration for every stage.
pub mod config;
/// Animated GIF encoding.
pub mod encode;
/// Frame composition.
pub mod render;
/// End-to-end unboxing API.
pub mod session;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgb8, Vec2};
pub use crate::foundation::error::{UnboxError, UnboxResult};

pub use crate::animation::carousel::{
    CarouselAnimator, CarouselFrames, SpinPlan, expanded_target, replicate_strip,
};
pub use crate::animation::rarity::{RarityTier, particle_density};
pub use crate::assets::acquire::acquire_thumbnails;
pub use crate::assets::fetch::{HttpFetcher, ThumbnailFetcher};
pub use crate::assets::thumbnail::{ThumbnailImage, thumbnail_from_bytes};
pub use crate::config::settings::{
    AcquireConfig, AnimationConfig, EncodeConfig, OverlayConfig, UnboxSettings,
};
pub use crate::encode::gif::{EncodedFrame, GifPipeline, frame_duration_ms};
pub use crate::render::frame::Frame;
pub use crate::render::overlay::{OverlayFrames, OverlayRequest, ParticleOverlay};
pub use crate::session::unboxing::{
    RenderParams, UnboxOutput, UnboxRequest, UnboxSession, render_unboxing,
};
