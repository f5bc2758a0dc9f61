//! Spin easing, carousel layout, rarity tiers and the confetti simulation.

/// Carousel strip layout and spin frame generation.
pub mod carousel;
/// Deceleration curve of the spin.
pub mod ease;
/// Confetti burst simulation.
pub mod particles;
/// Rarity tiers, their colors and particle density.
pub mod rarity;
