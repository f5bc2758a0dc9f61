use std::ops::Range;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{UnboxError, UnboxResult};

/// Rarity classification of the unboxed item, lowest to highest.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RarityTier {
    /// Scores in `[0, 10)`.
    CommonLow,
    /// Scores in `[10, 50)`.
    Common,
    /// Scores in `[50, 83)`.
    Uncommon,
    /// Scores in `[83, 91)`.
    Rare,
    /// Scores in `[91, 97)`.
    Epic,
    /// Scores in `[97, 100)`.
    Legendary,
}

impl RarityTier {
    /// All tiers in ascending order.
    pub const ALL: [RarityTier; 6] = [
        Self::CommonLow,
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
    ];

    /// Classify a score in `[0, 100)`.
    pub fn from_score(score: f64) -> UnboxResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.score_range().contains(&score))
            .ok_or_else(|| {
                UnboxError::validation(format!("rarity score {score} is outside [0, 100)"))
            })
    }

    /// Half-open score range mapped to this tier.
    pub fn score_range(self) -> Range<f64> {
        match self {
            Self::CommonLow => 0.0..10.0,
            Self::Common => 10.0..50.0,
            Self::Uncommon => 50.0..83.0,
            Self::Rare => 83.0..91.0,
            Self::Epic => 91.0..97.0,
            Self::Legendary => 97.0..100.0,
        }
    }

    /// Position in the ascending order, starting at 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::CommonLow => "common-low",
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    /// Base confetti color. Particles vary around it.
    pub fn base_color(self) -> Rgb8 {
        match self {
            Self::CommonLow => Rgb8::new(176, 195, 217),
            Self::Common => Rgb8::new(94, 152, 217),
            Self::Uncommon => Rgb8::new(75, 105, 255),
            Self::Rare => Rgb8::new(136, 71, 255),
            Self::Epic => Rgb8::new(211, 44, 230),
            Self::Legendary => Rgb8::new(235, 75, 75),
        }
    }
}

/// Particle count for a rarity score: `floor(15 * score + 5)`.
pub fn particle_density(score: f64) -> UnboxResult<usize> {
    RarityTier::from_score(score)?;
    Ok((15.0 * score + 5.0).floor() as usize)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/rarity.rs"]
mod tests;
