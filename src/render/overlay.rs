use rand::Rng;

use crate::animation::particles::{BurstSpec, ParticleField};
use crate::animation::rarity::{RarityTier, particle_density};
use crate::config::settings::OverlayConfig;
use crate::foundation::core::Rgb8;
use crate::foundation::error::UnboxResult;
use crate::render::caption::{CaptionSpec, rasterize_captions};
use crate::render::draw;
use crate::render::frame::Frame;

/// Inputs for the celebration overlay.
#[derive(Clone, Debug)]
pub struct OverlayRequest<'a> {
    /// Final carousel frame the overlay is drawn over.
    pub base: &'a Frame,
    /// Item rarity score in `[0, 100)`.
    pub rarity_score: f64,
    /// Caption shown at the bottom.
    pub win_label: &'a str,
    /// Number of frames to produce.
    pub extension_frames: usize,
}

/// Result of the overlay phase.
#[derive(Clone, Debug)]
pub struct OverlayFrames {
    /// Overlay frames in display order.
    pub frames: Vec<Frame>,
    /// Tier resolved from the rarity score.
    pub tier: RarityTier,
    /// Number of particles simulated.
    pub particles: usize,
}

/// Confetti burst plus captions composited over the landing frame.
pub struct ParticleOverlay<'a> {
    cfg: &'a OverlayConfig,
}

impl<'a> ParticleOverlay<'a> {
    /// Wrap an overlay config.
    pub fn new(cfg: &'a OverlayConfig) -> UnboxResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Caption spec for a win label.
    pub fn captions(&self, win_label: &str) -> CaptionSpec {
        CaptionSpec {
            top: self.cfg.headline.clone(),
            bottom: win_label.to_string(),
            font_size: self.cfg.font_size,
            font_family: self.cfg.font_family.clone(),
            fill: Rgb8::new(255, 255, 255),
            outline: Rgb8::new(0, 0, 0),
        }
    }

    /// Simulate and draw `req.extension_frames` overlay frames.
    ///
    /// The rarity score is resolved before anything is drawn; an out-of-range score fails the
    /// whole call.
    #[tracing::instrument(skip_all, fields(rarity = req.rarity_score, frames = req.extension_frames))]
    pub fn render<R: Rng + ?Sized>(
        &self,
        req: &OverlayRequest<'_>,
        rng: &mut R,
    ) -> UnboxResult<OverlayFrames> {
        let tier = RarityTier::from_score(req.rarity_score)?;
        let count = particle_density(req.rarity_score)?;
        let canvas = req.base.canvas();

        let captions = rasterize_captions(canvas, &self.captions(req.win_label))?;
        let mut field = ParticleField::spawn(
            canvas,
            BurstSpec::for_tier(tier, count, self.cfg.color_spread, self.cfg.gravity),
            rng,
        );

        let mut frames = Vec::with_capacity(req.extension_frames);
        for _ in 0..req.extension_frames {
            field.step();
            let mut img = req.base.to_image();
            for p in field.particles() {
                draw::fill_circle(&mut img, p.pos, self.cfg.particle_radius, p.color);
            }
            draw::paste(&mut img, &captions, 0, 0);
            frames.push(Frame::new(img));
        }

        tracing::debug!(tier = tier.name(), particles = count, "overlay frames composed");
        Ok(OverlayFrames {
            frames,
            tier,
            particles: count,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
