use rand::Rng;

use crate::animation::rarity::RarityTier;
use crate::foundation::core::{Canvas, Point, Rgb8, Vec2};

/// One confetti particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in frame pixels.
    pub pos: Point,
    /// Velocity in pixels per frame.
    pub vel: Vec2,
    /// Fill color.
    pub color: Rgb8,
}

impl Particle {
    /// Advance one frame: integrate, apply gravity, then wrap into the canvas.
    pub fn step(&mut self, gravity: f64, canvas: Canvas) {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.pos.x = wrap(self.pos.x, f64::from(canvas.width));
        self.pos.y = wrap(self.pos.y, f64::from(canvas.height));
    }
}

/// Euclidean modulo into `[0, len)`.
fn wrap(v: f64, len: f64) -> f64 {
    let w = v.rem_euclid(len);
    // rem_euclid can round up to exactly `len` for tiny negative inputs.
    if w >= len { 0.0 } else { w }
}

/// Launch parameters for a burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstSpec {
    /// Number of particles.
    pub count: usize,
    /// Base color every particle varies around.
    pub base_color: Rgb8,
    /// Maximum per-channel color deviation.
    pub color_spread: i32,
    /// Added to vertical velocity every step.
    pub gravity: f64,
}

impl BurstSpec {
    /// Burst for a rarity tier with an explicit particle count.
    pub fn for_tier(tier: RarityTier, count: usize, color_spread: i32, gravity: f64) -> Self {
        Self {
            count,
            base_color: tier.base_color(),
            color_spread,
            gravity,
        }
    }
}

/// Fixed population of particles living for the whole overlay.
#[derive(Clone, Debug)]
pub struct ParticleField {
    canvas: Canvas,
    gravity: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Spawn `spec.count` particles at the launch point, drawing every random value from `rng`.
    ///
    /// Launch point is horizontal center, 90% down the frame. Horizontal speed is uniform in
    /// `[-6, 6]`, vertical in `[-10, -6]` (upwards).
    pub fn spawn<R: Rng + ?Sized>(canvas: Canvas, spec: BurstSpec, rng: &mut R) -> Self {
        let origin = Point::new(
            f64::from(canvas.width) / 2.0,
            f64::from(canvas.height) / 2.0 + f64::from(canvas.height) * 0.4,
        );
        let particles = (0..spec.count)
            .map(|_| Particle {
                pos: origin,
                vel: Vec2::new(rng.gen_range(-6.0..=6.0), rng.gen_range(-10.0..=-6.0)),
                color: similar_color(spec.base_color, spec.color_spread, rng),
            })
            .collect();

        Self {
            canvas,
            gravity: spec.gravity,
            particles,
        }
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.step(self.gravity, self.canvas);
        }
    }

    /// Current particle states.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles (constant for the field's lifetime).
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// `true` when the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// `base` with an independent uniform offset in `[-spread, spread]` per channel, clamped.
pub fn similar_color<R: Rng + ?Sized>(base: Rgb8, spread: i32, rng: &mut R) -> Rgb8 {
    let spread = spread.abs();
    base.offset_clamped(
        rng.gen_range(-spread..=spread),
        rng.gen_range(-spread..=spread),
        rng.gen_range(-spread..=spread),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/animation/particles.rs"]
mod tests;
