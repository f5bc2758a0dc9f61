use image::RgbaImage;
use rand::Rng;

use crate::animation::ease::spin_easing;
use crate::assets::thumbnail::ThumbnailImage;
use crate::config::settings::AnimationConfig;
use crate::foundation::core::{Canvas, Point, Rgb8};
use crate::foundation::error::{UnboxError, UnboxResult};
use crate::render::draw;
use crate::render::frame::Frame;

/// Frame background.
pub const BACKGROUND: Rgb8 = Rgb8::new(30, 30, 30);
/// Outline around the item under the needle.
pub const HIGHLIGHT: Rgb8 = Rgb8::new(255, 215, 0);
/// Needle fill.
pub const NEEDLE: Rgb8 = Rgb8::new(255, 0, 0);

const HIGHLIGHT_PAD: f64 = 5.0;
const HIGHLIGHT_WIDTH: f64 = 3.0;
/// Slots drawn beyond each end of the strip so wrap-around never shows a gap.
const WRAP_SLOTS: i64 = 2;

/// Scroll offsets for one spin, fixed once the random landing point is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinPlan {
    /// Offset at progress 0.
    pub start_offset: f64,
    /// Offset the spin converges to.
    pub target_offset: f64,
    /// Landing point inside the target cell, in `[0, 1)` of one item spacing.
    pub landing_fraction: f64,
    /// Number of decelerating frames.
    pub spin_frames: usize,
}

impl SpinPlan {
    /// Progress of spin frame `frame_index`: `i / (n - 1)`, so the last frame is at exactly 1.
    pub fn progress_at(&self, frame_index: usize) -> f64 {
        if self.spin_frames <= 1 {
            return 1.0;
        }
        (frame_index as f64 / (self.spin_frames - 1) as f64).min(1.0)
    }

    /// Scroll offset of spin frame `frame_index`. The last frame sits exactly on
    /// `target_offset`.
    pub fn offset_at(&self, frame_index: usize) -> f64 {
        let e = spin_easing(self.progress_at(frame_index));
        if e == 0.0 {
            return self.target_offset;
        }
        e * self.start_offset + (1.0 - e) * self.target_offset
    }
}

/// All frames of the carousel phase: spin, then the landing pause.
#[derive(Clone, Debug)]
pub struct CarouselFrames {
    /// Spin frames followed by pause frames.
    pub frames: Vec<Frame>,
    /// How many of `frames` are spin frames.
    pub spin_frames: usize,
    /// How many of `frames` repeat the landing frame.
    pub pause_frames: usize,
    /// The offsets the frames were generated from.
    pub plan: SpinPlan,
}

impl CarouselFrames {
    /// The landing frame, i.e. the last spin frame.
    pub fn landing_frame(&self) -> Option<&Frame> {
        self.spin_frames
            .checked_sub(1)
            .and_then(|i| self.frames.get(i))
    }
}

/// Decelerating horizontal strip of thumbnails that lands on a chosen item.
pub struct CarouselAnimator<'a> {
    cfg: &'a AnimationConfig,
    canvas: Canvas,
    thumbs: &'a [ThumbnailImage],
}

impl<'a> CarouselAnimator<'a> {
    /// Validate the config against the thumbnail strip.
    ///
    /// Fails when the strip is empty, the target is out of range or thumbnails differ in size.
    pub fn new(cfg: &'a AnimationConfig, thumbs: &'a [ThumbnailImage]) -> UnboxResult<Self> {
        cfg.validate()?;
        let canvas = cfg.canvas()?;
        let Some(first) = thumbs.first() else {
            return Err(UnboxError::validation(
                "carousel needs at least one thumbnail",
            ));
        };
        if cfg.target_index >= thumbs.len() {
            return Err(UnboxError::validation(format!(
                "target_index {} out of range for {} thumbnails",
                cfg.target_index,
                thumbs.len()
            )));
        }
        let size = (first.width(), first.height());
        if let Some((i, t)) = thumbs
            .iter()
            .enumerate()
            .find(|(_, t)| (t.width(), t.height()) != size)
        {
            return Err(UnboxError::validation(format!(
                "thumbnail {i} is {}x{}, expected {}x{}",
                t.width(),
                t.height(),
                size.0,
                size.1
            )));
        }
        Ok(Self {
            cfg,
            canvas,
            thumbs,
        })
    }

    /// Draw the landing point and fix the spin's offsets.
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> SpinPlan {
        let spacing = self.cfg.item_spacing;
        let landing_fraction: f64 = rng.gen_range(0.0..1.0);
        let strip_width = spacing * self.thumbs.len() as f64;
        SpinPlan {
            start_offset: strip_width * self.cfg.initial_speed_modifier,
            target_offset: self.cfg.target_index as f64 * spacing + spacing * landing_fraction,
            landing_fraction,
            spin_frames: self.cfg.spin_frames(),
        }
    }

    /// Render the full carousel phase with a fresh landing point from `rng`.
    #[tracing::instrument(skip_all, fields(items = self.thumbs.len(), target = self.cfg.target_index))]
    pub fn animate<R: Rng + ?Sized>(&self, rng: &mut R) -> CarouselFrames {
        let plan = self.plan(rng);
        self.animate_plan(plan)
    }

    /// Render the full carousel phase for a given plan.
    pub fn animate_plan(&self, plan: SpinPlan) -> CarouselFrames {
        let pause_frames = self.cfg.pause_frames();
        let mut frames = Vec::with_capacity(plan.spin_frames + pause_frames);
        for i in 0..plan.spin_frames {
            frames.push(self.compose(plan.offset_at(i)));
        }
        if let Some(last) = frames.last().cloned() {
            frames.extend(std::iter::repeat_n(last, pause_frames));
        }

        tracing::debug!(
            spin = plan.spin_frames,
            pause = pause_frames,
            landing_fraction = plan.landing_fraction,
            "carousel frames composed"
        );
        CarouselFrames {
            frames,
            spin_frames: plan.spin_frames,
            pause_frames,
            plan,
        }
    }

    /// Screen x of slot `slot`'s left edge at scroll `offset`.
    pub fn slot_x(&self, slot: i64, offset: f64) -> f64 {
        self.canvas.center_x() + slot as f64 * self.cfg.item_spacing - offset
    }

    /// Item index under the needle at scroll `offset`: the slot whose left edge lies within one
    /// spacing left of center.
    pub fn item_under_needle(&self, offset: f64) -> usize {
        let slot = (offset / self.cfg.item_spacing).floor() as i64;
        slot.rem_euclid(self.thumbs.len() as i64) as usize
    }

    /// Compose a single frame at scroll `offset`.
    pub fn compose(&self, offset: f64) -> Frame {
        let mut img = RgbaImage::from_pixel(
            self.canvas.width,
            self.canvas.height,
            BACKGROUND.to_rgba(),
        );
        let cx = self.canvas.center_x();
        let spacing = self.cfg.item_spacing;
        let count = self.thumbs.len() as i64;
        let thumb_w = f64::from(self.thumbs[0].width());
        let thumb_h = f64::from(self.thumbs[0].height());
        let y = (self.canvas.center_y() - (thumb_h / 2.0).floor()).floor();
        let frame_w = f64::from(self.canvas.width);

        for slot in -WRAP_SLOTS..count + WRAP_SLOTS {
            let x = self.slot_x(slot, offset);
            let thumb = &self.thumbs[slot.rem_euclid(count) as usize];

            // The landed slot sits at `cx - spacing * r` with r in [0, 1), so `x == cx` counts.
            if cx - spacing < x && x <= cx {
                draw::stroke_rect(
                    &mut img,
                    x - HIGHLIGHT_PAD,
                    y - HIGHLIGHT_PAD,
                    x + thumb_w + HIGHLIGHT_PAD,
                    y + thumb_h + HIGHLIGHT_PAD,
                    HIGHLIGHT_WIDTH,
                    HIGHLIGHT,
                );
            }
            if x > -thumb_w && x < frame_w {
                draw::paste(&mut img, thumb.image(), x.floor() as i64, y as i64);
            }
        }

        self.draw_needle(&mut img);
        Frame::new(img)
    }

    fn draw_needle(&self, img: &mut RgbaImage) {
        let nx = self.canvas.center_x() - 5.0;
        draw::fill_triangle(
            img,
            Point::new(nx, 10.0),
            Point::new(nx + 10.0, 10.0),
            Point::new(nx + 5.0, 50.0),
            NEEDLE,
        );
    }
}

/// Repeat a thumbnail list `repeats` times to lengthen the strip. Pixels are shared.
pub fn replicate_strip(thumbs: &[ThumbnailImage], repeats: usize) -> Vec<ThumbnailImage> {
    let mut out = Vec::with_capacity(thumbs.len().saturating_mul(repeats));
    for _ in 0..repeats {
        out.extend_from_slice(thumbs);
    }
    out
}

/// Index in a replicated strip of `base_index` within copy number `copy`.
pub fn expanded_target(base_index: usize, base_len: usize, copy: usize) -> usize {
    copy * base_len + base_index
}

#[cfg(test)]
#[path = "../../tests/unit/animation/carousel.rs"]
mod tests;
