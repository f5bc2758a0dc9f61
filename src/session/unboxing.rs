use std::io::Cursor;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::carousel::{CarouselAnimator, replicate_strip};
use crate::animation::rarity::RarityTier;
use crate::assets::acquire::acquire_thumbnails;
use crate::assets::fetch::{HttpFetcher, ThumbnailFetcher};
use crate::assets::thumbnail::ThumbnailImage;
use crate::config::settings::UnboxSettings;
use crate::encode::gif::GifPipeline;
use crate::foundation::error::{UnboxError, UnboxResult};
use crate::render::frame::Frame;
use crate::render::overlay::{OverlayRequest, ParticleOverlay};

/// One unboxing to generate.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnboxRequest {
    /// Item image URLs, fetched concurrently.
    pub urls: Vec<String>,
    /// Caption naming the won item.
    pub win_label: String,
    /// Rarity score in `[0, 100)`.
    pub rarity_score: f64,
    /// Item to land on, indexing the replicated strip that is actually rendered.
    pub target_index: usize,
    /// Frames per second for the whole animation.
    pub fps: u32,
}

impl UnboxRequest {
    /// Checks that do not depend on what acquisition returns.
    pub fn validate(&self) -> UnboxResult<()> {
        if self.urls.is_empty() {
            return Err(UnboxError::validation("request needs at least one url"));
        }
        self.render_params().validate()
    }

    /// The part of the request the offline renderer needs.
    pub fn render_params(&self) -> RenderParams {
        RenderParams {
            win_label: self.win_label.clone(),
            rarity_score: self.rarity_score,
            target_index: self.target_index,
            fps: self.fps,
        }
    }
}

/// Per-render inputs for [`render_unboxing`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderParams {
    /// Caption naming the won item.
    pub win_label: String,
    /// Rarity score in `[0, 100)`.
    pub rarity_score: f64,
    /// Item to land on in the thumbnail list passed to the renderer.
    pub target_index: usize,
    /// Frames per second.
    pub fps: u32,
}

impl RenderParams {
    fn validate(&self) -> UnboxResult<()> {
        if self.fps == 0 {
            return Err(UnboxError::validation("fps must be > 0"));
        }
        RarityTier::from_score(self.rarity_score)?;
        Ok(())
    }
}

/// A finished animation.
#[derive(Clone, Debug)]
pub struct UnboxOutput {
    /// The animated GIF, positioned at 0.
    pub gif: Cursor<Vec<u8>>,
    /// Decelerating spin frames.
    pub spin_frames: usize,
    /// Frames holding on the landing frame.
    pub pause_frames: usize,
    /// Celebration frames.
    pub overlay_frames: usize,
    /// Tier the rarity score resolved to.
    pub tier: RarityTier,
    /// Thumbnails in the rendered strip.
    pub strip_len: usize,
}

impl UnboxOutput {
    /// Carousel frames, spin plus pause.
    pub fn carousel_frames(&self) -> usize {
        self.spin_frames + self.pause_frames
    }

    /// Frames in the GIF.
    pub fn total_frames(&self) -> usize {
        self.carousel_frames() + self.overlay_frames
    }

    /// The GIF bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.gif.into_inner()
    }
}

/// Generates unboxing animations with one configuration and one fetcher.
///
/// A session holds no per-request state; concurrent `generate` calls are independent.
pub struct UnboxSession<F = HttpFetcher> {
    settings: Arc<UnboxSettings>,
    fetcher: Arc<F>,
}

impl UnboxSession<HttpFetcher> {
    /// Session fetching thumbnails over HTTP.
    pub fn new(settings: UnboxSettings) -> UnboxResult<Self> {
        let fetcher = HttpFetcher::new(settings.acquire.request_timeout())?;
        Self::with_fetcher(settings, fetcher)
    }
}

impl<F: ThumbnailFetcher> UnboxSession<F> {
    /// Session fetching thumbnails through `fetcher`.
    pub fn with_fetcher(settings: UnboxSettings, fetcher: F) -> UnboxResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings: Arc::new(settings),
            fetcher: Arc::new(fetcher),
        })
    }

    /// The session configuration.
    pub fn settings(&self) -> &UnboxSettings {
        &self.settings
    }

    /// Generate an animation with a fresh random source.
    pub async fn generate(&self, req: &UnboxRequest) -> UnboxResult<UnboxOutput> {
        self.run(req, StdRng::from_entropy()).await
    }

    /// Generate an animation whose randomness is fixed by `seed`.
    ///
    /// Thumbnails arrive in completion order, so the output is only reproducible when that order
    /// is.
    pub async fn generate_seeded(&self, req: &UnboxRequest, seed: u64) -> UnboxResult<UnboxOutput> {
        self.run(req, StdRng::seed_from_u64(seed)).await
    }

    #[tracing::instrument(skip_all, fields(urls = req.urls.len(), fps = req.fps, target = req.target_index))]
    async fn run(&self, req: &UnboxRequest, mut rng: StdRng) -> UnboxResult<UnboxOutput> {
        req.validate()?;

        let thumbs =
            acquire_thumbnails(Arc::clone(&self.fetcher), &req.urls, &self.settings.acquire).await;
        if thumbs.is_empty() {
            return Err(UnboxError::acquisition(format!(
                "none of the {} thumbnails could be acquired",
                req.urls.len()
            )));
        }

        let strip = replicate_strip(&thumbs, self.settings.strip_repeats);
        let params = req.render_params();
        let settings = Arc::clone(&self.settings);
        tokio::task::spawn_blocking(move || render_unboxing(&strip, &params, &settings, &mut rng))
            .await
            .map_err(|e| UnboxError::render(format!("render task failed: {e}")))?
    }
}

/// Render and encode an unboxing from thumbnails already in hand.
///
/// Everything that can be checked up front (rarity, fps, target, thumbnail sizes, config) is
/// checked before the first frame is drawn.
#[tracing::instrument(skip_all, fields(thumbs = thumbs.len(), fps = params.fps, target = params.target_index))]
pub fn render_unboxing<R: Rng + ?Sized>(
    thumbs: &[ThumbnailImage],
    params: &RenderParams,
    settings: &UnboxSettings,
    rng: &mut R,
) -> UnboxResult<UnboxOutput> {
    params.validate()?;
    let animation = settings
        .animation
        .clone()
        .with_fps(params.fps)
        .with_target(params.target_index);
    let animator = CarouselAnimator::new(&animation, thumbs)?;
    let overlay = ParticleOverlay::new(&settings.overlay)?;
    let pipeline = GifPipeline::new(&settings.encode)?;

    let carousel = animator.animate(rng);
    let landing = carousel
        .frames
        .last()
        .ok_or_else(|| UnboxError::render("carousel produced no frames"))?;
    let celebration = overlay.render(
        &OverlayRequest {
            base: landing,
            rarity_score: params.rarity_score,
            win_label: &params.win_label,
            extension_frames: settings.overlay.extension_frames(params.fps),
        },
        rng,
    )?;

    let spin_frames = carousel.spin_frames;
    let pause_frames = carousel.pause_frames;
    let overlay_frames = celebration.frames.len();
    let frames: Vec<Frame> = carousel
        .frames
        .into_iter()
        .chain(celebration.frames)
        .collect();
    let bytes = pipeline.encode(&frames, params.fps)?;

    tracing::info!(
        frames = frames.len(),
        bytes = bytes.len(),
        tier = celebration.tier.name(),
        "unboxing rendered"
    );
    Ok(UnboxOutput {
        gif: Cursor::new(bytes),
        spin_frames,
        pause_frames,
        overlay_frames,
        tier: celebration.tier,
        strip_len: thumbs.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/unboxing.rs"]
mod tests;
