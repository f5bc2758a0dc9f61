use std::sync::Arc;

use anyhow::Context;
use image::RgbaImage;
use image::imageops::FilterType;

use crate::config::settings::AcquireConfig;
use crate::foundation::error::{UnboxError, UnboxResult};

/// A decoded, resized, straight-alpha RGBA thumbnail.
///
/// Pixels are shared, so cloning (e.g. when the strip is replicated) does not copy the raster.
#[derive(Clone, Debug)]
pub struct ThumbnailImage {
    image: Arc<RgbaImage>,
}

impl ThumbnailImage {
    /// Wrap an already prepared raster.
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Decode an encoded image, resize it to the configured thumbnail size and optionally reduce
/// its palette.
pub fn thumbnail_from_bytes(bytes: &[u8], cfg: &AcquireConfig) -> UnboxResult<ThumbnailImage> {
    if cfg.thumb_width == 0 || cfg.thumb_height == 0 {
        return Err(UnboxError::validation(
            "thumbnail dimensions must be non-zero",
        ));
    }
    let dyn_img = image::load_from_memory(bytes).context("decode thumbnail from memory")?;
    let mut rgba = dyn_img
        .resize_exact(cfg.thumb_width, cfg.thumb_height, FilterType::CatmullRom)
        .to_rgba8();

    if let Some(colors) = cfg.palette_colors {
        quantize_palette(&mut rgba, colors)?;
    }
    Ok(ThumbnailImage::from_rgba(rgba))
}

/// Reduce `img` in place to at most `colors` adaptive palette entries (NeuQuant).
pub fn quantize_palette(img: &mut RgbaImage, colors: usize) -> UnboxResult<()> {
    if !(2..=256).contains(&colors) {
        return Err(UnboxError::validation(format!(
            "palette size must be in [2, 256], got {colors}"
        )));
    }
    let nq = color_quant::NeuQuant::new(10, colors, img.as_raw());
    for px in img.pixels_mut() {
        let idx = nq.index_of(&px.0);
        if let Some(mapped) = nq.lookup(idx) {
            px.0 = mapped;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/thumbnail.rs"]
mod tests;
