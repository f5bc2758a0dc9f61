use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::foundation::core::Canvas;
use crate::foundation::error::{UnboxError, UnboxResult};

/// Carousel geometry and timing.
///
/// `target_index` indexes the thumbnail list actually rendered, i.e. after strip replication.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Frame width in pixels.
    pub frame_width: u32,
    /// Frame height in pixels.
    pub frame_height: u32,
    /// Length of the decelerating spin, in seconds.
    pub spin_duration_secs: f64,
    /// Frames per second for the whole animation.
    pub fps: u32,
    /// Horizontal distance between the left edges of neighbouring items.
    pub item_spacing: f64,
    /// Multiplier applied to the strip width to get the starting scroll offset.
    pub initial_speed_modifier: f64,
    /// Index of the item the carousel lands on.
    pub target_index: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_width: 400,
            frame_height: 200,
            spin_duration_secs: 2.0,
            fps: 30,
            item_spacing: 105.0,
            initial_speed_modifier: 1.0,
            target_index: 0,
        }
    }
}

impl AnimationConfig {
    /// Frame dimensions as a validated [`Canvas`].
    pub fn canvas(&self) -> UnboxResult<Canvas> {
        Canvas::new(self.frame_width, self.frame_height)
    }

    /// Number of decelerating spin frames: `floor(spin_duration * fps)`.
    pub fn spin_frames(&self) -> usize {
        (self.spin_duration_secs * f64::from(self.fps))
            .floor()
            .max(0.0) as usize
    }

    /// Number of frames repeating the landing frame (one second).
    pub fn pause_frames(&self) -> usize {
        self.fps as usize
    }

    /// Copy of this config landing on `target_index`.
    pub fn with_target(mut self, target_index: usize) -> Self {
        self.target_index = target_index;
        self
    }

    /// Copy of this config running at `fps`.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Check everything that does not depend on the thumbnail list.
    pub fn validate(&self) -> UnboxResult<()> {
        self.canvas()?;
        if self.fps == 0 {
            return Err(UnboxError::validation("fps must be > 0"));
        }
        if !self.spin_duration_secs.is_finite() || self.spin_duration_secs <= 0.0 {
            return Err(UnboxError::validation(format!(
                "spin_duration_secs must be finite and > 0, got {}",
                self.spin_duration_secs
            )));
        }
        if self.spin_frames() == 0 {
            return Err(UnboxError::validation(format!(
                "spin of {}s at {} fps yields no frames",
                self.spin_duration_secs, self.fps
            )));
        }
        if !self.item_spacing.is_finite() || self.item_spacing <= 0.0 {
            return Err(UnboxError::validation(format!(
                "item_spacing must be finite and > 0, got {}",
                self.item_spacing
            )));
        }
        if !self.initial_speed_modifier.is_finite() || self.initial_speed_modifier < 0.0 {
            return Err(UnboxError::validation(format!(
                "initial_speed_modifier must be finite and >= 0, got {}",
                self.initial_speed_modifier
            )));
        }
        Ok(())
    }
}

/// Celebration overlay parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Overlay length in seconds; `extension_frames = extension_secs * fps`.
    pub extension_secs: u32,
    /// Added to every particle's vertical velocity once per frame.
    pub gravity: f64,
    /// Particle disc radius in pixels.
    pub particle_radius: f64,
    /// Maximum absolute per-channel deviation from the tier base color.
    pub color_spread: i32,
    /// Caption drawn at the top of every overlay frame.
    pub headline: String,
    /// Caption font size in pixels.
    pub font_size: f64,
    /// Font family list handed to the SVG text layout.
    pub font_family: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            extension_secs: 5,
            gravity: 0.3,
            particle_radius: 2.0,
            color_spread: 150,
            headline: "WINNER!!!".to_string(),
            font_size: 24.0,
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
        }
    }
}

impl OverlayConfig {
    /// Overlay frame count for the given fps.
    pub fn extension_frames(&self, fps: u32) -> usize {
        (self.extension_secs as usize).saturating_mul(fps as usize)
    }

    /// Check overlay parameters.
    pub fn validate(&self) -> UnboxResult<()> {
        if !self.gravity.is_finite() {
            return Err(UnboxError::validation("overlay gravity must be finite"));
        }
        if !self.particle_radius.is_finite() || self.particle_radius <= 0.0 {
            return Err(UnboxError::validation(
                "overlay particle_radius must be finite and > 0",
            ));
        }
        if !(0..=255).contains(&self.color_spread) {
            return Err(UnboxError::validation(
                "overlay color_spread must be in [0, 255]",
            ));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(UnboxError::validation(
                "overlay font_size must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Thumbnail download and preprocessing parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AcquireConfig {
    /// Thumbnail width in pixels.
    pub thumb_width: u32,
    /// Thumbnail height in pixels.
    pub thumb_height: u32,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Reduce each thumbnail to this many adaptive palette colors. `None` keeps full color.
    pub palette_colors: Option<usize>,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            thumb_width: 100,
            thumb_height: 100,
            request_timeout_ms: 10_000,
            palette_colors: Some(256),
        }
    }
}

impl AcquireConfig {
    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Check acquisition parameters.
    pub fn validate(&self) -> UnboxResult<()> {
        if self.thumb_width == 0 || self.thumb_height == 0 {
            return Err(UnboxError::validation(
                "thumbnail dimensions must be non-zero",
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(UnboxError::validation("request_timeout_ms must be > 0"));
        }
        if let Some(n) = self.palette_colors
            && !(2..=256).contains(&n)
        {
            return Err(UnboxError::validation(format!(
                "palette_colors must be in [2, 256], got {n}"
            )));
        }
        Ok(())
    }
}

/// GIF encoding parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Worker thread count for per-frame encoding. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Per-frame palette quantization speed, 1 (best) to 30 (fastest).
    pub quantize_speed: i32,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            threads: None,
            quantize_speed: 10,
        }
    }
}

impl EncodeConfig {
    /// Check encoding parameters.
    pub fn validate(&self) -> UnboxResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(UnboxError::validation(
                "encode 'threads' must be >= 1 when set",
            ));
        }
        if !(1..=30).contains(&self.quantize_speed) {
            return Err(UnboxError::validation(format!(
                "quantize_speed must be in [1, 30], got {}",
                self.quantize_speed
            )));
        }
        Ok(())
    }
}

/// Complete pipeline configuration.
///
/// Every section falls back to its defaults, so a JSON document only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UnboxSettings {
    /// Carousel settings. `fps` and `target_index` are replaced per request.
    pub animation: AnimationConfig,
    /// Particle and caption settings.
    pub overlay: OverlayConfig,
    /// Download and thumbnail settings.
    pub acquire: AcquireConfig,
    /// GIF encoder settings.
    pub encode: EncodeConfig,
    /// How many times the acquired thumbnail list is repeated to build the strip.
    pub strip_repeats: usize,
}

impl Default for UnboxSettings {
    fn default() -> Self {
        Self {
            animation: AnimationConfig::default(),
            overlay: OverlayConfig::default(),
            acquire: AcquireConfig::default(),
            encode: EncodeConfig::default(),
            strip_repeats: 16,
        }
    }
}

impl UnboxSettings {
    /// Parse settings from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> UnboxResult<Self> {
        let settings: Self = serde_json::from_reader(r)
            .map_err(|e| UnboxError::validation(format!("parse settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a JSON string.
    pub fn from_json_str(s: &str) -> UnboxResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> UnboxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            UnboxError::validation(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate every section.
    ///
    /// Per-request values (`fps`, `target_index`) are validated again once the request is known.
    pub fn validate(&self) -> UnboxResult<()> {
        self.animation.validate()?;
        self.overlay.validate()?;
        self.acquire.validate()?;
        self.encode.validate()?;
        if self.strip_repeats == 0 {
            return Err(UnboxError::validation("strip_repeats must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
