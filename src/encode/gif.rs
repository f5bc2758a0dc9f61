use rayon::prelude::*;

use crate::config::settings::EncodeConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::{UnboxError, UnboxResult};
use crate::render::frame::Frame;

/// One frame compressed to its final GIF image block, tagged with its display position.
///
/// Blocks are produced independently and in any order; `position` is the only ordering.
#[derive(Clone, Debug)]
pub struct EncodedFrame {
    position: usize,
    frame: gif::Frame<'static>,
}

impl EncodedFrame {
    /// Display position of this frame in the animation.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Size of the LZW-compressed image data in bytes.
    pub fn encoded_len(&self) -> usize {
        self.frame.buffer.len()
    }

    /// Frame delay in GIF centiseconds.
    pub fn delay_centis(&self) -> u16 {
        self.frame.delay
    }
}

/// Per-frame display time in milliseconds: `1000 / fps`, integer division.
pub fn frame_duration_ms(fps: u32) -> UnboxResult<u32> {
    if fps == 0 {
        return Err(UnboxError::validation("fps must be > 0"));
    }
    Ok(1000 / fps)
}

/// GIF delays are stored in centiseconds; round to nearest, never 0 (viewers treat 0 as slow).
fn delay_centis(duration_ms: u32) -> u16 {
    (duration_ms.saturating_add(5) / 10).clamp(1, u32::from(u16::MAX)) as u16
}

/// Parallel per-frame encoder with serial, order-restoring assembly.
pub struct GifPipeline {
    cfg: EncodeConfig,
    pool: rayon::ThreadPool,
}

impl GifPipeline {
    /// Build a pipeline and its worker pool.
    pub fn new(cfg: &EncodeConfig) -> UnboxResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg: cfg.clone(),
            pool: build_thread_pool(cfg.threads)?,
        })
    }

    /// Encode `frames` into a looping GIF where every frame lasts `1000 / fps` ms.
    ///
    /// Any frame that fails to encode fails the whole call; no partial output is returned.
    #[tracing::instrument(skip_all, fields(frames = frames.len(), fps = fps))]
    pub fn encode(&self, frames: &[Frame], fps: u32) -> UnboxResult<Vec<u8>> {
        let canvas = frames
            .first()
            .map(Frame::canvas)
            .ok_or_else(|| UnboxError::validation("cannot encode an empty frame sequence"))?;
        let encoded = self.encode_frames(frames, fps)?;
        let bytes = assemble(canvas, frames.len(), encoded)?;
        tracing::debug!(bytes = bytes.len(), "gif assembled");
        Ok(bytes)
    }

    /// Encode every frame on the worker pool, one unit of work per frame.
    ///
    /// The returned blocks are tagged but not guaranteed to be in display order.
    pub fn encode_frames(&self, frames: &[Frame], fps: u32) -> UnboxResult<Vec<EncodedFrame>> {
        let Some(first) = frames.first() else {
            return Err(UnboxError::validation(
                "cannot encode an empty frame sequence",
            ));
        };
        let canvas = first.canvas();
        check_gif_dims(canvas)?;
        let delay = delay_centis(frame_duration_ms(fps)?);
        let speed = self.cfg.quantize_speed;

        let results = self.pool.install(|| {
            frames
                .par_iter()
                .enumerate()
                .map(|(position, frame)| encode_frame(position, frame, canvas, delay, speed))
                .collect::<Vec<_>>()
        });

        let mut out = Vec::with_capacity(results.len());
        for r in results {
            out.push(r?);
        }
        Ok(out)
    }
}

/// Quantize and LZW-compress one frame.
pub fn encode_frame(
    position: usize,
    frame: &Frame,
    canvas: Canvas,
    delay_centis: u16,
    speed: i32,
) -> UnboxResult<EncodedFrame> {
    if frame.canvas() != canvas {
        return Err(UnboxError::encoding(format!(
            "frame {position} is {}x{}, expected {}x{}",
            frame.canvas().width,
            frame.canvas().height,
            canvas.width,
            canvas.height
        )));
    }
    if !(1..=30).contains(&speed) {
        return Err(UnboxError::encoding(format!(
            "quantize speed {speed} outside [1, 30]"
        )));
    }
    let (w, h) = check_gif_dims(canvas)?;

    let mut rgba = frame.image().as_raw().clone();
    let mut gif_frame = gif::Frame::from_rgba_speed(w, h, &mut rgba, speed);
    gif_frame.delay = delay_centis;
    gif_frame.make_lzw_pre_encoded();
    Ok(EncodedFrame {
        position,
        frame: gif_frame,
    })
}

/// Write header, loop extension, every block in position order, then the trailer.
///
/// `encoded` may arrive in any order but must contain each position in `0..frame_count`
/// exactly once.
pub fn assemble(
    canvas: Canvas,
    frame_count: usize,
    encoded: Vec<EncodedFrame>,
) -> UnboxResult<Vec<u8>> {
    let (w, h) = check_gif_dims(canvas)?;

    let mut slots: Vec<Option<EncodedFrame>> = (0..frame_count).map(|_| None).collect();
    for ef in encoded {
        let position = ef.position;
        let slot = slots.get_mut(position).ok_or_else(|| {
            UnboxError::encoding(format!(
                "encoded frame position {position} outside 0..{frame_count}"
            ))
        })?;
        if slot.replace(ef).is_some() {
            return Err(UnboxError::encoding(format!(
                "duplicate encoded frame at position {position}"
            )));
        }
    }

    let mut out = Vec::new();
    {
        let mut enc = gif::Encoder::new(&mut out, w, h, &[]).map_err(gif_err)?;
        enc.set_repeat(gif::Repeat::Infinite).map_err(gif_err)?;
        for (position, slot) in slots.iter().enumerate() {
            let ef = slot.as_ref().ok_or_else(|| {
                UnboxError::encoding(format!("missing encoded frame at position {position}"))
            })?;
            enc.write_lzw_pre_encoded_frame(&ef.frame).map_err(gif_err)?;
        }
        // Dropping the encoder writes the trailer.
    }
    Ok(out)
}

fn check_gif_dims(canvas: Canvas) -> UnboxResult<(u16, u16)> {
    let w = u16::try_from(canvas.width).ok();
    let h = u16::try_from(canvas.height).ok();
    match (w, h) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(UnboxError::encoding(format!(
            "frame size {}x{} is not representable in a gif",
            canvas.width, canvas.height
        ))),
    }
}

fn gif_err(e: gif::EncodingError) -> UnboxError {
    UnboxError::encoding(e.to_string())
}

fn build_thread_pool(threads: Option<usize>) -> UnboxResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(UnboxError::validation(
            "encode 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| UnboxError::encoding(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
