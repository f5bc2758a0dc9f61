//! Render an unboxing from image files on disk.
//!
//! `cargo run --example unbox_local -- out.gif a.png b.jpg c.webp`
//!
//! With no input images a strip of flat colored squares is used.

use std::path::PathBuf;

use anyhow::Context;
use crate_unbox::{
    RenderParams, ThumbnailImage, UnboxSettings, render_unboxing, replicate_strip,
    thumbnail_from_bytes,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let out = PathBuf::from(args.next().unwrap_or_else(|| "unboxing.gif".to_string()));
    let inputs: Vec<PathBuf> = args.map(PathBuf::from).collect();

    let settings = UnboxSettings::default();
    let thumbs = if inputs.is_empty() {
        [[200, 60, 60], [60, 200, 60], [60, 60, 200], [200, 200, 60]]
            .into_iter()
            .map(|[r, g, b]| {
                ThumbnailImage::from_rgba(image::RgbaImage::from_pixel(
                    settings.acquire.thumb_width,
                    settings.acquire.thumb_height,
                    image::Rgba([r, g, b, 255]),
                ))
            })
            .collect()
    } else {
        let mut thumbs = Vec::with_capacity(inputs.len());
        for p in &inputs {
            let bytes = std::fs::read(p).with_context(|| format!("read '{}'", p.display()))?;
            thumbs.push(thumbnail_from_bytes(&bytes, &settings.acquire)?);
        }
        thumbs
    };

    let strip = replicate_strip(&thumbs, settings.strip_repeats);
    let params = RenderParams {
        win_label: "StatTrak AWP | Asiimov".to_string(),
        rarity_score: 92.5,
        target_index: strip.len() / 2 + 1,
        fps: 30,
    };
    let output = render_unboxing(&strip, &params, &settings, &mut rand::thread_rng())?;
    println!(
        "{} frames, tier {}, writing {}",
        output.total_frames(),
        output.tier.name(),
        out.display()
    );
    std::fs::write(&out, output.into_bytes())
        .with_context(|| format!("write '{}'", out.display()))?;
    Ok(())
}
