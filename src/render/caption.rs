use std::sync::{Arc, OnceLock};

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{UnboxError, UnboxResult};
use crate::render::draw;

/// Text and styling for the two overlay captions.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionSpec {
    /// Caption centered near the top edge.
    pub top: String,
    /// Caption centered near the bottom edge.
    pub bottom: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS-style font family list.
    pub font_family: String,
    /// Text fill color.
    pub fill: Rgb8,
    /// Outline color, keeps the text legible over confetti.
    pub outline: Rgb8,
}

/// Build the SVG document holding both captions for a canvas.
pub fn caption_svg(canvas: Canvas, spec: &CaptionSpec) -> String {
    let w = canvas.width;
    let h = canvas.height;
    let cx = f64::from(w) / 2.0;
    let margin = (spec.font_size * 0.5).max(4.0);
    let top_y = margin + spec.font_size;
    let bottom_y = f64::from(h) - margin;
    let outline_w = (spec.font_size / 12.0).max(1.0);

    let text = |y: f64, s: &str| {
        format!(
            r#"<text x="{cx}" y="{y}" text-anchor="middle" font-family="{family}" font-size="{size}" font-weight="bold" fill="{fill}" stroke="{outline}" stroke-width="{outline_w}" paint-order="stroke">{body}</text>"#,
            family = escape_xml(&spec.font_family),
            size = spec.font_size,
            fill = spec.fill.to_hex(),
            outline = spec.outline.to_hex(),
            body = escape_xml(s),
        )
    };

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{}{}</svg>"#,
        text(top_y, &spec.top),
        text(bottom_y, &spec.bottom),
    )
}

/// Rasterize both captions onto a transparent layer the size of `canvas`.
///
/// Text is laid out with the system font database. When no font matches, the layer comes back
/// empty and frames render without captions.
#[tracing::instrument(skip(spec), fields(top = %spec.top, bottom = %spec.bottom))]
pub fn rasterize_captions(canvas: Canvas, spec: &CaptionSpec) -> UnboxResult<RgbaImage> {
    let svg = caption_svg(canvas, spec);
    let opts = usvg::Options {
        fontdb: system_fontdb(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse caption svg")?;
    if !tree.root().has_children() {
        tracing::debug!("caption text produced no glyphs (no usable system font?)");
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| UnboxError::render("failed to allocate caption pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    draw::rgba_from_premul(canvas.width, canvas.height, pixmap.data())
        .ok_or_else(|| UnboxError::render("caption pixmap size mismatch"))
}

/// Process-wide, read-only font database, loaded on first use.
fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts for captions");
        Arc::new(db)
    })
    .clone()
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/caption.rs"]
mod tests;
