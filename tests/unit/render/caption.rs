use super::*;

fn spec(bottom: &str) -> CaptionSpec {
    CaptionSpec {
        top: "WINNER!!!".to_string(),
        bottom: bottom.to_string(),
        font_size: 24.0,
        font_family: "DejaVu Sans, sans-serif".to_string(),
        fill: Rgb8::new(255, 255, 255),
        outline: Rgb8::new(0, 0, 0),
    }
}

#[test]
fn svg_places_top_and_bottom_captions() {
    let svg = caption_svg(Canvas::new(400, 200).unwrap(), &spec("AK-47 | Redline"));
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="400" height="200""#));
    assert!(svg.contains(">WINNER!!!</text>"));
    assert!(svg.contains(">AK-47 | Redline</text>"));
    assert_eq!(svg.matches(r#"x="200""#).count(), 2);
    assert!(svg.contains(r#"y="36""#));
    assert!(svg.contains(r#"y="188""#));
}

#[test]
fn svg_escapes_markup_in_labels() {
    let svg = caption_svg(Canvas::new(100, 100).unwrap(), &spec("<b>Tom & \"Jerry\"</b>"));
    assert!(svg.contains("&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"));
    assert!(!svg.contains("<b>"));
}

#[test]
fn caption_layer_matches_canvas() {
    let canvas = Canvas::new(120, 160).unwrap();
    let layer = rasterize_captions(canvas, &spec("label")).unwrap();
    assert_eq!(layer.dimensions(), (120, 160));
    // The middle band between the two captions stays transparent.
    assert_eq!(layer.get_pixel(60, 80).0[3], 0);
}
