use std::io::Cursor;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, RgbaImage};

use super::*;

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> Frame {
    Frame::new(RgbaImage::from_pixel(
        w,
        h,
        image::Rgba([rgb[0], rgb[1], rgb[2], 255]),
    ))
}

fn decode(bytes: Vec<u8>) -> Vec<image::Frame> {
    GifDecoder::new(Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

fn delay_ms(f: &image::Frame) -> f64 {
    let (n, d) = f.delay().numer_denom_ms();
    f64::from(n) / f64::from(d)
}

fn close(a: [u8; 4], b: [u8; 3]) -> bool {
    a[..3]
        .iter()
        .zip(b.iter())
        .all(|(x, y)| x.abs_diff(*y) <= 8)
}

#[test]
fn frame_duration_is_integer_division() {
    assert_eq!(frame_duration_ms(30).unwrap(), 33);
    assert_eq!(frame_duration_ms(17).unwrap(), 58);
    assert_eq!(frame_duration_ms(1).unwrap(), 1000);
    assert!(frame_duration_ms(0).is_err());
}

#[test]
fn delay_rounds_to_centiseconds_and_never_zero() {
    assert_eq!(delay_centis(33), 3);
    assert_eq!(delay_centis(58), 6);
    assert_eq!(delay_centis(1000), 100);
    assert_eq!(delay_centis(0), 1);
    assert_eq!(delay_centis(4), 1);
}

#[test]
fn encodes_looping_gif_with_frames_in_order() {
    let colors = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 0], [0, 255, 255]];
    let frames: Vec<Frame> = colors.iter().map(|c| solid(16, 8, *c)).collect();
    let pipeline = GifPipeline::new(&EncodeConfig {
        threads: Some(3),
        ..EncodeConfig::default()
    })
    .unwrap();

    let bytes = pipeline.encode(&frames, 20).unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");
    assert_eq!(bytes.last(), Some(&0x3B));
    // NETSCAPE2.0 application extension marks the animation as looping.
    assert!(bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

    let decoded = decode(bytes);
    assert_eq!(decoded.len(), colors.len());
    for (f, c) in decoded.iter().zip(colors.iter()) {
        assert_eq!(f.buffer().dimensions(), (16, 8));
        assert!(close(f.buffer().get_pixel(3, 3).0, *c));
        assert!((delay_ms(f) - 50.0).abs() < 1e-9);
    }
}

#[test]
fn assembly_restores_display_order_from_tags() {
    let colors = [[200, 10, 10], [10, 200, 10], [10, 10, 200]];
    let frames: Vec<Frame> = colors.iter().map(|c| solid(4, 4, *c)).collect();
    let pipeline = GifPipeline::new(&EncodeConfig::default()).unwrap();

    let mut encoded = pipeline.encode_frames(&frames, 10).unwrap();
    encoded.reverse();
    assert_eq!(encoded[0].position(), 2);
    assert!(encoded.iter().all(|e| e.encoded_len() > 0 && e.delay_centis() == 10));

    let decoded = decode(assemble(frames[0].canvas(), frames.len(), encoded).unwrap());
    assert_eq!(decoded.len(), 3);
    for (f, c) in decoded.iter().zip(colors.iter()) {
        assert!(close(f.buffer().get_pixel(0, 0).0, *c));
    }
}

#[test]
fn assembly_rejects_missing_and_duplicate_positions() {
    let frames = vec![solid(4, 4, [1, 2, 3]), solid(4, 4, [4, 5, 6])];
    let pipeline = GifPipeline::new(&EncodeConfig::default()).unwrap();
    let canvas = frames[0].canvas();

    let mut encoded = pipeline.encode_frames(&frames, 10).unwrap();
    encoded.pop();
    assert!(matches!(
        assemble(canvas, 2, encoded),
        Err(UnboxError::Encoding(_))
    ));

    let mut encoded = pipeline.encode_frames(&frames, 10).unwrap();
    let dup = encoded[0].clone();
    encoded.push(dup);
    assert!(matches!(
        assemble(canvas, 3, encoded),
        Err(UnboxError::Encoding(_))
    ));

    let encoded = pipeline.encode_frames(&frames, 10).unwrap();
    assert!(matches!(
        assemble(canvas, 1, encoded),
        Err(UnboxError::Encoding(_))
    ));
}

#[test]
fn mismatched_frame_size_fails_the_whole_encode() {
    let frames = vec![solid(8, 8, [0, 0, 0]), solid(8, 9, [0, 0, 0])];
    let pipeline = GifPipeline::new(&EncodeConfig::default()).unwrap();
    assert!(matches!(
        pipeline.encode(&frames, 10),
        Err(UnboxError::Encoding(_))
    ));
}

#[test]
fn empty_sequence_and_zero_fps_are_rejected() {
    let pipeline = GifPipeline::new(&EncodeConfig::default()).unwrap();
    assert!(matches!(
        pipeline.encode(&[], 10),
        Err(UnboxError::Validation(_))
    ));
    assert!(matches!(
        pipeline.encode(&[solid(2, 2, [0, 0, 0])], 0),
        Err(UnboxError::Validation(_))
    ));
}

#[test]
fn oversized_canvas_is_not_representable() {
    let canvas = Canvas {
        width: 70_000,
        height: 10,
    };
    assert!(check_gif_dims(canvas).is_err());
    assert_eq!(
        check_gif_dims(Canvas {
            width: 400,
            height: 200
        })
        .unwrap(),
        (400, 200)
    );
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert_eq!(build_thread_pool(Some(2)).unwrap().current_num_threads(), 2);
}
