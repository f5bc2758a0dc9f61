use std::collections::HashMap;
use std::future::Future;
use std::io::Cursor;
use std::time::Duration;

use super::*;

struct MapFetcher {
    bodies: HashMap<String, Vec<u8>>,
    stall: Option<String>,
}

impl ThumbnailFetcher for MapFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = UnboxResult<Vec<u8>>> + Send {
        let body = self.bodies.get(url).cloned();
        let stall = self.stall.as_deref() == Some(url);
        let url = url.to_owned();
        async move {
            if stall {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            body.ok_or_else(|| UnboxError::acquisition(format!("404 for {url}")))
        }
    }
}

fn png(color: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba(color));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn cfg() -> AcquireConfig {
    AcquireConfig {
        thumb_width: 20,
        thumb_height: 10,
        request_timeout_ms: 200,
        palette_colors: None,
    }
}

#[tokio::test]
async fn failures_are_dropped_not_raised() {
    let mut bodies = HashMap::new();
    bodies.insert("a".to_string(), png([255, 0, 0, 255]));
    bodies.insert("b".to_string(), b"<html>not an image</html>".to_vec());
    bodies.insert("c".to_string(), png([0, 0, 255, 255]));
    let fetcher = Arc::new(MapFetcher {
        bodies,
        stall: None,
    });

    let urls = ["a", "b", "c", "missing"].map(String::from);
    let thumbs = acquire_thumbnails(fetcher, &urls, &cfg()).await;
    assert_eq!(thumbs.len(), 2);
    for t in &thumbs {
        assert_eq!((t.width(), t.height()), (20, 10));
    }
}

#[tokio::test]
async fn stalled_fetch_times_out_and_is_skipped() {
    let mut bodies = HashMap::new();
    bodies.insert("slow".to_string(), png([0, 255, 0, 255]));
    bodies.insert("fast".to_string(), png([0, 255, 0, 255]));
    let fetcher = Arc::new(MapFetcher {
        bodies,
        stall: Some("slow".to_string()),
    });

    let urls = ["slow", "fast"].map(String::from);
    let thumbs = acquire_thumbnails(fetcher, &urls, &cfg()).await;
    assert_eq!(thumbs.len(), 1);
}

#[tokio::test]
async fn all_failures_yield_empty_list() {
    let fetcher = Arc::new(MapFetcher {
        bodies: HashMap::new(),
        stall: None,
    });
    let urls = ["x", "y"].map(String::from);
    assert!(acquire_thumbnails(fetcher, &urls, &cfg()).await.is_empty());
}
