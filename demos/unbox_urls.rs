//! Fetch thumbnails over HTTP and render an unboxing.
//!
//! `cargo run --example unbox_urls -- out.gif https://host/a.png https://host/b.png`
//!
//! Pass `UNBOX_SETTINGS=path/to/settings.json` to override the defaults.

use std::path::PathBuf;

use crate_unbox::{UnboxRequest, UnboxSession, UnboxSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let out = PathBuf::from(args.next().unwrap_or_else(|| "unboxing.gif".to_string()));
    let urls: Vec<String> = args.collect();
    anyhow::ensure!(!urls.is_empty(), "usage: unbox_urls <out.gif> <url>...");

    let settings = match std::env::var_os("UNBOX_SETTINGS") {
        Some(p) => UnboxSettings::from_path(p)?,
        None => UnboxSettings::default(),
    };
    let target_index = urls.len() * (settings.strip_repeats / 2);
    let session = UnboxSession::new(settings)?;

    let output = session
        .generate(&UnboxRequest {
            urls,
            win_label: "Karambit | Fade".to_string(),
            rarity_score: 98.0,
            target_index,
            fps: 30,
        })
        .await?;
    println!("{} frames, tier {}", output.total_frames(), output.tier.name());
    std::fs::write(&out, output.into_bytes())?;
    Ok(())
}
