use std::sync::Arc;

use tokio::task::JoinSet;

use crate::assets::fetch::ThumbnailFetcher;
use crate::assets::thumbnail::{ThumbnailImage, thumbnail_from_bytes};
use crate::config::settings::AcquireConfig;
use crate::foundation::error::{UnboxError, UnboxResult};

/// Fetch, decode and resize every URL concurrently, one task per URL.
///
/// A URL that fails at any step (request, timeout, status, decode) is logged and skipped; this
/// never fails as a whole. The result is in completion order, not input order, and may be
/// shorter than `urls` or empty.
#[tracing::instrument(skip_all, fields(urls = urls.len()))]
pub async fn acquire_thumbnails<F: ThumbnailFetcher>(
    fetcher: Arc<F>,
    urls: &[String],
    cfg: &AcquireConfig,
) -> Vec<ThumbnailImage> {
    let mut tasks = JoinSet::new();
    for url in urls {
        let fetcher = Arc::clone(&fetcher);
        let url = url.clone();
        let cfg = cfg.clone();
        tasks.spawn(async move {
            let res = acquire_one(fetcher.as_ref(), &url, cfg).await;
            (url, res)
        });
    }

    let mut out = Vec::with_capacity(urls.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(thumb))) => out.push(thumb),
            Ok((url, Err(e))) => {
                tracing::warn!(%url, error = %e, "dropping thumbnail");
            }
            Err(e) => {
                tracing::warn!(error = %e, "thumbnail task did not complete");
            }
        }
    }

    tracing::debug!(
        requested = urls.len(),
        acquired = out.len(),
        "thumbnail acquisition finished"
    );
    out
}

async fn acquire_one<F: ThumbnailFetcher>(
    fetcher: &F,
    url: &str,
    cfg: AcquireConfig,
) -> UnboxResult<ThumbnailImage> {
    let bytes = tokio::time::timeout(cfg.request_timeout(), fetcher.fetch(url))
        .await
        .map_err(|_| {
            UnboxError::acquisition(format!(
                "fetch timed out after {}ms",
                cfg.request_timeout_ms
            ))
        })??;

    tokio::task::spawn_blocking(move || thumbnail_from_bytes(&bytes, &cfg))
        .await
        .map_err(|e| UnboxError::acquisition(format!("decode task failed: {e}")))?
}

#[cfg(test)]
#[path = "../../tests/unit/assets/acquire.rs"]
mod tests;
