//! Thumbnail acquisition: concurrent fetch, decode, resize and palette reduction.

/// Concurrent, failure-tolerant acquisition of a thumbnail list.
pub mod acquire;
/// Byte sources for thumbnails (HTTP by default).
pub mod fetch;
/// Decoded, resized thumbnail rasters.
pub mod thumbnail;
