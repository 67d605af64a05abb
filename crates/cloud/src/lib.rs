//! # Vegwatch Cloud
//!
//! Satellite snapshot sources for the vegwatch time-series builder.
//!
//! - [`WmsSource`]: cloud-free Sentinel-2 mosaics over WMS GetMap, with
//!   request timeouts and exponential backoff retry
//! - [`DirectorySource`]: dated snapshots mirrored to a local directory
//! - [`CachedSource`]: LRU cache in front of any source
//! - [`load_image`]: one image from a path or URL, e.g. a fallback snapshot
//!
//! All sources implement [`vegwatch_core::ImageSource`] and report failures
//! as [`vegwatch_core::FetchError`].

pub mod cache;
pub mod decode;
pub mod error;
pub mod http;
pub mod local;
pub mod sync_api;
pub mod wms;

pub use cache::CachedSource;
pub use decode::{decode_rgb, read_image};
pub use error::{CloudError, Result};
pub use local::DirectorySource;
pub use sync_api::{load_image, WmsSource};
pub use wms::{WmsClient, WmsOptions};
