//! Blocking API.
//!
//! Wraps the async [`WmsClient`] with a Tokio runtime so it can serve as an
//! [`ImageSource`], which the time-series builder calls synchronously.

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use vegwatch_core::{Coordinate, FetchError, ImageSource, PixelGrid};

use crate::decode::{decode_rgb, read_image};
use crate::error::{CloudError, Result};
use crate::http::HttpClient;
use crate::wms::{WmsClient, WmsOptions};

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    // Multi-threaded so several rayon workers can block_on concurrently.
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|e| CloudError::Network(e.to_string()))
}

/// Blocking WMS image source.
pub struct WmsSource {
    rt: tokio::runtime::Runtime,
    inner: WmsClient,
}

impl WmsSource {
    pub fn new(options: WmsOptions) -> Result<Self> {
        let rt = build_runtime()?;
        let inner = WmsClient::new(options)?;
        Ok(Self { rt, inner })
    }

    pub fn options(&self) -> &WmsOptions {
        self.inner.options()
    }

    /// Fetch one snapshot (blocking).
    pub fn fetch_grid(&self, coordinate: Coordinate, date: NaiveDate, size: u32) -> Result<PixelGrid> {
        self.rt.block_on(self.inner.fetch(coordinate, date, size))
    }
}

impl ImageSource for WmsSource {
    fn name(&self) -> &str {
        &self.inner.options().layer
    }

    fn fetch(
        &self,
        coordinate: Coordinate,
        date: NaiveDate,
        size: u32,
    ) -> std::result::Result<PixelGrid, FetchError> {
        self.fetch_grid(coordinate, date, size)
            .map_err(|e| e.into_fetch_error(date))
    }
}

fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a single image from a local path or an http(s) URL (blocking).
pub fn load_image(path_or_url: &str) -> Result<PixelGrid> {
    if !is_url(path_or_url) {
        return read_image(Path::new(path_or_url));
    }

    let defaults = WmsOptions::default();
    let rt = build_runtime()?;
    let bytes = rt.block_on(async {
        let http = HttpClient::new(Duration::from_secs(defaults.timeout_secs), defaults.max_retries)?;
        http.get_bytes(path_or_url).await
    })?;
    decode_rgb(&bytes)
}
