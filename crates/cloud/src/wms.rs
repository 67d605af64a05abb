//! WMS GetMap client for cloud-free Sentinel-2 mosaics.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vegwatch_core::{Coordinate, GeoTransform, PixelGrid};

use crate::decode::decode_rgb;
use crate::error::{CloudError, Result};
use crate::http::HttpClient;

/// Connection and request options for a WMS endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WmsOptions {
    /// Service URL without query string
    pub endpoint: String,
    /// Layer name
    pub layer: String,
    /// Half the side of the requested box, in degrees
    pub half_extent: f64,
    /// Requested image MIME type
    pub format: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Retries after the first attempt
    pub max_retries: u32,
}

impl Default for WmsOptions {
    fn default() -> Self {
        Self {
            endpoint: "https://tiles.maps.eox.at/wms".into(),
            layer: "s2cloudless".into(),
            half_extent: 0.1,
            format: "image/jpeg".into(),
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

/// Upper bound on `max_retries`
pub const MAX_RETRIES: u32 = 10;

impl WmsOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_retries > MAX_RETRIES {
            return Err(invalid("max_retries", self.max_retries, format!("at most {}", MAX_RETRIES)));
        }
        if self.timeout_secs == 0 {
            return Err(invalid("timeout_secs", 0, "must be positive".into()));
        }
        if !(self.half_extent.is_finite() && self.half_extent > 0.0) {
            return Err(invalid("half_extent", self.half_extent, "must be a positive number".into()));
        }
        Ok(())
    }

    /// WMS 1.1.1 GetMap URL for a `size` x `size` snapshot around
    /// `coordinate` on `date`.
    pub fn getmap_url(&self, coordinate: Coordinate, date: NaiveDate, size: u32) -> String {
        let bbox = coordinate.bbox(self.half_extent);
        format!(
            "{}?service=WMS&request=GetMap&version=1.1.1&layers={}&styles=&format={}\
             &width={}&height={}&srs=EPSG:4326&bbox={}&time={}",
            self.endpoint,
            self.layer,
            self.format,
            size,
            size,
            bbox.to_wms(),
            date.format("%Y-%m-%d"),
        )
    }
}

fn invalid(name: &'static str, value: impl ToString, reason: String) -> CloudError {
    CloudError::Core(vegwatch_core::Error::InvalidParameter {
        name,
        value: value.to_string(),
        reason,
    })
}

/// Async WMS client.
pub struct WmsClient {
    http: HttpClient,
    options: WmsOptions,
}

impl WmsClient {
    pub fn new(options: WmsOptions) -> Result<Self> {
        options.validate()?;
        let http = HttpClient::new(Duration::from_secs(options.timeout_secs), options.max_retries)?;
        Ok(Self { http, options })
    }

    pub fn options(&self) -> &WmsOptions {
        &self.options
    }

    /// Fetch and decode one snapshot. The grid is georeferenced to the
    /// requested box.
    pub async fn fetch(&self, coordinate: Coordinate, date: NaiveDate, size: u32) -> Result<PixelGrid> {
        let url = self.options.getmap_url(coordinate, date, size);
        let bytes = self.http.get_bytes(&url).await?;
        debug!("{}: {} bytes for {}", self.options.layer, bytes.len(), date);

        let grid = decode_rgb(&bytes)?;
        let bbox = coordinate.bbox(self.options.half_extent);
        let transform = GeoTransform::from_bbox(&bbox, grid.cols(), grid.rows());
        Ok(grid.with_transform(transform))
    }
}
