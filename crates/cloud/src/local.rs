//! Image source backed by a local directory of dated snapshots.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;
use vegwatch_core::{Coordinate, FetchError, ImageSource, PixelGrid};

use crate::decode::read_image;

const EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Reads `<dir>/<YYYY-MM-DD>.{png,jpg,jpeg}`.
///
/// The coordinate is ignored: a directory holds snapshots of a single site.
/// The snapshot is returned at its stored resolution; `size` is not enforced.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    name: String,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root.display().to_string();
        Self { root, name }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// First existing file for `date`, trying extensions in order.
    pub fn path_for(&self, date: NaiveDate) -> Option<PathBuf> {
        let stem = date.format("%Y-%m-%d").to_string();
        EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", stem, ext)))
            .find(|p| p.is_file())
    }
}

impl ImageSource for DirectorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(
        &self,
        _coordinate: Coordinate,
        date: NaiveDate,
        _size: u32,
    ) -> Result<PixelGrid, FetchError> {
        let path = self.path_for(date).ok_or(FetchError::NotFound { date })?;
        debug!("Reading {}", path.display());
        read_image(&path).map_err(|e| e.into_fetch_error(date))
    }
}
