//! Acquiring the pixel buffer the block transformation runs on.
//!
//! Sources are either local files or `http(s)` URLs. Bitmaps are decoded with
//! the `image` crate; SVG documents are rasterized at their declared size.
//! Remote bodies can be cached on disk so repeated runs skip the network.

mod cache;
mod error;
mod fetch;
mod retry;
mod svg;

pub use cache::{default_dir as default_cache_dir, ImageCache};
pub use error::AcquisitionError;
pub use fetch::{ImageFetcher, DEFAULT_TIMEOUT};
pub use retry::{calculate_backoff, is_transient_status, DEFAULT_NETWORK_RETRIES};
pub use svg::{looks_like_svg, rasterize_svg};

use image::RgbaImage;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the source image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Url(String),
}

impl ImageSource {
    /// Interpret a CLI argument: `http://` and `https://` prefixes mean a URL,
    /// anything else is a filesystem path.
    pub fn parse(input: &str) -> Self {
        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Url(input.to_string())
        } else {
            ImageSource::Path(PathBuf::from(input))
        }
    }

    /// Whether the name alone marks this as an SVG.
    pub fn has_svg_extension(&self) -> bool {
        let name = match self {
            ImageSource::Path(path) => path.to_string_lossy().into_owned(),
            // Ignore query strings and fragments
            ImageSource::Url(url) => url.split(['?', '#']).next().unwrap_or(url).to_string(),
        };
        Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => write!(f, "{}", path.display()),
            ImageSource::Url(url) => f.write_str(url),
        }
    }
}

/// Decode raw bytes into an RGBA buffer.
///
/// SVG is detected from `svg_hint` or the content itself; everything else is
/// handed to `image` with format sniffing.
pub fn decode_image(bytes: &[u8], svg_hint: bool) -> Result<RgbaImage, AcquisitionError> {
    let image = if svg_hint || looks_like_svg(bytes) {
        rasterize_svg(bytes)?
    } else {
        image::load_from_memory(bytes)?.to_rgba8()
    };

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AcquisitionError::EmptyImage { width, height });
    }
    Ok(image)
}

/// Reads, fetches and decodes source images.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    fetcher: ImageFetcher,
    cache: Option<ImageCache>,
}

impl ImageLoader {
    pub fn new(fetcher: ImageFetcher, cache: Option<ImageCache>) -> Self {
        Self { fetcher, cache }
    }

    pub fn cache(&self) -> Option<&ImageCache> {
        self.cache.as_ref()
    }

    /// Load and decode `source`.
    pub async fn load(&self, source: &ImageSource) -> Result<RgbaImage, AcquisitionError> {
        let bytes = self.read_bytes(source).await?;
        let image = decode_image(&bytes, source.has_svg_extension())?;
        log::info!(
            "Loaded {} ({}x{})",
            source,
            image.width(),
            image.height()
        );
        Ok(image)
    }

    /// Raw bytes of `source`, from disk, the cache or the network.
    pub async fn read_bytes(&self, source: &ImageSource) -> Result<Vec<u8>, AcquisitionError> {
        match source {
            ImageSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| AcquisitionError::Read {
                        path: path.clone(),
                        source,
                    })
            }
            ImageSource::Url(url) => self.fetch_cached(url).await,
        }
    }

    async fn fetch_cached(&self, url: &str) -> Result<Vec<u8>, AcquisitionError> {
        if let Some(path) = self.cache.as_ref().and_then(|cache| cache.get(url)) {
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    log::debug!("Cache hit for {} at {}", url, path.display());
                    return Ok(bytes);
                }
                Err(e) => log::warn!("Ignoring unreadable cache entry {}: {}", path.display(), e),
            }
        }

        let bytes = self.fetcher.fetch(url).await?;

        if let Some(cache) = &self.cache {
            // A failed cache write should not fail the run
            if let Err(e) = cache.store(url, &bytes) {
                log::warn!("Failed to cache {}: {}", url, e);
            }
        }

        Ok(bytes)
    }
}
