//! Integration tests for image acquisition.
//!
//! These tests cover:
//! - Loading bitmaps and SVGs from disk
//! - Fetching over HTTP against a mock server
//! - Retrying transient failures and failing fast on others
//! - Serving repeated URLs from the download cache

use std::io::Cursor;
use std::time::Duration;

use image::{ImageFormat, Rgba, RgbaImage};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use codeblocks::source::{AcquisitionError, ImageCache, ImageFetcher, ImageLoader, ImageSource};

const SVG_LOGO: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 20">
    <rect x="0" y="0" width="30" height="10" fill="rgb(0, 0, 0)"/>
</svg>"#;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn fast_fetcher(attempts: u32) -> ImageFetcher {
    ImageFetcher::new(Duration::from_secs(5))
        .unwrap()
        .with_retry_config(attempts, Duration::from_millis(1), Duration::from_millis(5))
}

fn loader(cache: Option<ImageCache>) -> ImageLoader {
    ImageLoader::new(fast_fetcher(3), cache)
}

// === Local Files ===

#[tokio::test]
async fn test_load_png_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("logo.png");
    std::fs::write(&path, png_bytes(8, 6)).unwrap();

    let image = loader(None)
        .load(&ImageSource::Path(path))
        .await
        .unwrap();
    assert_eq!(image.dimensions(), (8, 6));
}

#[tokio::test]
async fn test_load_svg_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("logo.svg");
    std::fs::write(&path, SVG_LOGO).unwrap();

    let image = loader(None)
        .load(&ImageSource::Path(path))
        .await
        .unwrap();
    assert_eq!(image.dimensions(), (30, 20));
    assert_eq!(image.get_pixel(15, 5).0, [0, 0, 0, 255]);
    assert_eq!(image.get_pixel(15, 15).0[3], 0);
}

#[tokio::test]
async fn test_missing_file_is_a_read_error() {
    let temp = TempDir::new().unwrap();
    let result = loader(None)
        .load(&ImageSource::Path(temp.path().join("missing.png")))
        .await;
    assert!(matches!(result, Err(AcquisitionError::Read { .. })));
}

#[tokio::test]
async fn test_undecodable_file_is_a_decode_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.png");
    std::fs::write(&path, b"not a png").unwrap();

    let result = loader(None).load(&ImageSource::Path(path)).await;
    assert!(matches!(result, Err(AcquisitionError::Decode(_))));
}

// === HTTP ===

#[tokio::test]
async fn test_fetch_png_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wales.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(12, 9)))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/wales.png", server.uri());
    let image = loader(None).load(&ImageSource::parse(&url)).await.unwrap();
    assert_eq!(image.dimensions(), (12, 9));
}

#[tokio::test]
async fn test_fetch_svg_by_content_sniffing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SVG_LOGO))
        .mount(&server)
        .await;

    let url = format!("{}/logo", server.uri());
    let image = loader(None).load(&ImageSource::parse(&url)).await.unwrap();
    assert_eq!(image.dimensions(), (30, 20));
}

#[tokio::test]
async fn test_not_found_fails_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/missing.png", server.uri());
    let result = fast_fetcher(3).fetch(&url).await;
    assert!(
        matches!(result, Err(AcquisitionError::Status { status: 404, .. })),
        "{:?}",
        result
    );
}

#[tokio::test]
async fn test_transient_status_is_retried_until_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/busy.png"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let url = format!("{}/busy.png", server.uri());
    let result = fast_fetcher(3).fetch(&url).await;
    assert!(
        matches!(result, Err(AcquisitionError::Network { attempts: 3, .. })),
        "{:?}",
        result
    );
}

#[tokio::test]
async fn test_transient_status_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky.png"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(4, 4)))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/flaky.png", server.uri());
    let bytes = fast_fetcher(3).fetch(&url).await.unwrap();
    assert_eq!(bytes, png_bytes(4, 4));
}

// === Cache ===

#[tokio::test]
async fn test_second_load_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cached.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(5, 5)))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let cache = ImageCache::new(temp.path().to_path_buf());
    let loader = loader(Some(cache.clone()));
    let source = ImageSource::parse(&format!("{}/cached.png", server.uri()));

    let first = loader.load(&source).await.unwrap();
    let second = loader.load(&source).await.unwrap();
    assert_eq!(first, second);
    assert!(cache.get(&source.to_string()).is_some());
}

#[tokio::test]
async fn test_cache_is_skipped_when_disabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fresh.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(5, 5)))
        .expect(2)
        .mount(&server)
        .await;

    let loader = loader(None);
    let source = ImageSource::parse(&format!("{}/fresh.png", server.uri()));
    loader.load(&source).await.unwrap();
    loader.load(&source).await.unwrap();
}
