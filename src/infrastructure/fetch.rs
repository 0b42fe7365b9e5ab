// SPDX-License-Identifier: MPL-2.0
//! Reading image bytes from disk or over HTTP, and writing them back out.

use crate::domain::ImageSource;
use crate::error::{Error, Result};
use std::io::Cursor;
use std::path::PathBuf;

const USER_AGENT: &str = concat!("FarewellLens/", env!("CARGO_PKG_VERSION"));

/// Encoded image bytes plus the natural size probed from their header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub source: ImageSource,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Fetches `source` and probes its dimensions.
///
/// # Errors
///
/// Returns [`Error::Io`] or [`Error::Network`] when the bytes cannot be read,
/// and [`Error::Image`] when they are not a decodable image.
pub async fn load_image(source: ImageSource) -> Result<LoadedImage> {
    let bytes = fetch_bytes(&source).await?;
    into_loaded(source, bytes)
}

/// Probes already-available bytes, e.g. ones served by a card store.
///
/// # Errors
///
/// Returns [`Error::Image`] when the bytes are not a decodable image.
pub fn into_loaded(source: ImageSource, bytes: Vec<u8>) -> Result<LoadedImage> {
    let (width, height) = probe_dimensions(&bytes)?;
    Ok(LoadedImage {
        source,
        bytes,
        width,
        height,
    })
}

/// Raw bytes behind `source`.
///
/// # Errors
///
/// Fails on missing files, transport errors and non-success HTTP statuses.
pub async fn fetch_bytes(source: &ImageSource) -> Result<Vec<u8>> {
    match source {
        ImageSource::Path(path) => Ok(tokio::fs::read(path).await?),
        ImageSource::Url(url) => {
            let client = reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::limited(10))
                .user_agent(USER_AGENT)
                .build()?;
            let response = client.get(url).send().await?;
            if !response.status().is_success() {
                return Err(Error::Network(format!("HTTP status: {}", response.status())));
            }
            Ok(response.bytes().await?.to_vec())
        }
    }
}

/// Width and height from the image header, without decoding pixels.
///
/// # Errors
///
/// Returns [`Error::Image`] for unknown formats or truncated headers.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = image_rs::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| Error::Image(err.to_string()))?;
    Ok(reader.into_dimensions()?)
}

/// Writes downloaded bytes to `path`, returning it on success.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub async fn save_bytes(path: PathBuf, bytes: Vec<u8>) -> Result<PathBuf> {
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, RgbaImage};
    use tempfile::tempdir;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbaImage::new(width, height)
            .write_to(&mut out, ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    #[test]
    fn probe_reads_png_header() {
        assert_eq!(probe_dimensions(&png_bytes(7, 3)).expect("probe"), (7, 3));
    }

    #[test]
    fn probe_rejects_garbage() {
        assert!(matches!(
            probe_dimensions(b"definitely not an image"),
            Err(Error::Image(_))
        ));
    }

    #[tokio::test]
    async fn load_image_from_path() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("tiny.png");
        std::fs::write(&path, png_bytes(12, 8)).expect("write");

        let loaded = load_image(ImageSource::Path(path.clone()))
            .await
            .expect("load");
        assert_eq!((loaded.width, loaded.height), (12, 8));
        assert_eq!(loaded.source, ImageSource::Path(path));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempdir().expect("temp dir");
        let result = load_image(ImageSource::Path(dir.path().join("nope.png"))).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn save_bytes_writes_file() {
        let dir = tempdir().expect("temp dir");
        let target = dir.path().join("copy.png");
        let written = save_bytes(target.clone(), vec![1, 2, 3])
            .await
            .expect("save");
        assert_eq!(written, target);
        assert_eq!(std::fs::read(target).expect("read"), vec![1, 2, 3]);
    }
}
