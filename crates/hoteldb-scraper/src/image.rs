//! Best-effort hotel image download.
//!
//! An image that cannot be fetched or written never fails the record; the
//! failure is logged and the record is stored with an empty image path.

use std::path::{Path, PathBuf};

use crate::error::ScraperError;
use crate::fetch::{fetch_success, PageFetcher};

const IMAGE_EXTENSION: &str = "jpg";

/// File name for a hotel's image.
///
/// Whitespace, path separators and `:` in `title` become `_`, as does a
/// leading `.`, so the result is always a single plain file name.
#[must_use]
pub fn image_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if c.is_whitespace() || matches!(c, '/' | '\\' | ':') || (i == 0 && c == '.') {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("{stem}.{IMAGE_EXTENSION}")
}


/// Downloads hotel images into `base_dir`.
#[derive(Debug, Clone)]
pub struct ImageFetcher<F> {
    fetcher: F,
    base_dir: PathBuf,
}

impl<F: PageFetcher> ImageFetcher<F> {
    pub fn new(fetcher: F, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            base_dir: base_dir.into(),
        }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Fetches the image at `url` for the hotel named `title`.
    ///
    /// Returns the local path the image was written to, or an empty string
    /// when there is no title, no URL, or the download or write failed.
    /// Without a title no request is made.
    pub async fn fetch(&self, title: Option<&str>, url: Option<&str>) -> String {
        let Some(title) = title.filter(|t| !t.is_empty()) else {
            return String::new();
        };
        let Some(url) = url.filter(|u| !u.is_empty()) else {
            return String::new();
        };

        let path = self.base_dir.join(image_file_name(title));
        match self.download(url, &path).await {
            Ok(()) => path.to_string_lossy().into_owned(),
            Err(e) => {
                tracing::warn!(hotel = title, url, error = %e, "failed to download image");
                String::new()
            }
        }
    }

    async fn download(&self, url: &str, path: &Path) -> Result<(), ScraperError> {
        let page = fetch_success(&self.fetcher, url).await?;

        let io_err = |source| ScraperError::Io {
            path: path.display().to_string(),
            source,
        };
        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(io_err)?;
        tokio::fs::write(path, &page.body).await.map_err(io_err)?;
        Ok(())
    }
}
