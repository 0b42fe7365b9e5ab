// SPDX-License-Identifier: MPL-2.0
//! Location of an image attached to a card.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where an image can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSource {
    /// Local file.
    Path(PathBuf),
    /// Remote `http` or `https` resource.
    Url(String),
}

impl ImageSource {
    /// Interprets user or store input.
    ///
    /// `http://` and `https://` become [`ImageSource::Url`], `file://` is
    /// stripped, anything else is treated as a filesystem path.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else if lower.starts_with("file://") {
            Self::Path(PathBuf::from(&trimmed["file://".len()..]))
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(path) => Some(path),
            Self::Url(_) => None,
        }
    }

    /// File name suggested when saving the image, without query or fragment.
    #[must_use]
    pub fn suggested_file_name(&self) -> String {
        let candidate = match self {
            Self::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            Self::Url(url) => url
                .split(['?', '#'])
                .next()
                .and_then(|base| base.rsplit('/').next())
                .map(str::to_string),
        };

        candidate
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "image.png".to_string())
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}
