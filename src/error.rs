// SPDX-License-Identifier: MPL-2.0
use crate::domain::card::{CardId, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Image Error: {0}")]
    Image(String),

    #[error("Network Error: {0}")]
    Network(String),

    #[error("Store Error: {0}")]
    Store(String),

    #[error("Card {0} not found")]
    NotFound(CardId),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Returns the i18n message key used when the error reaches the user.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Image(_) => "error-image",
            Error::Network(_) => "error-network",
            Error::Store(_) => "error-store",
            Error::NotFound(_) => "error-not-found",
            Error::Validation(err) => err.i18n_key(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl<T: std::fmt::Debug> From<ciborium::de::Error<T>> for Error {
    fn from(err: ciborium::de::Error<T>) -> Self {
        Error::Store(err.to_string())
    }
}

impl<T: std::fmt::Debug> From<ciborium::ser::Error<T>> for Error {
    fn from(err: ciborium::ser::Error<T>) -> Self {
        Error::Store(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
