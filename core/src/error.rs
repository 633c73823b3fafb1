//! Error types for the PetFriends client.
//!
//! # Design
//! Only failures that happen before or outside the HTTP exchange are errors.
//! A response with any status code is a successful call from the client's
//! point of view and is returned as an `ApiResult`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS or TLS failure, or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The photo to upload could not be opened.
    #[error("cannot open photo {}: {source}", path.display())]
    Photo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A header name or value cannot be sent over HTTP.
    #[error("invalid value for header `{name}`")]
    InvalidHeader { name: String },
}
