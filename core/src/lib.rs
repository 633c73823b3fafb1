//! Synchronous client for the PetFriends pet-management service.
//!
//! # Overview
//! Each operation (key retrieval, listing, creation with or without a photo,
//! photo upload, update, deletion) maps to exactly one HTTP request. Every
//! call returns the status code and the body, decoded as JSON when possible
//! and as raw text otherwise. Non-2xx statuses are data, not errors.
//!
//! # Design
//! - `PetFriendsClient` is stateless: it holds only `base_url`, builds
//!   `HttpRequest` values and decodes `HttpResponse` values without I/O.
//! - `HttpTransport` executes requests with blocking reqwest.
//! - `PetFriends` combines the two into one blocking call per operation.
//! - Auth keys are opaque strings passed in by the caller on every call.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::PetFriends;
pub use client::{
    PetFriendsClient, AUTH_KEY_HEADER, DEFAULT_BASE_URL, MY_PETS_FILTER, PHOTO_CONTENT_TYPE, PHOTO_FIELD,
};
pub use error::ApiError;
pub use http::{FilePart, HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use transport::HttpTransport;
pub use types::{ApiBody, ApiResult};
