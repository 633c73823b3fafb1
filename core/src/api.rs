//! One blocking call per PetFriends operation.
//!
//! `PetFriends` pairs a `PetFriendsClient` with an `HttpTransport`. Every
//! method builds the request, sends it and decodes the body the same way,
//! returning `(status, body)` as an `ApiResult` whatever the status was.

use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::client::{PetFriendsClient, DEFAULT_BASE_URL};
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::HttpTransport;
use crate::types::{ApiBody, ApiResult};

#[derive(Debug, Clone)]
pub struct PetFriends {
    client: PetFriendsClient,
    transport: HttpTransport,
}

impl PetFriends {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::with_transport(PetFriendsClient::new(base_url), HttpTransport::new()?))
    }

    /// Client for the public PetFriends deployment.
    pub fn public() -> Result<Self, ApiError> {
        Self::new(DEFAULT_BASE_URL)
    }

    pub fn with_transport(client: PetFriendsClient, transport: HttpTransport) -> Self {
        Self { client, transport }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Request an auth key. A valid pair yields `200` and a `key` field.
    #[instrument(skip(self, password))]
    pub fn get_api_key(&self, email: &str, password: &str) -> Result<ApiResult, ApiError> {
        self.send(self.client.build_get_api_key(email, password))
    }

    /// List pets. An empty `filter` lists everything, `my_pets` only the
    /// caller's own.
    #[instrument(skip(self, auth_key))]
    pub fn get_list_of_pets(&self, auth_key: &str, filter: &str) -> Result<ApiResult, ApiError> {
        self.send(self.client.build_list_pets(auth_key, filter))
    }

    /// Create a pet and upload its photo in the same request.
    #[instrument(skip(self, auth_key))]
    pub fn add_new_pet(
        &self,
        auth_key: &str,
        name: &str,
        animal_type: &str,
        age: &str,
        pet_photo: &Path,
    ) -> Result<ApiResult, ApiError> {
        self.send(self.client.build_add_new_pet(auth_key, name, animal_type, age, pet_photo))
    }

    #[instrument(skip(self, auth_key))]
    pub fn add_new_pet_without_photo(
        &self,
        auth_key: &str,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> Result<ApiResult, ApiError> {
        self.send(self.client.build_add_new_pet_without_photo(auth_key, name, animal_type, age))
    }

    #[instrument(skip(self, auth_key))]
    pub fn add_photo_of_pet(&self, auth_key: &str, pet_id: &str, pet_photo: &Path) -> Result<ApiResult, ApiError> {
        self.send(self.client.build_add_photo_of_pet(auth_key, pet_id, pet_photo))
    }

    /// Delete a pet. The service may answer `200` with an empty body, which
    /// comes back as `ApiBody::Raw("")`.
    #[instrument(skip(self, auth_key))]
    pub fn delete_pet(&self, auth_key: &str, pet_id: &str) -> Result<ApiResult, ApiError> {
        self.send(self.client.build_delete_pet(auth_key, pet_id))
    }

    #[instrument(skip(self, auth_key))]
    pub fn update_pet_info(
        &self,
        auth_key: &str,
        pet_id: &str,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> Result<ApiResult, ApiError> {
        self.send(self.client.build_update_pet_info(auth_key, pet_id, name, animal_type, age))
    }

    fn send(&self, req: HttpRequest) -> Result<ApiResult, ApiError> {
        debug!(method = req.method.as_str(), url = %req.path, "sending request");
        let response = self.transport.execute(req)?;
        let result = self.client.parse_response(response);
        debug!(status = result.status, "request finished");
        if let ApiBody::Raw(text) = &result.body {
            trace!(len = text.len(), "body is not JSON, keeping raw text");
        }
        Ok(result)
    }
}
