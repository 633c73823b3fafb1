//! Stateless HTTP request builder and response decoder for the PetFriends API.
//!
//! # Design
//! `PetFriendsClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation has a `build_*` method that produces an
//! `HttpRequest`; every response goes through the same `parse_response`,
//! which never fails. Status interpretation is left to the caller.

use std::path::Path;

use crate::http::{FilePart, HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::types::{ApiBody, ApiResult};

/// Public PetFriends deployment.
pub const DEFAULT_BASE_URL: &str = "https://petfriends.skillfactory.ru";

/// Filter value that limits a listing to the caller's own pets.
pub const MY_PETS_FILTER: &str = "my_pets";

/// Multipart field carrying the photo.
pub const PHOTO_FIELD: &str = "pet_photo";

/// Content type sent for every photo part, whatever the file really is.
pub const PHOTO_CONTENT_TYPE: &str = "image/jpeg";

/// Header carrying the auth key on every call except key retrieval.
pub const AUTH_KEY_HEADER: &str = "auth_key";

/// Synchronous, stateless request builder for the PetFriends API.
#[derive(Debug, Clone)]
pub struct PetFriendsClient {
    base_url: String,
}

impl Default for PetFriendsClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PetFriendsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_api_key(&self, email: &str, password: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/key", self.base_url),
            headers: vec![
                ("email".to_string(), email.to_string()),
                ("password".to_string(), password.to_string()),
            ],
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn build_list_pets(&self, auth_key: &str, filter: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/pets", self.base_url),
            headers: auth_headers(auth_key),
            query: vec![("filter".to_string(), filter.to_string())],
            body: RequestBody::Empty,
        }
    }

    pub fn build_add_new_pet(
        &self,
        auth_key: &str,
        name: &str,
        animal_type: &str,
        age: &str,
        pet_photo: &Path,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/pets", self.base_url),
            headers: auth_headers(auth_key),
            query: Vec::new(),
            body: RequestBody::Multipart {
                fields: pet_fields(name, animal_type, age),
                file: Some(photo_part(pet_photo)),
            },
        }
    }

    pub fn build_add_new_pet_without_photo(
        &self,
        auth_key: &str,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/create_pet_simple", self.base_url),
            headers: auth_headers(auth_key),
            query: Vec::new(),
            body: RequestBody::Form(pet_fields(name, animal_type, age)),
        }
    }

    pub fn build_add_photo_of_pet(&self, auth_key: &str, pet_id: &str, pet_photo: &Path) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/pets/set_photo/{pet_id}", self.base_url),
            headers: auth_headers(auth_key),
            query: Vec::new(),
            body: RequestBody::Multipart {
                fields: Vec::new(),
                file: Some(photo_part(pet_photo)),
            },
        }
    }

    pub fn build_delete_pet(&self, auth_key: &str, pet_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/api/pets/{pet_id}", self.base_url),
            headers: auth_headers(auth_key),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn build_update_pet_info(
        &self,
        auth_key: &str,
        pet_id: &str,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/api/pets/{pet_id}", self.base_url),
            headers: auth_headers(auth_key),
            query: Vec::new(),
            body: RequestBody::Form(pet_fields(name, animal_type, age)),
        }
    }

    /// Decode any response into `(status, body)`.
    ///
    /// The status is passed through untouched and a body that is not JSON is
    /// returned as text, so this cannot fail.
    pub fn parse_response(&self, response: HttpResponse) -> ApiResult {
        ApiResult {
            status: response.status,
            body: ApiBody::decode(response.body),
        }
    }
}

fn auth_headers(auth_key: &str) -> Vec<(String, String)> {
    vec![(AUTH_KEY_HEADER.to_string(), auth_key.to_string())]
}

fn pet_fields(name: &str, animal_type: &str, age: &str) -> Vec<(String, String)> {
    vec![
        ("name".to_string(), name.to_string()),
        ("animal_type".to_string(), animal_type.to_string()),
        ("age".to_string(), age.to_string()),
    ]
}

fn photo_part(path: &Path) -> FilePart {
    FilePart {
        field: PHOTO_FIELD.to_string(),
        path: path.to_path_buf(),
        content_type: PHOTO_CONTENT_TYPE.to_string(),
    }
}
