use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

pub const DEMO_EMAIL: &str = "valid@user";
pub const DEMO_PASSWORD: &str = "correctpass";
pub const MY_PETS_FILTER: &str = "my_pets";

#[derive(Clone, Debug)]
pub struct Account {
    pub email: String,
    pub password: String,
}

impl Account {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_photo: Option<String>,
    #[serde(skip)]
    owner_key: String,
}

#[derive(Default, Deserialize)]
pub struct PetForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub animal_type: String,
    #[serde(default)]
    pub age: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filter: String,
}

struct Registered {
    account: Account,
    key: String,
}

#[derive(Default)]
struct Store {
    accounts: Vec<Registered>,
    /// Newest first.
    pets: Vec<Pet>,
}

type Db = Arc<RwLock<Store>>;

#[derive(Debug, Error)]
enum Rejection {
    #[error("Forbidden. Wrong email or password")]
    BadCredentials,
    #[error("Forbidden. Please provide a valid auth_key")]
    MissingKey,
    #[error("Forbidden. Pet {0} belongs to another user")]
    NotOwner(String),
    #[error("Pet with id {0} not found")]
    NotFound(String),
    #[error("Bad Request: pet '{name}' was not added: {reason}")]
    PetRejected { name: String, reason: &'static str },
    #[error("Bad Request: {0}")]
    Malformed(String),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status = match self {
            Rejection::BadCredentials | Rejection::MissingKey | Rejection::NotOwner(_) => StatusCode::FORBIDDEN,
            Rejection::NotFound(_) => StatusCode::NOT_FOUND,
            Rejection::PetRejected { .. } | Rejection::Malformed(_) => StatusCode::BAD_REQUEST,
        };
        // The real service answers bad requests with a text page, not JSON.
        if status == StatusCode::BAD_REQUEST {
            return (status, self.to_string()).into_response();
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn app() -> Router {
    app_with_accounts(vec![Account::new(DEMO_EMAIL, DEMO_PASSWORD)])
}

/// Router seeded with the given accounts, each issued a fresh 64-hex key.
pub fn app_with_accounts(accounts: Vec<Account>) -> Router {
    let store = Store {
        accounts: accounts
            .into_iter()
            .map(|account| Registered {
                account,
                key: format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()),
            })
            .collect(),
        pets: Vec::new(),
    };
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/key", get(get_api_key))
        .route("/api/pets", get(list_pets).post(create_pet))
        .route("/api/create_pet_simple", post(create_pet_simple))
        .route("/api/pets/set_photo/{id}", post(set_photo))
        .route("/api/pets/{id}", put(update_pet).delete(delete_pet))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_accounts(listener: TcpListener, accounts: Vec<Account>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_accounts(accounts)).await
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or_default()
}

fn authorize(store: &Store, headers: &HeaderMap) -> Result<String, Rejection> {
    let key = header(headers, "auth_key");
    store
        .accounts
        .iter()
        .find(|r| r.key == key)
        .map(|r| r.key.clone())
        .ok_or(Rejection::MissingKey)
}

fn owned_pet<'a>(store: &'a mut Store, id: &str, key: &str) -> Result<&'a mut Pet, Rejection> {
    let pet = store
        .pets
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| Rejection::NotFound(id.to_string()))?;
    if pet.owner_key != key {
        return Err(Rejection::NotOwner(id.to_string()));
    }
    Ok(pet)
}

fn valid_age(age: &str) -> bool {
    age.trim().parse::<u32>().is_ok()
}

/// Encode a JPEG or PNG as a `data:` URI. The declared content type of the
/// upload is ignored; only the leading bytes count.
fn photo_data_uri(bytes: &[u8]) -> Option<String> {
    let mime = if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else {
        return None;
    };
    Some(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

#[derive(Default)]
struct Upload {
    fields: PetForm,
    photo: Option<Vec<u8>>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, Rejection> {
    let mut upload = Upload::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Rejection::Malformed(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "pet_photo" {
            let bytes = field.bytes().await.map_err(|e| Rejection::Malformed(e.to_string()))?;
            upload.photo = Some(bytes.to_vec());
            continue;
        }
        let value = field.text().await.map_err(|e| Rejection::Malformed(e.to_string()))?;
        match name.as_str() {
            "name" => upload.fields.name = value,
            "animal_type" => upload.fields.animal_type = value,
            "age" => upload.fields.age = value,
            _ => {}
        }
    }
    Ok(upload)
}

async fn get_api_key(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, Rejection> {
    let email = header(&headers, "email");
    let password = header(&headers, "password");
    let store = db.read().await;
    store
        .accounts
        .iter()
        .find(|r| r.account.email == email && r.account.password == password)
        .map(|r| Json(json!({ "key": r.key })))
        .ok_or(Rejection::BadCredentials)
}

async fn list_pets(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, Rejection> {
    let store = db.read().await;
    let key = authorize(&store, &headers)?;
    let pets: Vec<&Pet> = store
        .pets
        .iter()
        .filter(|p| query.filter != MY_PETS_FILTER || p.owner_key == key)
        .collect();
    Ok(Json(json!({ "pets": pets })))
}

async fn create_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<Pet>, Rejection> {
    let key = authorize(&*db.read().await, &headers)?;
    let Upload { fields, photo } = read_upload(multipart).await?;
    if !valid_age(&fields.age) {
        return Err(Rejection::PetRejected {
            name: fields.name,
            reason: "age must be a number",
        });
    }
    let Some(pet_photo) = photo.as_deref().and_then(photo_data_uri) else {
        return Err(Rejection::PetRejected {
            name: fields.name,
            reason: "unsupported photo format, use JPG, JPEG or PNG",
        });
    };
    let pet = insert_pet(&db, key, fields, Some(pet_photo)).await;
    Ok(Json(pet))
}

async fn create_pet_simple(
    State(db): State<Db>,
    headers: HeaderMap,
    Form(fields): Form<PetForm>,
) -> Result<Json<Pet>, Rejection> {
    let key = authorize(&*db.read().await, &headers)?;
    if !valid_age(&fields.age) {
        return Err(Rejection::PetRejected {
            name: fields.name,
            reason: "age must be a number",
        });
    }
    let pet = insert_pet(&db, key, fields, None).await;
    Ok(Json(pet))
}

async fn insert_pet(db: &Db, owner_key: String, fields: PetForm, pet_photo: Option<String>) -> Pet {
    let pet = Pet {
        id: Uuid::new_v4().to_string(),
        name: fields.name,
        animal_type: fields.animal_type,
        age: fields.age,
        pet_photo,
        owner_key,
    };
    debug!(id = %pet.id, name = %pet.name, "pet created");
    db.write().await.pets.insert(0, pet.clone());
    pet
}

async fn set_photo(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<Pet>, Rejection> {
    let upload = read_upload(multipart).await?;
    let mut store = db.write().await;
    let key = authorize(&store, &headers)?;
    let pet = owned_pet(&mut store, &id, &key)?;
    let pet_photo = upload
        .photo
        .as_deref()
        .and_then(photo_data_uri)
        .ok_or_else(|| Rejection::Malformed("unsupported photo format, use JPG, JPEG or PNG".to_string()))?;
    pet.pet_photo = Some(pet_photo);
    debug!(%id, "pet photo set");
    Ok(Json(pet.clone()))
}

async fn update_pet(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(fields): Form<PetForm>,
) -> Result<Json<Pet>, Rejection> {
    let mut store = db.write().await;
    let key = authorize(&store, &headers)?;
    let pet = owned_pet(&mut store, &id, &key)?;
    if !valid_age(&fields.age) {
        return Err(Rejection::Malformed("age must be a number".to_string()));
    }
    pet.name = fields.name;
    pet.animal_type = fields.animal_type;
    pet.age = fields.age;
    debug!(%id, "pet updated");
    Ok(Json(pet.clone()))
}

/// Answers `200` with an empty body, like the real service.
async fn delete_pet(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    let key = authorize(&store, &headers)?;
    owned_pet(&mut store, &id, &key)?;
    store.pets.retain(|p| p.id != id);
    debug!(%id, "pet deleted");
    Ok(StatusCode::OK)
}
