//! Blocking execution of `HttpRequest` values with reqwest.
//!
//! Non-2xx statuses are returned as data. Only failures to reach the server,
//! to read the response, or to open a photo become errors.

use reqwest::blocking::{multipart, Client};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use tracing::trace;

use crate::error::ApiError;
use crate::http::{FilePart, HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Sends requests and collects responses. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("petfriends-core/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self
            .client
            .request(method(req.method), &req.path)
            .headers(header_map(&req.headers)?);

        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }

        builder = match req.body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Multipart { fields, file } => builder.multipart(multipart_form(fields, file)?),
        };

        // The multipart form, and with it any open photo file, is dropped
        // once `send` returns.
        let response = builder.send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        trace!(status, len = body.len(), "response received");

        // Decoding only looks at status and body; response headers are not
        // part of the result and are not copied.
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, ApiError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = || ApiError::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_bytes(value.as_bytes()).map_err(|_| invalid())?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn multipart_form(fields: Vec<(String, String)>, file: Option<FilePart>) -> Result<multipart::Form, ApiError> {
    let mut form = multipart::Form::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }
    if let Some(file) = file {
        let part = multipart::Part::file(&file.path).map_err(|source| ApiError::Photo {
            path: file.path.clone(),
            source,
        })?;
        form = form.part(file.field, part.mime_str(&file.content_type)?);
    }
    Ok(form)
}
