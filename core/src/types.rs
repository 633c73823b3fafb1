//! Result types returned by every PetFriends operation.
//!
//! # Design
//! The service's payloads are never modelled as typed records: the client
//! only forwards parameters and hands back whatever came over the wire.
//! `ApiBody` is the decode outcome, either parsed JSON or the raw text the
//! server sent when it was not JSON.

use serde_json::Value;

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Structured(Value),
    Raw(String),
}

impl ApiBody {
    /// Decode `text` as JSON, falling back to the text itself.
    ///
    /// Never fails. An empty body is returned as `Raw("")`.
    pub fn decode(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => ApiBody::Structured(value),
            Err(_) => ApiBody::Raw(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiBody::Structured(value) => Some(value),
            ApiBody::Raw(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ApiBody::Structured(_) => None,
            ApiBody::Raw(text) => Some(text),
        }
    }

    /// Look up a top-level field of a structured object body.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_json().and_then(|value| value.get(field))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ApiBody::Raw(text) if text.is_empty())
    }
}

/// Status code and decoded body of one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult {
    pub status: u16,
    pub body: ApiBody,
}

impl ApiResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `key` field of a `get_api_key` response, if present.
    pub fn key(&self) -> Option<&str> {
        self.body.get("key").and_then(Value::as_str)
    }

    /// The `pets` array of a list response, if present.
    pub fn pets(&self) -> Option<&Vec<Value>> {
        self.body.get("pets").and_then(Value::as_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_json_object() {
        let body = ApiBody::decode(r#"{"key":"abc"}"#.to_string());
        assert_eq!(body, ApiBody::Structured(json!({"key": "abc"})));
    }

    #[test]
    fn decode_html_falls_back_to_text() {
        let html = "<html><body>Bad Request</body></html>".to_string();
        let body = ApiBody::decode(html.clone());
        assert_eq!(body, ApiBody::Raw(html));
        assert!(body.get("key").is_none());
    }

    #[test]
    fn decode_empty_body_is_empty_text() {
        let body = ApiBody::decode(String::new());
        assert!(body.is_empty());
        assert_eq!(body.as_text(), Some(""));
    }

    #[test]
    fn decode_bare_json_scalar_is_structured() {
        assert_eq!(ApiBody::decode("42".to_string()), ApiBody::Structured(json!(42)));
    }

    #[test]
    fn key_and_pets_accessors() {
        let result = ApiResult {
            status: 200,
            body: ApiBody::Structured(json!({"key": "k1", "pets": [{"id": "a"}]})),
        };
        assert!(result.is_success());
        assert_eq!(result.key(), Some("k1"));
        assert_eq!(result.pets().map(Vec::len), Some(1));
    }

    #[test]
    fn forbidden_result_has_no_key() {
        let result = ApiResult {
            status: 403,
            body: ApiBody::Raw("Forbidden".to_string()),
        };
        assert!(!result.is_success());
        assert!(result.key().is_none());
        assert!(result.pets().is_none());
    }
}
