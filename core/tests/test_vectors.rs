//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! `requests.json` describes each operation's inputs and the request it must
//! produce; `decode.json` describes simulated responses and how they decode.

use std::path::Path;

use petfriends_core::{
    ApiBody, FilePart, HttpMethod, HttpRequest, HttpResponse, PetFriendsClient, RequestBody, AUTH_KEY_HEADER,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> PetFriendsClient {
    PetFriendsClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn parse_body(value: &Value) -> RequestBody {
    match value["kind"].as_str().unwrap() {
        "empty" => RequestBody::Empty,
        "form" => RequestBody::Form(pairs(&value["fields"])),
        "multipart" => {
            let file = &value["file"];
            RequestBody::Multipart {
                fields: pairs(&value["fields"]),
                file: Some(FilePart {
                    field: file["field"].as_str().unwrap().to_string(),
                    path: file["path"].as_str().unwrap().into(),
                    content_type: file["content_type"].as_str().unwrap().to_string(),
                }),
            }
        }
        other => panic!("unknown body kind: {other}"),
    }
}

fn field<'a>(input: &'a Value, name: &str) -> &'a str {
    input[name].as_str().unwrap()
}

fn build(c: &PetFriendsClient, operation: &str, input: &Value) -> HttpRequest {
    let s = |name: &str| field(input, name);
    match operation {
        "get_api_key" => c.build_get_api_key(s("email"), s("password")),
        "list_pets" => c.build_list_pets(s("auth_key"), s("filter")),
        "add_new_pet" => {
            let photo = Path::new(s("pet_photo"));
            c.build_add_new_pet(s("auth_key"), s("name"), s("animal_type"), s("age"), photo)
        }
        "add_new_pet_without_photo" => {
            c.build_add_new_pet_without_photo(s("auth_key"), s("name"), s("animal_type"), s("age"))
        }
        "add_photo_of_pet" => c.build_add_photo_of_pet(s("auth_key"), s("pet_id"), Path::new(s("pet_photo"))),
        "delete_pet" => c.build_delete_pet(s("auth_key"), s("pet_id")),
        "update_pet_info" => {
            c.build_update_pet_info(s("auth_key"), s("pet_id"), s("name"), s("animal_type"), s("age"))
        }
        other => panic!("unknown operation: {other}"),
    }
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_request"];

        let req = build(&c, case["operation"].as_str().unwrap(), &case["input"]);
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
        assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");
        assert_eq!(req.query, pairs(&expected["query"]), "{name}: query");
        assert_eq!(req.body, parse_body(&expected["body"]), "{name}: body");
    }
}

#[test]
fn auth_key_header_on_every_call_but_key_retrieval() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let operation = case["operation"].as_str().unwrap();
        let req = build(&c, operation, &case["input"]);
        let has_key = req.headers.iter().any(|(header, _)| header == AUTH_KEY_HEADER);
        assert_eq!(has_key, operation != "get_api_key", "{name}: {AUTH_KEY_HEADER} header");
    }
}

#[test]
fn decode_test_vectors() {
    let raw = include_str!("../../test-vectors/decode.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: u16::try_from(sim["status"].as_u64().unwrap()).unwrap(),
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };

        let result = c.parse_response(response);
        let expected = &case["expected_result"];
        assert_eq!(u64::from(result.status), expected["status"].as_u64().unwrap(), "{name}: status");

        let expected_body = match (expected.get("structured"), expected.get("raw")) {
            (Some(value), None) => ApiBody::Structured(value.clone()),
            (None, Some(text)) => ApiBody::Raw(text.as_str().unwrap().to_string()),
            _ => panic!("{name}: expected exactly one of structured/raw"),
        };
        assert_eq!(result.body, expected_body, "{name}: body");
    }
}
