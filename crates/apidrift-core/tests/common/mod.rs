use apidrift_core::ApiDocument;
use serde_json::{json, Value};

/// Petstore-like description shared by old and new side in most tests
#[allow(dead_code)]
pub fn petstore() -> ApiDocument {
    serde_json::from_value(json!({
        "openapi": "3.0.3",
        "info": {"title": "Petstore", "version": "1.0.0"},
        "paths": {
            "/pet": {
                "post": {"summary": "Add a new pet to the store"},
                "put": {"summary": "Update an existing pet"}
            },
            "/pet/{petId}": {
                "get": {"summary": "Find pet by ID", "description": "Returns a single pet"},
                "delete": {"summary": "Deletes a pet"}
            },
            "/store/inventory": {
                "get": {"description": "Returns a map of status codes to quantities"}
            }
        }
    }))
    .unwrap()
}

/// A changed operation on `GET /pet/{petId}` with `extra` merged in
#[allow(dead_code)]
pub fn changed_get_pet(extra: Value) -> Value {
    let mut op = json!({"pathUrl": "/pet/{petId}", "httpMethod": "GET"});
    if let (Some(target), Some(source)) = (op.as_object_mut(), extra.as_object()) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }
    op
}

#[allow(dead_code)]
pub fn diff_bytes(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap()
}
