//! Test fixtures for the photo editor.
//!
//! Recorded `generateContent` responses live in `responses/`, one file per
//! interpretation outcome.

use std::path::PathBuf;

use crate::types::GenerateContentResponse;

/// Path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("fixtures")
        .join(relative_path)
}

/// Load a fixture file as a string.
pub fn load_fixture(relative_path: &str) -> String {
    std::fs::read_to_string(fixture_path(relative_path))
        .unwrap_or_else(|e| panic!("Failed to load fixture {relative_path}: {e}"))
}

/// Load a JSON fixture and parse it.
pub fn load_json_fixture<T: serde::de::DeserializeOwned>(relative_path: &str) -> T {
    let content = load_fixture(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse JSON fixture {relative_path}: {e}"))
}

/// Load `responses/{name}.json` as a model response.
pub fn load_response(name: &str) -> GenerateContentResponse {
    load_json_fixture(&format!("responses/{name}.json"))
}

/// Raw body of `responses/{name}.json`, for HTTP-level tests.
pub fn response_body(name: &str) -> String {
    load_fixture(&format!("responses/{name}.json"))
}
