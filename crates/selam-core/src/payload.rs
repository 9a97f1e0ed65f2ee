// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalization of request bodies into a parsed JSON object.
//!
//! HTTP frontends hand over bodies as raw bytes, strings, or already-parsed
//! JSON. Each shape implements [`JsonPayload`] so the pipeline sees one
//! representation. Empty or malformed bodies become an empty object; the
//! request then fails field validation instead of body parsing.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

/// A request body that can be normalized into a JSON object.
pub trait JsonPayload {
    /// Returns the body as a JSON object, or an empty object when the body
    /// is empty, not valid JSON, or not an object.
    fn to_json_object(&self) -> Map<String, Value>;

    /// Deserializes the normalized object into `T`, falling back to
    /// `T::default()` when the object does not match its shape.
    fn parse_as<T: DeserializeOwned + Default>(&self) -> T {
        let object = self.to_json_object();
        match serde_json::from_value(Value::Object(object)) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(error = %e, "request body did not match expected shape, using defaults");
                T::default()
            }
        }
    }
}

impl JsonPayload for Value {
    fn to_json_object(&self) -> Map<String, Value> {
        match self {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        }
    }
}

impl JsonPayload for str {
    fn to_json_object(&self) -> Map<String, Value> {
        if self.trim().is_empty() {
            return Map::new();
        }
        match serde_json::from_str::<Value>(self) {
            Ok(value) => value.to_json_object(),
            Err(e) => {
                debug!(error = %e, "request body is not valid JSON");
                Map::new()
            }
        }
    }
}

impl JsonPayload for String {
    fn to_json_object(&self) -> Map<String, Value> {
        self.as_str().to_json_object()
    }
}

impl JsonPayload for [u8] {
    fn to_json_object(&self) -> Map<String, Value> {
        match std::str::from_utf8(self) {
            Ok(text) => text.to_json_object(),
            Err(e) => {
                debug!(error = %e, "request body is not valid UTF-8");
                Map::new()
            }
        }
    }
}

impl JsonPayload for Vec<u8> {
    fn to_json_object(&self) -> Map<String, Value> {
        self.as_slice().to_json_object()
    }
}
