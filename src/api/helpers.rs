//! Shared helpers for WASM API operations
//!
//! This module contains common patterns and utilities for serialization,
//! deserialization, error conversion, and console logging across the
//! JavaScript-facing handles.

use crate::api::types::AnnotationInput;
use crate::config::EngineConfig;
use crate::models::{Annotation, AnnotationError, AnnotationId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

// ============================================================================
// Logging Helper Functions (called by macros)
// ============================================================================

pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

pub fn log_info(msg: &str) {
    info(&format!("[WASM] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        wasm_error!("{}: {}", error_context, e);
        JsValue::from_str(&format!("{}: {}", error_context, e))
    })
}

/// Serialize a value to JavaScript with automatic error handling
///
/// Uses the JSON-compatible serializer so maps arrive as plain objects.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| {
            wasm_error!("{}: {}", error_context, e);
            JsValue::from_str(&format!("{}: {}", error_context, e))
        })
}

/// Engine config from JS; `undefined`/`null` gives the defaults
pub fn config_from_js(config_js: JsValue) -> Result<EngineConfig, JsValue> {
    if config_js.is_undefined() || config_js.is_null() {
        return Ok(EngineConfig::default());
    }
    let config: EngineConfig = deserialize(config_js, "Config deserialization error")?;
    Ok(config.normalized())
}

/// Annotation array from JS
///
/// Negative or fractional offsets become `AnnotationError:range`, the same
/// as offsets past the end of the text.
pub fn annotations_from_js(annotations_js: JsValue) -> Result<Vec<Annotation>, JsValue> {
    if annotations_js.is_undefined() || annotations_js.is_null() {
        return Ok(Vec::new());
    }
    let inputs: Vec<AnnotationInput> = deserialize(annotations_js, "Annotation deserialization error")?;
    inputs
        .into_iter()
        .map(AnnotationInput::into_annotation)
        .collect::<Result<Vec<_>, _>>()
        .map_err(annotation_error)
}

/// Optional id selection from JS; `undefined`/`null` means "no selection"
pub fn selection_from_js(selection_js: JsValue) -> Result<Option<Vec<AnnotationId>>, JsValue> {
    if selection_js.is_undefined() || selection_js.is_null() {
        return Ok(None);
    }
    deserialize(selection_js, "Selection deserialization error").map(Some)
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Convert an engine error to a JS `Error` named `AnnotationError:<kind>`
///
/// Callers treat these as binding bugs or bad classifier output: they are
/// logged and handed back, never fatal.
pub fn annotation_error(err: AnnotationError) -> JsValue {
    wasm_error!("{}", err);
    let js_error = js_sys::Error::new(&err.to_string());
    js_error.set_name(&format!("AnnotationError:{}", err.kind()));
    js_error.into()
}

/// Convert a validation error to a JsValue
pub fn validation_error(msg: impl Into<String>) -> JsValue {
    let msg = msg.into();
    wasm_error!("{}", msg);
    JsValue::from_str(&msg)
}
