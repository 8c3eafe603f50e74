//! Setup errors. Rendering itself never fails: unknown moods fall back to
//! neutral and draws on a detached surface are no-ops.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("no global window")]
    NoWindow,

    #[error("canvas has no 2d rendering context")]
    NoContext,

    #[error("invalid field config: {0}")]
    InvalidConfig(String),

    #[cfg(feature = "serde_json")]
    #[error("failed to parse field config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("browser API call failed: {0}")]
    Js(String),
}

impl From<JsValue> for FieldError {
    fn from(value: JsValue) -> Self {
        FieldError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(
            FieldError::InvalidConfig("particle_count must be at least 1".into()).to_string(),
            "invalid field config: particle_count must be at least 1"
        );
        assert_eq!(FieldError::NoContext.to_string(), "canvas has no 2d rendering context");
    }
}
