//! Handler outcomes
//!
//! Every dispatched event produces exactly one [`HandlerOutcome`]. It
//! serializes flat, with the handler's result fields next to `success`:
//!
//! ```text
//! {"success": true, "token": "...", "user": {...}}   signup/login/...
//! {"success": true, "profile": {...}}                getProfile
//! {"success": false}                                 logout returning false
//! {"success": false, "error": "Invalid token"}       any contained failure
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

/// Result of handling one event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerOutcome {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl HandlerOutcome {
    /// Successful outcome with the collaborator's result spread in
    ///
    /// Object results contribute their fields. `null` contributes nothing.
    /// Any other value is kept under `result`.
    pub fn spread(result: Value) -> Self {
        let mut fields = match result {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("result".to_string(), other);
                map
            }
        };
        // `success`/`error` belong to the outcome itself
        fields.remove("success");
        fields.remove("error");

        Self {
            success: true,
            error: None,
            fields,
        }
    }

    /// Successful outcome with the result nested under `key`
    pub fn nested(key: &str, result: Value) -> Self {
        let mut fields = Map::new();
        fields.insert(key.to_string(), result);
        Self {
            success: true,
            error: None,
            fields,
        }
    }

    /// Outcome carrying a collaborator's raw boolean and nothing else
    pub fn flag(success: bool) -> Self {
        Self {
            success,
            error: None,
            fields: Map::new(),
        }
    }

    /// Contained failure
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            fields: Map::new(),
        }
    }

    /// Result field by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn to_json(&self) -> Value {
        // Map<String, Value> with a bool and an optional string cannot fail
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spread_merges_object_fields() {
        let outcome = HandlerOutcome::spread(json!({ "token": "t-1", "user": { "id": 1 } }));
        assert_eq!(
            outcome.to_json(),
            json!({ "success": true, "token": "t-1", "user": { "id": 1 } })
        );
    }

    #[test]
    fn test_spread_cannot_override_success() {
        let outcome = HandlerOutcome::spread(json!({ "success": false, "id": 7 }));
        assert!(outcome.success);
        assert_eq!(outcome.to_json(), json!({ "success": true, "id": 7 }));
    }

    #[test]
    fn test_spread_scalar_goes_under_result() {
        let outcome = HandlerOutcome::spread(json!(42));
        assert_eq!(outcome.get("result"), Some(&json!(42)));
    }

    #[test]
    fn test_flag_has_no_extra_fields() {
        assert_eq!(HandlerOutcome::flag(false).to_json(), json!({ "success": false }));
    }

    #[test]
    fn test_failure_shape() {
        assert_eq!(
            HandlerOutcome::failure("boom").to_json(),
            json!({ "success": false, "error": "boom" })
        );
    }
}
