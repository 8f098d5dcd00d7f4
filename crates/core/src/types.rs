/// A flat record in either UI shape or DB shape.
///
/// Records stay dynamic because unknown columns are carried through the
/// mapper untouched.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Render a scalar JSON value as display text.
///
/// Returns `None` for null, arrays and objects so they never take part in
/// text matching.
pub fn value_as_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_render_as_text() {
        assert_eq!(value_as_text(&json!("SI")), Some("SI".to_string()));
        assert_eq!(value_as_text(&json!(42)), Some("42".to_string()));
        assert_eq!(value_as_text(&json!(true)), Some("true".to_string()));
    }

    #[test]
    fn null_and_containers_have_no_text() {
        assert_eq!(value_as_text(&json!(null)), None);
        assert_eq!(value_as_text(&json!([1, 2])), None);
        assert_eq!(value_as_text(&json!({"a": 1})), None);
    }
}
