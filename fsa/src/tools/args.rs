//! Argument extraction for tool inputs
//!
//! Models frequently quote numbers or send `null` for omitted parameters, so
//! numeric arguments accept JSON numbers and numeric strings alike, and `null`
//! falls back to the default.

use serde_json::Value;

use super::ToolError;

/// Optional string argument with a default
pub fn str_or<'a>(input: &'a Value, name: &str, default: &'a str) -> &'a str {
    input.get(name).and_then(Value::as_str).unwrap_or(default)
}

/// Required string argument
pub fn required_str<'a>(input: &'a Value, name: &'static str) -> Result<&'a str, ToolError> {
    match input.get(name) {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Null) | None => Err(ToolError::MissingArgument(name)),
        Some(other) => Err(ToolError::InvalidArgument(format!("{} must be a string, got {}", name, other))),
    }
}

/// Optional non-negative integer argument with a default
pub fn usize_or(input: &Value, name: &str, default: usize) -> Result<usize, ToolError> {
    match input.get(name) {
        Some(Value::Null) | None => Ok(default),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|v| v as usize)
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as usize))
            .ok_or_else(|| ToolError::InvalidArgument(format!("{} must be a non-negative integer, got {}", name, n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<usize>()
            .map_err(|_| ToolError::InvalidArgument(format!("{} must be a non-negative integer, got '{}'", name, s))),
        Some(other) => Err(ToolError::InvalidArgument(format!(
            "{} must be a non-negative integer, got {}",
            name, other
        ))),
    }
}

/// Optional non-negative float argument with a default
pub fn f64_or(input: &Value, name: &str, default: f64) -> Result<f64, ToolError> {
    let value = match input.get(name) {
        Some(Value::Null) | None => return Ok(default),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| ToolError::InvalidArgument(format!("{} must be a non-negative number", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_str_or_default() {
        let input = json!({});
        assert_eq!(str_or(&input, "dir_path", "."), ".");

        let input = json!({"dir_path": "sub"});
        assert_eq!(str_or(&input, "dir_path", "."), "sub");
    }

    #[test]
    fn test_required_str() {
        assert_eq!(required_str(&json!({"pattern": "*.txt"}), "pattern").unwrap(), "*.txt");
        assert!(matches!(
            required_str(&json!({}), "pattern"),
            Err(ToolError::MissingArgument("pattern"))
        ));
        assert!(matches!(
            required_str(&json!({"pattern": 3}), "pattern"),
            Err(ToolError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_usize_accepts_numbers_and_strings() {
        assert_eq!(usize_or(&json!({"limit": 5}), "limit", 10).unwrap(), 5);
        assert_eq!(usize_or(&json!({"limit": "7"}), "limit", 10).unwrap(), 7);
        assert_eq!(usize_or(&json!({"limit": 4.0}), "limit", 10).unwrap(), 4);
        assert_eq!(usize_or(&json!({"limit": null}), "limit", 10).unwrap(), 10);
        assert_eq!(usize_or(&json!({}), "limit", 10).unwrap(), 10);
    }

    #[test]
    fn test_usize_rejects_negative() {
        assert!(usize_or(&json!({"limit": -1}), "limit", 10).is_err());
        assert!(usize_or(&json!({"limit": "many"}), "limit", 10).is_err());
    }

    #[test]
    fn test_f64_accepts_numbers_and_strings() {
        assert_eq!(f64_or(&json!({"min_size_mb": 2}), "min_size_mb", 1.0).unwrap(), 2.0);
        assert_eq!(f64_or(&json!({"min_size_mb": "0.5"}), "min_size_mb", 1.0).unwrap(), 0.5);
        assert_eq!(f64_or(&json!({}), "min_size_mb", 1.0).unwrap(), 1.0);
        assert!(f64_or(&json!({"min_size_mb": -3}), "min_size_mb", 1.0).is_err());
    }
}
