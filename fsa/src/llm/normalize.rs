//! Tool-call normalization
//!
//! Completion endpoints disagree on how a tool call is spelled. Some nest the
//! function descriptor (`{id, function: {name, arguments}}`), some flatten it
//! (`{id, name, arguments}`), and `arguments` arrives either as an object or
//! as a JSON-encoded string. Everything is folded into one [`ToolCall`] here,
//! before any other code looks at it.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::ToolCall;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCall {
    Nested {
        #[serde(default)]
        id: Option<String>,
        function: RawFunction,
    },
    Flat {
        #[serde(default)]
        id: Option<String>,
        name: String,
        #[serde(default)]
        arguments: Value,
    },
}

#[derive(Deserialize)]
struct RawFunction {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Normalize the `index`-th raw tool call of a response
///
/// Never fails: a missing id becomes `call_<index>`, and arguments that are
/// absent, unparsable or not an object become `{}`.
pub fn normalize_tool_call(raw: &Value, index: usize) -> ToolCall {
    debug!(%index, "normalize_tool_call: called");
    let (id, name, arguments) = match RawCall::deserialize(raw) {
        Ok(RawCall::Nested { id, function }) => (id, function.name, function.arguments),
        Ok(RawCall::Flat { id, name, arguments }) => (id, name, arguments),
        Err(e) => {
            warn!(%e, %raw, "normalize_tool_call: unrecognized tool call shape");
            let id = raw.get("id").and_then(Value::as_str).map(str::to_string);
            (id, String::new(), Value::Null)
        }
    };

    let id = match id {
        Some(id) if !id.is_empty() => id,
        _ => format!("call_{}", index),
    };
    let arguments = normalize_arguments(&name, arguments);

    ToolCall { id, name, arguments }
}

fn normalize_arguments(name: &str, arguments: Value) -> Value {
    match arguments {
        Value::Object(map) => Value::Object(map),
        Value::Null => Value::Object(Map::new()),
        Value::String(s) if s.trim().is_empty() => Value::Object(Map::new()),
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(Value::Object(map)) => Value::Object(map),
            Ok(other) => {
                warn!(%name, %other, "normalize_arguments: arguments are not an object, using {{}}");
                Value::Object(Map::new())
            }
            Err(e) => {
                warn!(%name, %e, "normalize_arguments: malformed arguments, using {{}}");
                Value::Object(Map::new())
            }
        },
        other => {
            warn!(%name, %other, "normalize_arguments: arguments are not an object, using {{}}");
            Value::Object(Map::new())
        }
    }
}
