//! Parameter Mapping
//!
//! Resolves path, query, and body parameters from an argument bag into
//! the outbound URL and payload. Pure functions, no hidden state.

use serde_json::{Map, Value};

/// Caller-supplied key/value structure used to fill path, query, and
/// body parameters for one call.
pub type ArgumentBag = Map<String, Value>;

/// Replace every `:key` occurrence in `template` with the string form of
/// the corresponding argument, in declared key order.
///
/// An absent or null argument substitutes an empty string, producing a
/// malformed URL rather than failing.
pub fn build_path(template: &str, keys: &[String], args: &ArgumentBag) -> String {
    let mut url = template.to_string();
    for key in keys {
        let value = match args.get(key) {
            Some(v) => value_to_plain_string(v),
            None => {
                tracing::debug!(key = %key, "no argument for path placeholder");
                String::new()
            }
        };
        url = url.replace(&format!(":{key}"), &value);
    }
    url
}

/// Append `?k1=v1&k2=v2&…` in declared key order. Values are
/// percent-encoded; keys are emitted verbatim. With no keys the URL is
/// returned unchanged, without a trailing `?`.
pub fn build_query(url: &str, keys: &[String], args: &ArgumentBag) -> String {
    if keys.is_empty() {
        return url.to_string();
    }

    let query = keys
        .iter()
        .map(|key| {
            let value = args.get(key).map(value_to_plain_string).unwrap_or_default();
            format!("{}={}", key, urlencoding::encode(&value))
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{url}?{query}")
}

/// Project the argument bag onto `keys`: only listed keys appear in the
/// output, in listed order, values copied verbatim. Extra argument keys
/// are dropped; a listed key with no argument projects as null.
pub fn build_body(keys: &[String], args: &ArgumentBag) -> Map<String, Value> {
    let mut body = Map::new();
    for key in keys {
        body.insert(key.clone(), args.get(key).cloned().unwrap_or(Value::Null));
    }
    body
}

/// String form of a scalar argument: strings unquoted, numbers and bools
/// via display, null empty, compound values as compact JSON.
pub(crate) fn value_to_plain_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
