use serde_json::{Value, json};

pub mod proxy;

pub(crate) fn json_error(message: &str) -> Value {
    json!({ "error": message })
}
