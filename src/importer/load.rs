use crate::types::{
    error::{ImportError, Result},
    store::Store,
};
use serde_json::Value;
use std::path::Path;

/// Loads the store at `path`, refusing anything without a `profile.addons`
/// array. Nothing is repaired or initialised here.
pub fn load_store(path: &Path) -> Result<Store> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ImportError::StoreMissing {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(ImportError::StoreUnreadable {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let doc: Value = serde_json::from_slice(&bytes).map_err(|e| ImportError::StoreInvalid {
        path: path.to_path_buf(),
        source: e,
    })?;

    check_shape(&doc).map_err(|reason| ImportError::StoreMalformed {
        path: path.to_path_buf(),
        reason,
    })?;

    Ok(Store::from_value(doc))
}

fn check_shape(doc: &Value) -> std::result::Result<(), String> {
    let root = doc
        .as_object()
        .ok_or_else(|| format!("top level is {}, expected an object", type_name(doc)))?;
    let profile = match root.get("profile") {
        Some(Value::Object(p)) => p,
        Some(other) => {
            return Err(format!(
                "'profile' is {}, expected an object",
                type_name(other)
            ));
        }
        None => return Err("missing 'profile' object".to_string()),
    };
    match profile.get("addons") {
        Some(Value::Array(_)) => Ok(()),
        Some(other) => Err(format!(
            "'profile.addons' is {}, expected an array",
            type_name(other)
        )),
        None => Err("missing 'profile.addons' array".to_string()),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
