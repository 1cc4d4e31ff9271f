use crate::types::{
    addon::Manifest,
    error::{ImportError, Result},
};
use serde_json::Value;

const REQUIRED_STRING_FIELDS: [&str; 5] = ["id", "version", "name", "description", "logo"];
const REQUIRED_COLLECTION_FIELDS: [&str; 2] = ["resources", "types"];

/// Parses fetched bytes into a manifest with a non-null `id`.
///
/// With `strict`, the full addon descriptor shape is enforced as well.
pub fn validate_manifest(bytes: &[u8], source: &str, strict: bool) -> Result<Manifest> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| invalid(source, format!("not valid JSON: {}", e)))?;

    let body = match value {
        Value::Object(map) => map,
        _ => return Err(invalid(source, "manifest is not a JSON object".to_string())),
    };

    if strict {
        check_strict(&body).map_err(|reason| invalid(source, reason))?;
    }

    Manifest::from_object(body)
        .ok_or_else(|| invalid(source, "missing required field 'id'".to_string()))
}

fn check_strict(body: &serde_json::Map<String, Value>) -> std::result::Result<(), String> {
    let missing: Vec<&str> = REQUIRED_STRING_FIELDS
        .iter()
        .chain(REQUIRED_COLLECTION_FIELDS.iter())
        .filter(|k| !body.contains_key(**k))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(format!("missing required field(s): {}", missing.join(", ")));
    }

    for key in REQUIRED_STRING_FIELDS {
        let ok = body[key].as_str().is_some_and(|s| !s.trim().is_empty());
        if !ok {
            return Err(format!("field '{}' must be a non-empty string", key));
        }
    }

    for key in REQUIRED_COLLECTION_FIELDS {
        if !(body[key].is_array() || body[key].is_object()) {
            return Err(format!("field '{}' must be a list or object", key));
        }
    }

    Ok(())
}

fn invalid(source: &str, reason: String) -> ImportError {
    ImportError::ManifestInvalid {
        source_ref: source.to_string(),
        reason,
    }
}
