use serde_json::{Map, Value};

/// A validated addon manifest: a JSON object carrying a non-null `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    id: Value,
    body: Map<String, Value>,
}

impl Manifest {
    /// Wraps a parsed object. Returns `None` when `id` is absent or null.
    pub fn from_object(body: Map<String, Value>) -> Option<Self> {
        let id = body.get("id").filter(|v| !v.is_null())?.clone();
        Some(Manifest { id, body })
    }

    pub fn id(&self) -> &Value {
        &self.id
    }

    /// `id` as display text: strings unquoted, other scalars as JSON.
    pub fn id_text(&self) -> String {
        display_value(&self.id)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.body.get(key).filter(|v| !v.is_null())
    }

    pub fn name(&self) -> Option<String> {
        self.field("name").map(display_value)
    }

    pub fn version(&self) -> Option<String> {
        self.field("version").map(display_value)
    }

    pub fn description(&self) -> Option<String> {
        self.field("description").map(display_value)
    }

    /// Whitespace-insensitive compact JSON text of the manifest.
    pub fn canonical(&self) -> String {
        Value::Object(self.body.clone()).to_string()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryFlags {
    pub official: bool,
    pub protected: bool,
}

/// One record of `profile.addons`, as written by the importer.
#[derive(Debug, Clone)]
pub struct AddonEntry {
    pub flags: EntryFlags,
    pub manifest: Value,
    pub transport_url: String,
}

impl AddonEntry {
    /// Builds a fresh entry; flags always start cleared.
    pub fn new(manifest: Manifest, transport_url: &str) -> Self {
        AddonEntry {
            flags: EntryFlags::default(),
            manifest: manifest.into_value(),
            transport_url: transport_url.to_string(),
        }
    }

    pub fn into_value(self) -> Value {
        serde_json::json!({
            "flags": {
                "official": self.flags.official,
                "protected": self.flags.protected,
            },
            "manifest": self.manifest,
            "transportUrl": self.transport_url,
        })
    }
}

/// The identifier an existing entry is matched by.
///
/// Legacy entries store `id` at the top level; current ones only have it
/// under `manifest.id`. A null top-level `id` counts as absent.
pub fn effective_key(entry: &Value) -> Option<&Value> {
    entry
        .get("id")
        .filter(|v| !v.is_null())
        .or_else(|| entry.get("manifest").and_then(|m| m.get("id")))
        .filter(|v| !v.is_null())
}

pub fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
