use serde_json::Value;

/// The parsed `localStorage.json` document.
///
/// Only `profile.addons` is interpreted; every other field is carried through
/// a load/merge/save cycle as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    doc: Value,
}

impl Store {
    /// Wraps a document without checking its shape. The loader validates
    /// `profile.addons` before handing a `Store` out.
    pub fn from_value(doc: Value) -> Self {
        Store { doc }
    }

    pub fn addons(&self) -> Option<&Vec<Value>> {
        self.doc.get("profile")?.get("addons")?.as_array()
    }

    pub fn addons_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.doc.get_mut("profile")?.get_mut("addons")?.as_array_mut()
    }

    pub fn as_value(&self) -> &Value {
        &self.doc
    }
}
