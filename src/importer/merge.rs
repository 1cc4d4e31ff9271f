use crate::types::{
    addon::{AddonEntry, Manifest, effective_key},
    error::{ImportError, Result},
    report::MergeAction,
    store::Store,
};

/// Index of the first entry whose effective key equals `id`.
pub fn find_entry(store: &Store, id: &serde_json::Value) -> Option<usize> {
    store
        .addons()?
        .iter()
        .position(|entry| effective_key(entry) == Some(id))
}

/// Inserts or replaces the entry for `manifest`, keyed by its `id`.
///
/// A match is replaced at its position with cleared flags; otherwise the
/// entry is appended. Nothing else in the store is touched.
pub fn merge_manifest(
    store: &mut Store,
    manifest: Manifest,
    source: &str,
) -> Result<(MergeAction, usize)> {
    let existing = find_entry(store, manifest.id());
    let addons = store.addons_mut().ok_or_else(|| ImportError::Merge {
        source_ref: source.to_string(),
        reason: "store has no 'profile.addons' array".to_string(),
    })?;

    let entry = AddonEntry::new(manifest, source).into_value();
    match existing {
        Some(index) => {
            addons[index] = entry;
            Ok((MergeAction::Updated, index))
        }
        None => {
            addons.push(entry);
            Ok((MergeAction::Inserted, addons.len() - 1))
        }
    }
}
