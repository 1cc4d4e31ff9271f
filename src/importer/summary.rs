use crate::types::{addon::Manifest, report::MergeAction};
use crate::utils::logger::{LogLevel, Logger};
use serde_json::Value;

pub const DESCRIPTION_LIMIT: usize = 120;
pub const TRUNCATION_MARKER: char = '…';

/// First `DESCRIPTION_LIMIT` characters, plus `…` if anything was cut.
pub fn truncate_description(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(DESCRIPTION_LIMIT).collect();
    if chars.next().is_some() {
        format!("{}{}", head, TRUNCATION_MARKER)
    } else {
        head
    }
}

/// Headline and detail lines describing one successful import.
pub fn summary_lines(manifest: &Manifest, action: MergeAction, source: &str) -> (String, Vec<String>) {
    let name = manifest.name().unwrap_or_else(|| "(no name)".to_string());
    let version = manifest
        .version()
        .map(|v| format!("v{}", v))
        .unwrap_or_else(|| "(no version)".to_string());
    let headline = format!(
        "Addon '{}' ({}) {} {} from {}",
        name,
        manifest.id_text(),
        version,
        action,
        source
    );

    let mut details = Vec::new();
    let description = manifest
        .description()
        .map(|d| truncate_description(&d))
        .unwrap_or_else(|| "(no description)".to_string());
    details.push(format!("description: {}", description));

    if let Some(logo) = manifest.field("logo") {
        details.push(format!("logo: {}", crate::types::addon::display_value(logo)));
    }

    let resources = manifest.field("resources").and_then(collection_len);
    let types = manifest.field("types").and_then(collection_len);
    if resources.is_some() || types.is_some() {
        let count = |n: Option<usize>| n.map_or("-".to_string(), |n| n.to_string());
        details.push(format!(
            "resources: {}, types: {}",
            count(resources),
            count(types)
        ));
    }

    (headline, details)
}

pub fn print_import_summary(logger: &Logger, manifest: &Manifest, action: MergeAction, source: &str) {
    let (headline, details) = summary_lines(manifest, action, source);
    let refs: Vec<&str> = details.iter().map(|s| s.as_str()).collect();
    logger.log_message_with_trace(LogLevel::Success, &headline, refs);
}

fn collection_len(v: &Value) -> Option<usize> {
    match v {
        Value::Array(a) => Some(a.len()),
        Value::Object(o) => Some(o.len()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(v: Value) -> Manifest {
        Manifest::from_object(v.as_object().cloned().unwrap()).unwrap()
    }

    #[test]
    fn description_of_120_chars_is_untouched() {
        let d = "x".repeat(120);
        assert_eq!(truncate_description(&d), d);
    }

    #[test]
    fn description_of_121_chars_is_cut_with_marker() {
        let d = "y".repeat(121);
        let out = truncate_description(&d);
        assert_eq!(out, format!("{}…", "y".repeat(120)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let d = "é".repeat(121);
        let out = truncate_description(&d);
        assert_eq!(out.chars().count(), 121);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn defaults_for_missing_fields() {
        let (headline, details) =
            summary_lines(&manifest(json!({"id": "a"})), MergeAction::Inserted, "src.json");
        assert_eq!(headline, "Addon '(no name)' (a) (no version) inserted from src.json");
        assert_eq!(details, vec!["description: (no description)".to_string()]);
    }

    #[test]
    fn full_manifest_summary() {
        let m = manifest(json!({
            "id": "org.addon",
            "name": "Addon",
            "version": "1.2.0",
            "description": "Does things",
            "logo": "https://x/logo.png",
            "resources": ["a", "b"],
            "types": {"movie": {}}
        }));
        let (headline, details) = summary_lines(&m, MergeAction::Updated, "https://x/m.json");
        assert_eq!(headline, "Addon 'Addon' (org.addon) v1.2.0 updated from https://x/m.json");
        assert_eq!(
            details,
            vec![
                "description: Does things".to_string(),
                "logo: https://x/logo.png".to_string(),
                "resources: 2, types: 1".to_string(),
            ]
        );
    }
}
