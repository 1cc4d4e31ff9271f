use crate::importer::{
    fetch::Fetch,
    load::load_store,
    merge::{find_entry, merge_manifest},
    save::save_store,
    summary::print_import_summary,
    validate::validate_manifest,
};
use crate::types::{
    addon::Manifest,
    error::Result,
    report::{ImportFailure, ImportReport, ImportSuccess},
    store::Store,
};
use crate::utils::{
    config::ImporterConfig,
    logger::{LogLevel, Logger},
    spinner::with_spinner,
};

/// Imports every source into `store`, in order. A failing source is logged
/// and recorded; it never stops the ones after it.
pub fn import_sources(
    store: &mut Store,
    sources: &[String],
    fetcher: &dyn Fetch,
    strict: bool,
    logger: &Logger,
) -> ImportReport {
    let mut report = ImportReport::default();

    for source in sources {
        logger.log_message(LogLevel::Info, &format!("Importing addon from {}...", source));

        match import_one(store, source, fetcher, strict, logger) {
            Ok(success) => report.succeeded.push(success),
            Err(e) => {
                logger.log_message(
                    LogLevel::Error,
                    &format!("Error importing '{}': {}", source, e),
                );
                report.failed.push(ImportFailure {
                    source: source.clone(),
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    report
}

fn import_one(
    store: &mut Store,
    source: &str,
    fetcher: &dyn Fetch,
    strict: bool,
    logger: &Logger,
) -> Result<ImportSuccess> {
    let bytes = with_spinner(&format!("Fetching info for addon at {}...", source), || {
        fetcher.fetch(source)
    })?;
    let manifest = validate_manifest(&bytes, source, strict)?;
    let id = manifest.id().clone();

    if unchanged_since_last_import(store, &manifest, source) {
        logger.log_message(
            LogLevel::Info,
            &format!(
                "Manifest for '{}' is unchanged since the last import",
                manifest.id_text()
            ),
        );
    }

    if had_flags_set(store, &id) {
        logger.log_message(
            LogLevel::Warning,
            &format!(
                "Existing entry '{}' is marked official/protected; its flags will be reset",
                manifest.id_text()
            ),
        );
    }

    let summary_manifest = manifest.clone();
    let (action, index) = merge_manifest(store, manifest, source)?;
    print_import_summary(logger, &summary_manifest, action, source);

    Ok(ImportSuccess {
        source: source.to_string(),
        id,
        action,
        index,
    })
}

/// True when the stored entry already holds this exact manifest, compared in
/// canonical form, from the same source.
fn unchanged_since_last_import(store: &Store, manifest: &Manifest, source: &str) -> bool {
    let Some(entry) = find_entry(store, manifest.id())
        .and_then(|index| store.addons().and_then(|a| a.get(index)))
    else {
        return false;
    };
    entry.get("transportUrl").and_then(|u| u.as_str()) == Some(source)
        && entry.get("manifest").map(|m| m.to_string()) == Some(manifest.canonical())
}

fn had_flags_set(store: &Store, id: &serde_json::Value) -> bool {
    let Some(index) = find_entry(store, id) else {
        return false;
    };
    let flags = store.addons().and_then(|a| a.get(index)).and_then(|e| e.get("flags"));
    ["official", "protected"]
        .iter()
        .any(|k| flags.and_then(|f| f.get(*k)).and_then(|v| v.as_bool()) == Some(true))
}

/// Full run: load, import every source, save once if anything succeeded.
///
/// `Err` is reserved for fatal store errors; per-source failures end up in
/// the report.
pub fn run_import(
    config: &ImporterConfig,
    sources: &[String],
    fetcher: &dyn Fetch,
    logger: &Logger,
) -> Result<ImportReport> {
    let mut store = load_store(&config.store_path)?;

    let report = import_sources(&mut store, sources, fetcher, config.strict, logger);

    if report.success_count() > 0 {
        save_store(&config.store_path, &store)?;
        logger.log_message(
            LogLevel::Success,
            &format!(
                "Saved storage to {}. {}/{} addon(s) processed successfully.",
                config.store_path.display(),
                report.success_count(),
                report.total()
            ),
        );
    } else {
        logger.log_message(
            LogLevel::Error,
            &format!(
                "No addons were imported due to errors. 0/{} addon(s) processed successfully.",
                report.total()
            ),
        );
    }

    Ok(report)
}

/// One source per argument; blank arguments are dropped.
pub fn collect_sources<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .map(|a| a.as_ref())
        .filter(|a| !a.trim().is_empty())
        .map(|a| a.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{error::ImportError, report::MergeAction};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::path::Path;

    struct MemoryFetcher(HashMap<String, Vec<u8>>);

    impl MemoryFetcher {
        fn new(pairs: &[(&str, &str)]) -> Self {
            MemoryFetcher(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
                    .collect(),
            )
        }
    }

    impl Fetch for MemoryFetcher {
        fn fetch(&self, source: &str) -> Result<Vec<u8>> {
            self.0.get(source).cloned().ok_or_else(|| ImportError::Fetch {
                source_ref: source.to_string(),
                reason: "not found".to_string(),
            })
        }
    }

    fn sources(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn config_for(path: &Path) -> ImporterConfig {
        ImporterConfig {
            store_path: path.to_path_buf(),
            ..ImporterConfig::default()
        }
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn failures_are_isolated_and_counted() {
        let fetcher = MemoryFetcher::new(&[
            ("one", r#"{"id": "one"}"#),
            ("two", "{ broken"),
            ("three", r#"{"id": "three"}"#),
        ]);
        let mut store = Store::from_value(json!({"profile": {"addons": []}}));
        let report = import_sources(
            &mut store,
            &sources(&["one", "two", "missing", "three"]),
            &fetcher,
            false,
            &Logger::new(),
        );

        assert_eq!(report.success_count(), 2);
        assert_eq!(report.total(), 4);
        let kinds: Vec<&str> = report.failed.iter().map(|f| f.kind.as_str()).collect();
        assert_eq!(kinds, vec!["ManifestInvalid", "FetchError"]);
        assert_eq!(report.failed[0].source, "two");
        let ids: Vec<&Value> = store
            .addons()
            .unwrap()
            .iter()
            .map(|e| &e["manifest"]["id"])
            .collect();
        assert_eq!(ids, vec![&json!("one"), &json!("three")]);
    }

    #[test]
    fn later_sources_see_earlier_merges() {
        let fetcher = MemoryFetcher::new(&[
            ("a1", r#"{"id": "a", "version": "1"}"#),
            ("a2", r#"{"id": "a", "version": "2"}"#),
        ]);
        let mut store = Store::from_value(json!({"profile": {"addons": []}}));
        let report = import_sources(
            &mut store,
            &sources(&["a1", "a2"]),
            &fetcher,
            false,
            &Logger::new(),
        );

        let actions: Vec<MergeAction> = report.succeeded.iter().map(|s| s.action).collect();
        assert_eq!(actions, vec![MergeAction::Inserted, MergeAction::Updated]);
        assert_eq!(store.addons().unwrap().len(), 1);
        assert_eq!(store.addons().unwrap()[0]["transportUrl"], json!("a2"));
    }

    #[test]
    fn run_saves_when_something_succeeded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("localStorage.json");
        std::fs::write(&path, r#"{"keep": true, "profile": {"addons": []}}"#).unwrap();
        let fetcher = MemoryFetcher::new(&[
            ("s1", r#"{"id": "s1"}"#),
            ("s2", "not json"),
            ("s3", r#"{"id": "s3"}"#),
        ]);

        let report = run_import(
            &config_for(&path),
            &sources(&["s1", "s2", "s3"]),
            &fetcher,
            &Logger::new(),
        )
        .unwrap();

        assert_eq!((report.success_count(), report.total()), (2, 3));
        let saved = read_json(&path);
        assert_eq!(saved["keep"], json!(true));
        assert_eq!(saved["profile"]["addons"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn run_writes_nothing_when_all_fail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("localStorage.json");
        let original = "{\"profile\":{\"addons\":[]}}";
        std::fs::write(&path, original).unwrap();

        let report = run_import(
            &config_for(&path),
            &sources(&["gone"]),
            &MemoryFetcher::new(&[]),
            &Logger::new(),
        )
        .unwrap();

        assert_eq!(report.success_count(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn run_aborts_on_malformed_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("localStorage.json");
        std::fs::write(&path, r#"{"profile": "text"}"#).unwrap();
        let fetcher = MemoryFetcher::new(&[("a", r#"{"id": "a"}"#)]);

        let err = run_import(&config_for(&path), &sources(&["a"]), &fetcher, &Logger::new())
            .unwrap_err();

        assert!(matches!(err, ImportError::StoreMalformed { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"profile": "text"}"#);
    }

    #[test]
    fn each_argument_is_one_source() {
        let args = ["my addons/m.json", "  ", "", "https://x/m.json"];
        assert_eq!(
            collect_sources(&args),
            vec!["my addons/m.json", "https://x/m.json"]
        );
        assert!(collect_sources::<&str>(&[]).is_empty());
    }

    #[test]
    fn path_with_space_is_imported_as_one_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("localStorage.json");
        std::fs::write(&path, r#"{"profile": {"addons": []}}"#).unwrap();
        std::fs::create_dir(dir.path().join("my addons")).unwrap();
        let manifest = dir.path().join("my addons").join("m.json");
        std::fs::write(&manifest, r#"{"id": "a"}"#).unwrap();

        let args = [manifest.to_str().unwrap()];
        let transport = crate::importer::fetch::Transport::new(std::time::Duration::from_secs(2))
            .unwrap();
        let report = run_import(
            &config_for(&path),
            &collect_sources(&args),
            &transport,
            &Logger::new(),
        )
        .unwrap();

        assert_eq!((report.success_count(), report.total()), (1, 1));
        assert_eq!(read_json(&path)["profile"]["addons"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn flagged_entry_is_detected_before_update() {
        let store = Store::from_value(json!({"profile": {"addons": [
            {"flags": {"official": false, "protected": true}, "manifest": {"id": "p"}},
            {"flags": {"official": false, "protected": false}, "manifest": {"id": "plain"}},
            {"id": "legacy", "flags": {"official": true}}
        ]}}));
        assert!(had_flags_set(&store, &json!("p")));
        assert!(had_flags_set(&store, &json!("legacy")));
        assert!(!had_flags_set(&store, &json!("plain")));
        assert!(!had_flags_set(&store, &json!("absent")));
    }

    #[test]
    fn update_clears_flags_of_flagged_entry() {
        let fetcher = MemoryFetcher::new(&[("p", r#"{"id": "p"}"#)]);
        let mut store = Store::from_value(json!({"profile": {"addons": [
            {"flags": {"official": true, "protected": true}, "manifest": {"id": "p"}, "transportUrl": "old"}
        ]}}));
        let report = import_sources(&mut store, &sources(&["p"]), &fetcher, false, &Logger::new());

        assert_eq!(report.succeeded[0].action, MergeAction::Updated);
        assert!(!had_flags_set(&store, &json!("p")));
    }

    #[test]
    fn unchanged_manifest_is_recognised() {
        let store = Store::from_value(json!({"profile": {"addons": [
            {"manifest": {"name": "A", "id": "a"}, "transportUrl": "src"}
        ]}}));
        let same = validate_manifest(br#"{ "id": "a",  "name": "A" }"#, "src", false).unwrap();
        let newer = validate_manifest(br#"{"id": "a", "name": "B"}"#, "src", false).unwrap();
        assert!(unchanged_since_last_import(&store, &same, "src"));
        assert!(!unchanged_since_last_import(&store, &same, "elsewhere"));
        assert!(!unchanged_since_last_import(&store, &newer, "src"));
    }
}
