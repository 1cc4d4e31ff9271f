use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_PATH: &str = "localStorage.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const CONFIG_FILE_NAME: &str = "addon-import.toml";

pub const STORE_ENV: &str = "ADDON_IMPORT_STORE";
pub const TIMEOUT_ENV: &str = "ADDON_IMPORT_TIMEOUT";

#[derive(Debug, Deserialize, Default)]
struct ImporterSection {
    store: Option<PathBuf>,
    timeout_secs: Option<u64>,
    strict: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigTomlDoc {
    importer: Option<ImporterSection>,
}

/// Settings given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub store: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImporterConfig {
    pub store_path: PathBuf,
    pub timeout_secs: u64,
    pub strict: bool,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        ImporterConfig {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            strict: false,
        }
    }
}

impl ImporterConfig {
    /// Resolves the effective configuration for a run started in `cwd`.
    ///
    /// Precedence: command line, then environment, then `addon-import.toml`,
    /// then built-in defaults.
    pub fn resolve(cwd: &Path, cli: &CliOverrides) -> Result<Self, String> {
        let file = read_config_file(&cwd.join(CONFIG_FILE_NAME))?;
        let env_store = std::env::var(STORE_ENV).ok().filter(|v| !v.trim().is_empty());
        let env_timeout = match std::env::var(TIMEOUT_ENV) {
            Ok(v) if !v.trim().is_empty() => Some(
                v.trim()
                    .parse::<u64>()
                    .map_err(|e| format!("Invalid {} value '{}': {}", TIMEOUT_ENV, v, e))?,
            ),
            _ => None,
        };

        Ok(Self::merge(cli, env_store.map(PathBuf::from), env_timeout, file))
    }

    fn merge(
        cli: &CliOverrides,
        env_store: Option<PathBuf>,
        env_timeout: Option<u64>,
        file: ImporterSection,
    ) -> Self {
        let defaults = ImporterConfig::default();
        ImporterConfig {
            store_path: cli
                .store
                .clone()
                .or(env_store)
                .or(file.store)
                .unwrap_or(defaults.store_path),
            timeout_secs: cli
                .timeout_secs
                .or(env_timeout)
                .or(file.timeout_secs)
                .unwrap_or(defaults.timeout_secs),
            strict: cli.strict.or(file.strict).unwrap_or(defaults.strict),
        }
    }
}

fn read_config_file(path: &Path) -> Result<ImporterSection, String> {
    if !path.exists() {
        return Ok(ImporterSection::default());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.to_string_lossy(), e))?;
    let doc: ConfigTomlDoc = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.to_string_lossy(), e))?;
    Ok(doc.importer.unwrap_or_default())
}
