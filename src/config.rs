use crate::error::{AnalyzerError, Result};
use crate::types::config::AnalyzerConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "repo-health.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".repo-health/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/repo-health/config.toml";

/// Loads configuration layered global → working directory → local override.
/// An explicit path replaces the working-directory file and must exist.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<AnalyzerConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref(), explicit)
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<AnalyzerConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AnalyzerError::ConfigParse(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            merge_file_if_exists(&mut merged, path)?;
        }
        None => merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?,
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: AnalyzerConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| AnalyzerError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    tracing::debug!(path = %path.display(), "merging config file");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| AnalyzerError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::Weights;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_defaults_when_no_files_exist() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None, None).expect("load should not fail");
        assert_eq!(cfg.weights(), Weights::default());
        assert_eq!(cfg.client_settings().api_url, "https://api.github.com");
    }

    #[test]
    fn load_config_merges_global_repo_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[github]
token = "global-token"
timeout_secs = 20

[scoring]
response_sample_size = 5
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[github]
timeout_secs = 15
cache_ttl_secs = 60
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(root.path().join(".repo-health")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[scoring]
response_sample_size = 20
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path), None)
            .expect("load should succeed");
        let settings = cfg.client_settings();

        assert_eq!(settings.token.as_deref(), Some("global-token"));
        assert_eq!(settings.timeout_secs, 15);
        assert_eq!(settings.cache_ttl_secs, 60);
        assert_eq!(cfg.response_sample_size(), 20);
    }

    #[test]
    fn explicit_config_replaces_working_directory_file() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "[github]\ntimeout_secs = 15\n",
        )
        .expect("repo config should write");
        let explicit = root.path().join("custom.toml");
        fs::write(&explicit, "[github]\ntimeout_secs = 45\n").expect("explicit should write");

        let cfg = load_config_with_global(root.path(), None, Some(&explicit))
            .expect("load should succeed");
        assert_eq!(cfg.client_settings().timeout_secs, 45);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let root = TempDir::new().expect("root temp dir should be created");
        let err = load_config_with_global(root.path(), None, Some(&root.path().join("nope.toml")))
            .expect_err("missing explicit file should fail");
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn invalid_merged_config_is_rejected() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "[scoring.weights]\npopularity = 1.0\nactivity = 1.0\n",
        )
        .expect("repo config should write");
        assert!(load_config_with_global(root.path(), None, None).is_err());
    }
}
