//! Config file loading

use crate::domain::{Config, MAX_INDENT};
use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `BUG_INDEX_DISPLAY__PLACEHOLDER`.
pub const ENV_PREFIX: &str = "BUG_INDEX_";

/// Table name settings may be nested under inside a shared config file.
const SECTION: &str = "bug-index";

pub fn load_config(search_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(search_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            // Auto-discovered: warn and fall back to defaults
            tracing::warn!(
                "Ignoring auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

/// Load the config file, layer the environment over it and validate the result.
pub fn resolve_config(search_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config = apply_env(load_config(search_dir, config_path)?)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    let fields = &config.fields;
    if fields.record_id.is_empty() || fields.group_id.is_empty() {
        anyhow::bail!("Identifier field names must not be empty");
    }
    if fields.record_id == fields.group_id {
        anyhow::bail!(
            "Record and group identifier fields must differ (both are '{}')",
            fields.record_id
        );
    }
    if config.display.indent > MAX_INDENT {
        anyhow::bail!(
            "display.indent must be at most {} (got {})",
            MAX_INDENT,
            config.display.indent
        );
    }
    Ok(())
}

/// Layer `BUG_INDEX_*` environment variables over `config`.
///
/// Nested keys use `__`, so `BUG_INDEX_FIELDS__RECORD_ID=bug_id` sets
/// `fields.record_id`.
pub fn apply_env(config: Config) -> Result<Config> {
    Figment::from(Serialized::defaults(config))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .with_context(|| format!("Invalid {}* environment override", ENV_PREFIX))
}

/// Parse TOML config, supporting a nested `[bug-index]` table.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `bug-index` mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(search_dir: &Path) -> Option<PathBuf> {
    let candidates =
        ["bug-index.toml", ".bug-index.toml", "bug-index.yaml", ".bug-index.yaml", "bug-index.yml"];

    candidates.iter().map(|candidate| search_dir.join(candidate)).find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.fields.record_id, "record_id");
        assert!(cfg.display.elide_fields.contains("code"));
    }

    #[test]
    fn test_load_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("bug-index.toml"),
            "[fields]\nrecord_id = 'bug_id'\ngroup_id = 'bug_group_id'\n\n[display]\nindent = 4\n",
        )
        .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.fields.record_id, "bug_id");
        assert_eq!(cfg.fields.group_id, "bug_group_id");
        assert_eq!(cfg.display.indent, 4);
        assert_eq!(cfg.display.placeholder, "...");
    }

    #[test]
    fn test_nested_section_and_comma_separated_elide_fields() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("tools.toml");
        fs::write(&path, "[bug-index.display]\nelide_fields = \"code, diff ,, trace\"\n")
            .expect("write");

        let cfg = load_config(tmp.path(), Some(&path)).expect("config");
        let expected: BTreeSet<String> =
            ["code", "diff", "trace"].iter().map(|s| s.to_string()).collect();
        assert_eq!(cfg.display.elide_fields, expected);
    }

    #[test]
    fn test_load_yaml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("bug-index.yaml"), "display:\n  elide_fields: [code, patch]\n")
            .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert!(cfg.display.elide_fields.contains("patch"));
    }

    #[test]
    fn test_explicit_config_invalid_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[display]\nindent = 'wide'\n").expect("write");

        let result = load_config(tmp.path(), Some(&path));
        assert!(result.is_err(), "explicit config with invalid type should return Err");
    }

    #[test]
    fn test_explicit_config_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.ini");
        fs::write(&path, "indent=2\n").expect("write");

        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_type_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("bug-index.toml"), "[display]\nindent = 'wide'\n")
            .expect("write");

        let cfg = load_config(tmp.path(), None).expect("should not error on auto-discovery");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_resolve_rejects_identical_field_names() {
        // Jail serializes env access with the override test below.
        figment::Jail::expect_with(|jail| {
            jail.create_file("same.toml", "[fields]\nrecord_id = 'id'\ngroup_id = 'id'\n")?;

            let err = resolve_config(jail.directory(), Some(Path::new("same.toml")))
                .expect_err("identical names");
            assert!(err.to_string().contains("must differ"));
            Ok(())
        });
    }

    #[test]
    fn test_resolve_rejects_oversized_indent() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BUG_INDEX_DISPLAY__INDENT", "18446744073709551615");

            let err = resolve_config(jail.directory(), None).expect_err("oversized indent");
            assert!(err.to_string().contains("display.indent must be at most 16"));
            Ok(())
        });
    }

    #[test]
    fn test_resolve_accepts_max_indent() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("bug-index.toml", "[display]\nindent = 16\n")?;

            let cfg = resolve_config(jail.directory(), None).expect("config");
            assert_eq!(cfg.display.indent, MAX_INDENT);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BUG_INDEX_DISPLAY__PLACEHOLDER", "<cut>");
            jail.set_env("BUG_INDEX_FIELDS__GROUP_ID", "bug_group_id");

            let mut base = Config::default();
            base.display.indent = 3;
            let cfg = apply_env(base).expect("env");
            assert_eq!(cfg.display.placeholder, "<cut>");
            assert_eq!(cfg.fields.group_id, "bug_group_id");
            assert_eq!(cfg.display.indent, 3);
            Ok(())
        });
    }
}
