use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use vetbase_core::normalize::{CanonTable, NormalizeOptions, OverflowPolicy};

const APP_DIR: &str = "vetbase";
const CONFIG_FILENAME: &str = "config.toml";

/// Resolved application configuration. The `[normalize]` section carries the
/// engine knobs that the source data-correction scripts hard-coded and
/// disagreed on: the legacy padding prefixes and the overflow ordering.
/// Operators should confirm the area prefix with the practice owner before a
/// non-dry-run correction pass.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub normalize: NormalizeOptions,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid normalize prefix: {0}")]
    InvalidPrefix(#[from] vetbase_core::CoreError),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    normalize: Option<NormalizeFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NormalizeFile {
    operator_prefix: Option<String>,
    area_prefix: Option<String>,
    overflow: Option<OverflowPolicy>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path.clone()) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(normalize) = parsed.normalize {
        let defaults = CanonTable::default();
        let operator = normalize
            .operator_prefix
            .unwrap_or(defaults.operator_prefix);
        let area = normalize.area_prefix.unwrap_or(defaults.area_prefix);
        config.normalize.table = CanonTable::new(operator, area)?;
        if let Some(overflow) = normalize.overflow {
            config.normalize.overflow = overflow;
        }
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_at_path, merge_config, ConfigFile, NormalizeFile};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use vetbase_core::normalize::OverflowPolicy;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            normalize: Some(NormalizeFile {
                operator_prefix: None,
                area_prefix: Some("375162".to_string()),
                overflow: Some(OverflowPolicy::AcceptExactCanonical),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.normalize.table.operator_prefix, "37529");
        assert_eq!(merged.normalize.table.area_prefix, "375162");
        assert_eq!(
            merged.normalize.overflow,
            OverflowPolicy::AcceptExactCanonical
        );
    }

    #[test]
    fn merge_config_rejects_non_digit_prefix() {
        let parsed = ConfigFile {
            normalize: Some(NormalizeFile {
                operator_prefix: Some("375-29".to_string()),
                area_prefix: None,
                overflow: None,
            }),
        };
        assert!(merge_config(parsed).is_err());
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[normalize]\narea_prefix = \"375162\"\noverflow = \"accept-exact-canonical\"\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.normalize.table.area_prefix, "375162");
        assert_eq!(
            config.normalize.overflow,
            OverflowPolicy::AcceptExactCanonical
        );
    }

    #[test]
    fn load_at_path_rejects_unknown_fields() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[normalize]\narea_code = \"17\"\n").expect("write config");
        restrict_permissions(&path);

        assert!(load_at_path(&path, true).is_err());
    }

    #[test]
    fn missing_normalize_section_keeps_defaults() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "").expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.normalize.table.operator_prefix, "37529");
        assert_eq!(config.normalize.table.area_prefix, "37517");
        assert_eq!(config.normalize.overflow, OverflowPolicy::FlushAsInvalid);
    }
}
