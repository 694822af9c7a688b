use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "wgraph.toml";

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "WGRAPH_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub save: SaveConfig,
}

/// Bounding box for positions synthesized when a loaded vertex has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    #[serde(default = "default_true")]
    pub synthesize: bool,
    #[serde(default = "default_x_min")]
    pub x_min: f64,
    #[serde(default = "default_x_max")]
    pub x_max: f64,
    #[serde(default = "default_y_min")]
    pub y_min: f64,
    #[serde(default = "default_y_max")]
    pub y_max: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            synthesize: default_true(),
            x_min: default_x_min(),
            x_max: default_x_max(),
            y_min: default_y_min(),
            y_max: default_y_max(),
            z: 0.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveConfig {
    #[serde(default)]
    pub pretty: bool,
}

/// Read a TOML config file. A missing file yields defaults.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<EngineConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the effective config.
///
/// Precedence (highest wins):
/// 1. `explicit` (the `--config` flag)
/// 2. `WGRAPH_CONFIG` env var
/// 3. `wgraph.toml` in `cwd`
/// 4. Built-in defaults
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<EngineConfig> {
    let env_path = env::var(CONFIG_ENV).ok().filter(|p| !p.trim().is_empty());
    let path = config_path(explicit, env_path, cwd);

    if let Some(missing) = explicit.filter(|p| !p.exists()) {
        anyhow::bail!("Config file {} does not exist", missing.display());
    }

    load_config(&path)
}

fn config_path(explicit: Option<&Path>, env_path: Option<String>, cwd: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(path) = env_path {
        return PathBuf::from(path);
    }
    cwd.join(DEFAULT_CONFIG_FILE)
}

const fn default_true() -> bool {
    true
}

const fn default_x_min() -> f64 {
    35.19
}

const fn default_x_max() -> f64 {
    35.22
}

const fn default_y_min() -> f64 {
    32.10
}

const fn default_y_max() -> f64 {
    32.11
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = load_config(&dir.path().join("absent.toml")).expect("load should succeed");
        assert_eq!(cfg, EngineConfig::default());
        assert!(cfg.placement.synthesize);
        assert!(cfg.placement.seed.is_none());
        assert!(!cfg.save.pretty);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("wgraph.toml");
        std::fs::write(
            &path,
            r"
[placement]
seed = 42
x_max = 40.0

[save]
pretty = true
",
        )
        .expect("write config");

        let cfg = load_config(&path).expect("parse");
        assert_eq!(cfg.placement.seed, Some(42));
        assert!((cfg.placement.x_max - 40.0).abs() < f64::EPSILON);
        assert!((cfg.placement.x_min - 35.19).abs() < f64::EPSILON);
        assert!(cfg.placement.synthesize);
        assert!(cfg.save.pretty);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[placement\nseed = ").expect("write config");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn explicit_path_beats_env_and_cwd() {
        let cwd = Path::new("/work");
        let explicit = Path::new("/etc/custom.toml");
        assert_eq!(
            config_path(Some(explicit), Some("/env.toml".to_string()), cwd),
            PathBuf::from("/etc/custom.toml")
        );
        assert_eq!(
            config_path(None, Some("/env.toml".to_string()), cwd),
            PathBuf::from("/env.toml")
        );
        assert_eq!(config_path(None, None, cwd), PathBuf::from("/work/wgraph.toml"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.toml");
        assert!(resolve_config(Some(&missing), dir.path()).is_err());
    }
}
