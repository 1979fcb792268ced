//! Configuration - reads `~/.sightline/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Persisted user configuration stored in `~/.sightline/config.toml`. Every
/// field has a default, so an absent file or an empty table both work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// WebSocket endpoint of the wearable sensor unit.
    #[serde(default = "default_link_url")]
    pub link_url: String,

    /// Latest-sample endpoint of the secondary left/right gateway.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Whether to poll the secondary gateway at all.
    #[serde(default)]
    pub gateway_enabled: bool,

    /// Gateway poll interval in milliseconds.
    #[serde(default = "default_gateway_poll_ms")]
    pub gateway_poll_ms: u64,

    /// Simulator tick interval in milliseconds (used when the link fails).
    #[serde(default = "default_sim_tick_ms")]
    pub sim_tick_ms: u64,

    /// Base URL of the Ollama instance used for guidance phrasing.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Model used for guidance phrasing.
    #[serde(default = "default_guidance_model")]
    pub guidance_model: String,

    /// Whether to request guidance phrasing at all.
    #[serde(default = "default_true")]
    pub guidance_enabled: bool,
}

fn default_link_url() -> String {
    "ws://localhost:9001/telemetry".to_string()
}
fn default_gateway_url() -> String {
    "http://localhost:3000/data/latest".to_string()
}
fn default_gateway_poll_ms() -> u64 {
    500
}
fn default_sim_tick_ms() -> u64 {
    1000
}
fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}
fn default_guidance_model() -> String {
    "llama3".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link_url: default_link_url(),
            gateway_url: default_gateway_url(),
            gateway_enabled: false,
            gateway_poll_ms: default_gateway_poll_ms(),
            sim_tick_ms: default_sim_tick_ms(),
            ollama_url: default_ollama_url(),
            guidance_model: default_guidance_model(),
            guidance_enabled: true,
        }
    }
}

/// Return the path to `~/.sightline/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

/// Build the config path relative to the given home directory.
/// Extracted for testability without mutating environment variables.
pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".sightline").join("config.toml")
}

/// Load the config from disk. Returns `None` if the file does not exist.
pub fn load() -> Result<Option<Config>, String> {
    load_from(&config_path())
}

/// Load the config from a specific path.
pub(crate) fn load_from(path: &PathBuf) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
    let mut cfg: Config =
        toml::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))?;
    apply_env_overrides(&mut cfg);
    Ok(Some(cfg))
}

/// Apply `SIGHTLINE_*` environment variable overrides to `cfg`.
///
/// Supported variables:
///
/// | Variable | Config field |
/// |---|---|
/// | `SIGHTLINE_LINK_URL` | `link_url` |
/// | `SIGHTLINE_GATEWAY_URL` | `gateway_url` |
/// | `SIGHTLINE_OLLAMA_URL` | `ollama_url` |
/// | `SIGHTLINE_MODEL` | `guidance_model` |
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("SIGHTLINE_LINK_URL") {
        cfg.link_url = v;
    }
    if let Ok(v) = std::env::var("SIGHTLINE_GATEWAY_URL") {
        cfg.gateway_url = v;
    }
    if let Ok(v) = std::env::var("SIGHTLINE_OLLAMA_URL") {
        cfg.ollama_url = v;
    }
    if let Ok(v) = std::env::var("SIGHTLINE_MODEL") {
        cfg.guidance_model = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.sim_tick_ms, 1000);
        assert_eq!(cfg.gateway_poll_ms, 500);
        assert_eq!(cfg.guidance_model, "llama3");
        assert!(cfg.guidance_enabled);
        assert!(!cfg.gateway_enabled);
    }

    #[test]
    fn config_path_points_to_sightline_dir() {
        let p = config_path_for_home("/home/testuser");
        assert!(p.to_string_lossy().contains(".sightline"));
        assert!(p.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn load_from_returns_none_when_missing() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());
        let result = load_from(&path).expect("no error");
        assert!(result.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());
        fs::create_dir_all(path.parent().unwrap()).expect("mkdir");
        fs::write(&path, "link_url = \"ws://unit.local:9001/telemetry\"\n").expect("write");

        let cfg = load_from(&path).expect("load ok").expect("some");
        assert_eq!(cfg.link_url, "ws://unit.local:9001/telemetry");
        assert_eq!(cfg.sim_tick_ms, 1000);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());
        fs::create_dir_all(path.parent().unwrap()).expect("mkdir");
        fs::write(&path, "link_url = [not toml").expect("write");

        assert!(load_from(&path).is_err());
    }

    #[test]
    fn apply_env_overrides_changes_link_url() {
        // SAFETY: single-threaded test; no other thread reads this env-var.
        unsafe { std::env::set_var("SIGHTLINE_LINK_URL", "ws://robot-host:9001") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.link_url, "ws://robot-host:9001");
        unsafe { std::env::remove_var("SIGHTLINE_LINK_URL") };
    }

    #[test]
    fn apply_env_overrides_changes_model() {
        // SAFETY: single-threaded test; no other thread reads this env-var.
        unsafe { std::env::set_var("SIGHTLINE_MODEL", "mistral") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.guidance_model, "mistral");
        unsafe { std::env::remove_var("SIGHTLINE_MODEL") };
    }
}
