use std::path::{Path, PathBuf};

use super::types::{AppConfig, ColorMode};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOCAL_CONFIG_FILE_NAME: &str = "prefixout.toml";

/// Get the default prefixout data directory: ~/.prefixout
pub fn get_prefixout_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".prefixout"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.prefixout/config.toml
    // Priority 2: ./prefixout.toml
    let user_config = get_prefixout_data_dir()
        .ok()
        .map(|d| d.join(CONFIG_FILE_NAME))
        .filter(|p| p.exists());
    let local_config = Path::new(LOCAL_CONFIG_FILE_NAME);

    let mut cfg = match user_config {
        Some(p) => read_config(&p)?,
        None if local_config.exists() => read_config(local_config)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())?;
    cfg.validate().map_err(anyhow::Error::msg)?;
    Ok(cfg)
}

/// Loads an explicitly named file; a missing file is an error.
pub fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    if !path.exists() {
        anyhow::bail!("config file not found: {}", path.display());
    }
    let mut cfg = read_config(path)?;
    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())?;
    cfg.validate().map_err(anyhow::Error::msg)?;
    Ok(cfg)
}

fn read_config(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))
}

/// Environment variable overrides (highest priority).
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, var: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = var("PREFIXOUT_COLOR").filter(|v| !v.trim().is_empty()) {
        cfg.output.color = v
            .parse::<ColorMode>()
            .map_err(|e| anyhow::anyhow!("PREFIXOUT_COLOR: {e}"))?;
    }
    if let Some(v) = var("PREFIXOUT_LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
        cfg.logging.level = v;
    }
    Ok(())
}
