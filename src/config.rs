use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::calculator::Gaps;
use crate::error::Result;
use crate::selection::Rival;

/// Driver names and pre-race gaps. Every key is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub subject: String,
    pub rival_a: String,
    pub rival_b: String,
    pub gap_to_rival_a: u32,
    pub gap_to_rival_b: u32,
}

impl Default for Config {
    fn default() -> Self {
        let gaps = Gaps::default();
        Self {
            subject: "Lando".to_string(),
            rival_a: "Max".to_string(),
            rival_b: "Oscar".to_string(),
            gap_to_rival_a: gaps.gap_a,
            gap_to_rival_b: gaps.gap_b,
        }
    }
}

impl Config {
    pub fn gaps(&self) -> Gaps {
        Gaps::new(self.gap_to_rival_a, self.gap_to_rival_b)
    }

    pub fn rival_name(&self, rival: Rival) -> &str {
        match rival {
            Rival::A => &self.rival_a,
            Rival::B => &self.rival_b,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("champcalc_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(path = ?self.path, %err, "no config file, using defaults");
                return Config::default();
            }
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => {
                tracing::info!(path = ?self.path, ?cfg, "loaded config");
                cfg
            }
            Err(err) => {
                tracing::warn!(path = ?self.path, %err, "unparsable config, using defaults");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        tracing::info!(path = ?self.path, "saved config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            subject: "Charles".into(),
            rival_a: "Lewis".into(),
            rival_b: "George".into(),
            gap_to_rival_a: 3,
            gap_to_rival_b: 0,
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn garbage_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "gap_to_rival_b": 4 }"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.gaps(), Gaps::new(12, 4));
        assert_eq!(cfg.subject, "Lando");
        assert_eq!(cfg.rival_name(Rival::A), "Max");
        assert_eq!(cfg.rival_name(Rival::B), "Oscar");
    }
}
