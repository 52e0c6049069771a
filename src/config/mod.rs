use serde::{Deserialize, Serialize};
use std::{
    fs,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::StorageError;
use crate::session::Screen;

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

const DEFAULT_INACTIVITY_TIMEOUT_SECS: u64 = 180;

/// Where the boot sequence lands once it completes. Observed product
/// variants differ, so the destination is policy, not contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BootDestination {
    #[default]
    Dashboard,
    Assistant,
}

impl BootDestination {
    pub fn screen(self) -> Screen {
        match self {
            BootDestination::Dashboard => Screen::Dashboard,
            BootDestination::Assistant => Screen::VirtualAssistant,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub boot_destination: BootDestination,
    #[serde(default = "Config::default_inactivity_timeout_secs")]
    pub inactivity_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            boot_destination: BootDestination::default(),
            inactivity_timeout_secs: DEFAULT_INACTIVITY_TIMEOUT_SECS,
        }
    }
}

impl Config {
    fn default_inactivity_timeout_secs() -> u64 {
        DEFAULT_INACTIVITY_TIMEOUT_SECS
    }

    pub fn inactivity_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.inactivity_timeout_secs)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(base: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, StorageError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
