use crate::core::controller::{ControllerOptions, DEFAULT_STORAGE_KEY, DEFAULT_ZOOM_LEVEL};
use crate::errors::AppResult;
use crate::models::coords::Coords;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_zoom_level")]
    pub map_zoom_level: u8,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Where the map opens; `[lat, lng]`.
    #[serde(default)]
    pub home: Option<Coords>,
}

fn default_zoom_level() -> u8 {
    DEFAULT_ZOOM_LEVEL
}
fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            map_zoom_level: default_zoom_level(),
            storage_key: default_storage_key(),
            home: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rworkoutlog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rworkoutlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rworkoutlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rworkoutlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database paths.
    ///
    /// A relative `custom_db` is placed inside the config directory. In test
    /// mode the config file is left untouched.
    pub fn init_all(
        custom_db: Option<&str>,
        home: Option<Coords>,
        is_test: bool,
    ) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            home,
            ..Config::default()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            zoom_level: self.map_zoom_level,
            storage_key: self.storage_key.clone(),
        }
    }
}
