use crate::error::{IrrigationError, Result};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "smart-irrigation";
const DATASET_ENV: &str = "SMART_IRRIGATION_DATASET";
const DEFAULT_DATASET: &str = "data/smart_irrigation_crop_soil_dataset.csv";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub defaults: SelectionDefaults,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

/// Selection shown before the user picks anything.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionDefaults {
    #[serde(default = "default_crop")]
    pub crop: String,
    #[serde(default = "default_soil_type")]
    pub soil_type: String,
    #[serde(default = "default_soil_moisture")]
    pub soil_moisture_percent: f32,
}

fn default_crop() -> String {
    "Money Plant".into()
}

fn default_soil_type() -> String {
    "General Gardening Soil".into()
}

fn default_soil_moisture() -> f32 {
    50.0
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        Self {
            crop: default_crop(),
            soil_type: default_soil_type(),
            soil_moisture_percent: default_soil_moisture(),
        }
    }
}

impl Config {
    /// Load config from an explicit path, or from the standard locations.
    ///
    /// An explicit path that doesn't exist is an error. With no explicit path
    /// and no file found, built-in defaults are used.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(IrrigationError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!("Loading config from {}", config_path.display());

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| IrrigationError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        serde_yaml::from_str(&content)
            .map_err(|e| IrrigationError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in the working directory, then the XDG config dir.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/smart-irrigation/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| IrrigationError::Config("Cannot determine config directory".into()))?
            .join(APP_DIR);
        Ok(config_dir.join("config.yaml"))
    }

    /// Dataset file to load: CLI override, then the environment, then config.
    pub fn dataset_path(&self, dataset_override: Option<&PathBuf>) -> PathBuf {
        if let Some(path) = dataset_override {
            return path.clone();
        }

        if let Ok(path) = std::env::var(DATASET_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        self.dataset.path.clone()
    }

    /// Prompt for settings and write them to the default config path.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        let defaults = Self::default();

        println!();
        println!("Smart Irrigation setup");
        println!();

        let dataset_path: String = Input::new()
            .with_prompt("  Crop/soil dataset (CSV)")
            .default(defaults.dataset.path.display().to_string())
            .interact_text()
            .map_err(|e| IrrigationError::Config(format!("Input error: {}", e)))?;

        let crop: String = Input::new()
            .with_prompt("  Default crop")
            .default(defaults.defaults.crop)
            .interact_text()
            .map_err(|e| IrrigationError::Config(format!("Input error: {}", e)))?;

        let soil_type: String = Input::new()
            .with_prompt("  Default soil type")
            .default(defaults.defaults.soil_type)
            .interact_text()
            .map_err(|e| IrrigationError::Config(format!("Input error: {}", e)))?;

        let soil_moisture_percent: f32 = Input::new()
            .with_prompt("  Default soil moisture (%)")
            .default(defaults.defaults.soil_moisture_percent)
            .validate_with(|v: &f32| {
                if (0.0..=100.0).contains(v) {
                    Ok(())
                } else {
                    Err("must be between 0 and 100")
                }
            })
            .interact_text()
            .map_err(|e| IrrigationError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            dataset: DatasetConfig {
                path: PathBuf::from(dataset_path),
            },
            defaults: SelectionDefaults {
                crop,
                soil_type,
                soil_moisture_percent,
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| IrrigationError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# Smart Irrigation Configuration\n# Generated by `smart-irrigation init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig {
                path: PathBuf::from(DEFAULT_DATASET),
            },
            defaults: SelectionDefaults::default(),
        }
    }
}
