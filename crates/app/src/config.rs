use anyhow::{Context, Result};
use directories::ProjectDirs;
use gradegrip_core::GradeScale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::cli::CliArgs;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Config {
    pub version: u32,
    pub sheet_path: PathBuf,
    pub ui: UiConfig,
    #[serde(default = "default_scale")]
    pub scale: BTreeMap<String, u32>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct UiConfig {
    pub decimal_places: usize,
    pub autosave_on_exit: bool,
}

fn default_scale() -> BTreeMap<String, u32> {
    [("A", 5), ("B", 4), ("C", 3), ("D", 2), ("E", 1), ("F", 0)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            sheet_path: default_sheet_path(),
            ui: UiConfig::default(),
            scale: default_scale(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            autosave_on_exit: true,
        }
    }
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("", "", "gradegrip").context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    Ok(config_dir.join("gradegrip.toml"))
}

fn default_sheet_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("gradegrip").join("courses.toml"))
        .unwrap_or_else(|| PathBuf::from("courses.toml"))
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => get_default_config_path()?,
        };

        if !path.exists() {
            let default_config = Config::default();
            // Create directory if it doesn't exist
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
            default_config.save(&path)?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn from_cli_and_file(cli_args: CliArgs, config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load(config_path)?;

        // CLI args override config file
        if let Some(sheet_path) = cli_args.sheet {
            config.sheet_path = sheet_path;
        }

        Ok(config)
    }

    /// The grade scale as a domain value, built from the config table.
    pub fn grade_scale(&self) -> GradeScale {
        GradeScale::from_pairs(self.scale.iter().map(|(k, v)| (k.as_str(), *v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.ui.decimal_places, 2);
        assert!(config.ui.autosave_on_exit);
        assert_eq!(config.scale.len(), 6);
        assert!(!config.sheet_path.as_os_str().is_empty());
    }

    #[test]
    fn test_default_scale_matches_domain_default() {
        let config = Config::default();
        assert_eq!(config.grade_scale(), GradeScale::default());
    }

    #[test]
    fn test_config_serialization_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.sheet_path = PathBuf::from("/test/sheet.toml");
        config.ui.decimal_places = 3;
        config.scale.insert("A".to_string(), 4);

        let toml_str = toml::to_string(&config)?;
        let parsed_config: Config = toml::from_str(&toml_str)?;

        assert_eq!(config, parsed_config);
        Ok(())
    }

    #[test]
    fn test_config_load_nonexistent_creates_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load(Some(config_path.clone()))?;

        // Should create default config
        assert_eq!(config.version, 1);
        assert!(config.ui.autosave_on_exit);

        // Should have created the file
        assert!(config_path.exists());

        Ok(())
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test.toml");

        let mut config = Config::default();
        config.sheet_path = PathBuf::from("/custom/sheet.toml");
        config.ui.decimal_places = 1;

        config.save(&config_path)?;
        let loaded_config = Config::load(Some(config_path))?;

        assert_eq!(config.sheet_path, loaded_config.sheet_path);
        assert_eq!(config.ui.decimal_places, loaded_config.ui.decimal_places);

        Ok(())
    }

    #[test]
    fn test_config_missing_scale_falls_back_to_default() -> Result<()> {
        let contents = r#"
            version = 1
            sheet_path = "/tmp/sheet.toml"

            [ui]
            decimal_places = 2
            autosave_on_exit = true
        "#;
        let config: Config = toml::from_str(contents)?;
        assert_eq!(config.grade_scale(), GradeScale::default());
        Ok(())
    }

    #[test]
    fn test_custom_scale_from_config() -> Result<()> {
        let contents = r#"
            version = 1
            sheet_path = "/tmp/sheet.toml"

            [ui]
            decimal_places = 2
            autosave_on_exit = true

            [scale]
            A = 4
            B = 3
            C = 2
            D = 1
            F = 0
        "#;
        let config: Config = toml::from_str(contents)?;
        let scale = config.grade_scale();
        assert_eq!(scale.max_point(), 4);
        assert!(!scale.recognizes("E"));
        Ok(())
    }

    #[test]
    fn test_cli_override() -> Result<()> {
        let cli_args = CliArgs {
            sheet: Some(PathBuf::from("/override/sheet.toml")),
            config: None,
        };

        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test.toml");

        // Create a config file with a different sheet path
        let original_config = Config {
            sheet_path: PathBuf::from("/original/sheet.toml"),
            ..Config::default()
        };
        original_config.save(&config_path)?;

        // CLI should override
        let final_config = Config::from_cli_and_file(cli_args, Some(config_path))?;
        assert_eq!(final_config.sheet_path, PathBuf::from("/override/sheet.toml"));

        Ok(())
    }

    #[test]
    fn test_get_default_config_path() -> Result<()> {
        let path = get_default_config_path()?;
        assert!(path.ends_with("gradegrip.toml"));
        Ok(())
    }
}
