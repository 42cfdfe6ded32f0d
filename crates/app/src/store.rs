use anyhow::{Context, Result};
use gradegrip_core::ports::SheetStore;
use gradegrip_core::{Course, CourseSheet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// On-disk layout: a single `[[courses]]` array of {index, grade, units}
/// records under one named slot.
#[derive(Debug, Serialize, Deserialize)]
struct SheetFile {
    courses: Vec<Course>,
}

/// Sheet persistence backed by a TOML file. A missing file loads as `None`
/// so a fresh install starts with an empty sheet instead of an error.
pub struct TomlSheetStore {
    path: PathBuf,
}

impl TomlSheetStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SheetStore for TomlSheetStore {
    fn load(&self) -> Result<Option<CourseSheet>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read sheet file: {}", self.path.display()))?;

        let file: SheetFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse sheet file: {}", self.path.display()))?;

        Ok(Some(CourseSheet {
            courses: file.courses,
        }))
    }

    fn save(&self, sheet: &CourseSheet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create sheet directory")?;
        }

        let file = SheetFile {
            courses: sheet.courses.clone(),
        };
        let contents =
            toml::to_string_pretty(&file).context("Failed to serialize sheet to TOML")?;

        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write sheet file: {}", self.path.display()))?;

        Ok(())
    }
}
