use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};

use crate::domain::preferences::Layout;

/// Stores preferences between runs
pub trait PreferencesPersistence: Send + Sync {
    fn save(&self, layout: &Layout) -> Result<()>;
}

/// Preferences kept as a JSON file in the data directory
#[derive(Debug, Clone)]
pub struct JsonPreferences {
    path: PathBuf,
}

impl JsonPreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(crate::utils::PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored layout. A missing file yields `None`.
    pub fn load(&self) -> Result<Option<Layout>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .wrap_err_with(|| format!("reading {}", self.path.display()))?;
        let layout = serde_json::from_str(&content)
            .wrap_err_with(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(layout))
    }
}

impl PreferencesPersistence for JsonPreferences {
    fn save(&self, layout: &Layout) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(layout)?;
        std::fs::write(&self.path, content)
            .wrap_err_with(|| format!("writing {}", self.path.display()))?;
        log::info!("preferences saved to {}", self.path.display());
        Ok(())
    }
}
