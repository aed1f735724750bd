//! Named preset documents on disk

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::EditorConfig;
use crate::constants::persistence::PRESET_EXTENSION;
use crate::error::{PersistenceError, PersistenceResult};

/// Directory of `<name>.json` graph documents, one per preset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetStore {
    root: PathBuf,
}

impl PresetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store at the configured preset directory
    pub fn from_config(config: &EditorConfig) -> PersistenceResult<Self> {
        config
            .preset_dir()
            .map(Self::new)
            .ok_or(PersistenceError::NoDataDirectory)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Document path for a preset name
    pub fn path_for(&self, name: &str) -> PersistenceResult<PathBuf> {
        let trimmed = name.trim();
        let invalid = trimmed.is_empty()
            || trimmed == "."
            || trimmed == ".."
            || trimmed.contains(['/', '\\'])
            || trimmed.contains(std::path::MAIN_SEPARATOR);
        if invalid {
            return Err(PersistenceError::InvalidPresetName(name.to_string()));
        }
        Ok(self.root.join(format!("{}.{}", trimmed, PRESET_EXTENSION)))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|path| path.is_file())
    }

    /// Create the store directory if needed
    pub fn ensure_root(&self) -> PersistenceResult<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| PersistenceError::io(&self.root, e))
    }

    /// Names of all saved presets, sorted
    pub fn list(&self) -> PersistenceResult<Vec<String>> {
        if !self.root.exists() {
            debug!("Preset directory {} does not exist yet", self.root.display());
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&self.root).map_err(|e| PersistenceError::io(&self.root, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| PersistenceError::io(&self.root, e))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PRESET_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_rejects_bad_names() {
        let store = PresetStore::new("/tmp/presets");
        assert_eq!(store.path_for("mining").unwrap(), PathBuf::from("/tmp/presets/mining.json"));
        assert!(matches!(store.path_for(""), Err(PersistenceError::InvalidPresetName(_))));
        assert!(matches!(store.path_for("  "), Err(PersistenceError::InvalidPresetName(_))));
        assert!(matches!(store.path_for("../escape"), Err(PersistenceError::InvalidPresetName(_))));
        assert!(matches!(store.path_for("a\\b"), Err(PersistenceError::InvalidPresetName(_))));
    }

    #[test]
    fn test_list_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path().join("presets"));
        assert!(store.list().unwrap().is_empty());

        store.ensure_root().unwrap();
        for name in ["zeta.json", "alpha.json", "notes.txt"] {
            std::fs::write(store.root().join(name), "{}").unwrap();
        }
        assert_eq!(store.list().unwrap(), vec!["alpha".to_string(), "zeta".to_string()]);
        assert!(store.exists("alpha"));
        assert!(!store.exists("notes"));
    }

    #[test]
    fn test_from_config_uses_data_dir() {
        let config = EditorConfig {
            data_dir: Some(PathBuf::from("/srv/waygraph")),
            ..EditorConfig::default()
        };
        let store = PresetStore::from_config(&config).unwrap();
        assert_eq!(store.root(), Path::new("/srv/waygraph/presets"));
    }
}
