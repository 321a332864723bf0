use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name the tree root is discovered by.
pub const CONFIG_FILE_NAME: &str = "src-normalize.toml";

/// Config schema version written by `init` and checked by the validator.
pub const CONFIG_VERSION: &str = "1.0";

/// On-disk configuration, stored as `src-normalize.toml` at the tree root.
///
/// Both roots are relative to the tree root. The guard prefix is prepended to
/// every canonical guard name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub version: String,
    pub header_root: PathBuf,
    pub source_root: PathBuf,
    pub guard_prefix: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            header_root: PathBuf::from("include"),
            source_root: PathBuf::from("src"),
            guard_prefix: String::new(),
        }
    }
}

/// The configuration the engine actually consumes: absolute, canonicalized
/// roots plus the guard prefix. File classification strips these roots as
/// path prefixes.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    header_root: PathBuf,
    source_root: PathBuf,
    guard_prefix: String,
}

impl ResolvedConfig {
    /// Canonicalizes both roots; they must exist.
    pub fn new(
        header_root: impl AsRef<Path>,
        source_root: impl AsRef<Path>,
        guard_prefix: impl Into<String>,
    ) -> Result<Self> {
        let header_root = fs::canonicalize(header_root.as_ref()).with_context(|| {
            format!(
                "failed to resolve header root {}",
                header_root.as_ref().display()
            )
        })?;
        let source_root = fs::canonicalize(source_root.as_ref()).with_context(|| {
            format!(
                "failed to resolve source root {}",
                source_root.as_ref().display()
            )
        })?;
        Ok(Self {
            header_root,
            source_root,
            guard_prefix: guard_prefix.into(),
        })
    }

    pub fn header_root(&self) -> &Path {
        &self.header_root
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn guard_prefix(&self) -> &str {
        &self.guard_prefix
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
    tree_root: PathBuf,
}

impl ConfigManager {
    /// Discovers the tree root by walking up from the working directory until
    /// a `src-normalize.toml` is found; without one, the working directory
    /// itself is the tree root and defaults apply.
    pub fn new() -> Result<Self> {
        let current = std::env::current_dir().context("failed to determine working directory")?;
        let tree_root = find_tree_root(&current).unwrap_or(current);
        Ok(Self::new_at(tree_root))
    }

    /// Uses `tree_root` directly, skipping discovery.
    pub fn new_at(tree_root: PathBuf) -> Self {
        let config_path = tree_root.join(CONFIG_FILE_NAME);
        Self {
            config_path,
            tree_root,
        }
    }

    /// Writes the default configuration unless one already exists.
    pub fn initialize(&self) -> Result<()> {
        if self.config_path.exists() {
            return Ok(());
        }
        self.save_config(&NormalizerConfig::default())
    }

    pub fn tree_root(&self) -> &Path {
        &self.tree_root
    }

    /// Loads the configuration and resolves the roots against the tree root.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let config = self.load_config()?;
        ResolvedConfig::new(
            self.tree_root.join(&config.header_root),
            self.tree_root.join(&config.source_root),
            config.guard_prefix,
        )
    }
}

pub trait ConfigProvider {
    fn load_config(&self) -> Result<NormalizerConfig>;
    fn save_config(&self, config: &NormalizerConfig) -> Result<()>;
    fn get_config_path(&self) -> Result<PathBuf>;
}

impl ConfigProvider for ConfigManager {
    fn load_config(&self) -> Result<NormalizerConfig> {
        if !self.config_path.exists() {
            return Ok(NormalizerConfig::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("failed to read config file")?;

        toml::from_str(&content).context("failed to parse config file")
    }

    fn save_config(&self, config: &NormalizerConfig) -> Result<()> {
        let content = toml::to_string_pretty(config).context("failed to serialize config")?;

        fs::write(&self.config_path, content).context("failed to write config file")?;

        Ok(())
    }

    fn get_config_path(&self) -> Result<PathBuf> {
        Ok(self.config_path.clone())
    }
}

fn find_tree_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(CONFIG_FILE_NAME).exists() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_writes_default_config_once() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::new_at(dir.path().to_path_buf());

        manager.initialize().unwrap();
        let config_path = manager.get_config_path().unwrap();
        assert!(config_path.exists());

        let loaded = manager.load_config().unwrap();
        assert_eq!(loaded.version, CONFIG_VERSION);
        assert_eq!(loaded.header_root, PathBuf::from("include"));
        assert_eq!(loaded.source_root, PathBuf::from("src"));
        assert_eq!(loaded.guard_prefix, "");

        // A second initialize must not clobber an edited file.
        fs::write(&config_path, "guard_prefix = \"INX\"\n").unwrap();
        manager.initialize().unwrap();
        assert_eq!(manager.load_config().unwrap().guard_prefix, "INX");
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::new_at(dir.path().to_path_buf());
        let loaded = manager.load_config().unwrap();
        assert_eq!(loaded.header_root, PathBuf::from("include"));
    }

    #[test]
    fn partial_config_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::new_at(dir.path().to_path_buf());
        fs::write(
            manager.get_config_path().unwrap(),
            "header_root = \"hdr\"\n",
        )
        .unwrap();

        let loaded = manager.load_config().unwrap();
        assert_eq!(loaded.header_root, PathBuf::from("hdr"));
        assert_eq!(loaded.source_root, PathBuf::from("src"));
    }

    #[test]
    fn find_tree_root_walks_upwards() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        let nested = dir.path().join("include/deep/below");
        fs::create_dir_all(&nested).unwrap();

        let found = find_tree_root(&nested).unwrap();
        assert_eq!(found, dir.path());
    }

    #[test]
    fn resolve_requires_existing_roots() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::new_at(dir.path().to_path_buf());
        assert!(manager.resolve().is_err());

        fs::create_dir_all(dir.path().join("include")).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        let resolved = manager.resolve().unwrap();
        assert!(resolved.header_root().ends_with("include"));
        assert_eq!(resolved.guard_prefix(), "");
    }
}
