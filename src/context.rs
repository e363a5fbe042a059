// File: ./src/context.rs
/*! Filesystem context for locating the configuration file.

`StandardContext` resolves directories through `directories::ProjectDirs`,
optionally under an override root (the CLI's `--root`). `TestContext`
creates a throwaway directory for isolated tests and removes it on drop.
Code that touches the filesystem receives a `&dyn AppContext` explicitly.
*/

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub trait AppContext: Send + Sync + std::fmt::Debug {
    fn get_config_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("config.toml"))
    }
}

// --- Production Implementation ---

#[derive(Clone, Debug)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// When `override_root` is `Some(path)`, the config lives in `<path>/config`.
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
        if !path.exists() {
            std::fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(path)
    }
}

impl AppContext for StandardContext {
    fn get_config_dir(&self) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return Self::ensure_exists(root.join("config"));
        }
        let proj = ProjectDirs::from("com", "recurscope", "recurscope")
            .ok_or_else(|| anyhow::anyhow!("No home directory"))?;
        Self::ensure_exists(proj.config_dir().to_path_buf())
    }
}

// --- Test Implementation ---

/// Config root under the system temp dir, unique per instance. `config.toml`
/// lives directly in it, and the whole directory goes away with the value.
#[derive(Debug)]
pub struct TestContext {
    root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let name = format!("recurscope-{}", uuid::Uuid::new_v4().simple());
        let root = std::env::temp_dir().join(name);
        std::fs::create_dir_all(&root)
            .unwrap_or_else(|e| panic!("cannot create {}: {}", root.display(), e));
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_config_dir(&self) -> Result<PathBuf> {
        Ok(self.root.clone())
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.root) {
            log::debug!("Leaving {} behind: {}", self.root.display(), e);
        }
    }
}
