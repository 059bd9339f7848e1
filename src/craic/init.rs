use crate::api::{CraicApi, CraicPaths};
use crate::config::CraicConfig;
use crate::error::{CraicError, Result};
use crate::ids::UuidIds;
use crate::model::Scope;
use crate::store::fs::FileStore;
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

/// Overrides the global data directory. Mostly useful for tests and sandboxes.
pub const GLOBAL_DATA_ENV: &str = "CRAIC_GLOBAL_DATA";

pub struct CraicContext {
    pub api: CraicApi<FileStore, UuidIds>,
    pub scope: Scope,
    pub config: CraicConfig,
}

/// Find the project root by walking up from cwd looking for a directory
/// that contains `.craic`. Stops at the home directory or the filesystem root.
pub fn find_project_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(".craic").is_dir() {
            return Some(current);
        }

        if home_dir.as_ref() == Some(&current) {
            return None;
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            _ => return None,
        }
    }
}

pub fn global_data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(GLOBAL_DATA_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "craic", "craic")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CraicError::Store("Could not determine global data dir".to_string()))
}

pub fn initialize(cwd: &Path, use_global: bool) -> Result<CraicContext> {
    let project_dir = find_project_root(cwd)
        .map(|root| root.join(".craic"))
        .unwrap_or_else(|| cwd.join(".craic"));
    let global_dir = global_data_dir()?;

    let scope = if use_global {
        Scope::Global
    } else {
        Scope::Project
    };

    let paths = CraicPaths {
        project: Some(project_dir),
        global: global_dir,
    };
    let data_dir = paths.scope_dir(scope)?;
    let config = CraicConfig::load(&data_dir)?;
    tracing::debug!(dir = %data_dir.display(), ?scope, "opening store");

    let store = FileStore::new(data_dir);
    let api = CraicApi::new(store, UuidIds, paths, scope, config.clone())?;

    Ok(CraicContext { api, scope, config })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_craic_dir_in_cwd() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".craic")).unwrap();

        assert_eq!(find_project_root(temp.path()), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn walks_up_to_nearest_ancestor() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let child = root.join("a").join("b");
        fs::create_dir_all(&child).unwrap();
        fs::create_dir(root.join(".craic")).unwrap();
        fs::create_dir(root.join("a").join(".craic")).unwrap();

        assert_eq!(find_project_root(&child), Some(root.join("a")));
    }

    #[test]
    fn ignores_plain_file_named_craic() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("work");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(".craic"), "").unwrap();

        assert_eq!(find_project_root(&dir), None);
    }

    #[test]
    fn initialize_defaults_to_cwd_store() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize(temp.path(), false).unwrap();

        assert_eq!(ctx.scope, Scope::Project);
        assert_eq!(
            ctx.api.paths().project.as_deref(),
            Some(temp.path().join(".craic").as_path())
        );
        assert_eq!(ctx.config, CraicConfig::default());
        assert!(ctx.api.documents().documents().is_empty());
    }

    #[test]
    fn initialize_honours_project_config_keys() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".craic");
        let mut config = CraicConfig::default();
        config.documents_key = "docs".into();
        config.save(&dir).unwrap();

        let ctx = initialize(temp.path(), false).unwrap();

        assert_eq!(ctx.api.documents().key(), "docs");
    }
}
