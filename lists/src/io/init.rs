//! Layout and initialization of the `.token-lists/` directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::info;

use super::config::{ListsConfig, load_config, write_config};
use super::state_store::write_state;
use crate::core::actions::add_list;
use crate::core::reducer::reduce;
use crate::core::types::ListsState;

/// Canonical paths within `.token-lists/` for a project root.
#[derive(Debug, Clone)]
pub struct ListsPaths {
    pub root: PathBuf,
    pub lists_dir: PathBuf,
    pub config_path: PathBuf,
    pub state_path: PathBuf,
}

impl ListsPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let lists_dir = root.join(".token-lists");
        Self {
            root: root.clone(),
            config_path: lists_dir.join("config.toml"),
            state_path: lists_dir.join("state.json"),
            lists_dir,
        }
    }
}

/// Options for `init_lists`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Reset an existing registry. An existing config is kept either way.
    pub force: bool,
}

/// Create `.token-lists/` in `root` and register the configured default lists.
///
/// Fails if `.token-lists/` already exists unless `options.force` is set.
pub fn init_lists(root: &Path, options: &InitOptions) -> Result<ListsPaths> {
    let paths = ListsPaths::new(root);
    if paths.lists_dir.exists() && !paths.lists_dir.is_dir() {
        return Err(anyhow!("init: .token-lists exists but is not a directory"));
    }
    if paths.lists_dir.exists() && !options.force {
        return Err(anyhow!(
            "init: .token-lists already exists (use --force to reset)"
        ));
    }

    fs::create_dir_all(&paths.lists_dir)
        .with_context(|| format!("create directory {}", paths.lists_dir.display()))?;

    if !paths.config_path.exists() {
        write_config(&paths.config_path, &ListsConfig::default())?;
    }
    let config = load_config(&paths.config_path)?;

    let state = config
        .default_list_urls
        .iter()
        .fold(ListsState::new(), |state, url| reduce(&state, &add_list(url.as_str())));
    write_state(&paths.state_path, &state)?;

    info!(
        dir = %paths.lists_dir.display(),
        lists = state.by_url.len(),
        "initialized token list registry"
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::state_store::load_state;

    #[test]
    fn init_creates_empty_registry_and_default_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_lists(temp.path(), &InitOptions { force: false }).expect("init");
        assert!(paths.config_path.is_file());
        assert_eq!(load_state(&paths.state_path).expect("state"), ListsState::new());
        assert_eq!(load_config(&paths.config_path).expect("config"), ListsConfig::default());
    }

    #[test]
    fn init_refuses_existing_dir_without_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        init_lists(temp.path(), &InitOptions { force: false }).expect("init");
        let err = init_lists(temp.path(), &InitOptions { force: false }).expect_err("exists");
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn force_registers_default_lists_from_existing_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_lists(temp.path(), &InitOptions { force: false }).expect("init");
        let config = ListsConfig {
            default_list_urls: vec!["b.json".to_string(), "a.json".to_string()],
            ..ListsConfig::default()
        };
        write_config(&paths.config_path, &config).expect("write config");

        init_lists(temp.path(), &InitOptions { force: true }).expect("reinit");

        let state = load_state(&paths.state_path).expect("state");
        assert_eq!(state.urls().collect::<Vec<_>>(), vec!["a.json", "b.json"]);
        assert_eq!(load_config(&paths.config_path).expect("config"), config);
    }
}
