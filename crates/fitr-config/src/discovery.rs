//! Configuration file discovery.
//!
//! Walks from a starting directory towards the filesystem root collecting `.fitr.toml`
//! files, then appends the global `~/.fitr.toml` when no `root = true` file stopped the walk.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".fitr.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global (`~/.fitr.toml`) last.
/// Returns an empty vector if no configuration files are found.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    let mut found_root = false;

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let is_root = is_root_config(&candidate);
        configs.push(candidate);
        if is_root {
            found_root = true;
            break;
        }
    }

    if !found_root
        && let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.fitr.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    /// Drops the global config, which depends on the machine running the tests.
    fn local_only(configs: Vec<PathBuf>) -> Vec<PathBuf> {
        configs
            .into_iter()
            .filter(|p| !is_global_config(p))
            .collect()
    }

    #[test]
    fn test_discover_no_configs() {
        let test_dir = TestDir::new();
        let subdir = test_dir.create_dir("a/b/c");

        assert!(local_only(discover_config_files(&subdir)).is_empty());
    }

    #[test]
    fn test_discover_precedence_order() {
        let test_dir = TestDir::new();
        let root_config = test_dir.create_config_at_root();
        let mid_config = test_dir.create_config("a/b");
        let leaf_config = test_dir.create_config("a/b/c/d");
        let working_dir = test_dir.create_dir("a/b/c/d/e");

        let configs = local_only(discover_config_files(&working_dir));

        assert_eq!(configs, vec![leaf_config, mid_config, root_config]);
    }

    #[test]
    fn test_discover_from_directory_with_config() {
        let test_dir = TestDir::new();
        let config = test_dir.create_config_at_root();

        let configs = local_only(discover_config_files(test_dir.path()));

        assert_eq!(configs, vec![config]);
    }

    #[test]
    fn test_discover_stops_at_root_config() {
        let test_dir = TestDir::new();
        test_dir.create_config_at_root();
        let project = test_dir.create_root_config("project");
        let working_dir = test_dir.create_dir("project/src");

        let configs = discover_config_files(&working_dir);

        // Neither the parent nor the global config are consulted.
        assert_eq!(configs, vec![project]);
    }

    #[test]
    fn test_global_config_path_uses_filename() {
        let path = global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().ends_with(CONFIG_FILENAME));
    }

    #[test]
    fn test_is_global_config() {
        let global = global_config_path().unwrap();
        assert!(is_global_config(&global));
        assert!(!is_global_config(Path::new("/srv/matching/.fitr.toml")));
    }
}
