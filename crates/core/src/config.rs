//! Configuration path utilities for encryd.
//!
//! This module resolves the settings file path, the application directory the
//! external binaries live under, and expands shell variables like `~` in paths.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default path for the settings file
const DEFAULT_SETTINGS_PATH: &str = "~/.encryd/settings.yml";

/// Resolves the settings file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// settings path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use encryd_core::config::get_settings_path;
///
/// // Use default path
/// let default_path = get_settings_path(&None);
///
/// // Use custom path
/// let custom_path = get_settings_path(&Some("/path/to/settings.yml".to_string()));
/// ```
pub fn get_settings_path(settings_path_arg: &Option<String>) -> String {
    let settings_path = match settings_path_arg {
        Some(settings_path) => settings_path,
        None => DEFAULT_SETTINGS_PATH,
    };

    shellexpand::tilde(settings_path).to_string()
}

/// Expands `~` in `path`.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Resolves the application directory.
///
/// A configured directory wins; otherwise the directory containing the running
/// executable is used, which is where the build places `output/`.
///
/// # Errors
///
/// Returns [`Error::AppDir`] if no directory is configured and the location of the
/// current executable cannot be determined.
pub fn resolve_app_dir(app_dir: &Option<String>) -> Result<PathBuf> {
    if let Some(app_dir) = app_dir {
        return Ok(expand_path(app_dir));
    }

    let executable = std::env::current_exe().map_err(Error::AppDir)?;
    executable
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            Error::AppDir(std::io::Error::other(format!(
                "`{}` has no parent directory",
                executable.display()
            )))
        })
}

/// Resolves a possibly relative directory against the application directory.
pub fn resolve_against(app_dir: &Path, directory: &str) -> PathBuf {
    let expanded = expand_path(directory);
    if expanded.is_absolute() {
        expanded
    } else {
        app_dir.join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_settings_path_with_custom_path() {
        let custom_path = Some("/custom/path/settings.yml".to_string());
        let result = get_settings_path(&custom_path);
        assert_eq!(result, "/custom/path/settings.yml");
    }

    #[test]
    fn test_get_settings_path_with_none() {
        let result = get_settings_path(&None);
        // Should expand the tilde in the default path
        assert!(result.ends_with("settings.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let result = expand_path("~/encryd");
        assert!(!result.starts_with("~"));
        assert!(result.ends_with("encryd"));
    }

    #[test]
    fn test_resolve_app_dir_configured() {
        let result = resolve_app_dir(&Some("/opt/encryd".to_string())).unwrap();
        assert_eq!(result, PathBuf::from("/opt/encryd"));
    }

    #[test]
    fn test_resolve_app_dir_defaults_to_executable_directory() {
        let result = resolve_app_dir(&None).unwrap();
        let executable = std::env::current_exe().unwrap();
        assert_eq!(Some(result.as_path()), executable.parent());
    }

    #[test]
    fn test_resolve_against_relative() {
        let result = resolve_against(Path::new("/opt/encryd"), "output");
        assert_eq!(result, PathBuf::from("/opt/encryd/output"));
    }

    #[test]
    fn test_resolve_against_absolute() {
        let result = resolve_against(Path::new("/opt/encryd"), "/usr/local/bin");
        assert_eq!(result, PathBuf::from("/usr/local/bin"));
    }
}
