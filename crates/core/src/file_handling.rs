//! Settings file handling and validation for encryd.
//!
//! This module reads the YAML settings file and validates the argument templates
//! and build command it defines.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::interpolation::validate_arguments;
use crate::settings::Settings;

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

fn validate_settings(settings: &Settings) -> Result<()> {
    validate_arguments("encrypt", &settings.encrypt_arguments())?;
    validate_arguments("decrypt", &settings.decrypt_arguments())?;

    if settings.build_command().is_empty() {
        return Err(Error::EmptyBuildCommand);
    }

    Ok(())
}

/// Parses and validates settings from YAML text.
///
/// An empty document yields the default settings.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or the settings fail validation.
pub fn parse_settings(yaml: &str, path: &str) -> Result<Settings> {
    if yaml.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings = serde_yaml::from_str(yaml).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "settings".to_string(),
            path.to_string(),
            e,
        )
    })?;

    validate_settings(&settings)?;

    Ok(settings)
}

/// Loads and validates settings from a YAML file.
///
/// When `required` is false a missing file is not an error and the defaults are
/// used instead; this is the case for the default settings path.
///
/// # Errors
///
/// Returns an error if:
/// - The file is required but missing, or cannot be read
/// - The YAML is malformed or doesn't match the expected structure
/// - An argument template uses an unknown placeholder
/// - The build command is empty
///
/// # Examples
///
/// ```no_run
/// use encryd_core::file_handling::get_settings;
///
/// let settings = get_settings("/home/me/.encryd/settings.yml", false)?;
/// println!("{}", settings);
/// # Ok::<(), encryd_core::error::Error>(())
/// ```
pub fn get_settings(settings_path: &str, required: bool) -> Result<Settings> {
    if !required && !Path::new(settings_path).exists() {
        debug!("No settings file at `{settings_path}`, using defaults");
        return Ok(Settings::default());
    }

    let mut reader = get_reader("settings", settings_path)?;
    let mut yaml = String::new();
    reader.read_to_string(&mut yaml).map_err(|e| {
        Error::io_error("settings".to_string(), settings_path.to_string(), e)
    })?;

    parse_settings(&yaml, settings_path)
}
