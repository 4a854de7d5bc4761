use std::fmt::{Display, Formatter};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Directory below the application directory that holds the external binaries.
pub const DEFAULT_BIN_DIR: &str = "output";
pub const DEFAULT_ENCRYPTOR: &str = "encryptor";
pub const DEFAULT_DECRYPTOR: &str = "decryptor";
pub const DEFAULT_BUILD_PROGRAM: &str = "make";
/// Arguments handed to both binaries after the program path.
pub const DEFAULT_ARGUMENTS: [&str; 2] = ["{input}", "{output}"];

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildDefinition {
    pub command: Option<Vec<String>>,
    pub working_directory: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub app_dir: Option<String>,
    pub bin_dir: Option<String>,
    pub encryptor: Option<String>,
    pub decryptor: Option<String>,
    pub encrypt_arguments: Option<Vec<String>>,
    pub decrypt_arguments: Option<Vec<String>>,
    pub build: Option<BuildDefinition>,
    pub timeout_secs: Option<u64>,
}

fn default_arguments() -> Vec<String> {
    DEFAULT_ARGUMENTS.iter().map(ToString::to_string).collect()
}

impl Settings {
    pub fn bin_dir(&self) -> &str {
        self.bin_dir.as_deref().unwrap_or(DEFAULT_BIN_DIR)
    }

    pub fn encryptor(&self) -> &str {
        self.encryptor.as_deref().unwrap_or(DEFAULT_ENCRYPTOR)
    }

    pub fn decryptor(&self) -> &str {
        self.decryptor.as_deref().unwrap_or(DEFAULT_DECRYPTOR)
    }

    pub fn encrypt_arguments(&self) -> Vec<String> {
        self.encrypt_arguments
            .clone()
            .unwrap_or_else(default_arguments)
    }

    pub fn decrypt_arguments(&self) -> Vec<String> {
        self.decrypt_arguments
            .clone()
            .unwrap_or_else(default_arguments)
    }

    pub fn build_command(&self) -> Vec<String> {
        self.build
            .as_ref()
            .and_then(|build| build.command.clone())
            .unwrap_or_else(|| vec![DEFAULT_BUILD_PROGRAM.to_string()])
    }

    pub fn build_working_directory(&self) -> Option<&str> {
        self.build
            .as_ref()
            .and_then(|build| build.working_directory.as_deref())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Display for Settings {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(formatter, "bin_dir: {}", self.bin_dir())?;
        writeln!(formatter, "encryptor: {}", self.encryptor())?;
        writeln!(formatter, "decryptor: {}", self.decryptor())?;
        writeln!(
            formatter,
            "encrypt_arguments: {}",
            self.encrypt_arguments().join(" ")
        )?;
        writeln!(
            formatter,
            "decrypt_arguments: {}",
            self.decrypt_arguments().join(" ")
        )?;
        write!(formatter, "build: {}", self.build_command().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bin_dir(), "output");
        assert_eq!(settings.encryptor(), "encryptor");
        assert_eq!(settings.decryptor(), "decryptor");
        assert_eq!(settings.encrypt_arguments(), vec!["{input}", "{output}"]);
        assert_eq!(settings.decrypt_arguments(), vec!["{input}", "{output}"]);
        assert_eq!(settings.build_command(), vec!["make"]);
        assert!(settings.build_working_directory().is_none());
        assert!(settings.timeout().is_none());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings {
            bin_dir: Some("bin".to_string()),
            encryptor: Some("enc".to_string()),
            build: Some(BuildDefinition {
                command: Some(vec!["cargo".to_string(), "build".to_string()]),
                working_directory: Some("/src".to_string()),
            }),
            timeout_secs: Some(30),
            ..Settings::default()
        };

        assert_eq!(settings.bin_dir(), "bin");
        assert_eq!(settings.encryptor(), "enc");
        assert_eq!(settings.decryptor(), "decryptor");
        assert_eq!(settings.build_command(), vec!["cargo", "build"]);
        assert_eq!(settings.build_working_directory(), Some("/src"));
        assert_eq!(settings.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_build_section_without_command_keeps_default() {
        let settings = Settings {
            build: Some(BuildDefinition {
                command: None,
                working_directory: Some("/src".to_string()),
            }),
            ..Settings::default()
        };
        assert_eq!(settings.build_command(), vec!["make"]);
    }
}
