//! The three actions a user can trigger and how each becomes a worker.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;

use crate::config::{resolve_against, resolve_app_dir};
use crate::error::{Error, Result};
use crate::interpolation::{self, get_templates, interpolate_arguments};
use crate::invocation::{Invocation, Secret};
use crate::settings::Settings;
use crate::worker::{Completion, Worker};

/// Encrypted files always carry this extension.
pub const ENCRYPTED_EXTENSION: &str = ".bin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Encrypt,
    Decrypt,
    Build,
}

impl Operation {
    pub fn title(&self) -> &'static str {
        match self {
            Operation::Encrypt => "Encrypt",
            Operation::Decrypt => "Decrypt",
            Operation::Build => "Build",
        }
    }

    /// Labels of the input, output and password fields, in that order.
    fn field_labels(&self) -> [&'static str; 3] {
        match self {
            Operation::Decrypt => ["Encrypted file", "Output file", "Password"],
            Operation::Encrypt | Operation::Build => ["Input file", "Output file", "Password"],
        }
    }

    /// The line appended to a panel's output once a run completes.
    pub fn status_line(&self, completion: &Completion) -> String {
        match (self, completion) {
            (_, Completion::Cancelled) => "[Cancelled]".to_string(),
            (_, Completion::TimedOut) => "[Timed out]".to_string(),
            (Operation::Build, completion) if completion.is_success() => {
                "[Build Success]".to_string()
            }
            (Operation::Build, _) => "[Build Failed]".to_string(),
            (_, completion) if completion.is_success() => "[Success]".to_string(),
            (_, completion) => format!("[Failed. Exit code: {}]", completion.code()),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.title())
    }
}

/// Parameters the user entered for an encryption or decryption.
#[derive(Debug, Clone)]
pub struct Request {
    pub input: String,
    pub output: String,
    pub password: Secret,
}

impl Request {
    pub fn new(input: impl Into<String>, output: impl Into<String>, password: Secret) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            password,
        }
    }

    /// Checks that every field was filled in, before anything is spawned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFields`] naming each empty field.
    pub fn validate(&self, operation: Operation) -> Result<()> {
        self.check_fields(operation, true)
    }

    /// Checks the input and output fields only, so that a front end can reject a
    /// request before asking for the password.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFields`] naming each empty path field.
    pub fn validate_paths(&self, operation: Operation) -> Result<()> {
        self.check_fields(operation, false)
    }

    /// Applies the output naming rule of `operation` and reports whether the output
    /// was renamed.
    pub fn normalize_output(&mut self, operation: Operation) -> bool {
        if operation != Operation::Encrypt {
            return false;
        }

        let output = ensure_encrypted_extension(&self.output);
        let renamed = output != self.output;
        self.output = output;
        renamed
    }

    fn check_fields(&self, operation: Operation, with_password: bool) -> Result<()> {
        let [input_label, output_label, password_label] = operation.field_labels();
        let mut missing = Vec::new();

        if self.input.is_empty() {
            missing.push(input_label);
        }
        if self.output.is_empty() {
            missing.push(output_label);
        }
        if with_password && self.password.is_empty() {
            missing.push(password_label);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingFields(missing))
        }
    }
}

/// Appends [`ENCRYPTED_EXTENSION`] unless `output` already ends with it, in any case.
pub fn ensure_encrypted_extension(output: &str) -> String {
    if output.to_lowercase().ends_with(ENCRYPTED_EXTENSION) {
        output.to_string()
    } else {
        format!("{output}{ENCRYPTED_EXTENSION}")
    }
}

/// Path of an external binary, with the platform's executable suffix.
pub fn binary_path(bin_dir: &Path, name: &str) -> PathBuf {
    bin_dir.join(format!("{name}{}", std::env::consts::EXE_SUFFIX))
}

/// Turns user requests into invocations of the external binaries and the build.
#[derive(Debug, Clone)]
pub struct Launcher {
    settings: Settings,
    app_dir: PathBuf,
    timeout: Option<Duration>,
}

impl Launcher {
    /// # Errors
    ///
    /// Returns an error if the application directory cannot be resolved.
    pub fn new(settings: Settings) -> Result<Self> {
        let app_dir = resolve_app_dir(&settings.app_dir)?;
        let timeout = settings.timeout();
        Ok(Self {
            settings,
            app_dir,
            timeout,
        })
    }

    /// Overrides the timeout from the settings.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        if timeout.is_some() {
            self.timeout = timeout;
        }
        self
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    pub fn bin_dir(&self) -> PathBuf {
        resolve_against(&self.app_dir, self.settings.bin_dir())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Builds the invocation for an encryption or decryption.
    ///
    /// Encryption output gets [`ENCRYPTED_EXTENSION`] appended when missing. The
    /// password only ever travels as the stdin line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFields`] for an incomplete request,
    /// [`Error::Misc`] for [`Operation::Build`], or a template error.
    pub fn invocation(&self, operation: Operation, mut request: Request) -> Result<Invocation> {
        request.validate(operation)?;
        request.normalize_output(operation);

        let (binary, templates) = match operation {
            Operation::Encrypt => (
                self.settings.encryptor(),
                self.settings.encrypt_arguments(),
            ),
            Operation::Decrypt => (
                self.settings.decryptor(),
                self.settings.decrypt_arguments(),
            ),
            Operation::Build => {
                return Err(Error::Misc(
                    "The build takes no request; use `Launcher::build_worker`".to_string(),
                ))
            }
        };

        let Request {
            input,
            output,
            password,
        } = request;

        let bin_dir = self.bin_dir();
        let mut context: HashMap<String, String> = HashMap::new();
        context.insert(interpolation::INPUT.to_string(), input);
        context.insert(interpolation::OUTPUT.to_string(), output);
        context.insert(
            interpolation::APP_DIR.to_string(),
            self.app_dir.display().to_string(),
        );
        context.insert(
            interpolation::BIN_DIR.to_string(),
            bin_dir.display().to_string(),
        );

        let templates = get_templates(&templates)?;
        let arguments = interpolate_arguments(&context, &templates)?;

        let invocation = Invocation::new(binary_path(&bin_dir, binary))
            .args(arguments)
            .stdin_line(password)
            .timeout(self.timeout);

        debug!("{operation} invocation: {invocation}");
        Ok(invocation)
    }

    /// The worker compiling the external binaries, run from the application directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBuildCommand`] if the configured command is empty.
    pub fn build_worker(&self) -> Result<Worker> {
        let working_directory = match self.settings.build_working_directory() {
            Some(directory) => resolve_against(&self.app_dir, directory),
            None => self.app_dir.clone(),
        };

        Worker::build(
            &self.settings.build_command(),
            &working_directory,
            self.timeout,
        )
    }
}
