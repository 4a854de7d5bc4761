use std::io::{stdout, Stdout};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::tty::IsTty;
use log::{debug, info};

use encryd_cli::cli_args::{Action, Args, Files};
use encryd_cli::password::read_password;
use encryd_cli::terminal::Terminal;
use encryd_core::error::{Error, Result};
use encryd_core::invocation::Secret;
use encryd_core::operations::{binary_path, Launcher, Request};
use encryd_core::panel::Panel;
use encryd_core::{config, file_handling};

/// Load the settings and build the launcher, applying the command-line timeout
fn initialize_launcher(args: &Args) -> Result<Launcher> {
    let settings_path = config::get_settings_path(&args.settings_path);
    debug!("Settings path: `{settings_path}`");

    let settings = file_handling::get_settings(&settings_path, args.settings_path.is_some())?;
    let launcher = Launcher::new(settings)?.with_timeout(args.timeout.map(Duration::from_secs));
    debug!("App dir: `{}`", launcher.app_dir().display());

    Ok(launcher)
}

/// Show a rejected request in the panel and the terminal, passing other errors on
fn reject(panel: &mut Panel, terminal: &mut Terminal<Stdout>, error: Error) -> Result<bool> {
    match error {
        Error::MissingFields(_) => {
            panel.note(error.to_string());
            for line in panel.output() {
                terminal.failure(line)?;
            }
            Ok(false)
        }
        error => Err(error),
    }
}

/// Start an encrypt or decrypt run, or report why the request was rejected
fn start_file_operation(
    panel: &mut Panel,
    terminal: &mut Terminal<Stdout>,
    launcher: &Launcher,
    files: &Files,
) -> Result<bool> {
    let operation = panel.operation();
    let mut request = Request::new(files.input.as_str(), files.output.as_str(), Secret::new(""));

    // Paths are checked before prompting for the password.
    if let Err(e) = request.validate_paths(operation) {
        return reject(panel, terminal, e);
    }

    if request.normalize_output(operation) {
        terminal.message(&format!("Output file: {}", request.output))?;
    }

    request.password = read_password(files.password_stdin)?;

    let invocation = match launcher.invocation(operation, request) {
        Ok(invocation) => invocation,
        Err(e) => return reject(panel, terminal, e),
    };

    info!("Running {invocation}");
    panel.start(invocation)?;
    Ok(true)
}

fn print_settings(launcher: &Launcher) {
    let bin_dir = launcher.bin_dir();
    let settings = launcher.settings();

    println!("App dir: {}", launcher.app_dir().display());
    for name in [settings.encryptor(), settings.decryptor()] {
        let path = binary_path(&bin_dir, name);
        let found = if path.is_file() { "found" } else { "missing" };
        println!("{name}: {} ({found})", path.display());
    }
    println!("{settings}");
}

/// Returns whether the run, if any, completed successfully
fn execute() -> Result<bool> {
    let args = Args::parse();
    let launcher = initialize_launcher(&args)?;

    let Some(operation) = args.action.operation() else {
        print_settings(&launcher);
        return Ok(true);
    };

    let stdout = stdout();
    let colored = stdout.is_tty();
    let mut terminal = Terminal::new(stdout, colored);
    let mut panel = Panel::new(operation);

    if let Action::Encrypt(files) | Action::Decrypt(files) = &args.action {
        if !start_file_operation(&mut panel, &mut terminal, &launcher, files)? {
            return Ok(false);
        }
    } else {
        let worker = launcher.build_worker()?;
        info!("Running {}", worker.invocation());
        panel.start_worker(worker)?;
    }

    while let Some(event) = panel.next_event() {
        terminal.event(operation, &event)?;
    }

    debug!("{operation} finished in state {}", panel.state());
    Ok(panel.completion().is_some_and(|completion| completion.is_success()))
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
