//! Getting the password without it ever touching the command line.

use std::io::{self, BufRead};

use encryd_core::error::Result;
use encryd_core::invocation::Secret;

const PROMPT: &str = "Password: ";

/// Reads the password from our own standard input or prompts for it without echo.
pub fn read_password(from_stdin: bool) -> Result<Secret> {
    if from_stdin {
        read_password_line(io::stdin().lock())
    } else {
        Ok(Secret::new(rpassword::prompt_password(PROMPT)?))
    }
}

/// Takes the first line of `reader`, without its line terminator.
pub fn read_password_line<R: BufRead>(mut reader: R) -> Result<Secret> {
    let mut line = String::new();
    reader.read_line(&mut line)?;

    let length = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(length);
    Ok(Secret::new(line))
}
