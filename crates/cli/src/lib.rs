//! Encryd CLI Library
//!
//! Terminal front end for the encryd core: argument parsing, password entry and
//! live printing of a panel's output.

pub mod cli_args;
pub mod password;
pub mod terminal;
