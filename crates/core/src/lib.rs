//! Encryd Core Library
//!
//! This crate provides the process supervision behind encryd, a front end for two
//! external programs, `encryptor` and `decryptor`, and the build that produces
//! them. It never touches cryptography itself: it launches the binaries, feeds them
//! the password on standard input and relays their output line by line.
//!
//! # Key Features
//!
//! - **Worker**: runs one invocation on a background thread, merging stdout and
//!   stderr and streaming each line as it arrives, then reports a completion code
//! - **State Machine**: `Idle → Launching → Streaming → Completed | LaunchFailed`
//! - **Panels**: an output buffer with at most one run in flight
//! - **Operations**: request validation and argument templates for the binaries
//! - **Settings**: optional YAML settings with sensible defaults
//!
//! # Examples
//!
//! Running a command and printing its output as it streams in:
//!
//! ```no_run
//! use encryd_core::invocation::Invocation;
//! use encryd_core::worker::{spawn, Event};
//!
//! let run = spawn(Invocation::new("make").current_dir("/opt/encryd"));
//! for event in run {
//!     match event {
//!         Event::Line(line) | Event::Diagnostic(line) => print!("{line}"),
//!         Event::Finished(completion) => println!("code {}", completion.code()),
//!         Event::Started { .. } => {}
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod file_handling;
pub mod interpolation;
pub mod invocation;
pub mod operations;
pub mod panel;
pub mod settings;
pub mod state;
pub mod worker;
