//! web2apk CLI library
//!
//! Command definitions shared by the `web2apk` and `apk-decompiler`
//! binaries. Each command is a clap `Args` struct with an `execute` method
//! returning `anyhow::Result`, so any error ends the process with status 1.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod commands;

pub use cli::{DecompilerCli, DecompilerCommand, Web2ApkCli, Web2ApkCommand};
