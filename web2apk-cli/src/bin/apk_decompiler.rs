//! APK decompiler CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::Parser;
use web2apk::{Logging, Settings};
use web2apk_cli_lib::DecompilerCli;

fn main() -> Result<()> {
    let cli = DecompilerCli::parse();
    let settings = Settings::load().context("Failed to load web2apk settings")?;
    let logging = Logging::new(cli.verbose, settings.log_format);

    logging.in_scope(|| cli.command.execute(&settings))
}
