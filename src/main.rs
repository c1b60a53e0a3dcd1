mod archive;
mod commands;
mod core;
mod patch;
mod release;
mod ui;
mod utils;

use clap::Parser;
use clap::error::ErrorKind;
use crate::core::error::{ReleaseError, print_error};
use std::path::PathBuf;

/// Bump a plugin's version, zip it, and point the repository index at it
#[derive(Parser)]
#[command(name = "plugin-release")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Version to release as <major>.<minor>.<patch>, or `test` for a local build
  #[arg(value_name = "VERSION", allow_hyphen_values = true)]
  release_version: String,

  /// Config file (default: release.toml, .release.toml or .config/release.toml)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Print a JSON summary on stdout (progress moves to stderr)
  #[arg(long)]
  json: bool,

  /// Enable debug diagnostics on stderr
  #[arg(short, long)]
  verbose: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
    Err(_) => {
      let argv0 = std::env::args().next();
      handle_error(ReleaseError::Usage {
        program: utils::program_name(argv0.as_deref()),
      });
    }
  };

  crate::core::logging::init(cli.verbose);

  if let Err(err) = commands::run_release(cli.release_version, cli.config, cli.json) {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  tracing::debug!(error = ?err, "release failed");
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
