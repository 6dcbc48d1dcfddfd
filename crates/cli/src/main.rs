use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use counter::Action;

use crate::render::Format;

mod build;
mod log;
mod manifest;
mod render;
mod report;
mod watch;

/// Build and exercise the counter web app
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print detailed progress
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Color status output
    #[arg(long, value_enum, default_value_t = When::Auto, global = true)]
    color: When,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum When {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a cdylib crate into a web bundle
    #[command(visible_alias = "b")]
    Build(Build),

    /// Replay actions against the counter and print what the view shows
    #[command(visible_alias = "r")]
    Render(Render),
}

#[derive(Debug, Args)]
struct Build {
    /// Build with the release profile and optimize the wasm
    #[arg(long)]
    release: bool,

    /// Output directory
    #[arg(long, default_value = "dist")]
    dist: PathBuf,

    /// Package to build [default: the crate in the current directory]
    #[arg(short, long)]
    package: Option<String>,

    /// Rebuild whenever `src/` or `index.html` changes
    #[arg(short, long)]
    watch: bool,
}

#[derive(Debug, Args)]
struct Render {
    /// Actions to replay: `increment` (`inc`, `+`) or `decrement` (`dec`, `-`)
    actions: Vec<Action>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        log::enable_verbose_output();
    }

    let color = match cli.color {
        When::Auto => io::stderr().is_terminal(),
        When::Always => true,
        When::Never => false,
    };

    if color {
        log::enable_color_output();
    }

    let res = match &cli.command {
        Command::Build(b) => build::run(b),
        Command::Render(r) => render::render(r),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
