use anyhow::{anyhow, Context};
use clap::Parser;
use lesson_contents::{build::ContentsBuilder, error::Result};
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_subscriber::{fmt, EnvFilter};

/// Regenerate the Contents section of a README from its lesson folders.
#[derive(Debug, Parser)]
#[command(name = "lcontents", version, about, long_about = None)]
struct Cli {
    /// Project root holding the lessons folder and the README.
    /// Defaults to two levels above the directory of this executable.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = match cli.root {
        Some(root) => root,
        None => install_root()?,
    };

    let report = ContentsBuilder::new(root).build()?;

    println!("{} updated successfully!", report.readme.display());
    if !report.added.is_empty() || !report.removed.is_empty() {
        println!(
            "{} lesson(s) added, {} removed",
            report.added.len(),
            report.removed.len()
        );
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "lesson_contents=warn",
        1 => "lesson_contents=info",
        2 => "lesson_contents=debug",
        _ => "lesson_contents=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// The project root relative to where the executable is installed (`target/<profile>/lcontents`
/// resolves to the project root).
fn install_root() -> Result<PathBuf> {
    let executable = env::current_exe().context("Failed to locate the running executable")?;

    executable
        .parent()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("{} has no grandparent directory", executable.display()))
}
