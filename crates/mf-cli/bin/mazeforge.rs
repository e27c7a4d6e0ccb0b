//! mazeforge: print a generated dungeon
//!
//! Renders ASCII by default or the plain JSON projection with `--json`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use mf_cli::{load_options, render_ascii, render_json, CliError, Overrides};
use mf_core::{build, BuildOptions, Seed};

/// Seeded rooms-and-mazes dungeon generator
#[derive(Parser, Debug)]
#[command(name = "mazeforge")]
#[command(author, version, about = "Generate a dungeon of rooms and mazes", long_about = None)]
struct Args {
    /// Level number; the stage grows with depth
    #[arg(short = 'l', long = "level")]
    level: Option<u32>,

    /// Stage width in tiles (rounded up to odd)
    #[arg(short = 'W', long = "width")]
    width: Option<usize>,

    /// Stage height in tiles (rounded up to odd)
    #[arg(short = 'H', long = "height")]
    height: Option<usize>,

    /// Seed; all digits is a numeric seed, anything else is text
    #[arg(short = 's', long = "seed")]
    seed: Option<Seed>,

    /// JSON options file; flags override its fields
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the plain JSON projection instead of ASCII
    #[arg(long = "json")]
    json: bool,

    /// More logging on stderr (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("mazeforge: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String, CliError> {
    let base = match &args.config {
        Some(path) => load_options(path)?,
        None => BuildOptions::default(),
    };
    let options = Overrides {
        level: args.level,
        width: args.width,
        height: args.height,
        seed: args.seed,
    }
    .apply(base);

    let dungeon = build(&options)?;
    if args.json {
        let mut json = render_json(&dungeon)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render_ascii(&dungeon))
    }
}
