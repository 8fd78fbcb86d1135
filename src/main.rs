use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context};
use fixturekit::{init_logging, Config, ConsoleSession, BUILD_DATE, VERSION};

const USAGE: &str = "\
usage: fixturekit [--config <path>] [--write-default-config <path>]

Reads placement commands from stdin; type 'help' for the list.";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    write_default_config: Option<PathBuf>,
    help: bool,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    parsed.config = Some(args.next().context("--config needs a path")?.into());
                }
                "--write-default-config" => {
                    parsed.write_default_config = Some(
                        args.next()
                            .context("--write-default-config needs a path")?
                            .into(),
                    );
                }
                "-h" | "--help" => parsed.help = true,
                other => bail!("unknown argument '{}'\n\n{}", other, USAGE),
            }
        }
        Ok(parsed)
    }
}

fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load_from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }
    match Config::default_path() {
        Ok(path) if path.exists() => Config::load_from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        _ => Ok(Config::default()),
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        println!("fixturekit {} ({})\n\n{}", VERSION, BUILD_DATE, USAGE);
        return Ok(());
    }

    if let Some(path) = args.write_default_config {
        Config::default()
            .save_to_file(&path)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = load_config(args.config)?;
    let mut session = ConsoleSession::from_config(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), stdout.lock())
}
