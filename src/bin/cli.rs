use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser};
use ppm_filter::{decoder, encoder, Filter, FilterKind};
use std::{io::Write, path::PathBuf, process};

#[derive(Parser)]
#[command(name = "ppm-filter", version, about = "Apply a filter to a P3 (ASCII) PPM image")]
struct Cli {
    /// Input P3 image
    input: PathBuf,
    /// Output path, created or overwritten
    output: PathBuf,
    /// Filter to apply
    filter: FilterKind,
    /// Number of pixels averaged by motionblur
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    strength: Option<u32>,
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logger(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => log::LevelFilter::Error,
        (false, 0) => log::LevelFilter::Warn,
        (false, 1) => log::LevelFilter::Info,
        (false, 2) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{style}{}{style:#} {}:{}] {}",
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };
    init_logger(cli.verbose, cli.quiet);

    let filter = Filter::new(cli.filter, cli.strength)?;

    let mut image = decoder::read_file(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    log::info!("{}", image.describe());

    filter.apply(&mut image);

    encoder::write_file(&image, &cli.output)
        .with_context(|| format!("failed to save {}", cli.output.display()))?;
    log::info!("saved {}", cli.output.display());

    Ok(())
}
