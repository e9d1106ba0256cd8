use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, info};

use course_extract::{ExtractOptions, discover, pipeline};

#[derive(Parser)]
#[command(
    name = "course-extract",
    about = "Extract captured course bundles from WARC crawl archives",
    version,
    long_about = "Reads the response records of a .warc.gz capture (with its .warc.os.cdx.gz \
                  companion index), splits each captured course payload into its four ASH0 \
                  sub-files, decompresses them, and writes one <course-id>.tar.zst archive \
                  per course."
)]
struct Cli {
    /// A .warc.gz or .warc.os.cdx.gz capture, or a directory of capture pairs
    input: PathBuf,

    /// Directory to write per-course archives into
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Continue with the next record when writing an archive fails
    #[arg(long)]
    keep_going: bool,

    /// Set the logging level
    #[arg(short, long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .init();

    let pairs = discover(&cli.input)?;

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating output directory {}", cli.output.display()))?;

    let options = ExtractOptions {
        output_dir: cli.output,
        keep_going: cli.keep_going,
    };
    let stats = pipeline::run(&pairs, &options)?;

    info!(
        "Done: {} converted, {} skipped, {} failed of {} attempted",
        stats.converted, stats.skipped, stats.failed, stats.attempted
    );
    Ok(())
}
