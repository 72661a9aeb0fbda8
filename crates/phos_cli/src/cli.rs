use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a scene file to an image.
#[derive(Debug, Parser)]
#[command(name = "phos", version)]
#[command(about = "Recursive ray tracer with soft shadows, reflection and transparency")]
pub struct Args {
    /// Scene description file
    pub scene_file: PathBuf,

    /// Output image; the format follows the extension
    pub output_image: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Seed for soft-shadow sampling
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Edge length of the square buckets rendered in parallel
    #[arg(long, default_value_t = phos_renderer::DEFAULT_BUCKET_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub bucket_size: u32,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Logging level; RUST_LOG takes precedence when set
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["phos", "scene.txt", "out.png"]).expect("valid args");

        assert_eq!(args.scene_file, PathBuf::from("scene.txt"));
        assert_eq!(args.output_image, PathBuf::from("out.png"));
        assert_eq!((args.width, args.height), (500, 500));
        assert_eq!(args.seed, 0);
        assert_eq!(args.bucket_size, 64);
        assert_eq!(args.threads, None);
        assert_eq!(args.log_level, LogLevel::Info);
        assert!(!args.no_progress);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "phos",
            "scene.txt",
            "out.png",
            "--width",
            "320",
            "--height",
            "200",
            "--seed",
            "42",
            "--bucket-size",
            "16",
            "--threads",
            "2",
            "--log-level",
            "debug",
            "--no-progress",
        ])
        .expect("valid args");

        assert_eq!((args.width, args.height), (320, 200));
        assert_eq!(args.seed, 42);
        assert_eq!(args.bucket_size, 16);
        assert_eq!(args.threads, Some(2));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
        assert!(args.no_progress);
    }

    #[test]
    fn test_rejects_missing_output_and_zero_width() {
        assert!(Args::try_parse_from(["phos", "scene.txt"]).is_err());
        assert!(Args::try_parse_from(["phos", "a", "b", "--width", "0"]).is_err());
    }
}
