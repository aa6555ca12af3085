//! lzmin CLI - minimal LZ77 compressor
//!
//! Reads a whole file into memory, compresses or decompresses it, and writes
//! the result. Failures map to distinct exit codes.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use lzmin::config::{DEFAULT_MAX_INPUT_SIZE, MAX_WINDOW_SIZE, MIN_MATCH_LEN};
use lzmin::container::encoded_len;
use lzmin::{Codec, Config, Container, Error, Resource};

/// Compress or decompress a file with a minimal LZ77 coder.
#[derive(Parser, Debug)]
#[command(name = "lzmin")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Match window in bytes (must match between compress and decompress)
    #[arg(
        short,
        long,
        global = true,
        default_value_t = MAX_WINDOW_SIZE as u16,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    window: u16,

    /// Largest uncompressed size accepted or produced, in bytes
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_INPUT_SIZE)]
    max_input: usize,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress INPUT into a container at OUTPUT
    Compress {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Restore the original bytes of the container INPUT to OUTPUT
    Decompress {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Codec(#[from] Error),
}

impl CliError {
    const fn exit_code(&self) -> u8 {
        match self {
            Self::Io { .. } => 3,
            Self::Codec(Error::CapacityExceeded { .. }) => 4,
            Self::Codec(Error::MalformedContainer(_)) => 5,
            Self::Codec(Error::CorruptBackreference { .. }) => 6,
            Self::Codec(Error::InvalidConfig(_) | Error::Stage(_)) => 7,
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CliError + '_ {
    move |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads at most `limit` bytes, failing if the file holds more.
fn read_bounded(path: &Path, limit: usize) -> Result<Vec<u8>, CliError> {
    let file = File::open(path).map_err(io_error(path))?;
    let mut data = Vec::new();
    file.take(limit as u64 + 1)
        .read_to_end(&mut data)
        .map_err(io_error(path))?;

    if data.len() > limit {
        return Err(Error::CapacityExceeded {
            resource: Resource::InputSize,
            limit,
        }
        .into());
    }
    Ok(data)
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = Config::new()
        .with_window_size(args.window as usize)
        .with_max_input_size(args.max_input);
    config.validate()?;

    let mut codec = Codec::new(config);
    let start = Instant::now();

    match &args.command {
        Command::Compress { input, output } => {
            let data = read_bounded(input, config.max_input_size)?;
            let mut compressed = Vec::new();
            codec.compress(&data, &mut compressed)?;
            fs::write(output, &compressed).map_err(io_error(output))?;

            if args.verbose {
                let backrefs = Container::parse(&compressed, &config)?.offsets.len();
                eprintln!(
                    "Compressed {} -> {} bytes ({:.1}%), {} backreferences in {:.2?}",
                    data.len(),
                    compressed.len(),
                    ratio(compressed.len(), data.len()),
                    backrefs,
                    start.elapsed()
                );
            }
        }
        Command::Decompress { input, output } => {
            // Largest container a valid encode of `max_input_size` bytes can produce.
            let limit = encoded_len(config.max_input_size / MIN_MATCH_LEN, config.max_input_size);
            let data = read_bounded(input, limit)?;
            let mut restored = Vec::new();
            codec.decompress(&data, &[], &mut restored)?;
            fs::write(output, &restored).map_err(io_error(output))?;

            if args.verbose {
                eprintln!(
                    "Decompressed {} -> {} bytes in {:.2?}",
                    data.len(),
                    restored.len(),
                    start.elapsed()
                );
            }
        }
    }

    Ok(())
}

fn ratio(compressed: usize, original: usize) -> f64 {
    if original == 0 {
        return 100.0;
    }
    compressed as f64 / original as f64 * 100.0
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lzmin: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
