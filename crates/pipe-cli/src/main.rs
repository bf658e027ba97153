/// Pipe command-line tool: run read scripts over binary files, encode
/// packed integers, and hex-dump byte ranges.
///
/// # Command overview
///
/// ```text
/// pipe <COMMAND> [OPTIONS]
///
/// Commands:
///   read      Run a sequence of reads over a file and print each value
///   encode    Print (or write) the packed encoding of integers
///   dump      Hex-dump a file or a byte range of it
///   help      Print help information
///
/// Global options:
///   --log-level <LEVEL>    error | warn | info | debug | trace  [env: PIPE_LOG_LEVEL]
///   --log-format <FORMAT>  text | json                          [env: PIPE_LOG_FORMAT]
///   -h, --help             Print help
///   -V, --version          Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                          |
/// |------|--------------------------------------------------|
/// | 0    | Success                                          |
/// | 1    | Error (I/O failure, bad script, out-of-bounds)   |
/// | 2    | Usage error (bad arguments, reported by clap)    |
///
/// Logs and error details go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser, Subcommand};

mod cmd_dump;
mod cmd_encode;
mod cmd_read;
mod logging;
mod output;
mod script;

use cmd_encode::Scheme;
use logging::{LogFormat, LogLevel};
use output::OutputFormat;

// ── CLI root ──────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "pipe", version, about = "Sequential binary buffer reader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log verbosity (logs go to stderr).
    #[arg(long, global = true, value_enum, env = "PIPE_LOG_LEVEL", default_value = "warn")]
    log_level: LogLevel,

    /// Log line format.
    #[arg(long, global = true, value_enum, env = "PIPE_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Run a sequence of reads over a file and print each decoded value.
    Read(ReadArgs),
    /// Print (or write) the packed encoding of integers.
    Encode(EncodeArgs),
    /// Hex-dump a file or a byte range of it.
    Dump(DumpArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `pipe read`.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────────┐
/// │ Op           │ Reads                                                │
/// ├──────────────┼──────────────────────────────────────────────────────┤
/// │ byte         │ 1 byte                                               │
/// │ word         │ 2 bytes, little-endian                               │
/// │ be-word      │ 2 bytes, big-endian                                  │
/// │ dword        │ 4 bytes, little-endian                               │
/// │ be-dword     │ 4 bytes, big-endian                                  │
/// │ packed-word  │ 1–2 bytes, packed big-endian                         │
/// │ packed-dword │ 1–5 bytes, packed big-endian                         │
/// │ block:N      │ N raw bytes                                          │
/// │ skip:N       │ advance N bytes                                      │
/// │ rest         │ everything up to the end of the file                 │
/// └──────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
#[command(group(ArgGroup::new("source").required(true).args(["ops", "script"])))]
pub struct ReadArgs {
    /// Path to the binary file to read.
    pub file: PathBuf,

    /// Comma-separated operations, e.g. `dword,packed-word,block:4,rest`.
    #[arg(long)]
    pub ops: Option<String>,

    /// Script file with one operation per line (`#` comments allowed).
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for `pipe encode`.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Packed scheme to encode with.
    #[arg(long, value_enum, default_value = "dword")]
    pub scheme: Scheme,

    /// Values to encode (decimal or `0x` hex).
    #[arg(required = true, value_parser = cmd_encode::parse_u32)]
    pub values: Vec<u32>,

    /// Write the concatenated encodings to this file instead of printing hex.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `pipe dump`.
#[derive(clap::Args)]
pub struct DumpArgs {
    /// Path to the file to dump.
    pub file: PathBuf,

    /// First byte to dump.
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Number of bytes to dump (default: through the end of the file).
    #[arg(long)]
    pub len: Option<usize>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.log_format, cli.log_level);

    let result = match cli.command {
        Commands::Read(args) => cmd_read::run(&args),
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Dump(args) => cmd_dump::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
