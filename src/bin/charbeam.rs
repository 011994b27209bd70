//! charbeam - character record store and concurrent reader
//!
//! # Usage
//!
//! ```bash
//! # Load a CSV table into the store folder
//! charbeam load characters.csv
//! cat characters.csv | charbeam load
//!
//! # Look up one record
//! charbeam get 42 --format csv
//!
//! # Filter a file through the worker pool
//! charbeam read characters.csv --type even --items 10 --workers 3
//!
//! # Store an API page document as character_002.csv, then read it back
//! curl -s 'https://rickandmortyapi.com/api/character?page=2' | charbeam page store 2 --format csv
//! charbeam page read 2 --format csv
//! ```

use anyhow::{Context, Result, bail};
use charbeam::{Config, DocumentPage, Format, RunParams, Service, encode, encode_one};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// charbeam - character record store and concurrent reader
#[derive(Parser, Debug)]
#[command(name = "charbeam")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Folder holding the character table and stored pages [env: CHARBEAM_STORE_FOLDER]
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// File name of the character table inside the store folder [env: CHARBEAM_DB_FILE]
    #[arg(long, global = true)]
    db_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a CSV table and persist it as the character table
    Load {
        /// CSV file to load; stdin when absent
        file: Option<PathBuf>,
    },

    /// Print one character by id
    Get {
        #[arg(allow_negative_numbers = true)]
        id: i64,

        #[arg(short, long, default_value = "json")]
        format: Format,
    },

    /// Filter a CSV file through the worker pool
    Read(ReadArgs),

    /// Store or read numbered pages of characters
    #[command(subcommand)]
    Page(PageCommand),
}

#[derive(Subcommand, Debug)]
enum PageCommand {
    /// Store a page document as character_NNN.<format>
    Store {
        #[arg(allow_negative_numbers = true)]
        page: i64,

        /// Page document (`{"info": .., "results": [..]}`); stdin when absent
        file: Option<PathBuf>,

        #[arg(short, long, default_value = "json")]
        format: Format,
    },

    /// Print a stored page
    Read {
        #[arg(allow_negative_numbers = true)]
        page: i64,

        #[arg(short, long, default_value = "json")]
        format: Format,
    },
}

#[derive(Args, Debug)]
struct ReadArgs {
    /// CSV file with one character per line
    file: PathBuf,

    /// Id filter: even or odd
    #[arg(short = 't', long = "type")]
    kind: String,

    /// Total records to collect, 0 for all
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    items: i64,

    /// Records a single worker may forward, 0 for no cap
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    items_per_worker: i64,

    /// Worker count, 1 to 3 (others fall back to 2)
    #[arg(short, long, default_value_t = 2, allow_negative_numbers = true)]
    workers: i64,

    #[arg(short, long, default_value = "json")]
    format: Format,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let mut config = Config::from_env();
    if let Some(folder) = cli.store {
        config = config.with_store_folder(folder);
    }
    if let Some(db_file) = cli.db_file {
        config = config.with_db_file(db_file);
    }

    match cli.command {
        Command::Load { file } => load(Service::empty(config), file),
        Command::Get { id, format } => {
            let service = Service::new(config);
            let character = service.get_by_id(id)?;
            encode_one(format, io::stdout().lock(), &character)?;
            Ok(())
        }
        Command::Read(args) => read(&Service::empty(config), args),
        Command::Page(cmd) => page(&Service::empty(config), cmd),
    }
}

fn load(service: Service, file: Option<PathBuf>) -> Result<()> {
    let count = match file {
        Some(path) => {
            let f = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            service.load_and_store(BufReader::new(f))?
        }
        None => {
            let mut input = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut input)
                .context("read stdin")?;
            if input.iter().all(u8::is_ascii_whitespace) {
                bail!("no input on stdin");
            }
            service.load_and_store(input.as_slice())?
        }
    };
    println!("{count}");
    Ok(())
}

fn read(service: &Service, args: ReadArgs) -> Result<()> {
    let params = RunParams::new(args.kind)
        .items(args.items)
        .items_per_worker(args.items_per_worker)
        .workers(args.workers);
    let path = &args.file;
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;

    let report = service.read_concurrent_report(BufReader::new(f), &params)?;
    info!(
        records = report.records.len(),
        lines_read = report.lines_read,
        workers = report.workers,
        quota_reached = report.quota_reached,
        "read complete"
    );
    encode(args.format, io::stdout().lock(), &report.records)?;
    Ok(())
}

fn page(service: &Service, cmd: PageCommand) -> Result<()> {
    let (list, format) = match cmd {
        PageCommand::Store { page, file, format } => {
            let list = match file {
                Some(path) => {
                    let f =
                        File::open(&path).with_context(|| format!("open {}", path.display()))?;
                    service.store_page_from(&mut DocumentPage::new(BufReader::new(f)), page, format)?
                }
                None => {
                    let stdin = io::stdin().lock();
                    service.store_page_from(&mut DocumentPage::new(stdin), page, format)?
                }
            };
            (list, format)
        }
        PageCommand::Read { page, format } => (service.read_page(page, format)?, format),
    };
    encode(format, io::stdout().lock(), &list)?;
    Ok(())
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .with(filter)
        .init();

    Ok(())
}
