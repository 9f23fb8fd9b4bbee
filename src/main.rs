use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use pexels::config::{Config, DEFAULT_CONFIG_PATH};
use pexels::download::download_photos;
use pexels::{Client, PexelsError, SourceSize};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// API key, overrides the one in the config file
    #[arg(long, env = "PEXELS_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[arg(long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search photos
    Search {
        query: String,
        #[arg(long, default_value_t = 15)]
        per_page: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List curated photos
    Curated {
        #[arg(long, default_value_t = 15)]
        per_page: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Look up one photo
    Photo { id: u64 },
    /// Pick a random curated photo
    Random,
    /// Search videos
    Videos {
        query: String,
        #[arg(long, default_value_t = 15)]
        per_page: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Look up one video
    Video { id: u64 },
    /// Search photos and save one size variant of each
    Download {
        query: String,
        #[arg(long, default_value_t = 15)]
        per_page: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = SourceSize::Original)]
        size: SourceSize,
        #[arg(long, default_value = "downloads")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "pexels=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), PexelsError> {
    let config = Config::load_or_default(&args.config)?;
    let token = args
        .token
        .or_else(|| config.token.clone())
        .ok_or_else(|| PexelsError::MissingToken {
            config: args.config.clone(),
        })?;
    let client = Client::with_config(token, config.client_config());

    match args.command {
        Command::Search { query, per_page, page } => {
            let result = fetching(|| client.search_photos(&query, per_page, page))?;
            print_json(&result)?;
        }
        Command::Curated { per_page, page } => {
            let result = fetching(|| client.curated_photos(per_page, page))?;
            print_json(&result)?;
        }
        Command::Photo { id } => {
            let photo = fetching(|| client.get_photo(id))?;
            print_json(&photo)?;
        }
        Command::Random => {
            let photo = fetching(|| client.random_photo())?;
            print_json(&photo)?;
        }
        Command::Videos { query, per_page, page } => {
            let result = fetching(|| client.search_videos(&query, per_page, page))?;
            print_json(&result)?;
        }
        Command::Video { id } => {
            let video = fetching(|| client.get_video(id))?;
            print_json(&video)?;
        }
        Command::Download { query, per_page, page, size, dir } => {
            let result = fetching(|| client.search_photos(&query, per_page, page))?;

            eprintln!("Downloading {} photos:", result.photos.len());
            let bar = ProgressBar::new(result.photos.len() as u64);
            bar.tick();
            let written = download_photos(&client, &result.photos, size, &dir, &bar)?;
            bar.finish();

            for path in written {
                println!("{}", path.display());
            }
        }
    }

    if let Some(remaining) = client.remaining_requests() {
        eprintln!("{remaining} requests remaining");
    }
    Ok(())
}

fn fetching<T>(call: impl FnOnce() -> Result<T, PexelsError>) -> Result<T, PexelsError> {
    let progress = ProgressBar::new_spinner();
    progress.set_message("Fetching from Pexels");
    progress.enable_steady_tick(Duration::from_millis(100));
    let result = call();
    progress.finish_and_clear();
    result
}

fn print_json<T: Serialize>(value: &T) -> Result<(), PexelsError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::from)?;
    writeln!(stdout)?;
    Ok(())
}
