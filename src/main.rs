mod config;
mod run;

use std::path::{Path, PathBuf};

use canvas::collection::Collections;
use canvas::config::CanvasConfig;
use canvas::error::CanvasError;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::RunConfig;
use crate::run::{Layout, Runner};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid engine config in {}: {source}", path.display())]
    Config { path: PathBuf, source: serde_json::Error },
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("unknown card `{0}`")]
    UnknownCard(String),
}

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Run the portfolio card canvas headlessly and print the settled scene")]
struct Cli {
    /// Stage width in CSS pixels [env: FOLIO_WIDTH]
    #[arg(long)]
    width: Option<f64>,

    /// Stage height in CSS pixels [env: FOLIO_HEIGHT]
    #[arg(long)]
    height: Option<f64>,

    /// Placement seed [env: FOLIO_SEED]
    #[arg(long)]
    seed: Option<u64>,

    /// Collection to load [env: FOLIO_COLLECTION]
    #[arg(long)]
    collection: Option<String>,

    /// JSON file of collections to use instead of the built-in ones.
    #[arg(long, env = "FOLIO_COLLECTIONS_FILE")]
    collections: Option<PathBuf>,

    /// JSON file of engine settings.
    #[arg(long, env = "FOLIO_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Pace scheduled tasks on the wall clock instead of virtual time.
    #[arg(long)]
    realtime: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List collections and their card ids.
    List,
    /// Print the scene once the opening spread-out settles.
    Show,
    /// Scatter the cards again.
    Spread {
        /// Delay between cards in milliseconds.
        #[arg(long)]
        stagger: Option<u64>,
    },
    /// Pack the cards into a grid.
    Organize,
    /// Select one card by id.
    Select { id: String },
}

#[derive(Serialize)]
struct Listing<'a> {
    key: &'a str,
    cards: Vec<&'a str>,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        let mut run = RunConfig::from_env();
        if let Some(width) = self.width {
            run.width = width;
        }
        if let Some(height) = self.height {
            run.height = height;
        }
        if self.seed.is_some() {
            run.seed = self.seed;
        }
        if let Some(collection) = &self.collection {
            run.collection.clone_from(collection);
        }
        run
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let run = cli.run_config();
    let collections = load_collections(cli.collections.as_deref())?;

    let config = load_engine_config(cli.config.as_deref())?;

    let layout = match cli.command {
        Command::List => return print_listing(&collections),
        Command::Show => Layout::Settle,
        Command::Spread { stagger } => {
            Layout::Spread { stagger_ms: stagger.or(run.stagger_ms).unwrap_or(config.stagger_ms) }
        }
        Command::Organize => Layout::Organize,
        Command::Select { id } => Layout::Select(id),
    };
    let collection = collections.get(&run.collection)?.clone();

    let scene = Runner::new(config, &run, cli.realtime).execute(collection, layout).await?;
    print_json(&scene)
}

fn load_collections(path: Option<&Path>) -> Result<Collections, CliError> {
    let Some(path) = path else {
        return Ok(Collections::builtin());
    };
    let json = read_file(path)?;
    Ok(Collections::from_json(&json)?)
}

fn load_engine_config(path: Option<&Path>) -> Result<CanvasConfig, CliError> {
    let Some(path) = path else {
        return Ok(CanvasConfig::default());
    };
    let json = read_file(path)?;
    CanvasConfig::from_json(&json).map_err(|source| CliError::Config { path: path.to_owned(), source })
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })
}

fn print_listing(collections: &Collections) -> Result<(), CliError> {
    let listing: Vec<Listing<'_>> = collections
        .iter()
        .map(|c| Listing { key: &c.key, cards: c.cards.iter().map(|card| card.id.as_str()).collect() })
        .collect();
    print_json(&listing)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
