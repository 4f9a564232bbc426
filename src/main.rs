use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spa_catalog::config::{Config, load_config};
use spa_catalog::services::service_records;
use spa_catalog::sources::{BundledSource, CatalogSource, FileSource};
use spa_catalog::suggest::Suggester;
use spa_catalog::{Catalog, CatalogIndex};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Catalog file (TOML or JSON); defaults to the bundled catalog
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a service request to one catalog entry
    Match {
        query: String,
    },
    /// Print the flattened catalog in display order
    List,
    /// Print bookable service records derived from the catalog
    Services {
        #[arg(long)]
        json: bool,
    },
    /// Rank catalog names that fuzzily resemble the query
    Suggest {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_catalog(args: &Args, config: &Config) -> Result<Catalog> {
    let path = args.catalog.clone().or_else(|| config.general.catalog.clone());
    match path {
        Some(path) => FileSource::new(&path)
            .load()
            .with_context(|| format!("loading catalog {}", path.display())),
        None => BundledSource.load().context("loading bundled catalog"),
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    // 1. Load Config
    let config = load_config().context("loading config")?;

    // 2. Load Catalog & build index
    let catalog = load_catalog(&args, &config)?;
    let index = CatalogIndex::build(&catalog);

    // 3. Run command
    match &args.command {
        Command::Match { query } => {
            let matcher = config.matching.matcher();
            match matcher.find(query, index.entries()) {
                Some(hit) => {
                    println!("{}", hit.candidate.name);
                    println!(
                        "  {} / {} (#{}, {})",
                        hit.candidate.section, hit.candidate.group, hit.candidate.group_order, hit.tier
                    );
                }
                None => {
                    println!("Service not found: {}", query);
                    let suggestions = Suggester::new().suggest(query, index.entries(), config.suggest.limit);
                    if !suggestions.is_empty() {
                        println!("Did you mean:");
                        for (entry, _) in suggestions {
                            println!("  {}", entry.name);
                        }
                    }
                    return Ok(ExitCode::from(1));
                }
            }
        }
        Command::List => {
            for entry in index.entries() {
                println!("{:>4}  {} / {}  {}", entry.group_order, entry.section, entry.group, entry.name);
            }
        }
        Command::Services { json } => {
            let sync = service_records(&catalog);
            if *json {
                println!("{}", serde_json::to_string_pretty(&sync)?);
            } else {
                for record in &sync.records {
                    println!(
                        "{:<45} {:>4} min  PHP {:>9}  {}",
                        record.name,
                        record.duration_minutes,
                        record.price,
                        record.description()
                    );
                }
                println!("Parsed rows: {}", sync.parsed_rows);
                println!("Services: {}", sync.records.len());
                println!("Duplicate catalog names skipped: {}", sync.duplicates_skipped);
            }
        }
        Command::Suggest { query, limit } => {
            let limit = limit.unwrap_or(config.suggest.limit);
            for (entry, score) in Suggester::new().suggest(query, index.entries(), limit) {
                println!("{:>5}  {}", score, entry.name);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
