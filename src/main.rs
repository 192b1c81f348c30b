//! Binary entry point for stockroom.
//!
//! A thin command-line front end over the product collection file.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use stockroom::io::codec::delimited;
use stockroom::io::{DumpManager, StdConsole};
use stockroom::observability::{self, LoggingConfig};
use stockroom::{
    Color, Coordinates, Country, Location, NamedEnum, Person, Product, ProductCollection,
    ProductId, StockroomConfig, UnitOfMeasure,
};

/// Stockroom - a product collection kept in a CSV file.
#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Collection file, overriding config and environment.
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List products sorted by price, then name.
    List {
        /// Print JSON instead of brace form.
        #[arg(long)]
        json: bool,
    },

    /// Load the file and report rejected rows.
    Check,

    /// Add a product with the next free id.
    Add(AddArgs),

    /// Remove a product by id.
    Remove {
        /// Product id.
        #[arg(long)]
        id: i64,
    },
}

/// Fields of a new product.
#[derive(Args)]
struct AddArgs {
    /// Product name.
    #[arg(long)]
    name: String,

    /// Coordinates as `x ; y`.
    #[arg(long)]
    coordinates: String,

    /// Price.
    #[arg(long)]
    price: Option<i32>,

    /// Unit of measure.
    #[arg(long)]
    unit: Option<String>,

    /// Owner name. Requires `--nationality`.
    #[arg(long, requires = "nationality")]
    owner_name: Option<String>,

    /// Owner passport id.
    #[arg(long, requires = "owner_name")]
    passport: Option<String>,

    /// Owner hair color.
    #[arg(long, requires = "owner_name")]
    hair: Option<String>,

    /// Owner nationality.
    #[arg(long, requires = "owner_name")]
    nationality: Option<String>,

    /// Owner location as `x ; y ; name`.
    #[arg(long, requires = "owner_name")]
    location: Option<String>,
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let config = match load_config(cli.config.as_deref(), cli.file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    let logging = LoggingConfig::from_settings(config.logging.as_ref(), cli.verbose);
    if let Err(e) = observability::init(&logging) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Loads configuration: file, then environment, then `--file`.
fn load_config(path: Option<&Path>, data_file: Option<&Path>) -> anyhow::Result<StockroomConfig> {
    let config = match path {
        Some(path) => StockroomConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => StockroomConfig::load_default(),
    };

    let config = config.with_env_overrides();
    Ok(match data_file {
        Some(file) => config.with_data_file(file),
        None => config,
    })
}

/// Runs the selected command.
fn run_command(command: Commands, config: &StockroomConfig) -> anyhow::Result<ExitCode> {
    let dump = DumpManager::new(&config.data_file, StdConsole)?.with_options(config.dump);

    match command {
        Commands::List { json } => cmd_list(&dump, json),
        Commands::Check => Ok(cmd_check(&dump)),
        Commands::Add(args) => cmd_add(&dump, args),
        Commands::Remove { id } => cmd_remove(&dump, ProductId::new(id)),
    }
}

fn load(dump: &DumpManager<StdConsole>) -> ProductCollection {
    ProductCollection::from_loaded(dump.read_collection().products)
}

fn cmd_list(dump: &DumpManager<StdConsole>, json: bool) -> anyhow::Result<ExitCode> {
    let collection = load(dump);
    let sorted = collection.sorted();

    if json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
    } else {
        for product in sorted {
            println!("{product}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(dump: &DumpManager<StdConsole>) -> ExitCode {
    let report = dump.read_collection();
    println!(
        "{} products loaded, {} rows rejected",
        report.products.len(),
        report.rejected.len()
    );
    for row in &report.rejected {
        println!("  line {}: {}", row.line, row.reason);
    }

    if report.has_rejections() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn cmd_add(dump: &DumpManager<StdConsole>, args: AddArgs) -> anyhow::Result<ExitCode> {
    let mut collection = dump.load_for_rewrite()?;

    let coordinates: Coordinates =
        delimited::decode(&args.coordinates).context("parsing --coordinates")?;
    let unit = args
        .unit
        .as_deref()
        .map(UnitOfMeasure::from_name)
        .transpose()
        .with_context(|| format!("expected one of {}", UnitOfMeasure::names()))?;
    let owner = build_owner(&args)?;

    let product = Product::new(
        collection.ids(),
        args.name,
        coordinates,
        args.price,
        unit,
        owner,
    )?;
    product.check()?;

    let id = product.id;
    collection.insert(product)?;
    dump.write_collection(&collection)?;
    println!("added product {id}");
    Ok(ExitCode::SUCCESS)
}

fn build_owner(args: &AddArgs) -> anyhow::Result<Option<Person>> {
    let Some(name) = &args.owner_name else {
        return Ok(None);
    };
    let Some(nationality) = &args.nationality else {
        bail!("--owner-name requires --nationality");
    };

    let nationality = Country::from_name(nationality)
        .with_context(|| format!("expected one of {}", Country::names()))?;
    let hair_color = args
        .hair
        .as_deref()
        .map(Color::from_name)
        .transpose()
        .with_context(|| format!("expected one of {}", Color::names()))?;
    let location = args
        .location
        .as_deref()
        .map(delimited::decode::<Location>)
        .transpose()
        .context("parsing --location")?;

    Ok(Some(Person::new(
        name.clone(),
        args.passport.clone(),
        hair_color,
        nationality,
        location,
    )))
}

fn cmd_remove(dump: &DumpManager<StdConsole>, id: ProductId) -> anyhow::Result<ExitCode> {
    let mut collection = dump.load_for_rewrite()?;
    if collection.remove(id).is_none() {
        bail!(stockroom::Error::NotFound(id));
    }
    dump.write_collection(&collection)?;
    println!("removed product {id}");
    Ok(ExitCode::SUCCESS)
}
