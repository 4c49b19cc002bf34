use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use schemars::schema_for;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use xsdgen_core::{validate_model_set, Error as CoreError, ModelSet};
use xsdgen_generate::{GenerationError, Wsdl, XsdGenerator};

#[derive(Debug, Error)]
enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "xsdgen", version, about = "Generate XSDs from declarative data models")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the XSD (or WSDL envelope) for one entity.
    Generate(GenerateArgs),
    /// Validate a model-set manifest without generating anything.
    Check(CheckArgs),
    /// Print the JSON Schema of the manifest file format.
    Contract,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Path to the model-set manifest (JSON).
    #[arg(long, value_name = "FILE")]
    models: PathBuf,
    /// Entity to generate the schema for.
    #[arg(long, value_name = "NAME")]
    entity: String,
    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Wrap the schema in a WSDL envelope.
    #[arg(long, default_value_t = false)]
    wsdl: bool,
    /// Target namespace for the WSDL envelope.
    #[arg(long, value_name = "URL")]
    location: Option<String>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Path to the model-set manifest (JSON).
    #[arg(long, value_name = "FILE")]
    models: PathBuf,
}

fn main() -> Result<(), CliError> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Check(args) => run_check(args),
        Command::Contract => run_contract(),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let set = load_model_set(&args.models)?;
    validate_model_set(&set)?;
    let registry = set.into_registry()?;
    let generator = XsdGenerator::new(&registry);

    let output = if args.wsdl {
        let wsdl = match args.location {
            Some(location) => Wsdl::new(location),
            None => Wsdl::default(),
        };
        wsdl.wrap(&generator, &args.entity)?
    } else {
        generator.generate(&args.entity)?
    };

    match args.out {
        Some(path) => {
            fs::write(&path, output)?;
            tracing::info!(path = %path.display(), "schema written");
        }
        None => print!("{output}"),
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let set = load_model_set(&args.models)?;
    validate_model_set(&set)?;
    let registry = set.into_registry()?;
    tracing::info!(models = registry.len(), "model set is consistent");
    Ok(())
}

fn run_contract() -> Result<(), CliError> {
    let schema = schema_for!(ModelSet);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn load_model_set(path: &PathBuf) -> Result<ModelSet, CliError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
