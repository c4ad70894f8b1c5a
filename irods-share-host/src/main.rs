// irods-share-host/src/main.rs
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use irods_share_common::MicroserviceRegistry;
use irods_share_host::{
    call_operation, load_config, CallOutcome, HostContext, PluginLibrary, TableSummary,
    DEFAULT_CONFIG_PATH,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file; defaults apply when it does not exist
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Plugin library to load, overriding the config
    #[arg(short, long)]
    plugin: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the plugin's registration table
    List,
    /// Invoke an operation with an empty output parameter
    Call { operation: Option<String> },
}

type BoxedError = Box<dyn Error + Send + Sync>;

fn main() -> Result<(), BoxedError> {
    let cli = Cli::parse();
    let (config, source) = load_config(&cli.config)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    // stdout carries only command output, so `--json` stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    info!("Host config: {}", source);

    let plugin_path = cli.plugin.unwrap_or(config.plugin_path);
    let plugin = PluginLibrary::open(&plugin_path)?;

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => print_table(&plugin.summary(), cli.json)?,
        Commands::Call { operation } => {
            let operation = operation.unwrap_or(config.default_operation);
            // Declared after `plugin` so resolved pointers are dropped first.
            let mut registry = MicroserviceRegistry::new();
            registry.register_table(plugin.table(), &plugin)?;

            let mut context = HostContext::default();
            let outcome = call_operation(&registry, &operation, &mut context)?;
            print_outcome(&outcome, cli.json)?;
        }
    }

    info!("Done with {}", plugin.path().display());
    Ok(())
}

fn print_table(summary: &TableSummary, json: bool) -> Result<(), BoxedError> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }
    println!("Plugin: {}", summary.library);
    println!("Parameters per operation: {}", summary.table.num_args());
    println!("Operations:");
    for (name, function) in summary.table.operations() {
        println!("  - {} -> {}", name, function);
    }
    Ok(())
}

fn print_outcome(outcome: &CallOutcome, json: bool) -> Result<(), BoxedError> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    match &outcome.value {
        Some(value) => println!("{}", value),
        None => println!(
            "{} wrote a {} value",
            outcome.operation,
            outcome.type_name.as_deref().unwrap_or("empty")
        ),
    }
    Ok(())
}
