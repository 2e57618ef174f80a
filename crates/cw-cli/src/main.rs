//! CLI frontend for the Cairnwright character generator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::Context;
use cw_generator::ModuleSettings;

#[derive(Parser)]
#[command(
    name = "cw",
    about = "Cairnwright: table-driven character generator for Cairn",
    version,
    propagate_version = true
)]
struct Cli {
    /// Compendium file with the roll tables and item packs
    #[arg(long, global = true, default_value = "compendium.json")]
    compendium: PathBuf,

    /// Settings file holding the chosen packs
    #[arg(long, global = true, default_value = "settings.json")]
    settings: PathBuf,

    /// Generator rules file (default: Cairn rules)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Actor store file
    #[arg(long, global = true, default_value = "actors.json")]
    store: PathBuf,

    /// RNG seed for reproducible characters
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log generation details to stderr
    #[arg(long, global = true)]
    dev: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new character and add it to the store
    Generate {
        /// Print the character without saving it
        #[arg(long)]
        dry_run: bool,

        /// Print JSON instead of a character sheet
        #[arg(long)]
        json: bool,
    },

    /// Reroll an existing character in place
    Regenerate {
        /// Actor name (case-insensitive)
        name: String,
    },

    /// Check that the configured packs hold every required table
    Validate,

    /// Choose the option and trait packs
    Configure {
        /// Pack with names and starting gear tables
        #[arg(long)]
        options: String,

        /// Pack with trait, background and surname tables
        #[arg(long)]
        traits: String,

        /// Turn developer logging on or off
        #[arg(long)]
        dev_mode: Option<bool>,
    },

    /// List the packs in the compendium
    Packs,

    /// Show a stored character
    Show {
        /// Actor name (case-insensitive)
        name: String,

        /// Print JSON instead of a character sheet
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(dev: bool) {
    let default = if dev { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn dispatch(ctx: &Context, command: Commands) -> Result<(), String> {
    match command {
        Commands::Generate { dry_run, json } => commands::generate::run(ctx, dry_run, json).await,
        Commands::Regenerate { name } => commands::regenerate::run(ctx, &name).await,
        Commands::Validate => commands::validate::run(ctx).await,
        Commands::Configure {
            options,
            traits,
            dev_mode,
        } => commands::configure::run(ctx, &options, &traits, dev_mode).await,
        Commands::Packs => commands::packs::run(ctx).await,
        Commands::Show { name, json } => commands::show::run(ctx, &name, json),
    }
}

fn main() {
    let cli = Cli::parse();

    let dev_mode = ModuleSettings::load(&cli.settings).is_ok_and(|s| s.dev_mode);
    init_logging(cli.dev || dev_mode);

    let ctx = Context {
        compendium: cli.compendium,
        settings: cli.settings,
        rules: cli.rules,
        store: cli.store,
        seed: cli.seed,
    };

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("cannot start runtime: {e}"))
        .and_then(|runtime| runtime.block_on(dispatch(&ctx, cli.command)));

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
