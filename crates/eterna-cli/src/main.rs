use clap::Parser;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use eterna_cli::cli::{Cli, Commands, ConfigCommands};
use eterna_core::EternaConfig;

mod commands;

use commands::{completions, config, estimate, export, input, profile, sim};

fn main() {
    let cli = Cli::parse();

    let config_file = cli.config.as_deref();
    let loaded = input::load_effective_config(config_file);
    let level = cli
        .log_level
        .or_else(|| {
            loaded
                .as_ref()
                .ok()
                .and_then(|cfg| cfg.logging.level.parse::<Level>().ok())
        })
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {err}");
    }

    let result = match (&cli.command, loaded) {
        (Commands::Config { command }, Err(err)) if !matches!(command, ConfigCommands::Show) => {
            // init and path must still work when the existing file is broken
            warn!("ignoring unreadable config: {err:#}");
            run(&cli, &EternaConfig::default())
        }
        (_, loaded) => loaded.and_then(|cfg| run(&cli, &cfg)),
    };
    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, cfg: &EternaConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Estimate { profile, format } => estimate::handle(cfg, profile, *format),
        Commands::Profile { command } => profile::handle(command),
        Commands::Export { profile, out } => export::handle(cfg, profile, out.as_deref()),
        Commands::Sim { command } => sim::handle(command),
        Commands::Config { command } => config::handle(command, cli.config.as_deref(), cfg),
        Commands::Completions { shell, out } => completions::handle(*shell, out.as_deref()),
    }
}
