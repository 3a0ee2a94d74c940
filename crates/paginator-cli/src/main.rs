mod cli;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{BrowseArgs, Cli, Commands};
use paginator_core::{PageBase, PaginatorConfig};
use paginator_tui::{App, Record};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn init_logging() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("PAGINATOR_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> PaginatorConfig {
    match path {
        Some(path) => PaginatorConfig::load_from(path).unwrap_or_else(|e| {
            output::output_error(&format!(
                "Failed to load config {}: {}",
                path.display(),
                e
            ))
        }),
        None => PaginatorConfig::load(),
    }
}

async fn browse(mut config: PaginatorConfig, args: BrowseArgs) -> anyhow::Result<()> {
    args.layout.apply(&mut config);
    let base = PageBase::try_from(args.first_page)?;
    let records = Record::generate(args.records);

    let mut app = App::new(config, records, base, args.page_size)?;
    tracing::info!(records = args.records, "browsing generated collection");
    app.run().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        None => browse(load_config(config_path), BrowseArgs::default()).await?,
        Some(Commands::Browse(args)) => browse(load_config(config_path), args).await?,
        Some(Commands::Window(args)) => {
            handlers::window::handle(load_config(config_path), args)?;
        }
        Some(Commands::Render(args)) => {
            handlers::render::handle(load_config(config_path), args)?;
        }
        Some(Commands::Handle(args)) => handlers::handle::handle(args)?,
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "paginator",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
