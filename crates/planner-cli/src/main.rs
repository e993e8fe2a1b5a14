use clap::Parser;
use owo_colors::{OwoColorize, Style};
use planner_core::db;
use planner_core::error::CoreError;
use planner_core::repository::SqliteRepository;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod subjects;
mod util;
mod views;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("planner=warn,planner_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    // A broken config must not silently point us at a different database.
    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            handle_error(anyhow::Error::from(e).context("Invalid configuration"));
            std::process::exit(1);
        }
    };
    debug!(database_path = %config.database_path, "configuration loaded");

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), anyhow::Error::from(e));
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool);

    let result = match cli.command {
        cli::Commands::Wizard(command) => commands::wizard::run_wizard(&repository, command, &config).await,
        cli::Commands::Add(command) => commands::add::add_task(&repository, command, &config).await,
        cli::Commands::Timeline(command) => {
            commands::timeline::show_timeline(&repository, command, &config).await
        }
        cli::Commands::Inbox => commands::inbox::list_inbox(&repository).await,
        cli::Commands::Edit(command) => commands::edit::edit_task(&repository, command, &config).await,
        cli::Commands::Done(command) => commands::done::mark_done(&repository, command).await,
        cli::Commands::Delete(command) => commands::delete::delete_task(&repository, command).await,
        cli::Commands::Group(command) => commands::group::group_command(&repository, command).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.chain().find_map(|e| e.downcast_ref::<CoreError>()) {
        Some(CoreError::InvalidRange { start, end }) => {
            eprintln!(
                "{} The end date {} is before the start date {}",
                "Error:".style(error_style),
                end.yellow(),
                start.yellow()
            );
        }
        Some(CoreError::NoInstancesGenerated) => {
            eprintln!(
                "{} No class falls inside that date range. Check the weekdays in your timetable.",
                "Error:".style(error_style)
            );
        }
        Some(CoreError::Validation(s)) => {
            eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
        }
        Some(CoreError::NotFound(s)) => {
            eprintln!("{} {}", "Error:".style(error_style), s);
        }
        Some(CoreError::InvalidTimezone(tz)) => {
            eprintln!(
                "{} Unknown timezone '{}'. Use an IANA name such as 'Europe/Berlin'.",
                "Error:".style(error_style),
                tz.yellow()
            );
        }
        Some(CoreError::GenerationFailed(cause)) => {
            eprintln!("{} Could not generate tasks: {}", "Error:".style(error_style), cause);
        }
        _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
    }
}
