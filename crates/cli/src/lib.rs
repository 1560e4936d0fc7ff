//! # Screenwright CLI
//!
//! Command-line front end for the Screenwright runtime.
//!
//! ## Commands
//!
//! - `validate` - Check a catalog (or the reference catalog) for configuration errors
//! - `render` - Resolve a screen against fixture procedures and print the render tree
//! - `journey` - Show lifecycle progress and quick actions for a record status
//! - `export` - Write the reference catalog to disk
//! - `screens` - List catalog screens or validate a directory of screen files
//! - `drafts` - Inspect a file-backed wizard draft store
//!

mod args;
pub mod commands;
pub mod output;

pub use args::{Cli, Commands, DraftCommand, LogLevel};

use anyhow::{Context, Result};
use screenwright_runtime::RuntimeConfig;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Execute a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(dispatch(cli))
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = RuntimeConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate { catalog } => {
            let catalog = commands::open_catalog(catalog.as_deref())?;
            commands::validate(&catalog)
        }
        Commands::Render {
            screen,
            fixtures,
            params,
            context,
            catalog,
            json,
        } => {
            let catalog = commands::open_catalog(catalog.as_deref())?;
            let request = commands::RenderRequest {
                screen,
                fixtures,
                params,
                context,
                json,
            };
            commands::render(catalog, config, request).await
        }
        Commands::Journey { entity, status, catalog } => {
            let catalog = commands::open_catalog(catalog.as_deref())?;
            commands::journey(&catalog, &entity, &status)
        }
        Commands::Export { out } => commands::export(&out),
        Commands::Screens { dir, catalog } => {
            let catalog = commands::open_catalog(catalog.as_deref())?;
            match dir {
                Some(dir) => commands::check_screen_dir(&catalog, &dir),
                None => {
                    commands::list_screens(&catalog);
                    Ok(())
                }
            }
        }
        Commands::Drafts { command } => match command {
            DraftCommand::List { store, key } => commands::list_drafts(&store, key.as_deref()).await,
            DraftCommand::Show { id, store } => commands::show_draft(&store, id).await,
            DraftCommand::Delete { id, store } => commands::delete_draft(&store, id).await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "screenwright_cli");
    }

    #[test]
    fn test_run_validate() {
        let cli = Cli::try_parse_from(["screenwright", "validate"]).unwrap();
        run(cli).unwrap();
    }

    #[test]
    fn test_run_journey_unknown_entity() {
        let cli = Cli::try_parse_from(["screenwright", "journey", "invoice", "open"]).unwrap();
        assert!(run(cli).is_err());
    }
}
