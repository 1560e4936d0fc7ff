use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "screenwright")]
#[command(about = "Validate, render, and inspect declarative screen definitions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Runtime configuration file (TOML)
    #[arg(long, global = true, env = "SCREENWRIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate the reference catalog or a catalog file
    Validate {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Resolve a screen against fixture procedures and print the result
    Render {
        screen: String,

        /// JSON object keyed by procedure name
        #[arg(long)]
        fixtures: PathBuf,

        /// Route parameter, repeatable (`--param id=j-1`)
        #[arg(long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,

        /// JSON file with the user/session context
        #[arg(long)]
        context: Option<PathBuf>,

        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print the render tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show journey progress and quick actions for a record status
    Journey {
        entity: String,
        status: String,

        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Write the reference catalog to a file
    Export { out: PathBuf },

    /// List catalog screens, or validate every screen file under a directory
    Screens {
        dir: Option<PathBuf>,

        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Inspect a file-backed draft store
    Drafts {
        #[command(subcommand)]
        command: DraftCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// List drafts, newest first
    List {
        #[arg(long)]
        store: PathBuf,

        /// Only drafts for this wizard
        #[arg(long)]
        key: Option<String>,
    },

    /// Print one draft as JSON
    Show {
        id: Uuid,

        #[arg(long)]
        store: PathBuf,
    },

    Delete {
        id: Uuid,

        #[arg(long)]
        store: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    Ok((key.trim().to_string(), value.to_string()))
}
