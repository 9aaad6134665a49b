//! Command-line interface

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::api;
use crate::catalog::CatalogService;
use crate::config::{Config, Overrides};
use crate::workbook::WorkbookSource;

#[derive(Parser, Debug)]
#[command(name = "qrsheet", version, about = "HTTP API over the QR stress catalog workbook")]
pub struct Cli {
    /// Config file (default: <config dir>/qrsheet/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Workbook to serve, overriding the config file
    #[arg(long, global = true)]
    pub workbook: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Socket address to listen on, e.g. 127.0.0.1:5001
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print the /api/meta document
    Meta,
    /// Print the /api/stress/{name} document
    Stress {
        /// Stress name, matched exactly
        name: String,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let bind = match &self.command {
            Some(Commands::Serve { bind }) => bind.clone(),
            _ => None,
        };
        Overrides {
            workbook: self.workbook.clone(),
            bind,
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref(), cli.overrides())?;
    log::debug!("Loaded config: {:?}", config);

    match cli.command {
        None | Some(Commands::Serve { .. }) => api::serve(config).await,
        Some(Commands::Meta) => {
            let catalog = catalog_for(&config);
            let meta = tokio::task::spawn_blocking(move || catalog.meta()).await??;
            print_json(&meta)
        }
        Some(Commands::Stress { name }) => {
            let catalog = catalog_for(&config);
            let doc = tokio::task::spawn_blocking(move || catalog.stress(&name)).await??;
            print_json(&doc)
        }
    }
}

fn catalog_for(config: &Config) -> CatalogService {
    CatalogService::new(
        WorkbookSource::new(config.workbook.clone()),
        config.sheets.clone(),
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}
