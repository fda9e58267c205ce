use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;

use conectar::logging::init_tracing;
use conectar::menu::{report_load, Menu};
use conectar::{export_revenue, Agency, Config};

/// Talent collaboration graph: load movies and sales, query collaborators,
/// export revenue per talent.
#[derive(Debug, Parser)]
#[command(name = "conectar", version, about)]
struct Cli {
    /// JSON config file
    #[arg(long, env = "CONECTAR_CONFIG")]
    config: Option<PathBuf>,

    /// Movie files or directories to load before starting
    #[arg(long, num_args = 1..)]
    movies: Vec<PathBuf>,

    /// Sales files or directories to load before starting
    #[arg(long, num_args = 1..)]
    sales: Vec<PathBuf>,

    /// Export revenue to this file and exit instead of opening the menu
    #[arg(long)]
    export: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    init_tracing(&config.log_filter);

    let mut agency = Agency::with_extension(&config.extension);
    let mut stdout = io::stdout().lock();

    if !cli.movies.is_empty() {
        let summary = agency.load_movies(&cli.movies);
        report_load(&mut stdout, &summary)?;
    }
    if !cli.sales.is_empty() {
        let summary = agency.load_sales(&cli.sales);
        report_load(&mut stdout, &summary)?;
    }

    if let Some(destination) = cli.export {
        let rows = export_revenue(&agency, &destination)
            .with_context(|| format!("Failed to export revenue to {}", destination))?;
        println!("✓ Exported {} talents to {}", rows, destination.trim());
        return Ok(());
    }

    let stdin = io::stdin().lock();
    Menu::new(stdin, stdout, &config).run(&mut agency)?;

    Ok(())
}
