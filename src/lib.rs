// Conectar - Talent Collaboration Graph
// Exposes all modules for use in the CLI and tests

pub mod normalize;
pub mod parser;
pub mod error;
pub mod graph;
pub mod agency;
pub mod loader;
pub mod revenue;
pub mod export;
pub mod config;
pub mod logging;
pub mod validation;
pub mod menu;

// Re-export commonly used types
pub use normalize::normalize;
pub use parser::{
    MovieRecord, SaleRecord, RecordKind,
    parse_movie_line, parse_sale_line,
};
pub use error::{LoadError, QueryError, RevenueError, ExportError};
pub use graph::CollaborationGraph;
pub use agency::{Agency, Movie, SalesLedger};
pub use loader::{
    LineOutcome, LineProcessor, LoadSummary, MovieLines, SaleLines,
    load_batch, load_files, resolve_inputs,
};
pub use revenue::{TalentRevenue, movie_revenue, talent_revenue};
pub use export::{EXPORT_HEADER, export_revenue, validate_export_path};
pub use config::Config;
