// 🏗️ Record Parser - movie and sale lines
// Pure, total parsers: a malformed line yields None, never an error.

use serde::{Deserialize, Serialize};

/// Field separator inside a record line
pub const FIELD_SEPARATOR: char = ',';

/// Separator between talent names in the third movie field
pub const TALENT_SEPARATOR: char = ';';

// ============================================================================
// CORE TYPES
// ============================================================================

/// RecordKind - Qué tipo de archivo se está cargando
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Movies,
    Sales,
}

impl RecordKind {
    /// Human-readable name for logs
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Movies => "movies",
            RecordKind::Sales => "sales",
        }
    }
}

/// MovieRecord - one parsed line of a movies file
///
/// Format: `name,price,talent1;talent2;...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub name: String,
    pub price: u64,
    pub talents: Vec<String>, // Display names, in file order
}

/// SaleRecord - one parsed line of a sales file
///
/// Format: `movie_name,tickets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub movie: String,
    pub tickets: u64,
}

// ============================================================================
// PARSERS
// ============================================================================

/// Parse a movie line
///
/// Only the first two commas split fields, so everything after the price
/// belongs to the talent list. Returns None when:
/// - there are fewer than 3 fields
/// - the price is not a non-negative integer
/// - no talent name survives trimming
pub fn parse_movie_line(line: &str) -> Option<MovieRecord> {
    let mut parts = line.splitn(3, FIELD_SEPARATOR);
    let name = parts.next()?.trim();
    let price = parts.next()?.trim().parse::<u64>().ok()?;
    let talents_field = parts.next()?;

    let talents: Vec<String> = talents_field
        .split(TALENT_SEPARATOR)
        .map(str::trim)
        .filter(|talent| !talent.is_empty())
        .map(str::to_string)
        .collect();

    if talents.is_empty() {
        return None;
    }

    Some(MovieRecord {
        name: name.to_string(),
        price,
        talents,
    })
}

/// Parse a sale line
///
/// Splits on the first comma only. Returns None when there are fewer than
/// 2 fields or the ticket count is not a non-negative integer.
pub fn parse_sale_line(line: &str) -> Option<SaleRecord> {
    let (movie, tickets) = line.split_once(FIELD_SEPARATOR)?;
    let tickets = tickets.trim().parse::<u64>().ok()?;

    Some(SaleRecord {
        movie: movie.trim().to_string(),
        tickets,
    })
}

// ============================================================================
// TESTS
// ============================================================================
