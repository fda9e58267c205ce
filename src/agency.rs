// 🎬 Agency - aggregate root
//
// Owns the movies, the sales ledger and the collaboration graph.
// Grows monotonically: records are only ever added, never removed.

use crate::error::{LoadError, QueryError};
use crate::graph::CollaborationGraph;
use crate::loader::{load_batch, LoadSummary, MovieLines, SaleLines};
use crate::parser::{MovieRecord, SaleRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Default recognized file extension (without the dot)
pub const DEFAULT_EXTENSION: &str = "csv";

// ============================================================================
// MOVIE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Identity: display name exactly as first loaded
    pub name: String,

    /// Ticket price
    pub price: u64,

    /// Credited talents (display names, file order)
    pub talents: Vec<String>,
}

impl From<MovieRecord> for Movie {
    fn from(record: MovieRecord) -> Self {
        Movie {
            name: record.name,
            price: record.price,
            talents: record.talents,
        }
    }
}

// ============================================================================
// SALES LEDGER
// ============================================================================

/// Cumulative tickets sold per movie name, as u128 totals
#[derive(Debug, Clone, Default)]
pub struct SalesLedger {
    tickets: HashMap<String, u128>,
}

impl SalesLedger {
    pub fn add(&mut self, movie: &str, tickets: u64) {
        *self.tickets.entry(movie.to_string()).or_insert(0) += u128::from(tickets);
    }

    /// Tickets sold for a movie (0 if none recorded)
    pub fn tickets_sold(&self, movie: &str) -> u128 {
        self.tickets.get(movie).copied().unwrap_or(0)
    }
}

// ============================================================================
// AGENCY
// ============================================================================

#[derive(Debug, Clone)]
pub struct Agency {
    /// Movies in insertion order
    movies: Vec<Movie>,

    /// movie name → index into `movies`
    movie_index: HashMap<String, usize>,

    sales: SalesLedger,
    graph: CollaborationGraph,

    /// Recognized input extension
    extension: String,

    /// One entry per batch load, oldest first
    history: Vec<LoadSummary>,
}

impl Agency {
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_EXTENSION)
    }

    /// Create an empty agency that recognizes `extension` files in directories
    pub fn with_extension(extension: &str) -> Self {
        Agency {
            movies: Vec::new(),
            movie_index: HashMap::new(),
            sales: SalesLedger::default(),
            graph: CollaborationGraph::new(),
            extension: extension.trim_start_matches('.').to_string(),
            history: Vec::new(),
        }
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Add a movie and link its talents
    ///
    /// A movie name already present is rejected; the stored movie is untouched.
    pub fn insert_movie(&mut self, record: MovieRecord) -> Result<(), LoadError> {
        if self.movie_index.contains_key(&record.name) {
            return Err(LoadError::DuplicateMovie(record.name));
        }

        self.graph.register_movie_talents(&record.talents);
        self.movie_index.insert(record.name.clone(), self.movies.len());
        self.movies.push(Movie::from(record));
        Ok(())
    }

    /// Add tickets to an already-loaded movie
    pub fn record_sale(&mut self, record: SaleRecord) -> Result<(), LoadError> {
        if !self.movie_index.contains_key(&record.movie) {
            return Err(LoadError::UnknownMovie(record.movie));
        }

        self.sales.add(&record.movie, record.tickets);
        Ok(())
    }

    /// Load movie files and/or directories
    ///
    /// Returns how many movies were added and which duplicates were ignored.
    pub fn load_movies<P: AsRef<Path>>(&mut self, inputs: &[P]) -> LoadSummary {
        let extension = self.extension.clone();
        let summary = load_batch(inputs, &extension, self, &MovieLines);
        debug!(
            movies = self.movies.len(),
            talents = self.graph.talent_count(),
            "agency size after movie load"
        );
        self.history.push(summary.clone());
        summary
    }

    /// Load sales files and/or directories
    ///
    /// Sales may reference any movie loaded so far, in any earlier batch.
    pub fn load_sales<P: AsRef<Path>>(&mut self, inputs: &[P]) -> LoadSummary {
        let extension = self.extension.clone();
        let summary = load_batch(inputs, &extension, self, &SaleLines);
        self.history.push(summary.clone());
        summary
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn direct_collaborators(&self, talent: &str) -> Result<Vec<String>, QueryError> {
        debug!(talent = %talent, "direct collaborators query");
        self.graph
            .direct_collaborators(talent)
            .ok_or_else(|| QueryError::TalentNotFound(talent.to_string()))
    }

    pub fn compatible(&self, talent: &str) -> Result<Vec<String>, QueryError> {
        debug!(talent = %talent, "compatible talents query");
        self.graph
            .compatible(talent)
            .ok_or_else(|| QueryError::TalentNotFound(talent.to_string()))
    }

    pub fn incompatible(&self, talent: &str) -> Result<Vec<String>, QueryError> {
        debug!(talent = %talent, "incompatible talents query");
        self.graph
            .incompatible(talent)
            .ok_or_else(|| QueryError::TalentNotFound(talent.to_string()))
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Movies in the order they were loaded
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn movie(&self, name: &str) -> Option<&Movie> {
        self.movie_index.get(name).map(|&idx| &self.movies[idx])
    }

    pub fn tickets_sold(&self, movie: &str) -> u128 {
        self.sales.tickets_sold(movie)
    }

    pub fn graph(&self) -> &CollaborationGraph {
        &self.graph
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn history(&self) -> &[LoadSummary] {
        &self.history
    }
}

impl Default for Agency {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_movie_line, parse_sale_line};

    fn movie(line: &str) -> MovieRecord {
        parse_movie_line(line).unwrap()
    }

    fn sale(line: &str) -> SaleRecord {
        parse_sale_line(line).unwrap()
    }

    #[test]
    fn test_insert_movie_registers_talents() {
        let mut agency = Agency::new();
        agency
            .insert_movie(movie("Sueños de Libertad,1200,Ana Torres;Carlos Ruiz"))
            .unwrap();

        assert_eq!(agency.movies().len(), 1);
        assert_eq!(agency.graph().talent_count(), 2);
        assert_eq!(
            agency.direct_collaborators("Ana Torres").unwrap(),
            vec!["Carlos Ruiz"]
        );
    }

    #[test]
    fn test_duplicate_movie_rejected_first_unchanged() {
        let mut agency = Agency::new();
        agency.insert_movie(movie("Destino Final,1500,Carlos Ruiz")).unwrap();

        let err = agency
            .insert_movie(movie("Destino Final,9999,Otra Persona"))
            .unwrap_err();
        assert_eq!(err, LoadError::DuplicateMovie("Destino Final".to_string()));

        let stored = agency.movie("Destino Final").unwrap();
        assert_eq!(stored.price, 1500);
        assert_eq!(stored.talents, vec!["Carlos Ruiz"]);
        // the rejected movie's talents never reach the graph
        assert!(agency.graph().resolve("Otra Persona").is_none());
    }

    #[test]
    fn test_movie_identity_is_case_sensitive() {
        let mut agency = Agency::new();
        agency.insert_movie(movie("Destino Final,1500,Ana")).unwrap();
        assert!(agency.insert_movie(movie("DESTINO FINAL,1500,Ana")).is_ok());
        assert_eq!(agency.movies().len(), 2);
    }

    #[test]
    fn test_record_sale_accumulates() {
        let mut agency = Agency::new();
        agency.insert_movie(movie("Destino Final,1500,Ana")).unwrap();

        agency.record_sale(sale("Destino Final,50")).unwrap();
        agency.record_sale(sale("Destino Final,25")).unwrap();

        assert_eq!(agency.tickets_sold("Destino Final"), 75);
    }

    #[test]
    fn test_record_sale_unknown_movie() {
        let mut agency = Agency::new();
        let err = agency.record_sale(sale("Fantasma,10")).unwrap_err();

        assert_eq!(err, LoadError::UnknownMovie("Fantasma".to_string()));
        assert_eq!(agency.tickets_sold("Fantasma"), 0);
    }

    #[test]
    fn test_query_unknown_talent() {
        let agency = Agency::new();
        assert_eq!(
            agency.compatible("Nadie"),
            Err(QueryError::TalentNotFound("Nadie".to_string()))
        );
    }

    #[test]
    fn test_with_extension_strips_dot() {
        let agency = Agency::with_extension(".txt");
        assert_eq!(agency.extension(), "txt");
        assert_eq!(Agency::default().extension(), "csv");
    }

    #[test]
    fn test_ticket_totals_beyond_u64() {
        let mut agency = Agency::new();
        agency.insert_movie(movie("Taquillera,1,Ana")).unwrap();

        agency.record_sale(sale(&format!("Taquillera,{}", u64::MAX))).unwrap();
        agency.record_sale(sale("Taquillera,1")).unwrap();

        assert_eq!(agency.tickets_sold("Taquillera"), u128::from(u64::MAX) + 1);
    }
}
