// 💰 Revenue Aggregator - box office per talent
//
// movie revenue  = price × tickets sold (0 when no sales were recorded)
// talent revenue = sum of the revenue of every movie the talent is credited on
//
// Amounts are u128 and checked: overflow is an error, never a clamped value.

use crate::agency::{Agency, Movie};
use crate::error::RevenueError;
use crate::normalize::normalize;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentRevenue {
    /// Display name
    pub name: String,

    pub total: u128,
}

impl TalentRevenue {
    /// Report order: highest revenue first, then name (case-insensitive)
    pub fn report_order(a: &TalentRevenue, b: &TalentRevenue) -> Ordering {
        b.total
            .cmp(&a.total)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    }
}

pub fn movie_revenue(agency: &Agency, movie: &Movie) -> Result<u128, RevenueError> {
    u128::from(movie.price)
        .checked_mul(agency.tickets_sold(&movie.name))
        .ok_or_else(|| RevenueError::MovieOverflow(movie.name.clone()))
}

fn add_revenue(total: u128, revenue: u128, talent: &str) -> Result<u128, RevenueError> {
    total
        .checked_add(revenue)
        .ok_or_else(|| RevenueError::TalentOverflow(talent.to_string()))
}

/// Totals keyed by normalized talent name, in first-seen order
///
/// Movies are visited in load order; talents of the graph that were never
/// credited on a movie are appended with 0.
fn totals_by_key(agency: &Agency) -> Result<Vec<(String, u128)>, RevenueError> {
    let mut totals: Vec<(String, u128)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for movie in agency.movies() {
        let revenue = movie_revenue(agency, movie)?;

        for talent in &movie.talents {
            let key = normalize(talent);
            match index.get(&key) {
                Some(&idx) => totals[idx].1 = add_revenue(totals[idx].1, revenue, talent)?,
                None => {
                    index.insert(key.clone(), totals.len());
                    totals.push((key, revenue));
                }
            }
        }
    }

    for key in agency.graph().keys() {
        if !index.contains_key(key) {
            index.insert(key.to_string(), totals.len());
            totals.push((key.to_string(), 0));
        }
    }

    Ok(totals)
}

/// Revenue per talent, sorted for the report
///
/// Entries whose display names fold to the same key are merged, keeping the
/// first display name seen.
pub fn talent_revenue(agency: &Agency) -> Result<Vec<TalentRevenue>, RevenueError> {
    let graph = agency.graph();
    let mut merged: Vec<TalentRevenue> = Vec::new();
    let mut groups: HashMap<String, usize> = HashMap::new();

    for (key, total) in totals_by_key(agency)? {
        let display = graph.display_name(&key).to_string();
        let group = normalize(&display);

        match groups.get(&group) {
            Some(&idx) => merged[idx].total = add_revenue(merged[idx].total, total, &display)?,
            None => {
                groups.insert(group, merged.len());
                merged.push(TalentRevenue { name: display, total });
            }
        }
    }

    merged.sort_by(TalentRevenue::report_order);
    Ok(merged)
}

// ============================================================================
// TESTS
// ============================================================================
