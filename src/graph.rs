// 🕸️ Collaboration Graph - undirected talent adjacency
//
// Identity: normalized key (see normalize.rs)
// Value:    first display spelling ever seen for that key (never overwritten)
//
// Edges link every pair of distinct talents credited on the same movie.
// All query results are ordered by normalized key, never by display name.

use crate::normalize::normalize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Default)]
pub struct CollaborationGraph {
    /// normalized key → normalized keys of direct collaborators
    adjacency: BTreeMap<String, BTreeSet<String>>,

    /// normalized key → first display name seen
    display_names: HashMap<String, String>,
}

impl CollaborationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the talents credited on one movie and link them pairwise
    ///
    /// Repeated names within the same list collapse onto one key, and a
    /// talent is never linked to itself.
    pub fn register_movie_talents<S: AsRef<str>>(&mut self, display_names: &[S]) {
        let mut keys: Vec<String> = Vec::with_capacity(display_names.len());

        for display in display_names {
            let display = display.as_ref();
            let key = normalize(display);

            self.adjacency.entry(key.clone()).or_default();
            self.display_names
                .entry(key.clone())
                .or_insert_with(|| display.to_string());

            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                if let Some(neighbors) = self.adjacency.get_mut(a) {
                    neighbors.insert(b.clone());
                }
                if let Some(neighbors) = self.adjacency.get_mut(b) {
                    neighbors.insert(a.clone());
                }
            }
        }
    }

    /// Find the stored key for a query name (case/accent-insensitive)
    pub fn resolve(&self, query: &str) -> Option<&str> {
        self.adjacency
            .get_key_value(&normalize(query))
            .map(|(key, _)| key.as_str())
    }

    /// Display name for a key; falls back to the key itself
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.display_names.get(key).map(String::as_str).unwrap_or(key)
    }

    /// All registered keys, ascending
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Normalized keys of direct collaborators, ascending
    pub fn neighbors(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.adjacency.get(key)
    }

    pub fn talent_count(&self) -> usize {
        self.adjacency.len()
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Direct collaborators of a talent, or None if the talent is unknown
    pub fn direct_collaborators(&self, query: &str) -> Option<Vec<String>> {
        let key = self.resolve(query)?;
        let neighbors = self.adjacency.get(key)?;
        Some(self.to_display_names(neighbors.iter().map(String::as_str)))
    }

    /// Every key reachable from `start`, including `start` itself
    ///
    /// Iterative depth-first walk with an explicit stack; each call owns its
    /// visited set.
    pub fn reachable_set(&self, start: &str) -> BTreeSet<String> {
        let mut visited = BTreeSet::new();
        let mut stack = vec![start.to_string()];

        while let Some(current) = stack.pop() {
            if visited.contains(&current) {
                continue;
            }
            if let Some(neighbors) = self.adjacency.get(&current) {
                for neighbor in neighbors {
                    if !visited.contains(neighbor) {
                        stack.push(neighbor.clone());
                    }
                }
            }
            visited.insert(current);
        }

        visited
    }

    /// Talents connected to the query only through other talents
    pub fn compatible(&self, query: &str) -> Option<Vec<String>> {
        let key = self.resolve(query)?;
        let direct = self.adjacency.get(key)?;
        let reachable = self.reachable_set(key);

        let compatible = reachable
            .iter()
            .map(String::as_str)
            .filter(|other| *other != key && !direct.contains(*other));

        Some(self.to_display_names(compatible))
    }

    /// Talents not connected to the query at all
    pub fn incompatible(&self, query: &str) -> Option<Vec<String>> {
        let key = self.resolve(query)?;
        let reachable = self.reachable_set(key);

        let incompatible = self
            .adjacency
            .keys()
            .map(String::as_str)
            .filter(|other| !reachable.contains(*other));

        Some(self.to_display_names(incompatible))
    }

    /// Map keys to display names, ordered by key
    fn to_display_names<'a, I>(&self, keys: I) -> Vec<String>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut keys: Vec<&str> = keys.collect();
        keys.sort_unstable();
        keys.into_iter()
            .map(|key| self.display_name(key).to_string())
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Two components: {ana, carlos, federico} and {lucia, pedro}, plus sola
    fn sample_graph() -> CollaborationGraph {
        let mut graph = CollaborationGraph::new();
        graph.register_movie_talents(&["Ana Torres", "Carlos Ruiz"]);
        graph.register_movie_talents(&["Carlos Ruiz", "Federico Díaz"]);
        graph.register_movie_talents(&["Lucía Pérez", "Pedro Gómez"]);
        graph.register_movie_talents(&["Sola Vega"]);
        graph
    }

    #[test]
    fn test_register_is_symmetric() {
        let graph = sample_graph();

        for key in graph.keys() {
            for neighbor in graph.neighbors(key).unwrap() {
                assert!(
                    graph.neighbors(neighbor).unwrap().contains(key),
                    "{} → {} has no reverse edge",
                    key,
                    neighbor
                );
            }
        }
    }

    #[test]
    fn test_register_no_self_loops_and_duplicates_collapse() {
        let mut graph = CollaborationGraph::new();
        graph.register_movie_talents(&["Ana Torres", "ANA TORRES", "Carlos Ruiz", "Ana Torres"]);

        assert_eq!(graph.talent_count(), 2);
        let ana = graph.neighbors("ana torres").unwrap();
        assert_eq!(ana.len(), 1);
        assert!(ana.contains("carlos ruiz"));
        assert!(!ana.contains("ana torres"));
    }

    #[test]
    fn test_first_display_name_wins() {
        let mut graph = CollaborationGraph::new();
        graph.register_movie_talents(&["Federico Díaz", "Ana Torres"]);
        graph.register_movie_talents(&["FEDERICO DIAZ", "Carlos Ruiz"]);

        assert_eq!(graph.display_name("federico diaz"), "Federico Díaz");
        assert_eq!(
            graph.direct_collaborators("carlos ruiz").unwrap(),
            vec!["Federico Díaz"]
        );
    }

    #[test]
    fn test_direct_collaborators_sorted_by_key() {
        let graph = sample_graph();
        assert_eq!(
            graph.direct_collaborators("Carlos Ruiz").unwrap(),
            vec!["Ana Torres", "Federico Díaz"]
        );
    }

    #[test]
    fn test_query_is_case_and_accent_insensitive() {
        let graph = sample_graph();
        assert_eq!(
            graph.direct_collaborators("  federico DIAZ ").unwrap(),
            vec!["Carlos Ruiz"]
        );
    }

    #[test]
    fn test_unknown_talent_is_none_not_empty() {
        let graph = sample_graph();
        assert_eq!(graph.direct_collaborators("Nadie"), None);
        assert_eq!(graph.compatible("Nadie"), None);
        assert_eq!(graph.incompatible("Nadie"), None);

        // A talent alone in its movie is found, with no collaborators
        assert_eq!(graph.direct_collaborators("Sola Vega"), Some(vec![]));
    }

    #[test]
    fn test_reachable_set_handles_cycles() {
        let mut graph = CollaborationGraph::new();
        graph.register_movie_talents(&["A", "B"]);
        graph.register_movie_talents(&["B", "C"]);
        graph.register_movie_talents(&["C", "A"]);
        graph.register_movie_talents(&["C", "D"]);

        let reachable = graph.reachable_set("a");
        let expected: BTreeSet<String> =
            ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(reachable, expected);
    }

    #[test]
    fn test_reachable_set_deep_chain() {
        let mut graph = CollaborationGraph::new();
        for i in 0..20_000 {
            let a = format!("t{}", i);
            let b = format!("t{}", i + 1);
            graph.register_movie_talents(&[a, b]);
        }

        assert_eq!(graph.reachable_set("t0").len(), 20_001);
    }

    #[test]
    fn test_compatible() {
        let graph = sample_graph();
        assert_eq!(graph.compatible("Ana Torres").unwrap(), vec!["Federico Díaz"]);
        assert_eq!(graph.compatible("Carlos Ruiz").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_incompatible() {
        let graph = sample_graph();
        assert_eq!(
            graph.incompatible("Ana Torres").unwrap(),
            vec!["Lucía Pérez", "Pedro Gómez", "Sola Vega"]
        );
        assert_eq!(
            graph.incompatible("Sola Vega").unwrap(),
            vec!["Ana Torres", "Carlos Ruiz", "Federico Díaz", "Lucía Pérez", "Pedro Gómez"]
        );
    }

    #[test]
    fn test_partition_property() {
        let graph = sample_graph();
        let all: BTreeSet<String> = graph
            .keys()
            .map(|key| graph.display_name(key).to_string())
            .collect();

        for key in graph.keys() {
            let me = graph.display_name(key).to_string();
            let direct = graph.direct_collaborators(key).unwrap();
            let compatible = graph.compatible(key).unwrap();
            let incompatible = graph.incompatible(key).unwrap();

            let mut union = BTreeSet::new();
            union.insert(me.clone());
            let total = 1 + direct.len() + compatible.len() + incompatible.len();
            union.extend(direct);
            union.extend(compatible);
            union.extend(incompatible);

            // pairwise disjoint ⇔ no element lost when merging
            assert_eq!(union.len(), total, "overlap for {}", me);
            assert_eq!(union, all, "partition incomplete for {}", me);
        }
    }
}
