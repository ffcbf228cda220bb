//! Correspondence network: a directed multigraph of persons.

use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;

use crate::models::{DegreeDirection, DegreeRow, DegreeTable, Triple, TripleTable};

/// Edge attributes carried over from a triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relation {
    pub count: u32,
    pub weight: f64,
}

impl From<&Triple> for Relation {
    fn from(t: &Triple) -> Self {
        Self {
            count: t.count,
            weight: t.weight,
        }
    }
}

/// A borrowed view of one edge.
#[derive(Debug, Clone, Copy)]
pub struct RelationRef<'a> {
    pub subject: &'a str,
    pub object: &'a str,
    pub relation: &'a Relation,
}

/// Directed multigraph keyed by person name.
///
/// Parallel edges between the same pair are kept as separate edges.
/// Node and edge iteration follow insertion order, so exported tables
/// list persons in the order they first appear in the triples.
#[derive(Debug, Clone, Default)]
pub struct Network {
    graph: StableDiGraph<String, Relation>,
    index: HashMap<String, NodeIndex>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network with one edge per triple.
    pub fn from_triples(triples: &TripleTable) -> Self {
        let mut network = Self::new();
        for triple in triples {
            network.add_relation(&triple.subject_name, &triple.object_name, triple.into());
        }
        network
    }

    /// Add an edge, creating either endpoint if it is new.
    pub fn add_relation(&mut self, subject: &str, object: &str, relation: Relation) {
        let from = self.node(subject);
        let to = self.node(object);
        self.graph.add_edge(from, to, relation);
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Person names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }

    /// Edges in insertion order.
    pub fn relations(&self) -> impl Iterator<Item = RelationRef<'_>> + '_ {
        self.graph.edge_indices().filter_map(|e| {
            let (from, to) = self.graph.edge_endpoints(e)?;
            Some(RelationRef {
                subject: self.graph[from].as_str(),
                object: self.graph[to].as_str(),
                relation: &self.graph[e],
            })
        })
    }

    /// Degree of one person, or `None` if the person is not in the network.
    pub fn degree(&self, name: &str, direction: DegreeDirection) -> Option<usize> {
        let idx = *self.index.get(name)?;
        Some(self.degree_of(idx, direction))
    }

    fn degree_of(&self, idx: NodeIndex, direction: DegreeDirection) -> usize {
        let dir = match direction {
            DegreeDirection::In => Direction::Incoming,
            DegreeDirection::Out => Direction::Outgoing,
        };
        self.graph.edges_directed(idx, dir).count()
    }

    /// Degree of every person in insertion order.
    pub fn degrees(&self, direction: DegreeDirection) -> Vec<(&str, usize)> {
        self.graph
            .node_indices()
            .map(|idx| (self.graph[idx].as_str(), self.degree_of(idx, direction)))
            .collect()
    }

    /// In- and out-degree of every person.
    pub fn degree_table(&self) -> DegreeTable {
        DegreeTable {
            rows: self
                .graph
                .node_indices()
                .map(|idx| DegreeRow {
                    node: self.graph[idx].clone(),
                    in_degree: self.degree_of(idx, DegreeDirection::In),
                    out_degree: self.degree_of(idx, DegreeDirection::Out),
                })
                .collect(),
        }
    }

    /// Remove persons and every edge touching them. Unknown names are ignored.
    pub fn remove_nodes<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            if let Some(idx) = self.index.remove(name) {
                self.graph.remove_node(idx);
            }
        }
    }

    /// Repeatedly drop persons whose degree in `direction` is zero until
    /// a pass removes nothing.
    ///
    /// Consumes the network: the caller's original value is moved into the
    /// result. At the fixed point every remaining person has degree >= 1,
    /// and the result is the largest subgraph with that property.
    pub fn prune(mut self, direction: DegreeDirection) -> Self {
        let mut round = 0;
        loop {
            let before = self.node_count();
            let doomed: HashSet<String> = self
                .degrees(direction)
                .into_iter()
                .filter(|(_, degree)| *degree < 1)
                .map(|(name, _)| name.to_string())
                .collect();
            self.remove_nodes(doomed.iter().map(String::as_str));
            round += 1;

            let after = self.node_count();
            tracing::debug!(
                "Prune round {} ({}): {} -> {} nodes",
                round,
                direction,
                before,
                after
            );
            if before == after {
                break;
            }
        }
        self
    }
}
