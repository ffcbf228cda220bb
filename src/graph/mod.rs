//! In-memory correspondence graph.
//!
//! Persons are nodes; every triple becomes one directed edge carrying its
//! `count` and `weight`. The graph is a multigraph backed by petgraph's
//! `StableDiGraph`, so node removal during pruning never invalidates the
//! indices of surviving persons.
//!
//! # Usage
//!
//! ```ignore
//! use epistola::graph::Network;
//! use epistola::models::DegreeDirection;
//!
//! let network = Network::from_triples(&triples);
//! let table = network.degree_table();
//!
//! // Pruning consumes the network
//! let core = network.prune(DegreeDirection::In);
//! ```

mod network;

pub use network::{Network, Relation, RelationRef};
