//! Epistola - Correspondence Network Analysis
//!
//! Turns a table of letters into subject/object triples, degree tables and
//! network diagrams.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod models;
pub mod repositories;
pub mod services;
pub mod visualization;
