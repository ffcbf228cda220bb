//! Business logic services for correspondence networks.
//!
//! Services orchestrate repositories and rendering and enforce the
//! validation rules; each one is built from the shared [`Context`].
//!
//! [`Context`]: crate::context::Context

mod degree;
mod extraction;
mod network;

pub use degree::{degree_file_name, DegreeReport, DegreeService};
pub use extraction::{
    triples_file_name, Extraction, ExtractionService, PlaceTriples, TripleQuery, ALL_ILLOCUTIONS,
};
pub use network::{NetworkService, RenderedNetwork};
