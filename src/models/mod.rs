//! Domain models for the correspondence network.

mod degree;
mod letter;
mod time_span;
mod triple;

pub use degree::{DegreeDirection, DegreeRow, DegreeTable};
pub use letter::Letter;
pub use time_span::TimeSpan;
pub use triple::{Triple, TripleTable, WEIGHT_DIVISOR};
