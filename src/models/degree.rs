//! Degree table and degree direction.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which edge direction a degree counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegreeDirection {
    /// Incoming edges (letters received).
    In,
    /// Outgoing edges (letters sent).
    Out,
}

impl DegreeDirection {
    /// Color-bar and title label: `In-Degree` / `Out-Degree`.
    pub fn label(&self) -> &'static str {
        match self {
            DegreeDirection::In => "In-Degree",
            DegreeDirection::Out => "Out-Degree",
        }
    }
}

impl std::fmt::Display for DegreeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DegreeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" | "In" | "In-Degree" => Ok(DegreeDirection::In),
            "out" | "Out" | "Out-Degree" => Ok(DegreeDirection::Out),
            _ => Err(format!(
                "Invalid degree direction '{}'. Valid values: in, out",
                s
            )),
        }
    }
}

/// One node with both degrees.
///
/// Column names match the exported CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeRow {
    #[serde(rename = "Node")]
    pub node: String,
    #[serde(rename = "In-Degree")]
    pub in_degree: usize,
    #[serde(rename = "Out-Degree")]
    pub out_degree: usize,
}

/// Per-node degrees in graph insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DegreeTable {
    pub rows: Vec<DegreeRow>,
}

impl DegreeTable {
    /// Number of exported columns.
    pub const COLUMNS: usize = 3;

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, node: &str) -> Option<&DegreeRow> {
        self.rows.iter().find(|r| r.node == node)
    }
}
