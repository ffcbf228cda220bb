//! Degree calculation and export.

use std::path::PathBuf;

use serde::Serialize;

use crate::context::Context;
use crate::error::AppError;
use crate::graph::Network;
use crate::models::{DegreeTable, TripleTable};
use crate::repositories::{sanitize_file_component, DegreeRepository};

/// What was exported, for reporting back to the operator.
#[derive(Debug, Clone, Serialize)]
pub struct DegreeReport {
    pub table: DegreeTable,
    pub file_name: String,
    pub directory: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

impl std::fmt::Display for DegreeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "The csv file '{}' has been created at {}.",
            self.file_name,
            self.directory.display()
        )?;
        write!(
            f,
            "The data frame is organized into {} rows and {} columns.",
            self.rows, self.columns
        )
    }
}

/// Build `<illocution>_in_out_degree - <corpus>.csv`.
pub fn degree_file_name(illocution: &str, corpus_label: &str) -> String {
    format!(
        "{}_in_out_degree - {}.csv",
        sanitize_file_component(illocution),
        sanitize_file_component(corpus_label)
    )
}

/// Service computing and persisting per-person degrees.
#[derive(Clone)]
pub struct DegreeService {
    ctx: Context,
    degree_repo: DegreeRepository,
}

impl DegreeService {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            degree_repo: DegreeRepository::new(ctx),
        }
    }

    /// Compute in/out degrees of the network built from `triples` and
    /// write them to the degree directory.
    pub fn calculate(&self, triples: &TripleTable, illocution: &str) -> Result<DegreeReport, AppError> {
        let table = Network::from_triples(triples).degree_table();
        let file_name = degree_file_name(illocution, self.ctx.corpus_label());
        let path = self.degree_repo.save(&file_name, &table)?;

        let report = DegreeReport {
            rows: table.len(),
            columns: DegreeTable::COLUMNS,
            table,
            file_name,
            directory: path
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| self.ctx.degree_dir().clone()),
        };
        tracing::info!(
            "Degree table for '{}': {} rows x {} columns at {}",
            illocution,
            report.rows,
            report.columns,
            path.display()
        );
        Ok(report)
    }
}
