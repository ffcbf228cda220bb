//! Degree repository for exporting degree tables.

use std::path::PathBuf;

use crate::context::Context;
use crate::error::AppError;
use crate::models::DegreeTable;

use super::write_rows;

/// Writes `Node;In-Degree;Out-Degree` tables into the degree directory.
#[derive(Clone)]
pub struct DegreeRepository {
    ctx: Context,
}

impl DegreeRepository {
    pub fn new(ctx: &Context) -> Self {
        Self { ctx: ctx.clone() }
    }

    pub fn save(&self, file_name: &str, table: &DegreeTable) -> Result<PathBuf, AppError> {
        let path = self.ctx.ensure_degree_dir()?.join(file_name);
        write_rows(&path, table.rows.iter())?;
        tracing::debug!("Wrote {} degree rows to {}", table.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::DegreeRow;

    #[test]
    fn test_save_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.root = dir.path().to_path_buf();
        let repo = DegreeRepository::new(&Context::new(config));

        let table = DegreeTable {
            rows: vec![DegreeRow {
                node: "A".to_string(),
                in_degree: 0,
                out_degree: 2,
            }],
        };
        let path = repo.save("x.csv", &table).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "Node;In-Degree;Out-Degree\nA;0;2\n");
    }
}
