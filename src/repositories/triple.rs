//! Triple repository for persisting and reloading triple tables.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::context::Context;
use crate::error::AppError;
use crate::models::{Triple, TripleTable};

use super::{read_rows, write_rows, OUTPUT_DELIMITER};

/// Reads and writes `subject_name;object_name;count;weight` tables.
#[derive(Clone)]
pub struct TripleRepository {
    ctx: Context,
}

impl TripleRepository {
    pub fn new(ctx: &Context) -> Self {
        Self { ctx: ctx.clone() }
    }

    /// Write `table` as `file_name` inside the degree directory.
    pub fn save(&self, file_name: &str, table: &TripleTable) -> Result<PathBuf, AppError> {
        let path = self.ctx.ensure_degree_dir()?.join(file_name);
        write_rows(&path, table.iter())?;
        tracing::info!("Wrote {} triples to {}", table.len(), path.display());
        Ok(path)
    }

    /// Load a triple table written by [`TripleRepository::save`].
    pub fn load(&self, path: &Path) -> Result<TripleTable, AppError> {
        let rows: Vec<Triple> = read_rows(File::open(path)?, OUTPUT_DELIMITER)?;
        // Weight is derived from count, whatever the file says.
        let rows: Vec<Triple> = rows
            .into_iter()
            .map(|t| {
                let rebuilt = Triple::new(t.subject_name, t.object_name, t.count);
                if rebuilt.weight != t.weight {
                    tracing::warn!(
                        "Recomputed weight of {} -> {} from count {} (file had {})",
                        rebuilt.subject_name,
                        rebuilt.object_name,
                        rebuilt.count,
                        t.weight
                    );
                }
                rebuilt
            })
            .collect();
        tracing::info!("Loaded {} triples from {}", rows.len(), path.display());
        Ok(TripleTable::new(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_save_writes_semicolon_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.root = dir.path().to_path_buf();
        let repo = TripleRepository::new(&Context::new(config));

        let table = TripleTable::new(vec![Triple::new("A", "B", 3), Triple::new("B", "A", 1)]);
        let path = repo.save("request_triples - test.csv", &table).unwrap();

        assert_eq!(path, dir.path().join("network_degree/request_triples - test.csv"));
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "subject_name;object_name;count;weight");
        assert_eq!(lines[1], "A;B;3;0.3");
        assert_eq!(lines[2], "B;A;1;0.1");

        let reloaded = repo.load(&path).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_load_recomputes_weight_from_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edited.csv");
        std::fs::write(
            &path,
            "subject_name;object_name;count;weight\nA;B;4;9.5\nB;C;2;0.2\n",
        )
        .unwrap();
        let repo = TripleRepository::new(&Context::new(Config::default()));

        let table = repo.load(&path).unwrap();
        assert_eq!(
            table.rows,
            vec![Triple::new("A", "B", 4), Triple::new("B", "C", 2)]
        );
        assert!(table.iter().all(|t| t.weight == f64::from(t.count) / 10.0));
    }
}
