//! Triple extraction: filter letters and aggregate subject → object counts.

use std::path::PathBuf;

use serde::Serialize;

use crate::context::Context;
use crate::error::AppError;
use crate::models::{Letter, TimeSpan, TripleTable};
use crate::repositories::{sanitize_file_component, TripleRepository};

/// Label used in file names when no illocution filter is given.
pub const ALL_ILLOCUTIONS: &str = "all";

/// Filter criteria for triple extraction.
#[derive(Debug, Clone, Default)]
pub struct TripleQuery {
    /// Persons matched against BOTH the sender and the receiver column.
    pub subjects: Vec<String>,
    /// Accepted for symmetry with `subjects` but not used for filtering.
    ///
    /// Matching on `subjects` alone is the established behavior of the
    /// analyses built on this tool; whether `objects` should restrict the
    /// receiver side is still open with the corpus editors.
    pub objects: Vec<String>,
    /// Restrict to letters with dispatch == receipt and partition by place.
    pub same_place: bool,
    /// Keep only these illocutions. Empty means no filter.
    pub illocutions: Vec<String>,
    /// Keep only letters dated within this inclusive range.
    pub time_span: Option<TimeSpan>,
}

impl TripleQuery {
    pub fn new(subjects: Vec<String>) -> Self {
        Self {
            subjects,
            ..Default::default()
        }
    }

    pub fn objects(mut self, objects: Vec<String>) -> Self {
        self.objects = objects;
        self
    }

    pub fn same_place(mut self, same_place: bool) -> Self {
        self.same_place = same_place;
        self
    }

    pub fn illocutions(mut self, illocutions: Vec<String>) -> Self {
        self.illocutions = illocutions;
        self
    }

    pub fn time_span(mut self, time_span: Option<TimeSpan>) -> Self {
        self.time_span = time_span;
        self
    }

    /// Illocution part of output file names.
    pub fn illocution_label(&self) -> String {
        if self.illocutions.is_empty() {
            ALL_ILLOCUTIONS.to_string()
        } else {
            self.illocutions.join("+")
        }
    }

    /// Apply the subject, illocution and date filters, in that order.
    ///
    /// The letters are borrowed; the source table is never modified.
    pub fn select<'a>(&self, letters: &'a [Letter]) -> Vec<&'a Letter> {
        letters
            .iter()
            .filter(|l| l.involves_any(&self.subjects))
            .filter(|l| self.illocutions.is_empty() || self.illocutions.contains(&l.illocution))
            .filter(|l| {
                self.time_span
                    .as_ref()
                    .map_or(true, |span| span.contains(&l.letter_date))
            })
            .collect()
    }
}

/// Triples of one place in same-place mode.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceTriples {
    pub place: String,
    pub triples: TripleTable,
    /// Where the table was written.
    pub path: PathBuf,
}

/// Result of an extraction.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", content = "result", rename_all = "snake_case")]
pub enum Extraction {
    /// Counts over the whole filtered set.
    Combined(TripleTable),
    /// One table per place, in order of first appearance.
    ByPlace(Vec<PlaceTriples>),
}

impl Extraction {
    /// Table of the last place processed, or the combined table.
    pub fn last_place(&self) -> Option<&TripleTable> {
        match self {
            Extraction::Combined(table) => Some(table),
            Extraction::ByPlace(places) => places.last().map(|p| &p.triples),
        }
    }

    /// Total number of triple rows across all tables.
    pub fn total_rows(&self) -> usize {
        match self {
            Extraction::Combined(table) => table.len(),
            Extraction::ByPlace(places) => places.iter().map(|p| p.triples.len()).sum(),
        }
    }
}

/// Build `<illocution>[_<time-span>][_<place>]_triples - <corpus>.csv`.
pub fn triples_file_name(
    illocution: &str,
    time_span: Option<&TimeSpan>,
    place: Option<&str>,
    corpus_label: &str,
) -> String {
    let mut name = sanitize_file_component(illocution);
    if let Some(span) = time_span {
        name.push('_');
        name.push_str(&sanitize_file_component(&span.file_label()));
    }
    if let Some(place) = place {
        name.push('_');
        name.push_str(&sanitize_file_component(place));
    }
    format!("{}_triples - {}.csv", name, sanitize_file_component(corpus_label))
}

/// Service turning the letter table into triple tables.
#[derive(Clone)]
pub struct ExtractionService {
    ctx: Context,
    triple_repo: TripleRepository,
}

impl ExtractionService {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            triple_repo: TripleRepository::new(ctx),
        }
    }

    /// Filter `letters` by `query` and aggregate pair counts.
    ///
    /// In same-place mode one table per place is also written to the degree
    /// directory; every table is returned, not only the last.
    pub fn extract(&self, letters: &[Letter], query: &TripleQuery) -> Result<Extraction, AppError> {
        if query.subjects.is_empty() {
            return Err(AppError::Validation(
                "at least one subject is required".to_string(),
            ));
        }
        if !query.objects.is_empty() {
            tracing::debug!(
                "Object filter {:?} is accepted but not applied; subjects match both columns",
                query.objects
            );
        }

        let selected = query.select(letters);
        tracing::info!(
            "Selected {} of {} letters for subjects {:?}",
            selected.len(),
            letters.len(),
            query.subjects
        );

        if !query.same_place {
            return Ok(Extraction::Combined(TripleTable::aggregate(
                selected.iter().copied(),
            )));
        }

        let same_place: Vec<&Letter> = selected.into_iter().filter(|l| l.is_same_place()).collect();
        let mut places: Vec<&str> = Vec::new();
        for letter in &same_place {
            if !places.contains(&letter.dispatch.as_str()) {
                places.push(&letter.dispatch);
            }
        }

        let illocution = query.illocution_label();
        let mut results = Vec::with_capacity(places.len());
        for place in places {
            let triples = TripleTable::aggregate(
                same_place
                    .iter()
                    .copied()
                    .filter(|l| l.dispatch == place),
            );
            let file_name = triples_file_name(
                &illocution,
                query.time_span.as_ref(),
                Some(place),
                self.ctx.corpus_label(),
            );
            let path = self.triple_repo.save(&file_name, &triples)?;
            results.push(PlaceTriples {
                place: place.to_string(),
                triples,
                path,
            });
        }

        tracing::info!("Extracted same-place triples for {} places", results.len());
        Ok(Extraction::ByPlace(results))
    }

    /// Persist a combined table as `<illocution>[_<span>]_triples - <corpus>.csv`.
    pub fn save(&self, triples: &TripleTable, query: &TripleQuery) -> Result<PathBuf, AppError> {
        let file_name = triples_file_name(
            &query.illocution_label(),
            query.time_span.as_ref(),
            None,
            self.ctx.corpus_label(),
        );
        self.triple_repo.save(&file_name, triples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Triple;

    fn letter(s: &str, o: &str, illoc: &str, date: &str, dispatch: &str, receipt: &str) -> Letter {
        Letter {
            subject_name: s.to_string(),
            object_name: o.to_string(),
            illocution: illoc.to_string(),
            letter_date: date.to_string(),
            dispatch: dispatch.to_string(),
            receipt: receipt.to_string(),
        }
    }

    fn service(root: &std::path::Path) -> ExtractionService {
        let mut config = Config::default();
        config.output.root = root.to_path_buf();
        config.corpus.label = "Test".to_string();
        ExtractionService::new(&Context::new(config))
    }

    fn scenario() -> Vec<Letter> {
        vec![
            letter("A", "B", "illoc1", "1800-01-01", "Paris", "Paris"),
            letter("B", "A", "illoc1", "1800-02-01", "Paris", "London"),
        ]
    }

    #[test]
    fn test_combined_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let query = TripleQuery::new(vec!["A".to_string()]);
        let result = service(dir.path()).extract(&scenario(), &query).unwrap();

        let Extraction::Combined(table) = result else {
            panic!("expected combined extraction");
        };
        assert_eq!(
            table.rows,
            vec![Triple::new("A", "B", 1), Triple::new("B", "A", 1)]
        );
        assert!(table.iter().all(|t| t.weight == 0.1));
        // No file is written outside same-place mode
        assert!(!dir.path().join("network_degree").exists());
    }

    #[test]
    fn test_same_place_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let query = TripleQuery::new(vec!["A".to_string()])
            .illocutions(vec!["illoc1".to_string()])
            .same_place(true);
        let result = service(dir.path()).extract(&scenario(), &query).unwrap();

        let Extraction::ByPlace(places) = result else {
            panic!("expected per-place extraction");
        };
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place, "Paris");
        assert_eq!(places[0].triples.rows, vec![Triple::new("A", "B", 1)]);

        let expected = dir
            .path()
            .join("network_degree/illoc1_Paris_triples - Test.csv");
        assert_eq!(places[0].path, expected);
        let content = std::fs::read_to_string(expected).unwrap();
        assert_eq!(content, "subject_name;object_name;count;weight\nA;B;1;0.1\n");
    }

    #[test]
    fn test_same_place_partitions_by_place() {
        let dir = tempfile::tempdir().unwrap();
        let letters = vec![
            letter("A", "B", "x", "1800-01-01", "Jena", "Jena"),
            letter("A", "C", "x", "1800-01-02", "Berlin", "Berlin"),
            letter("C", "A", "x", "1800-01-03", "Jena", "Jena"),
            letter("A", "B", "x", "1800-01-04", "Jena", "Weimar"),
        ];
        let query = TripleQuery::new(vec!["A".to_string()]).same_place(true);
        let result = service(dir.path()).extract(&letters, &query).unwrap();

        let Extraction::ByPlace(ref places) = result else {
            panic!("expected per-place extraction");
        };
        let names: Vec<&str> = places.iter().map(|p| p.place.as_str()).collect();
        assert_eq!(names, vec!["Jena", "Berlin"]);
        assert_eq!(places[0].triples.len(), 2);
        assert_eq!(places[1].triples.rows, vec![Triple::new("A", "C", 1)]);
        assert_eq!(result.last_place(), Some(&places[1].triples));
        assert_eq!(result.total_rows(), 3);
        assert!(places.iter().all(|p| p.path.exists()));
    }

    #[test]
    fn test_time_span_bounds_included() {
        let letters = vec![
            letter("A", "B", "x", "1799-12-31", "P", "P"),
            letter("A", "B", "x", "1800-01-01", "P", "P"),
            letter("A", "C", "x", "1800-06-01", "P", "P"),
            letter("A", "D", "x", "1800-12-31", "P", "P"),
            letter("A", "E", "x", "1801-01-01", "P", "P"),
        ];
        let query = TripleQuery::new(vec!["A".to_string()])
            .time_span(Some("1800-01-01, 1800-12-31".parse().unwrap()));
        let selected = query.select(&letters);
        let dates: Vec<&str> = selected.iter().map(|l| l.letter_date.as_str()).collect();
        assert_eq!(dates, vec!["1800-01-01", "1800-06-01", "1800-12-31"]);
    }

    #[test]
    fn test_subject_matches_receiver_and_objects_are_ignored() {
        let letters = vec![
            letter("A", "B", "x", "1800-01-01", "P", "P"),
            letter("C", "A", "x", "1800-01-01", "P", "P"),
            letter("C", "D", "x", "1800-01-01", "P", "P"),
        ];
        let query = TripleQuery::new(vec!["A".to_string()]).objects(vec!["D".to_string()]);
        let selected = query.select(&letters);
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|l| l.involves_any(&["A".to_string()])));
    }

    #[test]
    fn test_illocution_filter() {
        let letters = vec![
            letter("A", "B", "request", "1800-01-01", "P", "P"),
            letter("A", "B", "report", "1800-01-01", "P", "P"),
            letter("A", "C", "thanks", "1800-01-01", "P", "P"),
        ];
        let query = TripleQuery::new(vec!["A".to_string()])
            .illocutions(vec!["request".to_string(), "thanks".to_string()]);
        assert_eq!(query.select(&letters).len(), 2);
        assert_eq!(query.illocution_label(), "request+thanks");
    }

    #[test]
    fn test_source_not_mutated() {
        let dir = tempfile::tempdir().unwrap();
        let letters = scenario();
        let before = letters.clone();
        let query = TripleQuery::new(vec!["A".to_string()]).same_place(true);
        service(dir.path()).extract(&letters, &query).unwrap();
        assert_eq!(letters, before);
    }

    #[test]
    fn test_empty_subjects_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = service(dir.path()).extract(&scenario(), &TripleQuery::default());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_save_combined_table() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());
        let query = TripleQuery::new(vec!["A".to_string()])
            .illocutions(vec!["illoc1".to_string()]);
        let table = match service.extract(&scenario(), &query).unwrap() {
            Extraction::Combined(table) => table,
            Extraction::ByPlace(_) => panic!("expected combined extraction"),
        };
        let path = service.save(&table, &query).unwrap();
        assert_eq!(
            path,
            dir.path().join("network_degree/illoc1_triples - Test.csv")
        );
        assert!(path.is_file());
    }

    #[test]
    fn test_triples_file_name() {
        let span: TimeSpan = "1800-01-01,1800-12-31".parse().unwrap();
        assert_eq!(
            triples_file_name("request", Some(&span), Some("Jena"), "Corpus"),
            "request_1800-01-01, 1800-12-31_Jena_triples - Corpus.csv"
        );
        assert_eq!(
            triples_file_name("request", None, None, "Corpus"),
            "request_triples - Corpus.csv"
        );
    }
}
