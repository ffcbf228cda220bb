//! End-to-end pipeline: letters -> triples -> degrees -> diagrams.
//!
//! Every test writes into its own temporary output root.

use std::path::Path;

use epistola::config::Config;
use epistola::context::Context;
use epistola::error::AppError;
use epistola::graph::Network;
use epistola::models::{DegreeDirection, Triple};
use epistola::repositories::{LetterRepository, TripleRepository};
use epistola::services::{
    DegreeService, Extraction, ExtractionService, NetworkService, TripleQuery,
};
use epistola::visualization::{EdgeStyle, EdgeWidth, FigureSize, NoViewer, RenderOptions};

const LETTERS: &str = "\
id;subject_name;object_name;illocution;letter_date;dispatch;receipt
1;A;B;request;1800-01-01;Jena;Jena
2;A;C;request;1800-03-01;Jena;Berlin
3;B;C;request;1800-04-01;Berlin;Berlin
4;C;A;report;1800-05-01;Berlin;Jena
5;A;B;request;1800-06-01;Jena;Jena
6;D;E;request;1800-07-01;Jena;Jena
";

fn context(root: &Path) -> Context {
    let mut config = Config::default();
    config.output.root = root.to_path_buf();
    config.corpus.label = "Test".to_string();
    config.render.dpi = 40;
    config.render.iterations = 20;
    Context::new(config)
}

fn options(illocution: &str) -> RenderOptions {
    let mut options = RenderOptions::new(illocution);
    options.figsize = FigureSize {
        width: 5.0,
        height: 4.0,
    };
    options
}

fn load_letters(root: &Path, ctx: &Context) -> Vec<epistola::models::Letter> {
    let path = root.join("letters.csv");
    std::fs::write(&path, LETTERS).unwrap();
    LetterRepository::new(ctx).unwrap().load(&path).unwrap()
}

#[test]
fn test_full_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    let letters = load_letters(dir.path(), &ctx);
    assert_eq!(letters.len(), 6);

    // Extract and persist the combined table
    let extraction = ExtractionService::new(&ctx);
    let query = TripleQuery::new(vec!["A".to_string(), "B".to_string()])
        .illocutions(vec!["request".to_string()]);
    let table = match extraction.extract(&letters, &query).unwrap() {
        Extraction::Combined(table) => table,
        Extraction::ByPlace(_) => panic!("expected combined extraction"),
    };
    assert_eq!(
        table.rows,
        vec![
            Triple::new("A", "B", 2),
            Triple::new("A", "C", 1),
            Triple::new("B", "C", 1),
        ]
    );
    let saved = extraction.save(&table, &query).unwrap();

    // Read it back as renderer input
    let reloaded = TripleRepository::new(&ctx).load(&saved).unwrap();
    assert_eq!(reloaded, table);

    // Degrees
    let report = DegreeService::new(&ctx)
        .calculate(&reloaded, "request")
        .unwrap();
    assert_eq!(report.rows, 3);
    assert_eq!(report.columns, 3);
    let degrees = std::fs::read_to_string(
        dir.path()
            .join("network_degree")
            .join("request_in_out_degree - Test.csv"),
    )
    .unwrap();
    assert_eq!(degrees, "Node;In-Degree;Out-Degree\nA;0;2\nB;1;1\nC;2;0\n");

    // Network diagram
    let networks = NetworkService::new(&ctx).with_viewer(NoViewer);
    let mut opts = options("request");
    opts.edge_style = EdgeStyle::Curved;
    opts.edge_width = EdgeWidth::Weight;
    let rendered = networks.render(&reloaded, &opts).unwrap();
    assert!(rendered.path.is_file());
    assert_eq!(rendered.network.node_count(), 3);

    // In-degree pruning removes A, then B, then C: nothing survives.
    let err = networks
        .render_degree_filtered(rendered.network, DegreeDirection::In, &opts)
        .unwrap_err();
    assert!(matches!(err, AppError::EmptyGraph(_)));
}

#[test]
fn test_same_place_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    let letters = load_letters(dir.path(), &ctx);

    let query = TripleQuery::new(vec!["A".to_string(), "B".to_string()]).same_place(true);
    let places = match ExtractionService::new(&ctx).extract(&letters, &query).unwrap() {
        Extraction::ByPlace(places) => places,
        Extraction::Combined(_) => panic!("expected per-place extraction"),
    };

    let names: Vec<&str> = places.iter().map(|p| p.place.as_str()).collect();
    assert_eq!(names, vec!["Jena", "Berlin"]);
    assert_eq!(places[0].triples.rows, vec![Triple::new("A", "B", 2)]);
    assert_eq!(places[1].triples.rows, vec![Triple::new("B", "C", 1)]);
    for place in &places {
        assert!(place.path.is_file());
    }
    assert!(dir
        .path()
        .join("network_degree")
        .join("all_Jena_triples - Test.csv")
        .is_file());

    let mut opts = options("all");
    opts.place = Some("Jena".to_string());
    let rendered = NetworkService::new(&ctx)
        .with_viewer(NoViewer)
        .render(&places[0].triples, &opts)
        .unwrap();
    assert_eq!(
        rendered.path,
        dir.path()
            .join("network_diagram")
            .join("Network of Illocution 'all' in Jena - Test.png")
    );
    assert!(rendered.path.is_file());
}

#[test]
fn test_out_degree_pipeline_keeps_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    let letters = load_letters(dir.path(), &ctx);

    let query = TripleQuery::new(vec!["A".to_string(), "C".to_string()]);
    let table = match ExtractionService::new(&ctx).extract(&letters, &query).unwrap() {
        Extraction::Combined(table) => table,
        Extraction::ByPlace(_) => panic!("expected combined extraction"),
    };

    let network = Network::from_triples(&table);
    let rendered = NetworkService::new(&ctx)
        .with_viewer(NoViewer)
        .render_degree_filtered(network, DegreeDirection::Out, &options("all"))
        .unwrap();

    // A -> B, A -> C, B -> C, C -> A: every node keeps an outgoing edge.
    assert_eq!(rendered.network.node_count(), 3);
    for name in rendered.network.names() {
        assert!(rendered.network.degree(name, DegreeDirection::Out).unwrap() >= 1);
    }
    assert_eq!(
        rendered.title,
        "Out-Degree Network of Illocution 'all' - Test"
    );
    assert!(rendered.path.is_file());
}

#[test]
fn test_missing_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, "subject_name;object_name\nA;B\n").unwrap();

    let err = LetterRepository::new(&ctx).unwrap().load(&path).unwrap_err();
    assert!(matches!(err, AppError::Csv(_)));
}
