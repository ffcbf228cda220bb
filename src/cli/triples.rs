//! Triples subcommand - extract triples from a letter table.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;

use crate::context::Context;
use crate::models::TimeSpan;
use crate::repositories::LetterRepository;
use crate::services::{Extraction, ExtractionService, TripleQuery};

/// Extract subject/object/count triples.
#[derive(Parser)]
pub struct TriplesCommand {
    /// Letter table (delimited, with a header line).
    #[arg(long)]
    pub letters: PathBuf,

    /// Persons to select; a letter matches if either party is listed.
    #[arg(long = "subject", required = true, num_args = 1..)]
    pub subjects: Vec<String>,

    /// Accepted for compatibility; does not filter.
    #[arg(long = "object", num_args = 1..)]
    pub objects: Vec<String>,

    /// Illocutions to keep (all when omitted).
    #[arg(long = "illocution", num_args = 1..)]
    pub illocutions: Vec<String>,

    /// Inclusive date range, "start,end".
    #[arg(long, value_parser = parse_time_span)]
    pub time_span: Option<TimeSpan>,

    /// Only letters sent and received at the same place, one table per place.
    #[arg(long)]
    pub same_place: bool,

    /// Also write the combined table to the degree directory.
    #[arg(long)]
    pub save: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

pub(crate) fn parse_time_span(value: &str) -> std::result::Result<TimeSpan, String> {
    value.parse().map_err(|e: crate::error::AppError| e.to_string())
}

impl TriplesCommand {
    /// Run the triples command.
    pub fn run(self, ctx: &Context) -> Result<()> {
        let letters = LetterRepository::new(ctx)?.load(&self.letters)?;

        let query = TripleQuery::new(self.subjects)
            .objects(self.objects)
            .illocutions(self.illocutions)
            .time_span(self.time_span)
            .same_place(self.same_place);

        let service = ExtractionService::new(ctx);
        let extraction = service.extract(&letters, &query)?;

        if self.save {
            if let Extraction::Combined(table) = &extraction {
                let path = service.save(table, &query)?;
                println!("Saved {} triples to {}", table.len(), path.display());
            }
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&extraction)?);
            return Ok(());
        }

        match &extraction {
            Extraction::Combined(table) => {
                for t in table {
                    println!("{};{};{};{}", t.subject_name, t.object_name, t.count, t.weight);
                }
                println!("{} triples", table.len());
            }
            Extraction::ByPlace(places) => {
                for place in places {
                    println!(
                        "{}: {} triples -> {}",
                        place.place,
                        place.triples.len(),
                        place.path.display()
                    );
                }
                println!(
                    "{} places, {} triples",
                    places.len(),
                    extraction.total_rows()
                );
            }
        }
        Ok(())
    }
}
