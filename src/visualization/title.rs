//! Diagram titles and their PNG file names.

use crate::models::{DegreeDirection, TimeSpan};
use crate::repositories::sanitize_file_component;

/// Parts a diagram title is composed from.
#[derive(Debug, Clone, Default)]
pub struct TitleParts<'a> {
    pub illocution: &'a str,
    pub time_span: Option<&'a TimeSpan>,
    pub place: Option<&'a str>,
    /// Count threshold, shown as "without weight N".
    pub filter: Option<u32>,
    pub corpus_label: &'a str,
}

impl TitleParts<'_> {
    /// `Network of Illocution '<i>'[ between X and Y][ in P][ without weight N] - <corpus>`
    pub fn network_title(&self) -> String {
        let mut title = format!("Network of Illocution '{}'", self.illocution);
        self.push_qualifiers(&mut title);
        if let Some(filter) = self.filter.filter(|f| *f > 0) {
            title.push_str(&format!(" without weight {}", filter));
        }
        self.push_corpus(&mut title);
        title
    }

    /// `<In|Out>-Degree Network of Illocution '<i>'[ between X and Y][ in P] - <corpus>`
    pub fn degree_title(&self, direction: DegreeDirection) -> String {
        let mut title = format!(
            "{} Network of Illocution '{}'",
            direction.label(),
            self.illocution
        );
        self.push_qualifiers(&mut title);
        self.push_corpus(&mut title);
        title
    }

    fn push_qualifiers(&self, title: &mut String) {
        if let Some(span) = self.time_span {
            title.push_str(&format!(" between {}", span.title_label()));
        }
        if let Some(place) = self.place.filter(|p| !p.is_empty()) {
            title.push_str(&format!(" in {}", place));
        }
    }

    fn push_corpus(&self, title: &mut String) {
        if !self.corpus_label.is_empty() {
            title.push_str(&format!(" - {}", self.corpus_label));
        }
    }
}

/// PNG file name for a title.
pub fn png_file_name(title: &str) -> String {
    format!("{}.png", sanitize_file_component(title))
}
