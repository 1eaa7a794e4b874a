use crate::{Joke, NormalizedResult, SourceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsHeader {
    pub query: String,
    pub total: usize,
}

/// What the results area shows. Loading carries no header on purpose: nothing
/// but the indicator is drawn until the cycle settles.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsBody {
    /// Home page; no results area.
    #[default]
    Hidden,
    Loading,
    NoQuery,
    NoResults {
        header: ResultsHeader,
    },
    Items {
        header: ResultsHeader,
        rows: Vec<ResultRowView>,
    },
}

impl ResultsBody {
    pub fn header(&self) -> Option<&ResultsHeader> {
        match self {
            ResultsBody::NoResults { header } | ResultsBody::Items { header, .. } => Some(header),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRowView {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub source_type: SourceType,
    pub tag: &'static str,
    pub score: Option<f64>,
}

impl ResultRowView {
    pub(crate) fn from_result(result: &NormalizedResult) -> Self {
        Self {
            title: result.title.clone(),
            url: result.url.clone(),
            snippet: result.snippet.clone(),
            source_type: result.source_type,
            tag: result.source_type.label(),
            score: result.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JokePanel {
    pub joke: Option<Joke>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub page: Page,
    pub input: String,
    pub location: String,
    pub body: ResultsBody,
    pub joke: JokePanel,
    pub dirty: bool,
}
