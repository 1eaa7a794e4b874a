use crate::view_model::{AppViewModel, JokePanel, Page, ResultRowView, ResultsBody, ResultsHeader};
use crate::{NormalizedResult, Route};

/// Identifies one aggregation cycle. Only the latest generation may publish.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregationOutcome {
    pub items: Vec<NormalizedResult>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Joke {
    pub setup: String,
    pub punchline: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    input: String,
    route: Route,
    generation: Generation,
    phase: Phase,
    outcome: AggregationOutcome,
    joke: Option<Joke>,
    joke_pending: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> &AggregationOutcome {
        &self.outcome
    }

    pub fn joke_pending(&self) -> bool {
        self.joke_pending
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.dirty = true;
        }
    }

    /// Moves to the results page for `query` and opens a new cycle.
    ///
    /// Returns the new generation when a fetch is needed, `None` for an empty
    /// query, which settles immediately with no items.
    pub(crate) fn begin_cycle(&mut self, query: &str) -> Option<Generation> {
        let query = query.trim();
        self.route = Route::results(query);
        self.generation += 1;
        self.dirty = true;
        if query.is_empty() {
            self.phase = Phase::Ready;
            self.outcome = AggregationOutcome::default();
            return None;
        }
        self.phase = Phase::Loading;
        self.outcome = AggregationOutcome {
            items: Vec::new(),
            loading: true,
        };
        Some(self.generation)
    }

    /// Leaves the results page. Bumps the generation so late results are dropped.
    pub(crate) fn go_home(&mut self) -> Generation {
        self.route = Route::Home;
        self.generation += 1;
        self.phase = Phase::Idle;
        self.outcome = AggregationOutcome::default();
        self.dirty = true;
        self.generation
    }

    /// Publishes a finished cycle. Stale generations are ignored.
    pub(crate) fn commit(&mut self, generation: Generation, items: Vec<NormalizedResult>) -> bool {
        if generation != self.generation || self.phase != Phase::Loading {
            return false;
        }
        self.phase = Phase::Ready;
        self.outcome = AggregationOutcome {
            items,
            loading: false,
        };
        self.dirty = true;
        true
    }

    /// Marks a joke fetch as pending. Returns false if one is already running.
    pub(crate) fn request_joke(&mut self) -> bool {
        if self.joke_pending {
            return false;
        }
        self.joke_pending = true;
        self.dirty = true;
        true
    }

    pub(crate) fn apply_joke(&mut self, joke: Option<Joke>) {
        self.joke_pending = false;
        if let Some(joke) = joke {
            self.joke = Some(joke);
        }
        self.dirty = true;
    }

    pub fn view(&self) -> AppViewModel {
        let page = match self.route {
            Route::Home => Page::Home,
            Route::Results { .. } => Page::Results,
        };
        AppViewModel {
            page,
            input: self.input.clone(),
            location: self.route.location(),
            body: self.results_body(),
            joke: JokePanel {
                joke: self.joke.clone(),
                loading: self.joke_pending,
            },
            dirty: self.dirty,
        }
    }

    fn results_body(&self) -> ResultsBody {
        let query = match &self.route {
            Route::Home => return ResultsBody::Hidden,
            Route::Results { query } => query,
        };
        if self.outcome.loading {
            return ResultsBody::Loading;
        }
        if query.is_empty() {
            return ResultsBody::NoQuery;
        }
        let header = ResultsHeader {
            query: query.clone(),
            total: self.outcome.items.len(),
        };
        if self.outcome.items.is_empty() {
            return ResultsBody::NoResults { header };
        }
        let rows = self
            .outcome
            .items
            .iter()
            .map(ResultRowView::from_result)
            .collect();
        ResultsBody::Items { header, rows }
    }
}
