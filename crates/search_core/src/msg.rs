#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the search box.
    InputChanged(String),
    /// User submitted the search box.
    QuerySubmitted,
    /// A location was opened directly (bookmark, reload, `--location`).
    LocationOpened(String),
    /// User went back to the home page.
    HomeRequested,
    /// Engine finished an aggregation cycle.
    ResultsReady {
        generation: crate::Generation,
        items: Vec<crate::NormalizedResult>,
    },
    /// User asked for a fresh joke.
    JokeRequested,
    /// Engine finished fetching a joke; `None` when the fetch failed.
    JokeLoaded(Option<crate::Joke>),
}
