use url::Url;

pub const RESULTS_PATH: &str = "/results";

/// Page locations are parsed relative to this origin; only path and query matter.
const LOCAL_ORIGIN: &str = "http://search.local/";

/// Which page is showing. The results page carries its query in the location
/// so it can be bookmarked and reopened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Results { query: String },
}

impl Route {
    pub fn results(query: impl Into<String>) -> Self {
        Route::Results {
            query: query.into(),
        }
    }

    /// Parses `/results?q=...` (relative or absolute). Anything else is home.
    ///
    /// A results location without `q` yields an empty query.
    pub fn parse(location: &str) -> Self {
        let base = match Url::parse(LOCAL_ORIGIN) {
            Ok(base) => base,
            Err(_) => return Route::Home,
        };
        let Ok(url) = base.join(location.trim()) else {
            return Route::Home;
        };
        if url.path().trim_end_matches('/') != RESULTS_PATH {
            return Route::Home;
        }
        let query = url
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();
        Route::Results { query }
    }

    pub fn location(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Results { query } => {
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("q", query)
                    .finish();
                format!("{RESULTS_PATH}?{encoded}")
            }
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            Route::Home => None,
            Route::Results { query } => Some(query),
        }
    }
}
