//! Search core: pure page state machine, result model and view-model helpers.
mod effect;
mod msg;
mod result;
mod route;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use result::{merge_by_priority, NormalizedResult, ParseSourceTypeError, SourceType};
pub use route::{Route, RESULTS_PATH};
pub use state::{AggregationOutcome, AppState, Generation, Joke, Phase};
pub use update::update;
pub use view_model::{AppViewModel, JokePanel, Page, ResultRowView, ResultsBody, ResultsHeader};
