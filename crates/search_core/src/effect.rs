use crate::Generation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run one aggregation cycle for `query`, tagged with its generation.
    FetchResults { generation: Generation, query: String },
    /// Drop any in-flight cycle; nothing older than `generation` may publish.
    CancelResults { generation: Generation },
    /// The page moved to a new location.
    Navigate { location: String },
    FetchJoke,
}
