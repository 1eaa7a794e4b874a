use crate::{AppState, Effect, Msg, Route};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::QuerySubmitted => {
            let query = state.input().to_string();
            start_cycle(&mut state, &query)
        }
        Msg::LocationOpened(location) => match Route::parse(&location) {
            Route::Results { query } => {
                state.set_input(query.clone());
                start_cycle(&mut state, &query)
            }
            Route::Home => leave_results(&mut state),
        },
        Msg::HomeRequested => leave_results(&mut state),
        Msg::ResultsReady { generation, items } => {
            // A superseded cycle must never overwrite the current one.
            state.commit(generation, items);
            Vec::new()
        }
        Msg::JokeRequested => {
            if state.request_joke() {
                vec![Effect::FetchJoke]
            } else {
                Vec::new()
            }
        }
        Msg::JokeLoaded(joke) => {
            state.apply_joke(joke);
            Vec::new()
        }
    };

    (state, effects)
}

fn start_cycle(state: &mut AppState, query: &str) -> Vec<Effect> {
    let next = state.begin_cycle(query);
    let mut effects = vec![Effect::Navigate {
        location: state.route().location(),
    }];
    match next {
        Some(generation) => effects.push(Effect::FetchResults {
            generation,
            query: query.trim().to_string(),
        }),
        None => effects.push(Effect::CancelResults {
            generation: state.generation(),
        }),
    }
    effects
}

fn leave_results(state: &mut AppState) -> Vec<Effect> {
    if *state.route() == Route::Home {
        return Vec::new();
    }
    let generation = state.go_home();
    vec![
        Effect::CancelResults { generation },
        Effect::Navigate {
            location: state.route().location(),
        },
    ]
}
