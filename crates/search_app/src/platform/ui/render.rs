use chrono::NaiveDate;
use search_core::{AppViewModel, JokePanel, ResultRowView, ResultsBody, ResultsHeader};

use super::constants::*;
use super::layout;

/// Renders the whole page as text lines.
pub fn render(view: &AppViewModel, today: NaiveDate, show_joke: bool) -> Vec<String> {
    let mut lines = layout::nav_bar();
    lines.extend(layout::logo_box(&view.input, &view.location));
    lines.push(layout::rule());
    lines.extend(render_results(&view.body));
    if show_joke {
        lines.push(layout::rule());
        lines.extend(render_joke(&view.joke, today));
    }
    lines.extend(layout::footer());
    lines
}

/// Renders only the results area. Empty for the home page.
pub fn render_results(body: &ResultsBody) -> Vec<String> {
    match body {
        ResultsBody::Hidden => Vec::new(),
        ResultsBody::Loading => vec![LOADING_TEXT.to_string()],
        ResultsBody::NoQuery => vec![NO_QUERY_TEXT.to_string()],
        ResultsBody::NoResults { header } => {
            vec![format_header(header), String::new(), NO_RESULTS_TEXT.to_string()]
        }
        ResultsBody::Items { header, rows } => {
            let mut lines = vec![format_header(header)];
            for row in rows {
                lines.push(String::new());
                lines.extend(format_row(row));
            }
            lines
        }
    }
}

fn format_header(header: &ResultsHeader) -> String {
    format!("Results for \"{}\" ({} total)", header.query, header.total)
}

fn format_row(row: &ResultRowView) -> Vec<String> {
    let title = match row.score {
        Some(score) => format!("  [{}] {} (score {score:.2})", row.tag, row.title),
        None => format!("  [{}] {}", row.tag, row.title),
    };
    let mut lines = vec![title];
    if !row.url.is_empty() {
        lines.push(format!("      {}", row.url));
    }
    if !row.snippet.is_empty() {
        lines.push(format!("      {}", row.snippet));
    }
    lines
}

fn render_joke(panel: &JokePanel, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![format!("Joke of the Day ({}):", today.format("%Y-%m-%d"))];
    match (&panel.joke, panel.loading) {
        (Some(joke), _) => {
            lines.push(format!("  {}", joke.setup));
            lines.push(format!("  {}", joke.punchline));
        }
        (None, true) => lines.push(format!("  {JOKE_LOADING_TEXT}")),
        (None, false) => lines.push(format!("  {JOKE_EMPTY_TEXT}")),
    }
    lines
}
