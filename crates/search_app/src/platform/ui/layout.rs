//! Static page chrome: navigation bar, logo/search box and footer.

use super::constants::*;

pub fn rule() -> String {
    "-".repeat(PAGE_WIDTH)
}

/// `About  Store` on the left, `Gmail` pushed to the right edge.
pub fn nav_bar() -> Vec<String> {
    let (start, end) = NAV_LINKS.split_at(NAV_LINKS.len() - 1);
    let left = start
        .iter()
        .map(|(label, _)| *label)
        .collect::<Vec<_>>()
        .join("  ");
    let right = end
        .iter()
        .map(|(label, _)| *label)
        .collect::<Vec<_>>()
        .join("  ");
    let gap = PAGE_WIDTH.saturating_sub(left.len() + right.len()).max(1);
    vec![format!("{left}{}{right}", " ".repeat(gap)), rule()]
}

pub fn logo_box(input: &str, location: &str) -> Vec<String> {
    let field = if input.is_empty() {
        SEARCH_PLACEHOLDER
    } else {
        input
    };
    let field_width = PAGE_WIDTH.saturating_sub(16);
    vec![
        centered(LOGO_TEXT),
        format!("  [ {field:<field_width$} ] (Search)"),
        format!("  location: {location}"),
    ]
}

pub fn footer() -> Vec<String> {
    vec![rule(), FOOTER_TEXT.to_string()]
}

fn centered(text: &str) -> String {
    let pad = PAGE_WIDTH.saturating_sub(text.chars().count()) / 2;
    format!("{}{text}", " ".repeat(pad))
}
