pub const PAGE_WIDTH: usize = 72;

pub const NAV_LINKS: [(&str, &str); 3] = [
    ("About", "https://about.google/"),
    ("Store", "https://store.google.com/us/"),
    ("Gmail", "https://mail.google.com/mail/u/0/#inbox"),
];

pub const LOGO_TEXT: &str = "S e a r c h";
pub const SEARCH_PLACEHOLDER: &str = "Search...";
pub const LOADING_TEXT: &str = "Loading...";
pub const NO_QUERY_TEXT: &str = "Enter a query to search.";
pub const NO_RESULTS_TEXT: &str = "No results found.";
pub const JOKE_LOADING_TEXT: &str = "Fetching a joke...";
pub const JOKE_EMPTY_TEXT: &str = "No joke today.";
pub const FOOTER_TEXT: &str = "Type a query and press Enter.  :open <location>  :home  :joke  :help  :quit";
