/// Marker in a result URL whose results sit on the second tab
const SECOND_TAB_MARKER: &str = "freestyle-relay";

/// Schedule-and-results page of one sport
pub fn schedule_url(base_url: &str, games: &str, sport: &str) -> String {
    format!(
        "{}/{}/olympic-games/en/results/{}/olympic-schedule-and-results.htm",
        base_url.trim_end_matches('/'),
        games,
        sport
    )
}

/// Key of a schedule page in the schedule cache
pub fn schedule_cache_key(sport: &str, games: &str) -> String {
    format!("{}_{}", sport, games)
}

/// Segments of the directory holding `page_url` (the URL split on `/`
/// without its last segment)
pub fn directory_segments(page_url: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = page_url.split('/').collect();
    segments.pop();
    segments
}

/// Resolve a link made of leading `../` steps against directory segments.
///
/// Each `../` pops one trailing segment. Only `../` prefixes are
/// understood; `./` or absolute links are joined as if they were plain
/// relative paths.
pub fn resolve_relative(href: &str, segments: &[&str]) -> String {
    let mut rest = href;
    let mut ups = 0;
    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
        ups += 1;
    }

    let keep = segments.len().saturating_sub(ups);
    format!("{}/{}", segments[..keep].join("/"), rest)
}

/// Append the result-tab fragment the page opens on
pub fn with_result_tab(url: &str) -> String {
    format!("{}#result-tab-{}", url, result_tab(url))
}

fn result_tab(url: &str) -> u8 {
    if url.contains(SECOND_TAB_MARKER) { 2 } else { 1 }
}
