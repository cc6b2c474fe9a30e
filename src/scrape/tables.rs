use anyhow::Result;
use scraper::{ElementRef, Selector};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Invalid selector '{}': {:?}", css, e))
}

/// Concatenated text of an element and its descendants
pub fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// Trim and collapse runs of two spaces once, as header and schedule
/// cells are compared by these strings
pub fn normalize_text(text: &str) -> String {
    text.trim().replace("  ", " ")
}

/// Normalized `thead th` texts of a table
pub fn header_columns(table: ElementRef) -> Result<Vec<String>> {
    let thead = selector("thead")?;
    let th = selector("th")?;

    Ok(table
        .select(&thead)
        .next()
        .map(|head| {
            head.select(&th)
                .map(|cell| normalize_text(&element_text(cell)))
                .collect()
        })
        .unwrap_or_default())
}

/// `tbody tr` rows of a table
pub fn body_rows<'a>(table: ElementRef<'a>) -> Result<Vec<ElementRef<'a>>> {
    let tbody = selector("tbody")?;
    let tr = selector("tr")?;

    Ok(table
        .select(&tbody)
        .next()
        .map(|body| body.select(&tr).collect())
        .unwrap_or_default())
}
