// src/report.rs
// =============================================================================
// Turns the final ledger into the report the user sees.
//
// Pages are ranked by reference count (most referenced first), ties broken
// alphabetically by URL so the output is stable from run to run.
//
// Runs once, after the crawl has finished, on a plain Vec. No locks here.
// =============================================================================

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCount {
    pub url: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub base_url: &'a str,
    pub pages: &'a [PageCount],
}

// Sorts ledger entries: count descending, then URL ascending
pub fn sort_pages(pages: Vec<(String, usize)>) -> Vec<PageCount> {
    let mut sorted: Vec<PageCount> = pages
        .into_iter()
        .map(|(url, count)| PageCount { url, count })
        .collect();

    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.url.cmp(&b.url)));
    sorted
}

// Renders the plain-text report
//
// Example:
//   =============================
//     REPORT for https://a.com
//   =============================
//
//   Found 5 internal links to a.com/z
pub fn render_text(base_url: &str, pages: &[PageCount]) -> String {
    let mut out = String::new();
    out.push_str("=============================\n");
    out.push_str(&format!("  REPORT for {}\n", base_url));
    out.push_str("=============================\n");
    out.push('\n');

    for page in pages {
        out.push_str(&format!(
            "Found {} internal links to {}\n",
            page.count, page.url
        ));
    }

    out
}

pub fn render_json(base_url: &str, pages: &[PageCount]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Report { base_url, pages })
}
