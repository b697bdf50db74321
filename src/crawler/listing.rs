//! Listing-page parsing and exam filtering
//!
//! A listing page carries one `a.discussion-link` anchor per discussion. The
//! absence of any such anchor is the site's "no more pages" signal, which the
//! coordinator distinguishes from a fetch failure (the latter is an `Err`
//! before parsing ever happens).

use scraper::{ElementRef, Html, Selector};

/// A single discussion entry discovered on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Anchor text, whitespace-stripped and lower-cased
    pub title: String,

    /// Relative link to the discussion detail page
    pub href: String,
}

/// Extracts discussion entries from a listing page
///
/// Anchors without an `href` attribute are skipped. An empty result means the
/// pagination has run out.
pub fn parse_listing(html: &str) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);
    let mut entries = Vec::new();

    if let Ok(selector) = Selector::parse("a.discussion-link") {
        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            entries.push(ListingEntry {
                title: stripped_text(element).to_lowercase(),
                href: href.to_string(),
            });
        }
    }

    entries
}

/// Returns true iff the entry title belongs to the requested exam
///
/// Deliberately loose: a case-insensitive substring test. Exams whose
/// identifiers are substrings of one another (e.g. "az-104" and "az-1040")
/// will cross-match; that limitation is accepted.
pub fn matches_exam(title: &str, exam_id: &str) -> bool {
    title.contains(&exam_id.to_lowercase())
}

/// Collects an element's text with each fragment trimmed and empties dropped
pub(crate) fn stripped_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}
