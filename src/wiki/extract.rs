use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, trace};

use super::cleaner::clean_line;
use super::document::Document;
use super::error::ExtractError;
use super::marker::{is_stop_marker, recognize, source_note};
use crate::quote::Quote;

/// ISO language code -> page title in that language.
pub type LanguageMap = BTreeMap<String, String>;

/// Categories only useful to wiki maintainers.
pub const CATEGORY_DENYLIST: &[&str] = &[
    "People cleanup",
    "Pages with inadequate citations",
    "Pages with broken file links",
    "Articles with unsourced statements",
];

/// Category names from a `prop=categories` response, namespace prefix
/// stripped, source order kept.
pub fn parse_categories(doc: &Document, tag: &str) -> Result<Vec<String>, ExtractError> {
    let mut categories = Vec::new();

    for el in doc.elements_by_tag(tag) {
        let title = el.attr("title").ok_or_else(|| ExtractError::MissingAttribute {
            tag: tag.to_string(),
            attr: "title".to_string(),
        })?;
        let (_, name) = title
            .split_once(':')
            .ok_or_else(|| ExtractError::MalformedCategory(title.to_string()))?;

        if CATEGORY_DENYLIST.contains(&name) {
            debug!("Skipping maintenance category {}", name);
            continue;
        }
        categories.push(name.to_string());
    }

    Ok(categories)
}

/// Language links from a `prop=langlinks` response.
pub fn parse_languages(doc: &Document, tag: &str) -> LanguageMap {
    let mut languages = LanguageMap::new();

    for el in doc.elements_by_tag(tag) {
        match el.attr("lang") {
            Some(lang) => {
                languages.insert(lang.to_string(), el.text.clone());
            }
            None => debug!("<{}> without lang attribute: {:?}", tag, el.text),
        }
    }

    languages
}

/// Quotes from a `prop=revisions&rvprop=content` response.
///
/// The author is the `title` of the first `title_tag` element; the wikitext
/// is the text of the first `quote_tag` element. The first `**` line under a
/// quote becomes its reference. Collection stops at the first
/// misattributed/disputed template.
pub fn parse_quote_page(
    doc: &Document,
    quote_tag: &str,
    categories: Arc<[String]>,
    title_tag: &str,
) -> Result<Vec<Quote>, ExtractError> {
    let author = doc
        .first(title_tag)
        .ok_or_else(|| ExtractError::MissingElement(title_tag.to_string()))?
        .attr("title")
        .ok_or_else(|| ExtractError::MissingAttribute {
            tag: title_tag.to_string(),
            attr: "title".to_string(),
        })?
        .to_string();

    let body = &doc
        .first(quote_tag)
        .ok_or_else(|| ExtractError::MissingElement(quote_tag.to_string()))?
        .text;

    let mut quotes = Vec::new();

    for line in body.split('\n') {
        if let Some((marker, text)) = recognize(line) {
            let quote = Quote::new(
                quotes.len(),
                clean_line(text),
                author.clone(),
                Arc::clone(&categories),
            );
            trace!(?marker, id = quote.id(), "{:?}", quote.quote());
            quotes.push(quote);
        } else if let Some(note) = source_note(line) {
            if let Some(last) = quotes.last_mut().filter(|q| q.reference().is_empty()) {
                last.set_reference(clean_line(note));
            }
        }

        if is_stop_marker(line) {
            debug!("Stopping at {:?} after {} quotes", line, quotes.len());
            break;
        }
    }

    Ok(quotes)
}
