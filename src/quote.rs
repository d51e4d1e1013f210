use std::sync::Arc;

use quick_xml::escape::escape;
use serde::Serialize;

/// One quotation pulled from a page.
///
/// `categories` is a page-level property: every quote from the same page
/// holds a clone of the same `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    id: usize,
    author: String,
    categories: Arc<[String]>,
    quote: String,
    reference: String,
}

/// Flat form shared by the JSON output: categories are pipe-joined like the
/// XML `cats` attribute.
#[derive(Debug, Serialize)]
pub struct QuoteRecord<'a> {
    pub id: usize,
    pub author: &'a str,
    pub cats: String,
    #[serde(rename = "ref")]
    pub reference: &'a str,
    pub quote: &'a str,
}

impl Quote {
    pub fn new(id: usize, quote: String, author: String, categories: Arc<[String]>) -> Self {
        Quote {
            id,
            author,
            categories,
            quote,
            reference: String::new(),
        }
    }

    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.reference = reference.into();
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    #[cfg(test)]
    pub fn categories(&self) -> &Arc<[String]> {
        &self.categories
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn joined_categories(&self) -> String {
        self.categories.join("|")
    }

    /// `<quote id=".." author=".." cats=".." ref="..">text</quote>`
    pub fn to_xml(&self) -> String {
        format!(
            r#"<quote id="{}" author="{}" cats="{}" ref="{}">{}</quote>"#,
            self.id,
            escape_attr(&self.author),
            escape_attr(&self.joined_categories()),
            escape_attr(&self.reference),
            escape(self.quote.as_str()),
        )
    }

    pub fn record(&self) -> QuoteRecord<'_> {
        QuoteRecord {
            id: self.id,
            author: &self.author,
            cats: self.joined_categories(),
            reference: &self.reference,
            quote: &self.quote,
        }
    }

    /// `{"id":..,"author":..,"cats":..,"ref":..,"quote":..}`, unescaped.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.record())
    }
}

/// Attribute values also keep their whitespace characters as character
/// references; a parser would otherwise normalize them to spaces.
fn escape_attr(value: &str) -> String {
    escape(value)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::document::Document;

    fn cats(names: &[&str]) -> Arc<[String]> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn xml_shape() {
        let q = Quote::new(0, "Hi".into(), "Mark Twain".into(), cats(&["Humor", "Authors"]));
        assert_eq!(
            q.to_xml(),
            r#"<quote id="0" author="Mark Twain" cats="Humor|Authors" ref="">Hi</quote>"#
        );
    }

    #[test]
    fn xml_escapes_markup() {
        let mut q = Quote::new(3, "a < b & \"c\"".into(), "Tom & Jerry".into(), cats(&["A&B"]));
        q.set_reference("<ref>");
        let xml = q.to_xml();
        assert!(xml.contains(r#"author="Tom &amp; Jerry""#));
        assert!(xml.contains(r#"cats="A&amp;B""#));
        assert!(xml.contains(r#"ref="&lt;ref&gt;""#));
        assert!(xml.contains("a &lt; b &amp; &quot;c&quot;"));
    }

    #[test]
    fn xml_round_trip() {
        let shared = cats(&["Humor", "People & places"]);
        let mut second = Quote::new(1, "Line one\n~ \"two\" <b> & 'three'".into(), "Mark Twain".into(), shared.clone());
        second.set_reference("Letter, 1880 <p. 2>");
        let quotes = vec![
            Quote::new(0, "Plain text.".into(), "Mark Twain".into(), shared.clone()),
            second,
        ];
        let body: String = quotes.iter().map(Quote::to_xml).collect();
        let doc = Document::parse(&format!("<quotes>{}</quotes>", body)).unwrap();

        let parsed: Vec<_> = doc.elements_by_tag("quote").collect();
        assert_eq!(parsed.len(), quotes.len());
        for (el, q) in parsed.iter().zip(&quotes) {
            assert_eq!(el.attr("id"), Some(q.id().to_string().as_str()));
            assert_eq!(el.attr("author"), Some(q.author()));
            assert_eq!(el.attr("cats"), Some(q.joined_categories().as_str()));
            assert_eq!(el.attr("ref"), Some(q.reference()));
            assert_eq!(el.text, q.quote());
        }
    }

    #[test]
    fn attribute_whitespace_as_char_refs() {
        let mut q = Quote::new(0, "Quote".into(), "Mark\tTwain".into(), cats(&["A"]));
        q.set_reference("Letter, 1880\npage 2\r");
        let xml = q.to_xml();
        assert!(xml.contains(r#"ref="Letter, 1880&#10;page 2&#13;""#));
        assert!(xml.contains(r#"author="Mark&#9;Twain""#));
        assert!(!xml.contains('\n'));

        let doc = Document::parse(&xml).unwrap();
        let el = doc.first("quote").unwrap();
        assert_eq!(el.attr("ref"), Some(q.reference()));
        assert_eq!(el.attr("author"), Some(q.author()));
    }

    #[test]
    fn json_fields_unescaped() {
        let mut q = Quote::new(7, "x < y".into(), "Tom & Jerry".into(), cats(&["A", "B"]));
        q.set_reference("ref & more");
        let json = q.to_json().unwrap();
        assert!(json.starts_with(r#"{"id":7,"author":"Tom & Jerry","cats":"A|B","ref":"#));
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["author"], "Tom & Jerry");
        assert_eq!(v["cats"], "A|B");
        assert_eq!(v["ref"], "ref & more");
        assert_eq!(v["quote"], "x < y");
    }

    #[test]
    fn categories_shared() {
        let shared = cats(&["Humor"]);
        let a = Quote::new(0, "a".into(), "X".into(), shared.clone());
        let b = Quote::new(1, "b".into(), "X".into(), shared.clone());
        assert!(Arc::ptr_eq(a.categories(), b.categories()));
    }
}
