use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::error::ExtractError;

/// One element of an API response: tag name, attributes and the text
/// directly inside it.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub text: String,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Flat, document-ordered view of an `api.php?format=xml` response.
///
/// The query responses are shallow (`api/query/pages/page/...`), so nesting is
/// not kept: every element is recorded once, in the order its start tag
/// appears, and text is attached to the innermost open element.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn parse(xml: &str) -> Result<Self, ExtractError> {
        let mut reader = Reader::from_str(xml);
        let mut elements = Vec::new();
        // indices into `elements` of currently open tags
        let mut open: Vec<usize> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    elements.push(read_element(&e)?);
                    open.push(elements.len() - 1);
                }
                Ok(Event::Empty(e)) => {
                    elements.push(read_element(&e)?);
                }
                Ok(Event::Text(e)) => {
                    if let Some(&idx) = open.last() {
                        let text = e.unescape().map_err(|e| ExtractError::Xml(e.to_string()))?;
                        elements[idx].text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(&idx) = open.last() {
                        elements[idx].text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::End(_)) => {
                    open.pop();
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(ExtractError::Xml(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(Document { elements })
    }

    /// All elements with the given tag name, in document order.
    pub fn elements_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |e| e.name == tag)
    }

    pub fn first(&self, tag: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == tag)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

fn read_element(start: &BytesStart) -> Result<Element, ExtractError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ExtractError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| ExtractError::Xml(e.to_string()))?
            .to_string();
        attrs.push((key, value));
    }
    Ok(Element {
        name,
        attrs,
        text: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_and_text() {
        let doc = Document::parse(
            r#"<api><query><pages><page ns="0" title="Mark Twain"><langlinks><ll lang="fr">Mark Twain (fr)</ll></langlinks></page></pages></query></api>"#,
        )
        .unwrap();
        assert_eq!(doc.first("page").and_then(|p| p.attr("title")), Some("Mark Twain"));
        let ll = doc.first("ll").unwrap();
        assert_eq!(ll.attr("lang"), Some("fr"));
        assert_eq!(ll.text, "Mark Twain (fr)");
    }

    #[test]
    fn empty_elements_are_recorded() {
        let doc = Document::parse(r#"<categories><cl ns="14" title="Category:Humor" /><cl ns="14" title="Category:Authors"/></categories>"#).unwrap();
        let titles: Vec<_> = doc.elements_by_tag("cl").filter_map(|e| e.attr("title")).collect();
        assert_eq!(titles, vec!["Category:Humor", "Category:Authors"]);
    }

    #[test]
    fn entities_unescaped() {
        let doc = Document::parse(r#"<rev a="x &amp; y">&lt;br&gt; &quot;hi&quot;</rev>"#).unwrap();
        let rev = doc.first("rev").unwrap();
        assert_eq!(rev.attr("a"), Some("x & y"));
        assert_eq!(rev.text, "<br> \"hi\"");
    }

    #[test]
    fn multiline_text_preserved() {
        let doc = Document::parse("<rev>line one\n* line two\n</rev>").unwrap();
        assert_eq!(doc.first("rev").unwrap().text, "line one\n* line two\n");
    }

    #[test]
    fn broken_xml_is_an_error() {
        assert!(matches!(Document::parse("<api><page></api>"), Err(ExtractError::Xml(_))));
    }
}
