use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use quick_xml::escape::escape;

use crate::config::Format;
use crate::quote::Quote;

pub const XML_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const XML_ROOT_BTM: &str = "</quotes>";

/// Where a page's document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Console,
    /// Created or truncated.
    File(PathBuf),
}

/// `<quotes>` or `<quotes languages="en|fr">`.
fn root_open(languages: Option<&[&str]>) -> String {
    match languages {
        Some(langs) => format!(r#"<quotes languages="{}">"#, escape(langs.join("|").as_str())),
        None => "<quotes>".to_string(),
    }
}

pub fn render_xml(quotes: &[Quote], languages: Option<&[&str]>) -> String {
    let mut out = String::from(XML_HEAD);
    out.push_str(&root_open(languages));
    for q in quotes {
        out.push_str(&q.to_xml());
    }
    out.push_str(XML_ROOT_BTM);
    out
}

pub fn render_json(quotes: &[Quote]) -> Result<String> {
    let records: Vec<_> = quotes.iter().map(Quote::record).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

pub fn write_quotes(
    quotes: &[Quote],
    format: Format,
    destination: &Destination,
    languages: Option<&[&str]>,
) -> Result<()> {
    match destination {
        Destination::File(path) => {
            let body = match format {
                Format::Xml => render_xml(quotes, languages),
                Format::Json => render_json(quotes)?,
            };
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(body.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Destination::Console => match format {
            Format::Xml => {
                println!("{}{}", XML_HEAD, root_open(languages));
                for q in quotes {
                    println!("{}", q.to_xml());
                }
                println!("{}", XML_ROOT_BTM);
            }
            // one object per line
            Format::Json => {
                for q in quotes {
                    println!("{}", q.to_json()?);
                }
            }
        },
    }
    Ok(())
}
