use thiserror::Error;

/// An API response did not have the shape the extractors expect.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no <{0}> element in response")]
    MissingElement(String),

    #[error("<{tag}> element has no `{attr}` attribute")]
    MissingAttribute { tag: String, attr: String },

    #[error("category title without namespace prefix: {0:?}")]
    MalformedCategory(String),

    #[error("invalid XML: {0}")]
    Xml(String),
}
