pub mod cleaner;
pub mod document;
pub mod error;
pub mod extract;
pub mod marker;

pub use document::Document;
pub use error::ExtractError;
pub use extract::LanguageMap;
