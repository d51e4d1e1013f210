use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_PAGE: &str = "Mark Twain";
pub const DEFAULT_OUTPUT_DIR: &str = "quotes";
pub const DEFAULT_API_URL: &str = "https://{lang}.wikiquote.org/w/api.php";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Output serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Xml,
    Json,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Xml => "xml",
            Format::Json => "json",
        }
    }
}

/// Run settings, built once in `main` and passed down by reference.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Language of the requested page.
    pub language: String,
    /// Title of the requested page.
    pub title: String,
    /// Root for per-language output and the title stores.
    pub output_dir: PathBuf,
    /// `api.php` endpoint; `{lang}` is replaced with the language code.
    pub api_url: String,
    pub user_agent: String,
    /// No timeout unless set.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    pub format: Format,
    /// Write the requested page here instead of `<output_dir>/<lang>/`.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Print documents instead of writing files.
    #[serde(default)]
    pub stdout: bool,
    /// Also process every linked-language variant.
    pub translations: bool,
}

impl Settings {
    /// Built-in defaults overlaid with `WIKIQUOTE_*` environment variables.
    pub fn load() -> Result<Self> {
        let settings = ::config::Config::builder()
            .set_default("language", DEFAULT_LANG)?
            .set_default("title", DEFAULT_PAGE)?
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("format", "xml")?
            .set_default("stdout", false)?
            .set_default("translations", true)?
            .add_source(::config::Environment::with_prefix("WIKIQUOTE").try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid WIKIQUOTE_* configuration")
    }

    pub fn languages_dir(&self) -> PathBuf {
        self.output_dir.join("languages")
    }

    pub fn language_dir(&self, lang: &str) -> PathBuf {
        self.output_dir.join(lang)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            language: DEFAULT_LANG.to_string(),
            title: DEFAULT_PAGE.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
            format: Format::Xml,
            file: None,
            stdout: false,
            translations: true,
        }
    }
}
