use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;
use tracing::debug;

use crate::config::Settings;
use crate::wiki::Document;

/// The three `action=query` lookups a page needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Current wikitext of the page.
    Revisions,
    Categories,
    /// Titles of the same page on other language wikis.
    LangLinks,
}

impl Endpoint {
    fn params(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Endpoint::Revisions => &[("prop", "revisions"), ("rvprop", "content")],
            Endpoint::Categories => &[("prop", "categories"), ("list", "allcategories")],
            Endpoint::LangLinks => &[("prop", "langlinks"), ("lllimit", "500")],
        }
    }

    /// Query URL for `title` on the `lang` wiki. `api_url` carries a `{lang}`
    /// placeholder; the title is form-encoded.
    pub fn url(self, api_url: &str, lang: &str, title: &str) -> Result<Url> {
        let base = api_url.replace("{lang}", lang);
        let mut params = vec![("format", "xml"), ("action", "query"), ("titles", title)];
        params.extend_from_slice(self.params());
        Url::parse_with_params(&base, &params).with_context(|| format!("Bad API url {}", base))
    }
}

/// Where page XML comes from. `WikiClient` goes over HTTP; tests serve
/// fixtures.
pub trait PageSource {
    async fn fetch(&self, url: &Url) -> Result<String>;

    async fn fetch_document(&self, url: &Url) -> Result<Document> {
        let body = self.fetch(url).await?;
        Document::parse(&body).with_context(|| format!("Malformed response from {}", url))
    }
}

pub struct WikiClient {
    client: reqwest::Client,
}

impl WikiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.as_str());
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(WikiClient { client })
    }
}

impl PageSource for WikiClient {
    async fn fetch(&self, url: &Url) -> Result<String> {
        debug!("GET {}", url);
        let body = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("Failed to fetch {}", url))?
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;
        Ok(body)
    }
}
