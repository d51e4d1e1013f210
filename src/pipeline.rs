use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::api::{Endpoint, PageSource};
use crate::config::Settings;
use crate::output::{write_quotes, Destination};
use crate::store::TitleStore;
use crate::util::sanitize_filename;
use crate::wiki::extract::{parse_categories, parse_languages, parse_quote_page};
use crate::wiki::LanguageMap;

/// Element holding the page wikitext.
pub const QUOTE_TAG: &str = "rev";
/// One element per category.
pub const CAT_TAG: &str = "cl";
/// One element per language link.
pub const LANG_TAG: &str = "ll";
/// Element whose `title` attribute is the page title.
pub const TITLE_TAG: &str = "page";

/// Stats returned after a run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub pages: usize,
    pub written: usize,
    pub skipped: usize,
    pub quotes: usize,
}

/// Fetch the requested page and, unless disabled, every linked-language
/// variant; write one document per page that has quotes.
///
/// Pages are handled strictly one after another; the first error aborts the
/// run.
pub async fn run<S: PageSource>(settings: &Settings, source: &S) -> Result<RunStats> {
    let languages_dir = settings.languages_dir();
    std::fs::create_dir_all(&languages_dir)
        .with_context(|| format!("Failed to create {}", languages_dir.display()))?;

    let mut languages = if settings.translations {
        fetch_languages(settings, source).await?
    } else {
        LanguageMap::new()
    };
    languages.insert(settings.language.clone(), settings.title.clone());
    info!("{} has {} language variant(s)", settings.title, languages.len());

    let mut store = TitleStore::open(TitleStore::path_for(&languages_dir, &settings.title))?;
    store.merge(&languages)?;
    debug!("Title store at {}", store.path().display());

    let codes: Vec<&str> = languages.keys().map(String::as_str).collect();

    let pb = progress_bar(settings, languages.len())?;
    let mut stats = RunStats::default();

    for (lang, title) in &languages {
        pb.set_message(format!("{}:{}", lang, title));
        stats.pages += 1;

        let rev_url = Endpoint::Revisions.url(&settings.api_url, lang, title)?;
        let cat_url = Endpoint::Categories.url(&settings.api_url, lang, title)?;
        let quote_page = source.fetch_document(&rev_url).await?;
        let cats_page = source.fetch_document(&cat_url).await?;
        debug!(
            "{}:{} revision={} categories={} elements",
            lang,
            title,
            quote_page.len(),
            cats_page.len()
        );

        let categories: Arc<[String]> = parse_categories(&cats_page, CAT_TAG)
            .with_context(|| format!("Bad category list for {}:{}", lang, title))?
            .into();
        let quotes = parse_quote_page(&quote_page, QUOTE_TAG, categories, TITLE_TAG)
            .with_context(|| format!("Bad revision page for {}:{}", lang, title))?;

        if quotes.is_empty() {
            warn!("No quotes on {}:{}, skipping", lang, title);
            stats.skipped += 1;
            pb.inc(1);
            continue;
        }

        let destination = destination_for(settings, lang, title)?;
        write_quotes(&quotes, settings.format, &destination, Some(codes.as_slice()))?;
        info!(
            "{}:{} -> {} quotes by {} ({:?})",
            lang,
            title,
            quotes.len(),
            quotes[0].author(),
            destination
        );

        stats.written += 1;
        stats.quotes += quotes.len();
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(stats)
}

/// Hidden for a single page or when documents go to stdout.
fn progress_bar(settings: &Settings, pages: usize) -> Result<ProgressBar> {
    if settings.stdout || pages <= 1 {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(pages as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    Ok(pb)
}

async fn fetch_languages<S: PageSource>(settings: &Settings, source: &S) -> Result<LanguageMap> {
    let url = Endpoint::LangLinks.url(&settings.api_url, &settings.language, &settings.title)?;
    let doc = source.fetch_document(&url).await?;
    Ok(parse_languages(&doc, LANG_TAG))
}

/// `--file` only applies to the requested language; variants always go to
/// `<output_dir>/<lang>/<title>.<ext>`.
fn destination_for(settings: &Settings, lang: &str, title: &str) -> Result<Destination> {
    if settings.stdout {
        return Ok(Destination::Console);
    }
    if lang == settings.language {
        if let Some(file) = &settings.file {
            return Ok(Destination::File(file.clone()));
        }
    }

    let dir = settings.language_dir(lang);
    std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(Destination::File(dir.join(format!(
        "{}.{}",
        sanitize_filename(title),
        settings.format.extension()
    ))))
}

/// Language -> title table recorded for `settings.title` by earlier runs.
pub fn stored_titles(settings: &Settings) -> Result<LanguageMap> {
    let path = TitleStore::path_for(&settings.languages_dir(), &settings.title);
    if !path.exists() {
        return Ok(LanguageMap::new());
    }
    TitleStore::open(path)?.load()
}
