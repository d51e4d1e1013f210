mod api;
mod config;
mod output;
mod pipeline;
mod quote;
mod store;
mod util;
mod wiki;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};

use crate::config::{Format, Settings};

#[derive(Parser)]
#[command(name = "wikiquote_parser", about = "Extract quotes from Wikiquote pages")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page (and its other-language versions) and write its quotes
    Fetch(FetchArgs),
    /// Show the language -> title table stored for a page
    Titles {
        /// Page title (default: "Mark Twain")
        #[arg(long = "url", value_name = "TITLE")]
        title: Option<String>,
    },
}

#[derive(Args, Default)]
struct FetchArgs {
    /// Write the requested page to this file instead of quotes/<lang>/
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,
    /// Page title, e.g. "Mark Twain"
    #[arg(long = "url", value_name = "TITLE")]
    title: Option<String>,
    /// Wiki language code, e.g. en
    #[arg(long, value_name = "LANG")]
    language: Option<String>,
    /// Output format
    #[arg(long, value_enum)]
    format: Option<Format>,
    /// Print documents instead of writing files
    #[arg(long)]
    stdout: bool,
    /// Only the requested language, skip language links
    #[arg(long)]
    no_translations: bool,
}

impl FetchArgs {
    fn apply(self, settings: &mut Settings) {
        if let Some(title) = self.title {
            settings.title = title;
        }
        if let Some(language) = self.language {
            settings.language = language;
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if self.file.is_some() {
            settings.file = self.file;
        }
        settings.stdout |= self.stdout;
        if self.no_translations {
            settings.translations = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load()?;

    match cli.command.unwrap_or_else(|| Commands::Fetch(FetchArgs::default())) {
        Commands::Fetch(args) => {
            args.apply(&mut settings);
            let client = api::WikiClient::new(&settings)?;
            let stats = pipeline::run(&settings, &client).await?;
            eprintln!(
                "{}: {} page(s), {} written, {} without quotes, {} quotes.",
                settings.title, stats.pages, stats.written, stats.skipped, stats.quotes
            );
        }
        Commands::Titles { title } => {
            if let Some(title) = title {
                settings.title = title;
            }
            let titles = pipeline::stored_titles(&settings)?;
            if titles.is_empty() {
                println!("No titles stored for {}. Run 'fetch' first.", settings.title);
                return Ok(());
            }
            for (lang, title) in &titles {
                println!("{:<6} {}", lang, title);
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("Done in {}", util::format_duration(elapsed));
    }

    Ok(())
}
