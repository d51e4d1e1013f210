use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

use crate::util::sanitize_filename;
use crate::wiki::LanguageMap;

/// Per-page language -> title lookup, one SQLite file per page under
/// `<output_dir>/languages/`.
///
/// Writes merge into what is already stored; a language is only ever
/// updated, never dropped.
pub struct TitleStore {
    conn: Connection,
    path: PathBuf,
}

impl TitleStore {
    pub fn path_for(languages_dir: &Path, page_title: &str) -> PathBuf {
        languages_dir.join(format!("{}.sqlite", sanitize_filename(page_title)))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open title store {}", path.display()))?;
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            CREATE TABLE IF NOT EXISTS titles (
                lang       TEXT PRIMARY KEY,
                title      TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
        )?;
        Ok(TitleStore { conn, path })
    }

    /// Upsert every entry of `titles` in one transaction.
    pub fn merge(&mut self, titles: &LanguageMap) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO titles (lang, title) VALUES (?1, ?2)
                 ON CONFLICT(lang) DO UPDATE SET title = excluded.title, updated_at = datetime('now')",
            )?;
            for (lang, title) in titles {
                stmt.execute(rusqlite::params![lang, title])?;
            }
        }
        tx.commit()?;
        debug!("Merged {} titles into {}", titles.len(), self.path.display());
        Ok(titles.len())
    }

    pub fn load(&self) -> Result<LanguageMap> {
        let mut stmt = self.conn.prepare("SELECT lang, title FROM titles ORDER BY lang")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
        let mut map = LanguageMap::new();
        for row in rows {
            let (lang, title) = row?;
            map.insert(lang, title);
        }
        Ok(map)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
