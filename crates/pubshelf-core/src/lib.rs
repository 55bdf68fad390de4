use std::time::Duration;

use serde::Serialize;

pub mod authors;
pub mod config_file;
pub mod fetch;
pub mod formatter;
pub mod markup;
pub mod parser;
pub mod posts;
pub mod renderer;

// Re-export for convenience
pub use fetch::{BibSource, FileSource, HttpSource, RetrievalError, source_from_location};
pub use formatter::format_entry;
pub use markup::{clean_markup, markup_to_plain};
pub use parser::parse_entries;
pub use posts::{BlogPost, arrange_posts};
pub use renderer::arrange;

/// Bibliography location used when nothing else is configured.
pub const DEFAULT_SOURCE: &str = "media/bibliography/paper.bib";

/// Default transport timeout for remote bibliographies.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One bibliography record as it appears in the source text.
///
/// Field names are stored lower-cased, so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub entry_type: String,
    pub key: String,
    fields: Vec<(String, String)>,
}

impl RawEntry {
    pub fn new(entry_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into(),
            key: key.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field unless one with the same name is already present.
    /// Returns whether the value was stored.
    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into().to_lowercase();
        if self.fields.iter().any(|(n, _)| *n == name) {
            return false;
        }
        self.fields.push((name, value.into()));
        true
    }

    /// Raw value of a field, possibly empty.
    pub fn field(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a field only if it is non-empty.
    pub fn present(&self, name: &str) -> Option<&str> {
        self.field(name).filter(|v| !v.is_empty())
    }

    /// All fields in document order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// An external link shown under a publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// A publication ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedEntry {
    pub key: String,
    /// 0 when the year is missing or not a number.
    pub year: i32,
    /// HTML fragment produced by [`clean_markup`].
    pub title: String,
    pub authors: String,
    /// HTML fragment produced by [`clean_markup`] or a generic label.
    pub venue: String,
    pub links: Vec<Link>,
}

impl FormattedEntry {
    /// Year as shown to readers: the number, or "N/A" when unknown.
    pub fn year_label(&self) -> String {
        if self.year == 0 {
            "N/A".to_string()
        } else {
            self.year.to_string()
        }
    }
}

/// Outcome of one pipeline run, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublicationState {
    /// Entries sorted newest first.
    Ready { entries: Vec<FormattedEntry> },
    /// The bibliography held no usable records. Informational, not an error.
    Empty,
    /// The bibliography could not be retrieved.
    Failed { message: String },
}

impl PublicationState {
    pub fn failed(err: &RetrievalError) -> Self {
        PublicationState::Failed {
            message: format!("Failed to load publications. Error: {}", err),
        }
    }

    /// Entries in display order; empty unless `Ready`.
    pub fn entries(&self) -> &[FormattedEntry] {
        match self {
            PublicationState::Ready { entries } => entries,
            _ => &[],
        }
    }
}

/// Resolved settings for a pipeline run.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL or path of the bibliography.
    pub source: String,
    pub timeout_secs: u64,
    pub site_title: Option<String>,
    pub posts: Vec<BlogPost>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            site_title: None,
            posts: vec![],
        }
    }
}

impl Config {
    /// Apply defaults to whatever the config file left unset.
    pub fn from_file(file: &config_file::ConfigFile) -> Self {
        let defaults = Config::default();
        Self {
            source: file
                .source
                .as_ref()
                .and_then(|s| s.location.clone())
                .unwrap_or(defaults.source),
            timeout_secs: file
                .fetch
                .as_ref()
                .and_then(|f| f.timeout_secs)
                .unwrap_or(defaults.timeout_secs),
            site_title: file.site.as_ref().and_then(|s| s.title.clone()),
            posts: file.posts.clone().unwrap_or_default(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parse, format and order bibliography text. Never fails: malformed records
/// are skipped and an empty result is reported as [`PublicationState::Empty`].
pub fn publications_from_text(text: &str) -> PublicationState {
    let raw = parse_entries(text);
    let formatted: Vec<FormattedEntry> = raw.iter().map(format_entry).collect();
    tracing::debug!(records = formatted.len(), "formatted bibliography");
    arrange(formatted)
}

/// Run the whole pipeline against one source: a single fetch followed by
/// parsing, formatting and ordering.
///
/// A retrieval failure is logged and turned into [`PublicationState::Failed`]
/// carrying a message meant for readers of the page.
pub async fn load_publications(source: &dyn BibSource) -> PublicationState {
    match source.fetch().await {
        Ok(text) => publications_from_text(&text),
        Err(e) => {
            tracing::error!(source = source.name(), error = %e, "error loading publications");
            PublicationState::failed(&e)
        }
    }
}
