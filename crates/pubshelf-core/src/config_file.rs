use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::posts::BlogPost;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub source: Option<SourceConfig>,
    pub fetch: Option<FetchConfig>,
    pub output: Option<OutputConfig>,
    pub site: Option<SiteConfig>,
    pub posts: Option<Vec<BlogPost>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL or filesystem path of the bibliography.
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: Option<String>,
}

/// Platform config directory path: `<config_dir>/pubshelf/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pubshelf").join("config.toml"))
}

/// Load config by cascading CWD `.pubshelf.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pubshelf.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    if !path.exists() {
        return None;
    }
    match read_config(path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring config file");
            None
        }
    }
}

/// Read and parse a config file, reporting why it could not be used.
pub fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
///
/// The post list is replaced as a whole rather than concatenated.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        source: Some(SourceConfig {
            location: overlay
                .source
                .as_ref()
                .and_then(|s| s.location.clone())
                .or_else(|| base.source.as_ref().and_then(|s| s.location.clone())),
        }),
        fetch: Some(FetchConfig {
            timeout_secs: overlay
                .fetch
                .as_ref()
                .and_then(|f| f.timeout_secs)
                .or_else(|| base.fetch.as_ref().and_then(|f| f.timeout_secs)),
        }),
        output: Some(OutputConfig {
            format: overlay
                .output
                .as_ref()
                .and_then(|o| o.format.clone())
                .or_else(|| base.output.as_ref().and_then(|o| o.format.clone())),
            no_color: overlay
                .output
                .as_ref()
                .and_then(|o| o.no_color)
                .or_else(|| base.output.as_ref().and_then(|o| o.no_color)),
        }),
        site: Some(SiteConfig {
            title: overlay
                .site
                .as_ref()
                .and_then(|s| s.title.clone())
                .or_else(|| base.site.as_ref().and_then(|s| s.title.clone())),
        }),
        posts: overlay.posts.or(base.posts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_deserialize_from_array_of_tables() {
        let toml_str = r#"
[source]
location = "media/bibliography/paper.bib"

[[posts]]
file = "my-first-post.md"
title = "My First Blog Post"
date = "2025-01-15"
excerpt = "An introduction."

[[posts]]
file = "second.md"
title = "Second"
date = "2025-02-01"
"#;
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        let posts = parsed.posts.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].file, "my-first-post.md");
        assert_eq!(posts[1].excerpt, "");
        assert_eq!(
            parsed.source.unwrap().location.as_deref(),
            Some("media/bibliography/paper.bib")
        );
    }

    #[test]
    fn location_absent_deserializes_as_none() {
        let toml_str = "[fetch]\ntimeout_secs = 3\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert!(parsed.source.is_none());
        assert_eq!(parsed.fetch.unwrap().timeout_secs, Some(3));
    }

    #[test]
    fn merge_location_overlay_wins() {
        let base = ConfigFile {
            source: Some(SourceConfig {
                location: Some("/base/paper.bib".to_string()),
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            source: Some(SourceConfig {
                location: Some("https://example.org/paper.bib".to_string()),
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        assert_eq!(
            merged.source.unwrap().location.unwrap(),
            "https://example.org/paper.bib"
        );
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            fetch: Some(FetchConfig {
                timeout_secs: Some(30),
            }),
            site: Some(SiteConfig {
                title: Some("Jane Doe".to_string()),
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.fetch.unwrap().timeout_secs, Some(30));
        assert_eq!(merged.site.unwrap().title.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn read_config_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[source\nlocation = 1").unwrap();
        assert!(matches!(read_config(&path), Err(ConfigError::Parse { .. })));
        assert!(load_from_path(&path).is_none());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_path(&dir.path().join("absent.toml")).is_none());
    }
}
