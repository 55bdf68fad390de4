use pubshelf_core::config_file::ConfigFile;
use pubshelf_core::Config;
use pubshelf_reporting::ExportFormat;

pub const DEFAULT_SITE_TITLE: &str = "Publications";

/// Effective settings for one CLI invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Source, timeout and posts after env and flag overrides.
    pub config: Config,
    pub format: ExportFormat,
    pub no_color: bool,
    pub site_title: String,
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Default)]
pub struct Overrides {
    pub source: Option<String>,
    pub format: Option<ExportFormat>,
    pub no_color: bool,
}

/// Resolve configuration: CLI flags > env vars > config file > defaults.
///
/// `env` looks up an environment variable; callers pass `std::env::var`.
pub fn resolve(
    file: &ConfigFile,
    overrides: Overrides,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut config = Config::from_file(file);

    config.source = overrides
        .source
        .or_else(|| env("PUBSHELF_SOURCE").filter(|s| !s.trim().is_empty()))
        .unwrap_or(config.source);

    if let Some(secs) = env("PUBSHELF_TIMEOUT").and_then(|v| v.trim().parse().ok()) {
        config.timeout_secs = secs;
    }

    let file_format = file.output.as_ref().and_then(|o| o.format.as_deref());
    let format = match (overrides.format, file_format) {
        (Some(f), _) => f,
        (None, Some(name)) => name.parse()?,
        (None, None) => ExportFormat::Text,
    };

    let no_color = overrides.no_color
        || file
            .output
            .as_ref()
            .and_then(|o| o.no_color)
            .unwrap_or(false);

    let site_title = config
        .site_title
        .clone()
        .unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string());

    Ok(Settings {
        config,
        format,
        no_color,
        site_title,
    })
}
