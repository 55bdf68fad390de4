use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pubshelf_core::fetch::http_client;
use pubshelf_core::{
    BibSource, PublicationState, arrange_posts, load_publications, source_from_location,
};
use pubshelf_reporting::{
    ExportFormat, export_page, export_posts, export_publications, export_to_path,
};

mod output;
mod settings;

use output::ColorMode;
use settings::{Overrides, Settings};

/// Render an academic publication list from a BibTeX bibliography
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, format and print the publication list
    Render {
        /// URL or path of the .bib file (default: media/bibliography/paper.bib)
        source: Option<String>,

        /// Output format: html, json, markdown or text
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Wrap HTML output in a standalone page
        #[arg(long)]
        page: bool,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Dry run: list parsed records without formatting them
    List {
        /// URL or path of the .bib file
        source: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the configured blog posts, newest first
    Posts {
        /// Output format: html, json, markdown or text
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let file = pubshelf_core::config_file::load_config();
    let env = |name: &str| std::env::var(name).ok();

    match cli.command {
        Command::Render {
            source,
            format,
            page,
            output,
            no_color,
        } => {
            let settings = settings::resolve(
                &file,
                Overrides {
                    source,
                    format,
                    no_color,
                },
                env,
            )?;
            render(&settings, page, output).await
        }
        Command::List { source, no_color } => {
            let settings = settings::resolve(
                &file,
                Overrides {
                    source,
                    format: None,
                    no_color,
                },
                env,
            )?;
            list(&settings).await
        }
        Command::Posts {
            format,
            output,
            no_color,
        } => {
            let settings = settings::resolve(
                &file,
                Overrides {
                    source: None,
                    format,
                    no_color,
                },
                env,
            )?;
            posts(&settings, output)
        }
    }
}

/// Color only applies when printing to a terminal.
fn color_mode(output: Option<&PathBuf>, no_color: bool) -> ColorMode {
    ColorMode(output.is_none() && !no_color && std::io::stdout().is_terminal())
}

/// Write rendered content to the `--output` file, or to stdout.
fn emit(content: &str, output: Option<&PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            export_to_path(content, path)?;
            eprintln!("Output written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

async fn render(
    settings: &Settings,
    page: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let client = http_client(settings.config.timeout())?;
    let source = source_from_location(&settings.config.source, &client);
    let state = load_publications(source.as_ref()).await;

    let color = color_mode(output.as_ref(), settings.no_color);
    let content = match settings.format {
        ExportFormat::Html if page => {
            let posts = arrange_posts(settings.config.posts.clone());
            let posts = (!posts.is_empty()).then_some(posts.as_slice());
            export_page(&settings.site_title, &state, posts)
        }
        ExportFormat::Text => output::publications_text(&state, color)?,
        format => {
            if page {
                tracing::warn!(%format, "--page only applies to html output");
            }
            export_publications(&state, format)?
        }
    };
    emit(&content, output.as_ref())?;

    Ok(match state {
        PublicationState::Failed { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn list(settings: &Settings) -> anyhow::Result<ExitCode> {
    let client = http_client(settings.config.timeout())?;
    let source = source_from_location(&settings.config.source, &client);

    let text = source.fetch().await?;
    let entries = pubshelf_core::parse_entries(&text);

    let color = color_mode(None, settings.no_color);
    let mut stdout = std::io::stdout().lock();
    output::print_raw_entries(&mut stdout, source.name(), &entries, color)?;
    Ok(ExitCode::SUCCESS)
}

fn posts(settings: &Settings, output: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let posts = arrange_posts(settings.config.posts.clone());

    let color = color_mode(output.as_ref(), settings.no_color);
    let content = match settings.format {
        ExportFormat::Text => output::posts_text(&posts, color)?,
        format => export_posts(&posts, format)?,
    };
    emit(&content, output.as_ref())?;
    Ok(ExitCode::SUCCESS)
}
