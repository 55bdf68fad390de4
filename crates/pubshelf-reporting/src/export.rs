use std::io::Write;
use std::path::Path;

use pubshelf_core::{BlogPost, FormattedEntry, Link, PublicationState, markup_to_plain};

use crate::types::{ExportError, ExportFormat};

pub const NO_PUBLICATIONS: &str = "No publications found.";
pub const NO_POSTS: &str = "No blog posts yet. Stay tuned!";

/// Render a publication state in the requested format.
pub fn export_publications(
    state: &PublicationState,
    format: ExportFormat,
) -> Result<String, ExportError> {
    Ok(match format {
        ExportFormat::Html => export_html(state),
        ExportFormat::Json => export_json(state)?,
        ExportFormat::Markdown => export_markdown(state),
        ExportFormat::Text => export_text(state),
    })
}

/// Render a post list, already in display order, in the requested format.
pub fn export_posts(posts: &[BlogPost], format: ExportFormat) -> Result<String, ExportError> {
    Ok(match format {
        ExportFormat::Html => export_posts_html(posts),
        ExportFormat::Json => serde_json::to_string_pretty(posts)?,
        ExportFormat::Markdown => export_posts_markdown(posts),
        ExportFormat::Text => export_posts_text(posts),
    })
}

/// Write rendered content to `path`, replacing any existing file.
pub fn export_to_path(content: &str, path: &Path) -> Result<(), ExportError> {
    let to_err = |source| ExportError::Write {
        path: path.display().to_string(),
        source,
    };
    let mut file = std::fs::File::create(path).map_err(to_err)?;
    file.write_all(content.as_bytes()).map_err(to_err)?;
    Ok(())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
}

fn link_icon(label: &str) -> &'static str {
    match label {
        "arXiv" => "fa-file-alt",
        "DOI" => "fa-link",
        _ => "fa-external-link-alt",
    }
}

fn write_html_link(out: &mut String, link: &Link) {
    out.push_str(&format!(
        "<a href=\"{}\" target=\"_blank\" title=\"{}\"><i class=\"fas {}\"></i> {}</a>",
        html_escape(&link.url),
        html_escape(&link.label),
        link_icon(&link.label),
        html_escape(&link.label),
    ));
}

fn write_html_entry(out: &mut String, entry: &FormattedEntry) {
    out.push_str("<div class=\"publication-item\">\n");
    out.push_str(&format!(
        "  <div class=\"pub-year\">{}</div>\n",
        entry.year_label()
    ));
    out.push_str("  <div class=\"pub-content\">\n");
    // Title and venue are inserted as produced by markup cleaning, unescaped.
    out.push_str(&format!("    <div class=\"pub-title\">{}</div>\n", entry.title));
    out.push_str(&format!(
        "    <div class=\"pub-authors\">{}</div>\n",
        html_escape(&entry.authors)
    ));
    out.push_str(&format!("    <div class=\"pub-venue\">{}</div>\n", entry.venue));
    if !entry.links.is_empty() {
        out.push_str("    <div class=\"pub-links\">");
        for link in &entry.links {
            write_html_link(out, link);
        }
        out.push_str("</div>\n");
    }
    out.push_str("  </div>\n</div>\n");
}

/// HTML fragment for the publications container.
pub fn export_html(state: &PublicationState) -> String {
    let mut out = String::with_capacity(4096);
    match state {
        PublicationState::Ready { entries } => {
            for entry in entries {
                write_html_entry(&mut out, entry);
            }
        }
        PublicationState::Empty => {
            out.push_str(&format!("<p class=\"no-publications\">{}</p>\n", NO_PUBLICATIONS));
        }
        PublicationState::Failed { message } => {
            out.push_str(&format!("<p class=\"error\">{}</p>\n", html_escape(message)));
        }
    }
    out
}

pub fn export_json(state: &PublicationState) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub fn export_markdown(state: &PublicationState) -> String {
    let mut out = String::from("# Publications\n\n");
    match state {
        PublicationState::Ready { entries } => {
            for entry in entries {
                out.push_str(&format!(
                    "- **{}** ({})",
                    md_escape(&entry.title),
                    entry.year_label()
                ));
                if !entry.authors.is_empty() {
                    out.push_str(&format!("  \n  {}", md_escape(&entry.authors)));
                }
                out.push_str(&format!("  \n  *{}*", md_escape(&entry.venue)));
                if !entry.links.is_empty() {
                    let links: Vec<String> = entry
                        .links
                        .iter()
                        .map(|l| format!("[{}]({})", l.label, l.url))
                        .collect();
                    out.push_str(&format!("  \n  {}", links.join(" · ")));
                }
                out.push('\n');
            }
        }
        PublicationState::Empty => {
            out.push_str(&format!("_{}_\n", NO_PUBLICATIONS));
        }
        PublicationState::Failed { message } => {
            out.push_str(&format!("> **{}**\n", md_escape(message)));
        }
    }
    out
}

pub fn export_text(state: &PublicationState) -> String {
    let mut out = String::from("Publications\n");
    out.push_str(&"=".repeat(60));
    out.push('\n');
    match state {
        PublicationState::Ready { entries } => {
            for entry in entries {
                out.push_str(&format!(
                    "\n[{}] {}\n",
                    entry.year_label(),
                    markup_to_plain(&entry.title)
                ));
                if !entry.authors.is_empty() {
                    out.push_str(&format!("       {}\n", entry.authors));
                }
                out.push_str(&format!("       {}\n", markup_to_plain(&entry.venue)));
                for link in &entry.links {
                    out.push_str(&format!("       {}: {}\n", link.label, link.url));
                }
            }
        }
        PublicationState::Empty => {
            out.push_str(&format!("\n{}\n", NO_PUBLICATIONS));
        }
        PublicationState::Failed { message } => {
            out.push_str(&format!("\n{}\n", message));
        }
    }
    out
}

fn write_html_post(out: &mut String, post: &BlogPost) {
    out.push_str("<article class=\"blog-post-preview\">\n");
    out.push_str("  <div class=\"blog-post-header\">\n");
    out.push_str(&format!(
        "    <h2 class=\"blog-post-title\">{}</h2>\n",
        html_escape(&post.title)
    ));
    out.push_str(&format!(
        "    <time class=\"blog-post-date\" datetime=\"{}\">{}</time>\n",
        html_escape(&post.date),
        html_escape(&post.display_date())
    ));
    out.push_str("  </div>\n");
    out.push_str(&format!(
        "  <p class=\"blog-post-excerpt\">{}</p>\n",
        html_escape(&post.excerpt)
    ));
    out.push_str(&format!(
        "  <a href=\"{}\" class=\"blog-read-more\">Read more <i class=\"fas fa-arrow-right\"></i></a>\n",
        html_escape(&post.href())
    ));
    out.push_str("</article>\n");
}

pub fn export_posts_html(posts: &[BlogPost]) -> String {
    if posts.is_empty() {
        return format!("<div class=\"no-posts\"><p>{}</p></div>\n", NO_POSTS);
    }
    let mut out = String::new();
    for post in posts {
        write_html_post(&mut out, post);
    }
    out
}

fn export_posts_markdown(posts: &[BlogPost]) -> String {
    let mut out = String::from("# Blog\n\n");
    if posts.is_empty() {
        out.push_str(&format!("_{}_\n", NO_POSTS));
        return out;
    }
    for post in posts {
        out.push_str(&format!(
            "## [{}]({})\n\n*{}*\n\n",
            md_escape(&post.title),
            post.href(),
            post.display_date()
        ));
        if !post.excerpt.is_empty() {
            out.push_str(&format!("{}\n\n", post.excerpt));
        }
    }
    out
}

pub fn export_posts_text(posts: &[BlogPost]) -> String {
    if posts.is_empty() {
        return format!("{}\n", NO_POSTS);
    }
    let mut out = String::new();
    for post in posts {
        out.push_str(&format!("{}  {}\n", post.display_date(), post.title));
        if !post.excerpt.is_empty() {
            out.push_str(&format!("    {}\n", post.excerpt));
        }
        out.push_str(&format!("    {}\n", post.href()));
    }
    out
}

/// Standalone HTML document wrapping the publication list and, when given,
/// the blog previews.
pub fn export_page(title: &str, state: &PublicationState, posts: Option<&[BlogPost]>) -> String {
    let mut out = String::with_capacity(8192);
    out.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{}</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; max-width: 960px; margin: 0 auto; padding: 2rem; }}
.publication-item {{ display: flex; gap: 1.5rem; padding: 1rem 0; border-bottom: 1px solid #ddd; }}
.pub-year {{ font-weight: 600; min-width: 3.5rem; color: #555; }}
.pub-title {{ font-weight: 600; }}
.pub-authors, .pub-venue {{ color: #444; }}
.pub-links a {{ margin-right: 1rem; }}
.error {{ color: #c0392b; }}
.blog-post-preview {{ padding: 1rem 0; border-bottom: 1px solid #ddd; }}
.blog-post-date {{ color: #777; }}
</style>
</head>
<body>
<h1>{}</h1>
<section id="publications">
<h2>Publications</h2>
"#,
        html_escape(title),
        html_escape(title),
    ));
    out.push_str(&export_html(state));
    out.push_str("</section>\n");
    if let Some(posts) = posts {
        out.push_str("<section id=\"blog-list\">\n<h2>Blog</h2>\n");
        out.push_str(&export_posts_html(posts));
        out.push_str("</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, year: i32, links: Vec<Link>) -> FormattedEntry {
        FormattedEntry {
            key: key.to_string(),
            year,
            title: format!("On <em>{}</em>", key),
            authors: "A. Smith & B. Jones".to_string(),
            venue: "Journal Article".to_string(),
            links,
        }
    }

    fn arxiv() -> Link {
        Link {
            label: "arXiv".into(),
            url: "https://arxiv.org/abs/2301.00001".into(),
        }
    }

    #[test]
    fn test_html_entry_structure() {
        let state = PublicationState::Ready {
            entries: vec![entry("x", 2021, vec![arxiv()])],
        };
        let html = export_html(&state);
        assert!(html.contains("<div class=\"publication-item\">"));
        assert!(html.contains("<div class=\"pub-year\">2021</div>"));
        assert!(html.contains("<div class=\"pub-title\">On <em>x</em></div>"));
        assert!(html.contains("A. Smith &amp; B. Jones"));
        assert!(html.contains("href=\"https://arxiv.org/abs/2301.00001\""));
        assert!(html.contains("fa-file-alt"));
    }

    #[test]
    fn test_html_links_omitted_when_none() {
        let state = PublicationState::Ready {
            entries: vec![entry("x", 0, vec![])],
        };
        let html = export_html(&state);
        assert!(!html.contains("pub-links"));
        assert!(html.contains("<div class=\"pub-year\">N/A</div>"));
    }

    #[test]
    fn test_html_empty_and_failed() {
        assert_eq!(
            export_html(&PublicationState::Empty),
            "<p class=\"no-publications\">No publications found.</p>\n"
        );
        let failed = PublicationState::Failed {
            message: "Failed to load publications. Error: <boom>".into(),
        };
        assert_eq!(
            export_html(&failed),
            "<p class=\"error\">Failed to load publications. Error: &lt;boom&gt;</p>\n"
        );
    }

    #[test]
    fn test_text_strips_tags() {
        let state = PublicationState::Ready {
            entries: vec![entry("x", 2020, vec![arxiv()])],
        };
        let text = export_text(&state);
        assert!(text.contains("[2020] On x"));
        assert!(text.contains("arXiv: https://arxiv.org/abs/2301.00001"));
        assert!(!text.contains("<em>"));
    }

    #[test]
    fn test_json_carries_status() {
        let json = export_json(&PublicationState::Empty).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "empty");
    }

    #[test]
    fn test_markdown_lists_entries() {
        let state = PublicationState::Ready {
            entries: vec![entry("a|b", 2019, vec![arxiv()])],
        };
        let md = export_markdown(&state);
        assert!(md.starts_with("# Publications"));
        assert!(md.contains("**On <em>a\\|b</em>** (2019)"));
        assert!(md.contains("[arXiv](https://arxiv.org/abs/2301.00001)"));
    }

    #[test]
    fn test_posts_empty_state() {
        assert!(export_posts_html(&[]).contains(NO_POSTS));
        assert_eq!(export_posts_text(&[]), format!("{}\n", NO_POSTS));
    }

    #[test]
    fn test_post_preview() {
        let post = BlogPost {
            file: "first.md".into(),
            title: "Hello & welcome".into(),
            date: "2025-01-15".into(),
            excerpt: "Intro".into(),
        };
        let html = export_posts_html(std::slice::from_ref(&post));
        assert!(html.contains("<article class=\"blog-post-preview\">"));
        assert!(html.contains("Hello &amp; welcome"));
        assert!(html.contains(">January 15, 2025</time>"));
        assert!(html.contains("href=\"blog-post.html?post=first.md\""));
    }

    #[test]
    fn test_page_wrapper() {
        let posts: &[BlogPost] = &[];
        let page = export_page("Jane <Doe>", &PublicationState::Empty, Some(posts));
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Jane &lt;Doe&gt;</title>"));
        assert!(page.contains(NO_PUBLICATIONS));
        assert!(page.contains(NO_POSTS));
        assert!(page.trim_end().ends_with("</html>"));

        let no_blog = export_page("Jane", &PublicationState::Empty, None);
        assert!(!no_blog.contains("blog-list"));
    }

    #[test]
    fn test_text_keeps_comparison_signs() {
        let mut e = entry("x", 2020, vec![]);
        e.title = "Bounds for $n < m$ and $m > k$ in graphs".into();
        let state = PublicationState::Ready { entries: vec![e] };
        let text = export_publications(&state, ExportFormat::Text).unwrap();
        assert!(text.contains("[2020] Bounds for $n < m$ and $m > k$ in graphs\n"));
    }

    #[test]
    fn test_html_title_is_not_escaped() {
        let mut e = entry("x", 2020, vec![]);
        e.title = "<em>Bounds</em> for $n < m$".into();
        let state = PublicationState::Ready { entries: vec![e] };
        let html = export_html(&state);
        assert!(html.contains("<div class=\"pub-title\"><em>Bounds</em> for $n < m$</div>"));
    }
}
