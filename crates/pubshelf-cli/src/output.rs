use std::io::Write;

use owo_colors::OwoColorize;
use pubshelf_core::{BlogPost, FormattedEntry, PublicationState, RawEntry, markup_to_plain};
use pubshelf_reporting::{NO_POSTS, NO_PUBLICATIONS};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn print_entry(w: &mut dyn Write, entry: &FormattedEntry, color: ColorMode) -> std::io::Result<()> {
    let year = format!("[{}]", entry.year_label());
    let title = markup_to_plain(&entry.title);
    if color.enabled() {
        writeln!(w, "{} {}", year.bold().yellow(), title.bold())?;
    } else {
        writeln!(w, "{} {}", year, title)?;
    }

    if !entry.authors.is_empty() {
        writeln!(w, "       {}", entry.authors)?;
    }

    let venue = markup_to_plain(&entry.venue);
    if color.enabled() {
        writeln!(w, "       {}", venue.italic())?;
    } else {
        writeln!(w, "       {}", venue)?;
    }

    for link in &entry.links {
        if color.enabled() {
            writeln!(w, "       {} {}", format!("{}:", link.label).cyan(), link.url)?;
        } else {
            writeln!(w, "       {}: {}", link.label, link.url)?;
        }
    }
    writeln!(w)?;
    Ok(())
}

/// Print the publication list for a terminal.
pub fn print_publications(
    w: &mut dyn Write,
    state: &PublicationState,
    color: ColorMode,
) -> std::io::Result<()> {
    match state {
        PublicationState::Ready { entries } => {
            for entry in entries {
                print_entry(w, entry, color)?;
            }
            if color.enabled() {
                writeln!(w, "{}", format!("{} publications", entries.len()).dimmed())?;
            } else {
                writeln!(w, "{} publications", entries.len())?;
            }
        }
        PublicationState::Empty => {
            if color.enabled() {
                writeln!(w, "{}", NO_PUBLICATIONS.dimmed())?;
            } else {
                writeln!(w, "{}", NO_PUBLICATIONS)?;
            }
        }
        PublicationState::Failed { message } => {
            if color.enabled() {
                writeln!(w, "{}", message.red().bold())?;
            } else {
                writeln!(w, "{}", message)?;
            }
        }
    }
    Ok(())
}

/// Text listing used for both the terminal and files; only color differs.
pub fn publications_text(state: &PublicationState, color: ColorMode) -> std::io::Result<String> {
    let mut buf = Vec::new();
    print_publications(&mut buf, state, color)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn posts_text(posts: &[BlogPost], color: ColorMode) -> std::io::Result<String> {
    let mut buf = Vec::new();
    print_posts(&mut buf, posts, color)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Print parsed records without formatting them (dry run).
pub fn print_raw_entries(
    w: &mut dyn Write,
    source_name: &str,
    entries: &[RawEntry],
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(
            w,
            "{} {} ({} records parsed)\n",
            "DRY RUN:".bold().cyan(),
            source_name.bold(),
            entries.len()
        )?;
    } else {
        writeln!(
            w,
            "DRY RUN: {} ({} records parsed)\n",
            source_name,
            entries.len()
        )?;
    }

    for (i, entry) in entries.iter().enumerate() {
        let header = format!("[{}] @{}{{{}}}", i + 1, entry.entry_type, entry.key);
        if color.enabled() {
            writeln!(w, "{}", header.bold().yellow())?;
        } else {
            writeln!(w, "{}", header)?;
        }

        let names: Vec<&str> = entry.fields().iter().map(|(n, _)| n.as_str()).collect();
        let names = if names.is_empty() {
            "(none)".to_string()
        } else {
            names.join(", ")
        };
        if color.enabled() {
            writeln!(w, "  Fields: {}", names.dimmed())?;
        } else {
            writeln!(w, "  Fields: {}", names)?;
        }
    }
    Ok(())
}

/// Print blog post previews, newest first as given.
pub fn print_posts(w: &mut dyn Write, posts: &[BlogPost], color: ColorMode) -> std::io::Result<()> {
    if posts.is_empty() {
        writeln!(w, "{}", NO_POSTS)?;
        return Ok(());
    }
    for post in posts {
        if color.enabled() {
            writeln!(w, "{}  {}", post.display_date().dimmed(), post.title.bold())?;
        } else {
            writeln!(w, "{}  {}", post.display_date(), post.title)?;
        }
        if !post.excerpt.is_empty() {
            writeln!(w, "    {}", post.excerpt)?;
        }
        writeln!(w, "    {}", post.href())?;
    }
    Ok(())
}
