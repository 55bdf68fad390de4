//! Blog post previews supplied through configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used in the `date` field of a post.
pub const POST_DATE_FORMAT: &str = "%Y-%m-%d";

/// One entry of the `[[posts]]` configuration list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Markdown file name under the site's blog folder.
    pub file: String,
    pub title: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub excerpt: String,
}

impl BlogPost {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), POST_DATE_FORMAT).ok()
    }

    /// Long-form date such as "January 15, 2025". Unparseable dates are
    /// returned unchanged.
    pub fn display_date(&self) -> String {
        match self.parsed_date() {
            Some(d) => d.format("%B %-d, %Y").to_string(),
            None => self.date.clone(),
        }
    }

    /// Target of the "Read more" link.
    pub fn href(&self) -> String {
        format!("blog-post.html?post={}", self.file)
    }
}

/// Sort posts newest first. Posts whose date does not parse go last, and
/// ties keep their configured order.
pub fn arrange_posts(mut posts: Vec<BlogPost>) -> Vec<BlogPost> {
    for post in posts.iter().filter(|p| p.parsed_date().is_none()) {
        tracing::warn!(file = %post.file, date = %post.date, "unparseable post date");
    }
    posts.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
    posts
}
