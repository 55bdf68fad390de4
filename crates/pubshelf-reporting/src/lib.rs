pub mod export;
pub mod types;

pub use export::{
    NO_POSTS, NO_PUBLICATIONS, export_html, export_json, export_page, export_posts,
    export_posts_html, export_publications, export_to_path,
};
pub use types::{ExportError, ExportFormat};
