use pubshelf_core::{BlogPost, PublicationState, load_publications, source_from_location};

/// Shared application state accessible from all handlers.
pub struct AppState {
    /// URL or path of the bibliography, read again on every request.
    pub source: String,
    pub client: reqwest::Client,
    pub site_title: String,
    /// Already sorted newest first.
    pub posts: Vec<BlogPost>,
}

impl AppState {
    /// One independent pipeline run. Nothing is cached between requests.
    pub async fn publications(&self) -> PublicationState {
        let source = source_from_location(&self.source, &self.client);
        load_publications(source.as_ref()).await
    }
}
