use crate::spanner::SpannerClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub spanner_client: SpannerClient,
}

impl AppState {
    pub fn new(spanner_client: SpannerClient) -> Self {
        Self { spanner_client }
    }
}
