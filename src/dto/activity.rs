//! DTOs for the activity log screen.

use serde::{Deserialize, Serialize};

use crate::domain::activity::Activity;
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActivityPageData {
    pub activity: Paginated<Activity>,
    /// Latest entries for the summary strip; this feed reports no total
    /// count, so the count shown is just the slice length.
    pub recent: Vec<Activity>,
    pub recent_count: usize,
    pub search_query: Option<String>,
    pub action_filter: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}
