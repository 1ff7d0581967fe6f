//! DTOs for the stations screen.

use serde::{Deserialize, Serialize};

use crate::domain::station::Station;
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct StationsQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StationsPageData {
    pub stations: Paginated<Station>,
    pub search_query: Option<String>,
    pub status_filter: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}
