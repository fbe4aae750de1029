use serde::{Deserialize, Serialize};

/// A list endpoint body: either a bare array or a limit/offset page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page(Page<T>),
    Items(Vec<T>),
}

impl<T> Listing<T> {
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page(page) => page.results,
            Self::Items(items) => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub count: Option<u64>,
    pub current_page: Option<u64>,
    pub total_pages: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}
