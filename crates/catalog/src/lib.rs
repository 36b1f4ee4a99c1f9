//! In-memory catalog views: facet/search filtering and listing order for apps,
//! plus the article hub (filtering, learning path, block rendering).

use shared::domain::CatalogItem;
use thiserror::Error;

mod articles;
mod render;
pub mod seed;

pub use articles::{filter_articles, ArticleFilter, LearningPath};
pub use render::{render_article, render_block};

/// Facet value meaning "no filter".
pub const ALL_SENTINEL: &str = "All";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse {what} seed: {source}")]
    Seed {
        what: &'static str,
        source: serde_json::Error,
    },
    #[error("duplicate learning path order {order} (articles '{first}' and '{second}')")]
    DuplicateOrder {
        order: u32,
        first: String,
        second: String,
    },
    #[error("learning path has a gap: expected order {expected}, found {found}")]
    LearningPathGap { expected: u32, found: u32 },
}

/// A single-valued facet selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Facet {
    #[default]
    All,
    Exactly(String),
}

impl Facet {
    /// Parses a UI selection; the `All` sentinel (any case) or a blank value
    /// disables the facet.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            Self::All
        } else {
            Self::Exactly(trimmed.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exactly(expected) => expected == value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub query: String,
    pub category: Facet,
    pub hardware: Facet,
    pub status: Facet,
}

impl CatalogFilter {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Facet::parse(category);
        self
    }

    pub fn with_hardware(mut self, hardware: &str) -> Self {
        self.hardware = Facet::parse(hardware);
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Facet::parse(status);
        self
    }

    /// True when every active predicate accepts `item`.
    pub fn accepts(&self, item: &CatalogItem) -> bool {
        let needle = normalized_query(&self.query);
        let text_ok = match needle.as_deref() {
            None => true,
            Some(needle) => [
                item.name.as_str(),
                item.builder.as_str(),
                item.description.as_str(),
                item.category.as_str(),
            ]
            .iter()
            .any(|field| contains_ignore_case(field, needle)),
        };

        text_ok
            && self.category.matches(&item.category)
            && self.hardware.matches(&item.hardware)
            && self.status.matches(item.status.as_str())
    }
}

pub(crate) fn normalized_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// `needle` must already be lowercased.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Narrows `source` by `filter` and orders the survivors for listing:
/// featured items first, then by status priority. The sort is stable, so
/// equal keys keep source order.
pub fn filter_apps(source: &[CatalogItem], filter: &CatalogFilter) -> Vec<CatalogItem> {
    let mut out: Vec<CatalogItem> = source
        .iter()
        .filter(|item| filter.accepts(item))
        .cloned()
        .collect();
    out.sort_by_key(|item| (!item.featured, item.status.sort_priority()));
    tracing::debug!(
        source = source.len(),
        matched = out.len(),
        "catalog: filtered apps"
    );
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOptions {
    pub categories: Vec<String>,
    pub hardware: Vec<String>,
    pub statuses: Vec<String>,
}

/// Distinct facet values in first-seen order, each list led by the `All`
/// sentinel.
pub fn facet_options(source: &[CatalogItem]) -> FacetOptions {
    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut out = vec![ALL_SENTINEL.to_string()];
        for value in values {
            if !out.iter().any(|existing| existing == value) {
                out.push(value.to_string());
            }
        }
        out
    }

    FacetOptions {
        categories: distinct(source.iter().map(|item| item.category.as_str())),
        hardware: distinct(source.iter().map(|item| item.hardware.as_str())),
        statuses: distinct(source.iter().map(|item| item.status.as_str())),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
