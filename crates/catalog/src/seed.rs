//! Compiled-in catalog content.

use shared::domain::{Article, CatalogItem};

use crate::CatalogError;

const APPS_JSON: &str = include_str!("../data/apps.json");
const ARTICLES_JSON: &str = include_str!("../data/articles.json");

pub fn apps() -> Result<Vec<CatalogItem>, CatalogError> {
    serde_json::from_str(APPS_JSON).map_err(|source| CatalogError::Seed {
        what: "apps",
        source,
    })
}

pub fn articles() -> Result<Vec<Article>, CatalogError> {
    serde_json::from_str(ARTICLES_JSON).map_err(|source| CatalogError::Seed {
        what: "articles",
        source,
    })
}
