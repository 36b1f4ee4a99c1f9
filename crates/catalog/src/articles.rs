use shared::domain::Article;

use crate::{contains_ignore_case, normalized_query, CatalogError, Facet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub query: String,
    pub category: Facet,
}

impl ArticleFilter {
    pub fn accepts(&self, article: &Article) -> bool {
        let text_ok = match normalized_query(&self.query) {
            None => true,
            Some(needle) => [
                article.title.as_str(),
                article.category.as_str(),
                article.summary.as_str(),
            ]
            .iter()
            .any(|field| contains_ignore_case(field, &needle)),
        };
        text_ok && self.category.matches(&article.category)
    }
}

/// Filtered articles in learning-path order.
pub fn filter_articles(source: &[Article], filter: &ArticleFilter) -> Vec<Article> {
    let mut out: Vec<Article> = source
        .iter()
        .filter(|article| filter.accepts(article))
        .cloned()
        .collect();
    out.sort_by_key(|article| article.order);
    out
}

/// Articles arranged by `order`, which must be unique and consecutive.
#[derive(Debug, Clone)]
pub struct LearningPath {
    articles: Vec<Article>,
}

impl LearningPath {
    pub fn new(mut articles: Vec<Article>) -> Result<Self, CatalogError> {
        articles.sort_by_key(|article| article.order);

        for pair in articles.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.order == next.order {
                return Err(CatalogError::DuplicateOrder {
                    order: prev.order,
                    first: prev.slug.to_string(),
                    second: next.slug.to_string(),
                });
            }
            if next.order != prev.order + 1 {
                return Err(CatalogError::LearningPathGap {
                    expected: prev.order + 1,
                    found: next.order,
                });
            }
        }

        Ok(Self { articles })
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    fn index_of(&self, slug: &str) -> Option<usize> {
        self.articles
            .iter()
            .position(|article| article.slug.as_str() == slug)
    }

    pub fn get(&self, slug: &str) -> Option<&Article> {
        self.index_of(slug).map(|idx| &self.articles[idx])
    }

    pub fn next(&self, slug: &str) -> Option<&Article> {
        let idx = self.index_of(slug)?;
        self.articles.get(idx + 1)
    }

    pub fn previous(&self, slug: &str) -> Option<&Article> {
        let idx = self.index_of(slug)?;
        idx.checked_sub(1).and_then(|prev| self.articles.get(prev))
    }

    /// One-based position and path length, e.g. `(2, 5)` for "2 of 5".
    pub fn position(&self, slug: &str) -> Option<(usize, usize)> {
        self.index_of(slug)
            .map(|idx| (idx + 1, self.articles.len()))
    }
}
