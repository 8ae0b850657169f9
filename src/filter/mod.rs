use crate::domain::Article;

/// Articles whose title contains `query`, ignoring case, in their original order.
///
/// Titles are matched as they are displayed, with HTML entities decoded.
/// An empty query keeps every article, including those without a title.
pub fn project<'a, I>(articles: I, query: &str) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    if query.is_empty() {
        return articles.into_iter().collect();
    }

    let needle = query.to_lowercase();
    articles
        .into_iter()
        .filter(|article| {
            article
                .decoded_title()
                .map(|title| title.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .collect()
}
