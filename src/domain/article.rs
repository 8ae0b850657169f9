use std::borrow::Cow;
use std::fmt;

use html_escape::decode_html_entities;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Identifier of an article as the backend sent it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArticleId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Number(n) => write!(f, "{}", n),
            ArticleId::Text(s) => f.write_str(s),
        }
    }
}

/// A single feed record.
///
/// The raw JSON element is kept as-is; only `id` and `title` carry meaning here.
/// Elements missing either field are still valid records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article {
    raw: Value,
}

impl Article {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn id(&self) -> Option<ArticleId> {
        match self.raw.get("id")? {
            Value::Number(n) => n.as_i64().map(ArticleId::Number),
            Value::String(s) => Some(ArticleId::Text(s.clone())),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.raw.get("title").and_then(Value::as_str)
    }

    /// Title with HTML entities decoded, as it is shown and searched.
    pub fn decoded_title(&self) -> Option<Cow<'_, str>> {
        self.title().map(|t| decode_html_entities(t))
    }

    pub fn display_title(&self) -> String {
        self.decoded_title()
            .map(Cow::into_owned)
            .unwrap_or_else(|| "(Untitled)".to_string())
    }

    pub fn url(&self) -> Option<&str> {
        self.str_field("url")
    }

    pub fn author(&self) -> Option<&str> {
        self.str_field("author").or_else(|| self.str_field("by"))
    }

    pub fn score(&self) -> Option<i64> {
        self.raw.get("score").and_then(Value::as_i64)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Key used to identify the record in a rendered list.
    ///
    /// Text ids carry a `s:` prefix so they never collide with numeric ones.
    /// Records without a usable id get a digest of their JSON so the key
    /// stays stable across refreshes of identical data.
    pub fn render_key(&self) -> String {
        match self.id() {
            Some(ArticleId::Number(n)) => n.to_string(),
            Some(ArticleId::Text(s)) => format!("s:{}", s),
            None => {
                let mut hasher = Sha256::new();
                hasher.update(self.raw.to_string().as_bytes());
                format!("anon-{}", hex::encode(hasher.finalize()))
            }
        }
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.raw.get(name).and_then(Value::as_str)
    }
}

impl From<Value> for Article {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_text_ids() {
        let hn = Article::new(json!({"id": 1, "title": "Foo"}));
        assert_eq!(hn.id(), Some(ArticleId::Number(1)));

        let reddit = Article::new(json!({"id": "t3_abc", "title": "Bar"}));
        assert_eq!(reddit.id(), Some(ArticleId::Text("t3_abc".into())));
    }

    #[test]
    fn test_missing_fields_are_tolerated() {
        let article = Article::new(json!({"score": 12}));
        assert_eq!(article.id(), None);
        assert_eq!(article.title(), None);
        assert_eq!(article.display_title(), "(Untitled)");
        assert_eq!(article.score(), Some(12));
    }

    #[test]
    fn test_non_object_element_is_a_record() {
        let article = Article::new(json!("just a string"));
        assert_eq!(article.id(), None);
        assert_eq!(article.title(), None);
        assert!(article.render_key().starts_with("anon-"));
    }

    #[test]
    fn test_display_title_decodes_entities() {
        let article = Article::new(json!({"id": 3, "title": "Rust &amp; WebAssembly"}));
        assert_eq!(article.title(), Some("Rust &amp; WebAssembly"));
        assert_eq!(article.display_title(), "Rust & WebAssembly");
    }

    #[test]
    fn test_render_key_separates_numeric_and_text_ids() {
        let numeric = Article::new(json!({"id": 1}));
        let text = Article::new(json!({"id": "1"}));
        assert_eq!(numeric.render_key(), "1");
        assert_eq!(text.render_key(), "s:1");
    }

    #[test]
    fn test_author_falls_back_to_by() {
        let article = Article::new(json!({"id": 4, "by": "pg"}));
        assert_eq!(article.author(), Some("pg"));
    }

    #[test]
    fn test_render_key_deterministic_without_id() {
        let a = Article::new(json!({"title": "No id"}));
        let b = Article::new(json!({"title": "No id"}));
        let c = Article::new(json!({"title": "Other"}));
        assert_eq!(a.render_key(), b.render_key());
        assert_ne!(a.render_key(), c.render_key());
        assert_eq!(a.render_key().len(), "anon-".len() + 64);
    }

    #[test]
    fn test_serializes_transparently() {
        let raw = json!({"id": 1, "title": "Foo", "url": "https://example.com"});
        let article = Article::new(raw.clone());
        assert_eq!(serde_json::to_value(&article).unwrap(), raw);
    }
}
