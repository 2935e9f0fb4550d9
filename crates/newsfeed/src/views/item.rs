use std::{
    fmt,
    sync::{Arc, LazyLock},
};

use query_binding::Fragment;
use serde::Deserialize;

use super::View;

static FRAGMENT: LazyLock<Arc<Fragment>> = LazyLock::new(|| {
    Fragment::new("Item_store", "HackerNewsItem", |item| {
        item.field("id")
            .field("title")
            .field("score")
            .field("url")
            .field_with("by", |by| by.field("id"))
    })
});

/// A story as selected by the item fragment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemData {
    pub id: Id,
    pub title: Option<String>,
    pub score: Option<i64>,
    /// Absent for text posts such as Ask HN.
    pub url: Option<String>,
    pub by: Option<Author>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    String(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(id) => write!(f, "{id}"),
            Id::String(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub id: String,
}

/// Renders one story: a linked title, a `score - author` line and a separator.
#[derive(Debug, Clone, Copy)]
pub struct Item<'a> {
    data: &'a ItemData,
}

impl<'a> Item<'a> {
    pub fn new(data: &'a ItemData) -> Self {
        Item { data }
    }
}

impl View for Item<'_> {
    fn fragment() -> Arc<Fragment> {
        FRAGMENT.clone()
    }
}

impl fmt::Display for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ItemData {
            title, score, url, by, ..
        } = self.data;

        write!(f, "# {}", title.as_deref().unwrap_or("(untitled)"))?;

        if let Some(url) = url {
            write!(f, " <{url}>")?;
        }

        writeln!(f)?;

        match score {
            Some(score) => write!(f, "## {score}")?,
            None => f.write_str("## ?")?,
        }

        match by {
            Some(author) => writeln!(f, " - {}", author.id)?,
            None => writeln!(f, " - ?")?,
        }

        writeln!(f, "---")
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use serde_json::json;

    use super::*;

    fn data(value: serde_json::Value) -> ItemData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn renders_title_score_and_author() {
        let data = data(json!({"id": 1, "title": "A", "score": 5, "url": "http://x", "by": {"id": "u"}}));

        let expected = expect![[r#"
            # A <http://x>
            ## 5 - u
            ---
        "#]];

        expected.assert_eq(&Item::new(&data).to_string());
    }

    #[test]
    fn text_posts_have_no_link() {
        let data = data(json!({"id": "8863", "title": "Ask HN: Rust?", "score": 12, "by": {"id": "pg"}}));

        let expected = expect![[r#"
            # Ask HN: Rust?
            ## 12 - pg
            ---
        "#]];

        expected.assert_eq(&Item::new(&data).to_string());
        assert_eq!(data.id, Id::String("8863".into()));
    }

    #[test]
    fn missing_values() {
        let data = data(json!({"id": 2, "title": null, "score": null, "url": null, "by": null}));

        let expected = expect![[r#"
            # (untitled)
            ## ? - ?
            ---
        "#]];

        expected.assert_eq(&Item::new(&data).to_string());
        assert_eq!(data.id.to_string(), "2");
    }

    #[test]
    fn fragment_selects_what_is_rendered() {
        assert_eq!(Item::fragment().field_paths(), ["id", "title", "score", "url", "by.id"]);
        assert!(Arc::ptr_eq(&Item::fragment(), &Item::fragment()));
    }
}
