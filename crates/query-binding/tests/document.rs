#![allow(unused_crate_dependencies)]

use std::sync::Arc;

use query_binding::{ArgumentValue, Fragment, Route, Sources, Variables};

fn item() -> Arc<Fragment> {
    Fragment::new("Item_store", "HackerNewsItem", |item| {
        item.field("id")
            .field("title")
            .field("score")
            .field("url")
            .field_with("by", |by| by.field("id"))
    })
}

fn top_items(item: Arc<Fragment>) -> Arc<Fragment> {
    Fragment::new("TopItems_store", "HackerNewsAPI", |api| {
        api.field_with("stories", |stories| {
            stories
                .argument("storyType", ArgumentValue::variable("storyType"))
                .spread(item)
        })
    })
}

#[test]
fn route_reaches_every_fragment() {
    let route = Route::new("HackerNewsRoute", "hn", top_items(item()))
        .with_variables(Variables::new().with("storyType", "top"));

    let names: Vec<_> = route.fragments().iter().map(|f| f.name().to_owned()).collect();

    assert_eq!(names, ["Item_store", "TopItems_store"]);
    assert_eq!(route.variables().get_str("storyType"), Some("top"));
    assert_eq!(route.fragment().variables().into_iter().collect::<Vec<_>>(), ["storyType"]);
}

#[test]
fn shared_child_fragment_is_reached_once() {
    let author = Fragment::new("Author_user", "User", |user| user.field("id"));

    let post = Fragment::new("Post_post", "Post", |post| {
        post.field_with("by", |by| by.spread(author.clone()))
            .field_with("comments", |comments| {
                comments
                    .argument("first", ArgumentValue::literal(3))
                    .field_with("by", |by| by.spread(author.clone()))
            })
    });

    let route = Route::new("PostRoute", "post", post);
    let names: Vec<_> = route.fragments().iter().map(|f| f.name().to_owned()).collect();

    assert_eq!(names, ["Author_user", "Post_post"]);
    assert_eq!(route.fragment().child_fragments().len(), 2);
}

#[test]
fn literal_arguments_are_graphql_values() {
    let filter = ArgumentValue::literal(serde_json::json!({"tags": ["rust", "gql"], "open": true, "after": null}));

    assert_eq!(filter.to_string(), r#"{tags: ["rust", "gql"], open: true, after: null}"#);
}

#[test]
fn sources_lookup() {
    let item = item();
    let route = Route::new("HackerNewsRoute", "hn", top_items(item.clone()));
    let sources = Sources::new().declare(item).declare(route.fragment().clone()).route(route);

    assert_eq!(sources.fragments().len(), 2);
    assert!(sources.find_route("HackerNewsRoute").is_some());
    assert!(sources.find_route("Missing").is_none());
}
