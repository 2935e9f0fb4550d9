#![allow(unused_crate_dependencies)]

use std::sync::Arc;

use expect_test::expect;
use query_binding::{ArgumentValue, Fragment, Route, Sources, Variables};
use query_metadata::{generate, GenerateError, Options, SelectionMetadata};

fn schema() -> cynic_introspection::Schema {
    newsfeed_introspection::SchemaDocument::from_response_body(include_bytes!(
        "../../newsfeed-introspection/tests/fixtures/hackernews_introspection.json"
    ))
    .unwrap()
    .to_schema()
    .unwrap()
}

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

fn hacker_news(item: Arc<Fragment>) -> Sources {
    let top_items = top_items(item.clone());
    let route = Route::new("HackerNewsRoute", "hn", top_items.clone())
        .with_variables(Variables::new().with("storyType", "top"));

    Sources::new().declare(item).declare(top_items).route(route)
}

fn errors(sources: &Sources) -> Vec<GenerateError> {
    generate(&schema(), sources, Options::ABORT_ON_ERROR)
        .unwrap_err()
        .into_iter()
        .collect()
}

#[test]
fn hacker_news_route() {
    let generated = generate(&schema(), &hacker_news(item()), Options::ABORT_ON_ERROR).unwrap();
    assert!(generated.diagnostics.is_empty());

    let query = generated.metadata.query("HackerNewsRoute").unwrap();

    assert_eq!(query.root_field, "hn");
    assert_eq!(query.root_type, "HackerNewsAPI");
    assert_eq!(query.fragment, "TopItems_store");
    assert_eq!(query.fragments, ["Item_store", "TopItems_store"]);
    assert_eq!(query.variables["storyType"].type_ref, "String");
    assert_eq!(query.variables["storyType"].default_value, Some(serde_json::json!("top")));

    let expected = expect![[r#"
        query HackerNewsRoute($storyType: String = "top") {
          hn {
            ...TopItems_store
          }
        }

        fragment Item_store on HackerNewsItem {
          id
          title
          score
          url
          by {
            id
          }
        }

        fragment TopItems_store on HackerNewsAPI {
          stories(storyType: $storyType) {
            ...Item_store
          }
        }
    "#]];

    expected.assert_eq(&query.document);
}

#[test]
fn fragment_metadata() {
    let generated = generate(&schema(), &hacker_news(item()), Options::ABORT_ON_ERROR).unwrap();
    let top_items = generated.metadata.fragment("TopItems_store").unwrap();

    let mut json = serde_json::to_string_pretty(top_items).unwrap();
    json.push('\n');

    let expected = expect![[r#"
        {
          "typeCondition": "HackerNewsAPI",
          "selections": [
            {
              "kind": "field",
              "responseKey": "stories",
              "fieldName": "stories",
              "parentType": "HackerNewsAPI",
              "typeName": "HackerNewsItem",
              "typeRef": "[HackerNewsItem]",
              "plural": true,
              "arguments": [
                {
                  "name": "storyType",
                  "typeRef": "String",
                  "value": {
                    "variable": "storyType"
                  }
                }
              ],
              "selections": [
                {
                  "kind": "fragment",
                  "name": "Item_store"
                }
              ]
            }
          ],
          "variables": {
            "storyType": {
              "typeRef": "String"
            }
          }
        }
    "#]];

    expected.assert_eq(&json);

    let item = generated.metadata.fragment("Item_store").unwrap();
    let SelectionMetadata::Field(by) = &item.selections[4] else {
        unreachable!("`by` is selected as a field");
    };

    assert_eq!(by.type_ref, "HackerNewsUser!");
    assert!(!by.plural);
}

#[test]
fn output_is_deterministic() {
    let schema = schema();

    let first = generate(&schema, &hacker_news(item()), Options::ABORT_ON_ERROR).unwrap();
    let second = generate(&schema, &hacker_news(item()), Options::ABORT_ON_ERROR).unwrap();

    let first = first.metadata.to_json().unwrap();
    assert_eq!(first, second.metadata.to_json().unwrap());

    let parsed = query_metadata::Metadata::from_json(&first).unwrap();
    assert_eq!(parsed.to_json().unwrap(), first);
}

fn item_with_points() -> Arc<Fragment> {
    Fragment::new("Item_store", "HackerNewsItem", |item| {
        item.field("id").field("title").field("points")
    })
}

#[test]
fn unknown_field_aborts() {
    assert_eq!(
        errors(&hacker_news(item_with_points())),
        [GenerateError::UnknownField {
            fragment: "Item_store".into(),
            parent_type: "HackerNewsItem".into(),
            field: "points".into(),
        }]
    );
}

#[test]
fn best_effort_drops_invalid_selections() {
    let generated = generate(&schema(), &hacker_news(item_with_points()), Options::empty()).unwrap();

    assert_eq!(generated.diagnostics.len(), 1);
    assert_eq!(
        generated.diagnostics.to_string(),
        "cannot query field `points` on type `HackerNewsItem` (in fragment `Item_store`)"
    );

    let item = generated.metadata.fragment("Item_store").unwrap();
    assert_eq!(item.selections.len(), 2);

    let document = &generated.metadata.query("HackerNewsRoute").unwrap().document;
    assert!(!document.contains("points"), "{document}");
    assert!(document.contains("title"), "{document}");
}

#[test]
fn unknown_type_condition() {
    let item = Fragment::new("Item_store", "Story", |story| story.field("id"));
    let generated = generate(&schema(), &hacker_news(item), Options::empty()).unwrap();

    assert_eq!(
        generated.diagnostics.into_iter().collect::<Vec<_>>(),
        [GenerateError::UnknownType {
            fragment: "Item_store".into(),
            type_name: "Story".into(),
        }]
    );

    // the spread of the rejected fragment leaves `stories` without selections
    assert!(generated.metadata.fragment("Item_store").is_none());
    assert!(generated.metadata.query("HackerNewsRoute").is_none());
}

#[test]
fn selections_must_match_the_field_type() {
    let item = Fragment::new("Item_store", "HackerNewsItem", |item| {
        item.field("by").field_with("title", |title| title.field("length"))
    });

    assert_eq!(
        errors(&hacker_news(item)),
        [
            GenerateError::MissingSelections {
                fragment: "Item_store".into(),
                parent_type: "HackerNewsItem".into(),
                field: "by".into(),
                type_name: "HackerNewsUser".into(),
            },
            GenerateError::LeafWithSelections {
                fragment: "Item_store".into(),
                parent_type: "HackerNewsItem".into(),
                field: "title".into(),
                type_name: "String".into(),
            },
        ]
    );
}

#[test]
fn typename_is_always_selectable() {
    let item = Fragment::new("Item_store", "HackerNewsItem", |item| item.field("__typename").field("id"));

    let generated = generate(&schema(), &hacker_news(item), Options::ABORT_ON_ERROR).unwrap();

    assert!(generated
        .metadata
        .query("HackerNewsRoute")
        .unwrap()
        .document
        .contains("__typename"));
}

#[test]
fn arguments_are_checked() {
    let api = Fragment::new("Lookup_api", "HackerNewsAPI", |api| {
        api.field_with("item", |item| item.field("id"))
            .field_with("user", |user| {
                user.argument("id", ArgumentValue::literal(7))
                    .argument("since", ArgumentValue::literal(0))
                    .field("id")
            })
    });

    let sources = Sources::new().declare(api.clone()).route(Route::new("LookupRoute", "hn", api));

    assert_eq!(
        errors(&sources),
        [
            GenerateError::MissingArgument {
                fragment: "Lookup_api".into(),
                parent_type: "HackerNewsAPI".into(),
                field: "item".into(),
                argument: "id".into(),
                type_ref: "Int!".into(),
            },
            GenerateError::LiteralMismatch {
                fragment: "Lookup_api".into(),
                parent_type: "HackerNewsAPI".into(),
                field: "user".into(),
                argument: "id".into(),
                expected: "String!".into(),
                found: "a number".into(),
            },
            GenerateError::UnknownArgument {
                fragment: "Lookup_api".into(),
                parent_type: "HackerNewsAPI".into(),
                field: "user".into(),
                argument: "since".into(),
            },
        ]
    );
}

#[test]
fn variable_used_with_two_types() {
    let api = Fragment::new("Lookup_api", "HackerNewsAPI", |api| {
        api.field_with("item", |item| item.argument("id", ArgumentValue::variable("id")).field("id"))
            .field_with("user", |user| user.argument("id", ArgumentValue::variable("id")).field("id"))
    });

    let sources = Sources::new().declare(api.clone()).route(Route::new("LookupRoute", "hn", api));

    assert_eq!(
        errors(&sources),
        [GenerateError::VariableMismatch {
            scope: "Lookup_api".into(),
            variable: "id".into(),
            first: "Int!".into(),
            second: "String!".into(),
        }]
    );
}

#[test]
fn spread_on_an_incompatible_type() {
    let item = item();
    let api = Fragment::new("TopItems_store", "HackerNewsAPI", |api| api.spread(item.clone()));
    let sources = Sources::new()
        .declare(item)
        .declare(api.clone())
        .route(Route::new("HackerNewsRoute", "hn", api));

    assert_eq!(
        errors(&sources),
        [GenerateError::SpreadMismatch {
            parent: "TopItems_store".into(),
            fragment: "Item_store".into(),
            type_condition: "HackerNewsItem".into(),
            parent_type: "HackerNewsAPI".into(),
        }]
    );
}

#[test]
fn declarations_and_embeddings_must_agree() {
    let item = item();
    let orphan = Fragment::new("Orphan_user", "HackerNewsUser", |user| user.field("karma"));
    let top_items = top_items(item);
    let sources = Sources::new()
        .declare(top_items.clone())
        .declare(orphan)
        .route(Route::new("HackerNewsRoute", "hn", top_items));

    assert_eq!(
        errors(&sources),
        [
            GenerateError::UndeclaredFragment {
                fragment: "Item_store".into(),
                parent: "TopItems_store".into(),
            },
            GenerateError::UnusedFragment {
                fragment: "Orphan_user".into(),
            },
        ]
    );
}

#[test]
fn fragment_names_are_unique() {
    let other = Fragment::new("Item_store", "HackerNewsItem", |item| item.field("id"));
    let sources = hacker_news(item()).declare(other);

    assert_eq!(
        errors(&sources),
        [GenerateError::DuplicateFragment {
            fragment: "Item_store".into(),
        }]
    );
}

#[test]
fn routes_are_checked_against_the_query_type() {
    let item = item();
    let top_items = top_items(item.clone());
    let sources = Sources::new()
        .declare(item)
        .declare(top_items.clone())
        .route(Route::new("FeedRoute", "feed", top_items.clone()))
        .route(Route::new("HubRoute", "graphQLHub", top_items));

    assert_eq!(
        errors(&sources),
        [
            GenerateError::UnknownRootField {
                route: "FeedRoute".into(),
                field: "feed".into(),
                query_type: "Query".into(),
            },
            GenerateError::RouteMismatch {
                route: "HubRoute".into(),
                fragment: "TopItems_store".into(),
                type_condition: "HackerNewsAPI".into(),
                field: "graphQLHub".into(),
                field_type: "String".into(),
            },
        ]
    );
}
