//! # newsfeed
//!
//! Hacker News stories rendered from a small view tree. Each view declares the data it
//! needs as a fragment, the story list embeds the item's fragment, and a single route binds
//! the list to the `hn` field of the query type. The generated query metadata is loaded
//! from a [`Bundle`] and [`mount`] runs the route's query through an explicit
//! [`Network`] before filling the host element once.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod bootstrap;
mod bundle;
mod errors;
mod host;
mod runtime;
pub mod views;

pub use bootstrap::{mount, MountConfig, Mounted};
pub use bundle::Bundle;
pub use errors::{BundleError, MountError, RuntimeError, UnknownStoryType};
pub use host::HostDocument;
pub use runtime::{GraphqlRequest, HttpNetworkLayer, Network, NetworkLayer, RootContainer, VariableSink};

use query_binding::{Route, Sources, Variables};
use views::{Item, StoryType, TopItems, View, STORY_TYPE};

/// Name of the application's only route, and of the query it runs.
pub const ROUTE_NAME: &str = "HackerNewsRoute";

/// The route the application mounts: the story list fills the `hn` root field and starts
/// on top stories.
pub fn route() -> Route {
    Route::new(ROUTE_NAME, "hn", TopItems::fragment())
        .with_variables(Variables::new().with(STORY_TYPE, StoryType::default().as_str()))
}

/// Every fragment and route the application declares.
pub fn sources() -> Sources {
    Sources::new()
        .declare(Item::fragment())
        .declare(TopItems::fragment())
        .route(route())
}
