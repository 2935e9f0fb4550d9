//! # Query bindings
//!
//! Typed declarations of the data a view needs. A view declares a [`Fragment`]: a type
//! condition plus a structured selection set of fields and child fragments. A parent view
//! embeds a child by holding the child's fragment object, so the whole tree of data
//! dependencies is known statically and can be validated against a schema before anything
//! is sent over the network.
//!
//! A [`Route`] binds a top-level query field to the root view's fragment and carries the
//! initial [`Variables`]. The set of everything declared by an application is collected in
//! [`Sources`], which is what the metadata generator consumes.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod fragment;
mod route;
mod value;
mod variables;

pub use fragment::{Argument, ArgumentValue, Field, Fragment, Selection, SelectionSet};
pub use route::Route;
pub use variables::Variables;

use std::sync::Arc;

/// Everything an application declares: its view fragments and its routes.
#[derive(Debug, Default, Clone)]
pub struct Sources {
    fragments: Vec<Arc<Fragment>>,
    routes: Vec<Route>,
}

impl Sources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fragment declared by a view.
    #[must_use]
    pub fn declare(mut self, fragment: Arc<Fragment>) -> Self {
        self.fragments.push(fragment);
        self
    }

    /// Registers a route.
    #[must_use]
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn fragments(&self) -> &[Arc<Fragment>] {
        &self.fragments
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn find_route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name() == name)
    }
}
