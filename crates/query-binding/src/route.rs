use std::{collections::BTreeMap, sync::Arc};

use crate::{Fragment, Variables};

/// Names a top-level query and binds its root field to the root view's fragment.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    root_field: String,
    fragment: Arc<Fragment>,
    variables: Variables,
}

impl Route {
    pub fn new(name: impl Into<String>, root_field: impl Into<String>, fragment: Arc<Fragment>) -> Self {
        Self {
            name: name.into(),
            root_field: root_field.into(),
            fragment,
            variables: Variables::default(),
        }
    }

    /// Sets the initial variables the route's query starts with.
    #[must_use]
    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root_field(&self) -> &str {
        &self.root_field
    }

    pub fn fragment(&self) -> &Arc<Fragment> {
        &self.fragment
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Every fragment reachable from the root fragment, including it, ordered by name.
    /// A fragment embedded by several parents appears once.
    pub fn fragments(&self) -> Vec<Arc<Fragment>> {
        let mut seen = BTreeMap::new();
        let mut stack = vec![self.fragment.clone()];

        while let Some(fragment) = stack.pop() {
            if seen.contains_key(fragment.name()) {
                continue;
            }

            stack.extend(fragment.child_fragments().into_iter().cloned());
            seen.insert(fragment.name().to_owned(), fragment);
        }

        seen.into_values().collect()
    }
}
