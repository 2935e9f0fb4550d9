use std::{collections::BTreeSet, fmt, sync::Arc};

/// A named, typed set of selections declared by a view.
#[derive(Debug, PartialEq)]
pub struct Fragment {
    name: String,
    type_condition: String,
    selection_set: SelectionSet,
}

impl Fragment {
    /// Declares a fragment on `type_condition`. The closure receives an empty selection set
    /// and returns the selections of the fragment.
    ///
    /// ```ignore
    /// let author = Fragment::new("Author_user", "User", |user| user.field("id").field("name"));
    /// ```
    pub fn new(
        name: impl Into<String>,
        type_condition: impl Into<String>,
        build: impl FnOnce(SelectionSet) -> SelectionSet,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            type_condition: type_condition.into(),
            selection_set: build(SelectionSet::default()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_condition(&self) -> &str {
        &self.type_condition
    }

    pub fn selection_set(&self) -> &SelectionSet {
        &self.selection_set
    }

    /// Dotted response paths of every field selected directly by this fragment, in
    /// declaration order. Fields behind child fragments are not included.
    pub fn field_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.selection_set, "", &mut paths);
        paths
    }

    /// The fragments embedded anywhere in this fragment's own selections, in declaration
    /// order. Nested fragments of those children are not included.
    pub fn child_fragments(&self) -> Vec<&Arc<Fragment>> {
        let mut children = Vec::new();
        collect_children(&self.selection_set, &mut children);
        children
    }

    /// Names of the variables referenced by this fragment's own arguments.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut variables = BTreeSet::new();
        collect_variables(&self.selection_set, &mut variables);
        variables
    }
}

fn collect_paths(selection_set: &SelectionSet, prefix: &str, paths: &mut Vec<String>) {
    for selection in selection_set.items() {
        let Selection::Field(field) = selection else {
            continue;
        };

        let path = if prefix.is_empty() {
            field.response_key().to_owned()
        } else {
            format!("{prefix}.{}", field.response_key())
        };

        if field.selection_set().is_empty() {
            paths.push(path);
        } else {
            collect_paths(field.selection_set(), &path, paths);
        }
    }
}

fn collect_children<'a>(selection_set: &'a SelectionSet, children: &mut Vec<&'a Arc<Fragment>>) {
    for selection in selection_set.items() {
        match selection {
            Selection::Field(field) => collect_children(field.selection_set(), children),
            Selection::FragmentSpread(fragment) => children.push(fragment),
        }
    }
}

fn collect_variables<'a>(selection_set: &'a SelectionSet, variables: &mut BTreeSet<&'a str>) {
    for selection in selection_set.items() {
        let Selection::Field(field) = selection else {
            continue;
        };

        for argument in field.arguments() {
            if let ArgumentValue::Variable(name) = argument.value() {
                variables.insert(name);
            }
        }

        collect_variables(field.selection_set(), variables);
    }
}

/// An ordered list of selections.
#[derive(Debug, Default, PartialEq)]
pub struct SelectionSet {
    items: Vec<Selection>,
}

impl SelectionSet {
    /// Selects a leaf field.
    #[must_use]
    pub fn field(self, name: impl Into<String>) -> Self {
        self.select(Field::new(name))
    }

    /// Selects a field configured by `build`, for arguments, aliases and sub-selections.
    #[must_use]
    pub fn field_with(self, name: impl Into<String>, build: impl FnOnce(Field) -> Field) -> Self {
        self.select(build(Field::new(name)))
    }

    /// Embeds a child fragment.
    #[must_use]
    pub fn spread(mut self, fragment: Arc<Fragment>) -> Self {
        self.items.push(Selection::FragmentSpread(fragment));
        self
    }

    #[must_use]
    pub fn select(mut self, field: Field) -> Self {
        self.items.push(Selection::Field(field));
        self
    }

    pub fn items(&self) -> &[Selection] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(Arc<Fragment>),
}

/// A selected field, with its optional alias, arguments and sub-selections.
#[derive(Debug, PartialEq)]
pub struct Field {
    name: String,
    alias: Option<String>,
    arguments: Vec<Argument>,
    selection_set: SelectionSet,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            arguments: Vec::new(),
            selection_set: SelectionSet::default(),
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn argument(mut self, name: impl Into<String>, value: ArgumentValue) -> Self {
        self.arguments.push(Argument {
            name: name.into(),
            value,
        });
        self
    }

    #[must_use]
    pub fn field(self, name: impl Into<String>) -> Self {
        self.map_selections(|selections| selections.field(name))
    }

    #[must_use]
    pub fn field_with(self, name: impl Into<String>, build: impl FnOnce(Field) -> Field) -> Self {
        self.map_selections(|selections| selections.field_with(name, build))
    }

    #[must_use]
    pub fn spread(self, fragment: Arc<Fragment>) -> Self {
        self.map_selections(|selections| selections.spread(fragment))
    }

    fn map_selections(mut self, f: impl FnOnce(SelectionSet) -> SelectionSet) -> Self {
        self.selection_set = f(std::mem::take(&mut self.selection_set));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The key under which this field appears in a response.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn selection_set(&self) -> &SelectionSet {
        &self.selection_set
    }
}

#[derive(Debug, PartialEq)]
pub struct Argument {
    name: String,
    value: ArgumentValue,
}

impl Argument {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ArgumentValue {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArgumentValue {
    /// A reference to an operation variable, without the `$`.
    Variable(String),
    Literal(serde_json::Value),
}

impl ArgumentValue {
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    pub fn literal(value: impl Into<serde_json::Value>) -> Self {
        Self::Literal(value.into())
    }
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentValue::Variable(name) => write!(f, "${name}"),
            ArgumentValue::Literal(value) => crate::value::write_value(f, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Arc<Fragment> {
        Fragment::new("Author_user", "User", |user| user.field("id"))
    }

    #[test]
    fn nested_field_paths() {
        let post = Fragment::new("Post_post", "Post", |post| {
            post.field("title")
                .field_with("by", |by| by.field("id").field_with("avatar", |a| a.field("url")))
                .field_with("summary", |f| f.alias("short"))
        });

        assert_eq!(post.field_paths(), ["title", "by.id", "by.avatar.url", "short"]);
    }

    #[test]
    fn child_fragments_are_held_not_copied() {
        let author = author();
        let post = Fragment::new("Post_post", "Post", |post| {
            post.field("title").field_with("by", |by| by.spread(author.clone()))
        });

        let children = post.child_fragments();
        assert_eq!(children.len(), 1);
        assert!(Arc::ptr_eq(children[0], &author));
        assert_eq!(post.field_paths(), ["title"]);
    }

    #[test]
    fn variables_are_collected_from_nested_arguments() {
        let feed = Fragment::new("Feed_feed", "Feed", |feed| {
            feed.field_with("posts", |posts| {
                posts
                    .argument("first", ArgumentValue::variable("count"))
                    .argument("order", ArgumentValue::literal("NEW"))
                    .field_with("comments", |c| c.argument("after", ArgumentValue::variable("cursor")).field("id"))
            })
        });

        assert_eq!(feed.variables().into_iter().collect::<Vec<_>>(), ["count", "cursor"]);
    }

    #[test]
    fn argument_value_display() {
        assert_eq!(ArgumentValue::variable("storyType").to_string(), "$storyType");
        assert_eq!(ArgumentValue::literal("top").to_string(), "\"top\"");
        assert_eq!(ArgumentValue::literal(10).to_string(), "10");
    }
}
