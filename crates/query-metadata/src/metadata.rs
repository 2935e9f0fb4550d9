use std::collections::{BTreeMap, BTreeSet};

use query_binding::ArgumentValue;
use serde::{Deserialize, Serialize};

/// Everything the runtime needs to know about the declared queries. Maps are ordered by
/// name so that serialization is stable.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub fragments: BTreeMap<String, FragmentMetadata>,
    pub queries: BTreeMap<String, QueryMetadata>,
}

impl Metadata {
    pub fn query(&self, route: &str) -> Option<&QueryMetadata> {
        self.queries.get(route)
    }

    pub fn fragment(&self, name: &str) -> Option<&FragmentMetadata> {
        self.fragments.get(name)
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The fragment named `root` and every fragment it embeds, directly or not.
    pub(crate) fn reachable_from(&self, root: &str) -> BTreeSet<String> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![root.to_owned()];

        while let Some(name) = stack.pop() {
            let Some(fragment) = self.fragments.get(&name) else {
                continue;
            };

            if seen.insert(name) {
                fragment.collect_spreads(&mut stack);
            }
        }

        seen
    }

    /// Drops spreads of fragments that have no metadata, then the fields and fragments left
    /// without selections, until nothing changes. Each fragment's variables are then
    /// recomputed from the arguments that survived.
    pub(crate) fn prune(&mut self) {
        loop {
            let known: BTreeSet<String> = self.fragments.keys().cloned().collect();

            self.fragments
                .retain(|_, fragment| retain_selections(&mut fragment.selections, &known));

            if self.fragments.len() == known.len() {
                break;
            }
        }

        for fragment in self.fragments.values_mut() {
            let mut used = BTreeSet::new();
            collect_variables(&fragment.selections, &mut used);
            fragment.variables.retain(|name, _| used.contains(name));
        }
    }
}

fn retain_selections(selections: &mut Vec<SelectionMetadata>, known: &BTreeSet<String>) -> bool {
    selections.retain_mut(|selection| match selection {
        SelectionMetadata::Fragment { name } => known.contains(name),
        SelectionMetadata::Field(field) => {
            field.selections.is_empty() || retain_selections(&mut field.selections, known)
        }
    });

    !selections.is_empty()
}

fn collect_variables(selections: &[SelectionMetadata], used: &mut BTreeSet<String>) {
    for selection in selections {
        let SelectionMetadata::Field(field) = selection else {
            continue;
        };

        for argument in &field.arguments {
            if let ArgumentValue::Variable(name) = &argument.value {
                used.insert(name.clone());
            }
        }

        collect_variables(&field.selections, used);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentMetadata {
    pub type_condition: String,
    pub selections: Vec<SelectionMetadata>,
    /// Variables referenced by this fragment's own arguments, with the type of the argument
    /// they are passed to.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, VariableDefinition>,
}

impl FragmentMetadata {
    fn collect_spreads(&self, names: &mut Vec<String>) {
        fn walk(selections: &[SelectionMetadata], names: &mut Vec<String>) {
            for selection in selections {
                match selection {
                    SelectionMetadata::Field(field) => walk(&field.selections, names),
                    SelectionMetadata::Fragment { name } => names.push(name.clone()),
                }
            }
        }

        walk(&self.selections, names);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectionMetadata {
    Field(FieldMetadata),
    Fragment { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    pub response_key: String,
    pub field_name: String,
    pub parent_type: String,
    /// The named type of the field, with list and non-null wrappers removed.
    pub type_name: String,
    /// The full type of the field, e.g. `[HackerNewsItem]`.
    pub type_ref: String,
    pub plural: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selections: Vec<SelectionMetadata>,
}

impl FieldMetadata {
    pub fn alias(&self) -> Option<&str> {
        (self.response_key != self.field_name).then_some(self.response_key.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentMetadata {
    pub name: String,
    pub type_ref: String,
    pub value: ArgumentValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDefinition {
    pub type_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

/// One route's query: which root field it selects, which fragment fills it and the text
/// to send to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetadata {
    pub root_field: String,
    pub root_type: String,
    pub fragment: String,
    pub fragments: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, VariableDefinition>,
    pub document: String,
}
