use std::collections::{btree_map::Entry, BTreeMap};

use query_binding::Route;

use crate::{context::Context, printer::Document, GenerateError, Metadata, QueryMetadata, VariableDefinition};

/// Checks a route's root field against the query type and assembles its query from the
/// fragment metadata generated so far.
pub(crate) fn validate_route<'a>(route: &'a Route, metadata: &Metadata, ctx: &mut Context<'a>) -> Option<QueryMetadata> {
    let query_type = ctx.schema.query_type();

    let Some(root) = ctx.schema.field(query_type, route.root_field()) else {
        ctx.push_error(GenerateError::UnknownRootField {
            route: route.name().to_owned(),
            field: route.root_field().to_owned(),
            query_type: query_type.to_owned(),
        });
        return None;
    };

    let fragment = route.fragment();

    // a root fragment without metadata was rejected, and reported, on its own
    let fragment_metadata = metadata.fragment(fragment.name())?;

    if !ctx.schema.overlaps(&root.ty.name, &fragment_metadata.type_condition) {
        ctx.push_error(GenerateError::RouteMismatch {
            route: route.name().to_owned(),
            fragment: fragment.name().to_owned(),
            type_condition: fragment_metadata.type_condition.clone(),
            field: route.root_field().to_owned(),
            field_type: root.ty.to_string(),
        });
        return None;
    }

    let fragments: Vec<String> = metadata.reachable_from(fragment.name()).into_iter().collect();
    let mut variables = BTreeMap::new();

    for name in &fragments {
        let Some(reached) = metadata.fragment(name) else {
            continue;
        };

        for (variable, definition) in &reached.variables {
            match variables.entry(variable.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(VariableDefinition {
                        type_ref: definition.type_ref.clone(),
                        default_value: route.variables().get(variable).cloned(),
                    });
                }
                Entry::Occupied(entry) if entry.get().type_ref != definition.type_ref => {
                    ctx.push_error(GenerateError::VariableMismatch {
                        scope: route.name().to_owned(),
                        variable: variable.clone(),
                        first: entry.get().type_ref.clone(),
                        second: definition.type_ref.clone(),
                    });
                }
                Entry::Occupied(_) => {}
            }
        }
    }

    let document = Document {
        name: route.name(),
        root_field: route.root_field(),
        fragment: fragment.name(),
        variables: &variables,
        fragments: fragments
            .iter()
            .filter_map(|name| Some((name.as_str(), metadata.fragment(name)?)))
            .collect(),
    }
    .to_string();

    Some(QueryMetadata {
        root_field: route.root_field().to_owned(),
        root_type: root.ty.name.clone(),
        fragment: fragment.name().to_owned(),
        fragments,
        variables,
        document,
    })
}
