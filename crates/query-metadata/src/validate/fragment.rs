use std::{
    collections::{btree_map::Entry, BTreeMap},
    sync::Arc,
};

use query_binding::{ArgumentValue, Field, Fragment, Selection, SelectionSet};

use super::literal;
use crate::{
    context::Context, schema::TypeKind, ArgumentMetadata, FieldMetadata, FragmentMetadata, GenerateError,
    SelectionMetadata, VariableDefinition,
};

const TYPENAME: &str = "__typename";

/// The fragment being validated and the variables its arguments use so far.
struct Scope<'a> {
    fragment: &'a str,
    variables: BTreeMap<String, VariableDefinition>,
}

impl Scope<'_> {
    fn use_variable(&mut self, name: &str, type_ref: &str, ctx: &mut Context<'_>) {
        match self.variables.entry(name.to_owned()) {
            Entry::Vacant(entry) => {
                entry.insert(VariableDefinition {
                    type_ref: type_ref.to_owned(),
                    default_value: None,
                });
            }
            Entry::Occupied(entry) if entry.get().type_ref != type_ref => {
                ctx.push_error(GenerateError::VariableMismatch {
                    scope: self.fragment.to_owned(),
                    variable: name.to_owned(),
                    first: entry.get().type_ref.clone(),
                    second: type_ref.to_owned(),
                });
            }
            Entry::Occupied(_) => {}
        }
    }
}

/// Validates a fragment and describes what survives validation. Returns `None` when the
/// type condition itself is unusable.
pub(crate) fn validate_fragment<'a>(fragment: &'a Fragment, ctx: &mut Context<'a>) -> Option<FragmentMetadata> {
    let type_condition = fragment.type_condition();

    match ctx.schema.kind(type_condition) {
        Some(kind) if kind.is_composite() => (),
        Some(_) => {
            ctx.push_error(GenerateError::NotComposite {
                fragment: fragment.name().to_owned(),
                type_name: type_condition.to_owned(),
            });
            return None;
        }
        None => {
            ctx.push_error(GenerateError::UnknownType {
                fragment: fragment.name().to_owned(),
                type_name: type_condition.to_owned(),
            });
            return None;
        }
    }

    let mut scope = Scope {
        fragment: fragment.name(),
        variables: BTreeMap::new(),
    };

    let selections = validate_selection_set(fragment.selection_set(), type_condition, &mut scope, ctx);

    Some(FragmentMetadata {
        type_condition: type_condition.to_owned(),
        selections,
        variables: scope.variables,
    })
}

fn validate_selection_set<'a>(
    selection_set: &'a SelectionSet,
    parent_type: &'a str,
    scope: &mut Scope<'a>,
    ctx: &mut Context<'a>,
) -> Vec<SelectionMetadata> {
    let mut selections = Vec::with_capacity(selection_set.items().len());

    for selection in selection_set.items() {
        let selection = match selection {
            Selection::Field(field) => validate_field(field, parent_type, scope, ctx).map(SelectionMetadata::Field),
            Selection::FragmentSpread(child) => validate_spread(child, parent_type, scope, ctx),
        };

        selections.extend(selection);
    }

    selections
}

fn validate_field<'a>(
    field: &'a Field,
    parent_type: &'a str,
    scope: &mut Scope<'a>,
    ctx: &mut Context<'a>,
) -> Option<FieldMetadata> {
    if field.name() == TYPENAME {
        if !field.selection_set().is_empty() {
            ctx.push_error(GenerateError::LeafWithSelections {
                fragment: scope.fragment.to_owned(),
                parent_type: parent_type.to_owned(),
                field: TYPENAME.to_owned(),
                type_name: "String".to_owned(),
            });
            return None;
        }

        return Some(FieldMetadata {
            response_key: field.response_key().to_owned(),
            field_name: TYPENAME.to_owned(),
            parent_type: parent_type.to_owned(),
            type_name: "String".to_owned(),
            type_ref: "String!".to_owned(),
            plural: false,
            arguments: Vec::new(),
            selections: Vec::new(),
        });
    }

    let Some(definition) = ctx.schema.field(parent_type, field.name()) else {
        ctx.push_error(GenerateError::UnknownField {
            fragment: scope.fragment.to_owned(),
            parent_type: parent_type.to_owned(),
            field: field.name().to_owned(),
        });
        return None;
    };

    let arguments = validate_arguments(field, parent_type, definition, scope, ctx)?;

    let type_name = definition.ty.name.as_str();
    let type_ref = definition.ty.to_string();
    let composite = ctx.schema.kind(type_name).is_some_and(TypeKind::is_composite);

    let selections = match (composite, field.selection_set().is_empty()) {
        (true, true) => {
            ctx.push_error(GenerateError::MissingSelections {
                fragment: scope.fragment.to_owned(),
                parent_type: parent_type.to_owned(),
                field: field.name().to_owned(),
                type_name: type_name.to_owned(),
            });
            return None;
        }
        (false, false) => {
            ctx.push_error(GenerateError::LeafWithSelections {
                fragment: scope.fragment.to_owned(),
                parent_type: parent_type.to_owned(),
                field: field.name().to_owned(),
                type_name: type_name.to_owned(),
            });
            return None;
        }
        (true, false) => {
            let selections = validate_selection_set(field.selection_set(), type_name, scope, ctx);

            // every sub-selection was rejected, which has been reported already
            if selections.is_empty() {
                return None;
            }

            selections
        }
        (false, true) => Vec::new(),
    };

    Some(FieldMetadata {
        response_key: field.response_key().to_owned(),
        field_name: field.name().to_owned(),
        parent_type: parent_type.to_owned(),
        type_name: type_name.to_owned(),
        plural: type_ref.starts_with('['),
        type_ref,
        arguments,
        selections,
    })
}

fn validate_arguments<'a>(
    field: &'a Field,
    parent_type: &'a str,
    definition: &'a cynic_introspection::Field,
    scope: &mut Scope<'a>,
    ctx: &mut Context<'a>,
) -> Option<Vec<ArgumentMetadata>> {
    let mut valid = true;
    let mut arguments = Vec::with_capacity(field.arguments().len());

    for argument in field.arguments() {
        let Some(input) = definition.args.iter().find(|input| input.name == argument.name()) else {
            ctx.push_error(GenerateError::UnknownArgument {
                fragment: scope.fragment.to_owned(),
                parent_type: parent_type.to_owned(),
                field: field.name().to_owned(),
                argument: argument.name().to_owned(),
            });
            valid = false;
            continue;
        };

        let type_ref = input.ty.to_string();

        match argument.value() {
            ArgumentValue::Variable(variable) => scope.use_variable(variable, &type_ref, ctx),
            ArgumentValue::Literal(value) => {
                if let Some(found) = literal::mismatch(value, &type_ref, &input.ty.name, &ctx.schema) {
                    ctx.push_error(GenerateError::LiteralMismatch {
                        fragment: scope.fragment.to_owned(),
                        parent_type: parent_type.to_owned(),
                        field: field.name().to_owned(),
                        argument: argument.name().to_owned(),
                        expected: type_ref,
                        found: found.to_owned(),
                    });
                    valid = false;
                    continue;
                }
            }
        }

        arguments.push(ArgumentMetadata {
            name: argument.name().to_owned(),
            type_ref,
            value: argument.value().clone(),
        });
    }

    for input in &definition.args {
        let required = input.ty.to_string().ends_with('!') && input.default_value.is_none();

        if required && !field.arguments().iter().any(|argument| argument.name() == input.name) {
            ctx.push_error(GenerateError::MissingArgument {
                fragment: scope.fragment.to_owned(),
                parent_type: parent_type.to_owned(),
                field: field.name().to_owned(),
                argument: input.name.clone(),
                type_ref: input.ty.to_string(),
            });
            valid = false;
        }
    }

    valid.then_some(arguments)
}

fn validate_spread<'a>(
    child: &'a Arc<Fragment>,
    parent_type: &'a str,
    scope: &mut Scope<'a>,
    ctx: &mut Context<'a>,
) -> Option<SelectionMetadata> {
    let type_condition = child.type_condition();

    // an unusable type condition is reported on the child itself
    if !ctx.schema.kind(type_condition).is_some_and(TypeKind::is_composite) {
        return None;
    }

    if !ctx.schema.overlaps(parent_type, type_condition) {
        ctx.push_error(GenerateError::SpreadMismatch {
            parent: scope.fragment.to_owned(),
            fragment: child.name().to_owned(),
            type_condition: type_condition.to_owned(),
            parent_type: parent_type.to_owned(),
        });
        return None;
    }

    Some(SelectionMetadata::Fragment {
        name: child.name().to_owned(),
    })
}
