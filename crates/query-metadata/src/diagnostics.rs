use std::fmt;

use thiserror::Error;

/// A single reason a query binding does not hold against the schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("fragment `{fragment}` is declared on unknown type `{type_name}`")]
    UnknownType { fragment: String, type_name: String },
    #[error("fragment `{fragment}` is declared on `{type_name}`, which has no fields to select")]
    NotComposite { fragment: String, type_name: String },
    #[error("cannot query field `{field}` on type `{parent_type}` (in fragment `{fragment}`)")]
    UnknownField {
        fragment: String,
        parent_type: String,
        field: String,
    },
    #[error("unknown argument `{argument}` on field `{parent_type}.{field}` (in fragment `{fragment}`)")]
    UnknownArgument {
        fragment: String,
        parent_type: String,
        field: String,
        argument: String,
    },
    #[error("field `{parent_type}.{field}` requires argument `{argument}` of type `{type_ref}` (in fragment `{fragment}`)")]
    MissingArgument {
        fragment: String,
        parent_type: String,
        field: String,
        argument: String,
        type_ref: String,
    },
    #[error("argument `{argument}` of `{parent_type}.{field}` expects `{expected}`, found {found} (in fragment `{fragment}`)")]
    LiteralMismatch {
        fragment: String,
        parent_type: String,
        field: String,
        argument: String,
        expected: String,
        found: String,
    },
    #[error("field `{parent_type}.{field}` of leaf type `{type_name}` cannot have selections (in fragment `{fragment}`)")]
    LeafWithSelections {
        fragment: String,
        parent_type: String,
        field: String,
        type_name: String,
    },
    #[error("field `{parent_type}.{field}` of type `{type_name}` must have selections (in fragment `{fragment}`)")]
    MissingSelections {
        fragment: String,
        parent_type: String,
        field: String,
        type_name: String,
    },
    #[error("fragment `{fragment}` on `{type_condition}` cannot be spread where `{parent_type}` is expected (in `{parent}`)")]
    SpreadMismatch {
        parent: String,
        fragment: String,
        type_condition: String,
        parent_type: String,
    },
    #[error("variable `${variable}` is used as both `{first}` and `{second}` (in `{scope}`)")]
    VariableMismatch {
        scope: String,
        variable: String,
        first: String,
        second: String,
    },
    #[error("fragment `{fragment}` is declared but neither a parent nor a route embeds it")]
    UnusedFragment { fragment: String },
    #[error("fragment `{fragment}` is embedded by `{parent}` but was never declared")]
    UndeclaredFragment { fragment: String, parent: String },
    #[error("two different fragments are named `{fragment}`")]
    DuplicateFragment { fragment: String },
    #[error("route `{route}` selects `{field}`, which is not a field of the query type `{query_type}`")]
    UnknownRootField {
        route: String,
        field: String,
        query_type: String,
    },
    #[error("route `{route}` binds fragment `{fragment}` on `{type_condition}` to `{field}` of type `{field_type}`")]
    RouteMismatch {
        route: String,
        fragment: String,
        type_condition: String,
        field: String,
        field_type: String,
    },
}

/// The errors found while generating, in the order they were found.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Diagnostics {
    errors: Vec<GenerateError>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenerateError> {
        self.errors.iter()
    }

    pub(crate) fn push(&mut self, error: GenerateError) {
        self.errors.push(error);
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }

            write!(f, "{error}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

impl IntoIterator for Diagnostics {
    type Item = GenerateError;
    type IntoIter = std::vec::IntoIter<GenerateError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
