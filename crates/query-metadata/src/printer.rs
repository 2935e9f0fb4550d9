use std::{collections::BTreeMap, fmt};

use query_binding::ArgumentValue;

use crate::{FragmentMetadata, SelectionMetadata, VariableDefinition};

/// The executable document of a route: the operation, then every fragment it reaches in
/// name order, each separated by a blank line.
pub(crate) struct Document<'a> {
    pub(crate) name: &'a str,
    pub(crate) root_field: &'a str,
    pub(crate) fragment: &'a str,
    pub(crate) variables: &'a BTreeMap<String, VariableDefinition>,
    pub(crate) fragments: Vec<(&'a str, &'a FragmentMetadata)>,
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "query {}", self.name)?;

        if !self.variables.is_empty() {
            f.write_str("(")?;

            for (i, (name, definition)) in self.variables.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }

                write!(f, "${name}: {}", definition.type_ref)?;

                if let Some(default_value) = &definition.default_value {
                    write!(f, " = {}", ArgumentValue::Literal(default_value.clone()))?;
                }
            }

            f.write_str(")")?;
        }

        writeln!(f, " {{")?;
        writeln!(f, "  {} {{", self.root_field)?;
        writeln!(f, "    ...{}", self.fragment)?;
        writeln!(f, "  }}")?;
        writeln!(f, "}}")?;

        for (name, fragment) in &self.fragments {
            writeln!(f)?;
            writeln!(f, "fragment {name} on {} {{", fragment.type_condition)?;
            write_selections(f, &fragment.selections, 1)?;
            writeln!(f, "}}")?;
        }

        Ok(())
    }
}

fn write_selections(f: &mut fmt::Formatter<'_>, selections: &[SelectionMetadata], depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);

    for selection in selections {
        let field = match selection {
            SelectionMetadata::Fragment { name } => {
                writeln!(f, "{indent}...{name}")?;
                continue;
            }
            SelectionMetadata::Field(field) => field,
        };

        f.write_str(&indent)?;

        if let Some(alias) = field.alias() {
            write!(f, "{alias}: ")?;
        }

        f.write_str(&field.field_name)?;

        if !field.arguments.is_empty() {
            f.write_str("(")?;

            for (i, argument) in field.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }

                write!(f, "{}: {}", argument.name, argument.value)?;
            }

            f.write_str(")")?;
        }

        if field.selections.is_empty() {
            writeln!(f)?;
        } else {
            writeln!(f, " {{")?;
            write_selections(f, &field.selections, depth + 1)?;
            writeln!(f, "{indent}}}")?;
        }
    }

    Ok(())
}
