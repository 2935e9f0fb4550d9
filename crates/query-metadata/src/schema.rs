use std::collections::{BTreeSet, HashMap};

use cynic_introspection::{Field, Schema, Type};

const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeKind {
    Object,
    Interface,
    Union,
    Scalar,
    Enum,
    InputObject,
}

impl TypeKind {
    /// Whether fields can be selected on values of this kind.
    pub(crate) fn is_composite(self) -> bool {
        matches!(self, TypeKind::Object | TypeKind::Interface | TypeKind::Union)
    }
}

fn kind_of(ty: &Type) -> TypeKind {
    match ty {
        Type::Object(_) => TypeKind::Object,
        Type::Interface(_) => TypeKind::Interface,
        Type::Union(_) => TypeKind::Union,
        Type::Scalar(_) => TypeKind::Scalar,
        Type::Enum(_) => TypeKind::Enum,
        Type::InputObject(_) => TypeKind::InputObject,
    }
}

/// Lookups over an introspected schema by type name.
pub(crate) struct SchemaIndex<'a> {
    query_type: &'a str,
    types: HashMap<&'a str, &'a Type>,
}

impl<'a> SchemaIndex<'a> {
    pub(crate) fn new(schema: &'a Schema) -> Self {
        SchemaIndex {
            query_type: &schema.query_type,
            types: schema.types.iter().map(|ty| (ty.name(), ty)).collect(),
        }
    }

    pub(crate) fn query_type(&self) -> &'a str {
        self.query_type
    }

    pub(crate) fn kind(&self, name: &str) -> Option<TypeKind> {
        let Some(ty) = self.types.get(name) else {
            return BUILTIN_SCALARS.contains(&name).then_some(TypeKind::Scalar);
        };

        Some(kind_of(ty))
    }

    /// The field `field_name` of the object or interface `type_name`.
    pub(crate) fn field(&self, type_name: &str, field_name: &str) -> Option<&'a Field> {
        let fields = match self.types.get(type_name).copied()? {
            Type::Object(object) => &object.fields,
            Type::Interface(interface) => &interface.fields,
            _ => return None,
        };

        fields.iter().find(|field| field.name == field_name)
    }

    /// The object types a value of `type_name` can be at runtime.
    fn possible_types<'b>(&'b self, type_name: &'b str) -> BTreeSet<&'b str> {
        match self.types.get(type_name).copied() {
            Some(Type::Interface(interface)) => interface.possible_types.iter().map(String::as_str).collect(),
            Some(Type::Union(union)) => union.possible_types.iter().map(String::as_str).collect(),
            _ => BTreeSet::from([type_name]),
        }
    }

    /// Whether a fragment on `type_condition` can apply where a `parent_type` is expected,
    /// that is whether both can be the same object type at runtime.
    pub(crate) fn overlaps(&self, parent_type: &str, type_condition: &str) -> bool {
        if parent_type == type_condition {
            return true;
        }

        let parent = self.possible_types(parent_type);

        self.possible_types(type_condition)
            .iter()
            .any(|ty| parent.contains(ty))
    }
}
