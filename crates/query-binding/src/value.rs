use std::fmt;

use serde_json::Value;

/// Writes a JSON value as a GraphQL input literal.
pub(crate) fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => write!(f, "{n}"),
        Value::String(s) => write!(f, "{}", Value::String(s.clone())),
        Value::Array(items) => {
            f.write_str("[")?;

            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }

                write_value(f, item)?;
            }

            f.write_str("]")
        }
        Value::Object(fields) => {
            f.write_str("{")?;

            for (i, (name, item)) in fields.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }

                write!(f, "{name}: ")?;
                write_value(f, item)?;
            }

            f.write_str("}")
        }
    }
}
