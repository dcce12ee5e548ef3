use std::fmt;

use serde_json::{json, Map, Value};

/// Declarative description of the JSON shape the model must answer with.
///
/// The same tree is serialized into the JSON Schema sent with the request and
/// used to check the raw answer before it is deserialized, so a violation can
/// be reported with the path of the offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescriptor {
    pub kind: SchemaKind,
    pub description: Option<String>,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Object {
        properties: Vec<SchemaProperty>,
    },
    Array {
        items: Box<SchemaDescriptor>,
    },
    String {
        allowed: Option<Vec<String>>,
    },
    Number {
        minimum: Option<f64>,
    },
    Boolean,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaProperty {
    pub name: String,
    pub required: bool,
    pub schema: SchemaDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl SchemaDescriptor {
    fn of(kind: SchemaKind) -> SchemaDescriptor {
        SchemaDescriptor {
            kind,
            description: None,
            nullable: false,
        }
    }

    pub fn object() -> SchemaDescriptor {
        SchemaDescriptor::of(SchemaKind::Object { properties: vec![] })
    }

    pub fn array(items: SchemaDescriptor) -> SchemaDescriptor {
        SchemaDescriptor::of(SchemaKind::Array {
            items: Box::new(items),
        })
    }

    pub fn string() -> SchemaDescriptor {
        SchemaDescriptor::of(SchemaKind::String { allowed: None })
    }

    pub fn string_enum(allowed: &[&str]) -> SchemaDescriptor {
        SchemaDescriptor::of(SchemaKind::String {
            allowed: Some(allowed.iter().map(|value| value.to_string()).collect()),
        })
    }

    pub fn number() -> SchemaDescriptor {
        SchemaDescriptor::of(SchemaKind::Number { minimum: None })
    }

    pub fn non_negative_number() -> SchemaDescriptor {
        SchemaDescriptor::of(SchemaKind::Number { minimum: Some(0.0) })
    }

    pub fn boolean() -> SchemaDescriptor {
        SchemaDescriptor::of(SchemaKind::Boolean)
    }

    pub fn describe(mut self, description: impl Into<String>) -> SchemaDescriptor {
        self.description = Some(description.into());
        self
    }

    pub fn nullable(mut self) -> SchemaDescriptor {
        self.nullable = true;
        self
    }

    /// Adds a property to an object descriptor. No-op on other kinds.
    pub fn property(mut self, name: &str, required: bool, schema: SchemaDescriptor) -> SchemaDescriptor {
        if let SchemaKind::Object { properties } = &mut self.kind {
            properties.push(SchemaProperty {
                name: name.to_string(),
                required,
                schema,
            });
        }
        self
    }

    pub fn required(self, name: &str, schema: SchemaDescriptor) -> SchemaDescriptor {
        self.property(name, true, schema)
    }

    pub fn optional(self, name: &str, schema: SchemaDescriptor) -> SchemaDescriptor {
        self.property(name, false, schema)
    }

    fn type_name(&self) -> &'static str {
        match self.kind {
            SchemaKind::Object { .. } => "object",
            SchemaKind::Array { .. } => "array",
            SchemaKind::String { .. } => "string",
            SchemaKind::Number { .. } => "number",
            SchemaKind::Boolean => "boolean",
        }
    }

    /// JSON Schema rendering in the strict structured-output form: every
    /// property is listed as required, optional ones are expressed through a
    /// `null` type union, and objects are closed.
    pub fn to_json_schema(&self) -> Value {
        let mut schema = Map::new();
        let type_value = if self.nullable {
            json!([self.type_name(), "null"])
        } else {
            json!(self.type_name())
        };
        schema.insert("type".to_string(), type_value);
        if let Some(description) = &self.description {
            schema.insert("description".to_string(), json!(description));
        }
        match &self.kind {
            SchemaKind::Object { properties } => {
                let rendered = properties
                    .iter()
                    .map(|property| (property.name.clone(), property.schema.to_json_schema()))
                    .collect::<Map<String, Value>>();
                let names = properties
                    .iter()
                    .map(|property| json!(property.name))
                    .collect::<Vec<_>>();
                schema.insert("properties".to_string(), Value::Object(rendered));
                schema.insert("required".to_string(), Value::Array(names));
                schema.insert("additionalProperties".to_string(), json!(false));
            }
            SchemaKind::Array { items } => {
                schema.insert("items".to_string(), items.to_json_schema());
            }
            SchemaKind::String { allowed: Some(allowed) } => {
                schema.insert("enum".to_string(), json!(allowed));
            }
            SchemaKind::Number { minimum: Some(minimum) } => {
                schema.insert("minimum".to_string(), json!(minimum));
            }
            SchemaKind::String { allowed: None } | SchemaKind::Number { minimum: None } | SchemaKind::Boolean => {}
        }
        Value::Object(schema)
    }

    /// Checks a parsed answer against the descriptor, collecting every violation.
    pub fn validate(&self, value: &Value) -> Result<(), Vec<SchemaViolation>> {
        let mut violations = vec![];
        self.validate_at(value, "$", &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    fn validate_at(&self, value: &Value, path: &str, violations: &mut Vec<SchemaViolation>) {
        if value.is_null() {
            if !self.nullable {
                push_violation(violations, path, format!("expected {}, found null", self.type_name()));
            }
            return;
        }

        match &self.kind {
            SchemaKind::Object { properties } => {
                let Some(object) = value.as_object() else {
                    push_violation(violations, path, "expected object".to_string());
                    return;
                };
                for property in properties {
                    let property_path = format!("{}.{}", path, property.name);
                    match object.get(&property.name) {
                        Some(property_value) => {
                            property.schema.validate_at(property_value, &property_path, violations)
                        }
                        None if property.required => violations.push(SchemaViolation {
                            path: property_path,
                            message: "missing required field".to_string(),
                        }),
                        None => {}
                    }
                }
            }
            SchemaKind::Array { items } => {
                let Some(array) = value.as_array() else {
                    push_violation(violations, path, "expected array".to_string());
                    return;
                };
                for (index, item) in array.iter().enumerate() {
                    items.validate_at(item, &format!("{}[{}]", path, index), violations);
                }
            }
            SchemaKind::String { allowed } => match value.as_str() {
                None => push_violation(violations, path, "expected string".to_string()),
                Some(text) => {
                    if let Some(allowed) = allowed {
                        if !allowed.iter().any(|candidate| candidate == text) {
                            push_violation(violations, path, format!("'{}' is not one of {:?}", text, allowed));
                        }
                    }
                }
            },
            SchemaKind::Number { minimum } => match value.as_f64() {
                None => push_violation(violations, path, "expected number".to_string()),
                Some(number) => {
                    if let Some(minimum) = minimum {
                        if number < *minimum {
                            push_violation(violations, path, format!("{} is below the minimum {}", number, minimum));
                        }
                    }
                }
            },
            SchemaKind::Boolean => {
                if !value.is_boolean() {
                    push_violation(violations, path, "expected boolean".to_string());
                }
            }
        }
    }
}

fn push_violation(violations: &mut Vec<SchemaViolation>, path: &str, message: String) {
    violations.push(SchemaViolation {
        path: path.to_string(),
        message,
    });
}

pub fn describe_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|violation| violation.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_schema() -> SchemaDescriptor {
        SchemaDescriptor::object()
            .required("name", SchemaDescriptor::string())
            .required("fps", SchemaDescriptor::non_negative_number())
            .required("unit", SchemaDescriptor::string_enum(&["Points", "Seconds"]))
            .optional("note", SchemaDescriptor::string().nullable())
    }

    #[test]
    fn renders_strict_json_schema() {
        let schema = entry_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["required"], json!(["name", "fps", "unit", "note"]));
        assert_eq!(schema["properties"]["note"]["type"], json!(["string", "null"]));
        assert_eq!(schema["properties"]["unit"]["enum"], json!(["Points", "Seconds"]));
        assert_eq!(schema["properties"]["fps"]["minimum"], json!(0.0));
    }

    #[test]
    fn optional_fields_may_be_missing_or_null() {
        let schema = entry_schema();
        assert!(schema
            .validate(&json!({ "name": "Blender", "fps": 12.5, "unit": "Points" }))
            .is_ok());
        assert!(schema
            .validate(&json!({ "name": "Blender", "fps": 12.5, "unit": "Points", "note": null }))
            .is_ok());
    }

    #[test]
    fn reports_every_violation_with_its_path() {
        let schema = SchemaDescriptor::object().required("entries", SchemaDescriptor::array(entry_schema()));
        let violations = schema
            .validate(&json!({ "entries": [
                { "name": "ok", "fps": 1, "unit": "Points" },
                { "fps": -3, "unit": "Minutes" }
            ] }))
            .unwrap_err();

        let paths = violations.iter().map(|v| v.path.as_str()).collect::<Vec<_>>();
        assert_eq!(
            paths,
            vec!["$.entries[1].name", "$.entries[1].fps", "$.entries[1].unit"]
        );
    }

    #[test]
    fn null_is_rejected_when_not_nullable() {
        let violations = SchemaDescriptor::object()
            .required("name", SchemaDescriptor::string())
            .validate(&json!({ "name": null }))
            .unwrap_err();
        assert_eq!(violations[0].to_string(), "$.name: expected string, found null");
    }
}
