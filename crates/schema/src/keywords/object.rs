//! The `properties` and `additionalProperties` keywords

use serde_json::{json, Map, Value};

use crate::compiler::SchemaNode;
use crate::error::SchemaError;
use crate::traits::{pointer_segment, property_path, Keyword, Scope};

#[derive(Debug)]
enum Additional {
    Allow,
    Deny,
    Schema(SchemaNode),
}

/// Member schemas plus the policy for members no schema names
#[derive(Debug)]
pub struct PropertiesKeyword {
    properties: Vec<(String, SchemaNode)>,
    additional: Additional,
}

impl Keyword for PropertiesKeyword {
    fn check(&self, value: &Value, scope: &mut Scope<'_>) {
        let Some(object) = value.as_object() else {
            return;
        };
        let parent = scope.data_path().to_string();

        for (name, node) in &self.properties {
            if let Some(member) = object.get(name) {
                scope.descend(node, member, &property_path(&parent, name));
            }
        }

        if matches!(self.additional, Additional::Allow) {
            return;
        }
        for (name, member) in object {
            if self.properties.iter().any(|(known, _)| known == name) {
                continue;
            }
            match &self.additional {
                Additional::Deny => scope.report(
                    "additionalProperties",
                    json!({ "additionalProperty": name }),
                    "should NOT have additional properties",
                ),
                Additional::Schema(node) => scope.descend(node, member, &property_path(&parent, name)),
                Additional::Allow => {}
            }
        }
    }
}

pub(crate) fn compile(map: &Map<String, Value>, path: &str) -> Result<Vec<Box<dyn Keyword>>, SchemaError> {
    let properties = match map.get("properties") {
        None => Vec::new(),
        Some(Value::Object(members)) => members
            .iter()
            .map(|(name, schema)| {
                let child_path = format!("{}/properties/{}", path, pointer_segment(name));
                SchemaNode::compile(schema, child_path).map(|node| (name.clone(), node))
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(SchemaError::InvalidKeyword {
                path: path.to_string(),
                keyword: "properties",
                reason: "expected an object".to_string(),
            })
        }
    };

    let additional = match map.get("additionalProperties") {
        None | Some(Value::Bool(true)) => Additional::Allow,
        Some(Value::Bool(false)) => Additional::Deny,
        Some(schema) => Additional::Schema(SchemaNode::compile(
            schema,
            format!("{}/additionalProperties", path),
        )?),
    };

    if properties.is_empty() && matches!(additional, Additional::Allow) {
        return Ok(Vec::new());
    }
    let keyword: Box<dyn Keyword> = Box::new(PropertiesKeyword {
        properties,
        additional,
    });
    Ok(vec![keyword])
}
