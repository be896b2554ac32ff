//! The `items` and `uniqueItems` keywords

use serde_json::{json, Map, Value};

use super::json_equal;
use crate::compiler::SchemaNode;
use crate::error::SchemaError;
use crate::traits::{index_path, Keyword, Scope};

#[derive(Debug)]
enum Items {
    /// Every element against one schema
    All(SchemaNode),
    /// Positional schemas; extra elements are unchecked
    Tuple(Vec<SchemaNode>),
}

#[derive(Debug)]
pub struct ItemsKeyword {
    items: Items,
}

impl Keyword for ItemsKeyword {
    fn check(&self, value: &Value, scope: &mut Scope<'_>) {
        let Some(elements) = value.as_array() else {
            return;
        };
        let parent = scope.data_path().to_string();
        match &self.items {
            Items::All(node) => {
                for (index, element) in elements.iter().enumerate() {
                    scope.descend(node, element, &index_path(&parent, index));
                }
            }
            Items::Tuple(nodes) => {
                for (index, (node, element)) in nodes.iter().zip(elements).enumerate() {
                    scope.descend(node, element, &index_path(&parent, index));
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct UniqueItemsKeyword;

impl Keyword for UniqueItemsKeyword {
    fn check(&self, value: &Value, scope: &mut Scope<'_>) {
        let Some(elements) = value.as_array() else {
            return;
        };
        for i in (1..elements.len()).rev() {
            if let Some(j) = (0..i).find(|&j| json_equal(&elements[i], &elements[j])) {
                scope.report(
                    "uniqueItems",
                    json!({ "i": i, "j": j }),
                    format!("should NOT have duplicate items (items ## {} and {} are identical)", j, i),
                );
                return;
            }
        }
    }
}

pub(crate) fn compile(map: &Map<String, Value>, path: &str) -> Result<Vec<Box<dyn Keyword>>, SchemaError> {
    let mut keywords: Vec<Box<dyn Keyword>> = Vec::new();

    match map.get("items") {
        None => {}
        Some(Value::Array(schemas)) => {
            let nodes = schemas
                .iter()
                .enumerate()
                .map(|(index, schema)| SchemaNode::compile(schema, format!("{}/items/{}", path, index)))
                .collect::<Result<Vec<_>, _>>()?;
            keywords.push(Box::new(ItemsKeyword {
                items: Items::Tuple(nodes),
            }));
        }
        Some(schema) => keywords.push(Box::new(ItemsKeyword {
            items: Items::All(SchemaNode::compile(schema, format!("{}/items", path))?),
        })),
    }

    match map.get("uniqueItems") {
        None | Some(Value::Bool(false)) => {}
        Some(Value::Bool(true)) => keywords.push(Box::new(UniqueItemsKeyword)),
        Some(_) => {
            return Err(SchemaError::InvalidKeyword {
                path: path.to_string(),
                keyword: "uniqueItems",
                reason: "expected a boolean".to_string(),
            })
        }
    }

    Ok(keywords)
}
