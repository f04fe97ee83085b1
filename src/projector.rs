//! Attribute Projector: `attributes`/`excludedAttributes` query-parameter filtering
//! (RFC 7644 Section 3.10) plus null/empty-value stripping for response bodies.

use crate::document::Document;
use crate::schema::definitions::{find_attribute, Returned, SchemaDefinition};
use serde_json::{Map, Value};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Projection {
    pub attributes: Option<Vec<String>>,
    pub excluded_attributes: Option<Vec<String>>,
    /// Mirrors `CompatibilityConfig::show_empty_multi_valued`: whether an empty
    /// multi-valued attribute (e.g. a `Group`'s `members`) survives null-stripping as
    /// `[]` instead of being omitted.
    pub show_empty_multi_valued: bool,
}

impl Default for Projection {
    fn default() -> Self {
        Self { attributes: None, excluded_attributes: None, show_empty_multi_valued: true }
    }
}

impl Projection {
    pub fn from_params(attributes: Option<&str>, excluded_attributes: Option<&str>) -> Self {
        Self {
            attributes: split_csv(attributes),
            excluded_attributes: split_csv(excluded_attributes),
            ..Self::default()
        }
    }

    pub fn with_compatibility(mut self, show_empty_multi_valued: bool) -> Self {
        self.show_empty_multi_valued = show_empty_multi_valued;
        self
    }

    /// Applies attribute projection and null-stripping to `doc` per `schema`.
    pub fn apply(&self, doc: &Document, schema: &SchemaDefinition) -> Document {
        let stripped = remove_null_fields(doc.as_value(), self.show_empty_multi_valued);

        if self.attributes.is_none() && self.excluded_attributes.is_none() {
            return Document::new(stripped);
        }

        let included = match &self.attributes {
            Some(attrs) => included_from_list(attrs, schema),
            None => default_minus_excluded(schema, self.excluded_attributes.as_deref()),
        };

        Document::new(filter_object(&stripped, &included))
    }
}

fn split_csv(raw: Option<&str>) -> Option<Vec<String>> {
    raw.map(|s| {
        s.split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect()
    })
}

/// Attributes every response carries regardless of projection (spec 4.5): `schemas` and
/// `id` aren't modeled in `SchemaDefinition.attributes` (they're envelope attributes
/// shared by every resource type, not part of any one resource's schema), so the
/// projector protects them directly rather than looking them up there.
const PROTECTED_ATTRIBUTES: &[&str] = &["schemas", "id"];

fn included_from_list(attrs: &[String], schema: &SchemaDefinition) -> HashSet<String> {
    let mut included = HashSet::new();
    for attr in attrs {
        included.insert(attr.clone());
        add_sub_attributes(attr, schema, &mut included);
    }
    add_always_returned(schema, &mut included);
    for protected in PROTECTED_ATTRIBUTES {
        included.insert(protected.to_string());
    }
    included
}

fn default_minus_excluded(schema: &SchemaDefinition, excluded: Option<&[String]>) -> HashSet<String> {
    let mut included = HashSet::new();
    for attr in &schema.attributes {
        if matches!(attr.returned, Returned::Always | Returned::Default) {
            included.insert(attr.name.to_string());
            add_sub_attributes_recursive(attr.name, &attr.sub_attributes, &mut included);
        }
    }
    for protected in PROTECTED_ATTRIBUTES {
        included.insert(protected.to_string());
    }

    if let Some(excluded) = excluded {
        for excluded_attr in excluded {
            if PROTECTED_ATTRIBUTES.contains(&excluded_attr.as_str()) {
                continue;
            }
            let is_always = find_attribute(schema, excluded_attr)
                .map(|attr_def| matches!(attr_def.returned, Returned::Always))
                .unwrap_or(false);
            if !is_always {
                included.remove(excluded_attr);
                remove_sub_attributes(excluded_attr, &mut included);
            }
        }
    }
    included
}

fn add_sub_attributes(attr_path: &str, schema: &SchemaDefinition, included: &mut HashSet<String>) {
    if let Some(attr_def) = find_attribute(schema, attr_path) {
        if !attr_def.sub_attributes.is_empty() {
            add_sub_attributes_recursive(attr_path, &attr_def.sub_attributes, included);
        }
    }
}

fn add_sub_attributes_recursive(
    parent_path: &str,
    sub_attrs: &[crate::schema::definitions::AttributeDefinition],
    included: &mut HashSet<String>,
) {
    for sub_attr in sub_attrs {
        let sub_path = format!("{}.{}", parent_path, sub_attr.name);
        included.insert(sub_path.clone());
        if !sub_attr.sub_attributes.is_empty() {
            add_sub_attributes_recursive(&sub_path, &sub_attr.sub_attributes, included);
        }
    }
}

fn remove_sub_attributes(attr_path: &str, included: &mut HashSet<String>) {
    let prefix = format!("{}.", attr_path);
    included.retain(|attr| !attr.starts_with(&prefix));
}

fn add_always_returned(schema: &SchemaDefinition, included: &mut HashSet<String>) {
    for attr in &schema.attributes {
        if matches!(attr.returned, Returned::Always) {
            included.insert(attr.name.to_string());
            add_sub_attributes_recursive(attr.name, &attr.sub_attributes, included);
        }
    }
}

fn should_include(attr_name: &str, included: &HashSet<String>) -> bool {
    included.contains(attr_name) || included.iter().any(|i| i.starts_with(&format!("{}.", attr_name)))
}

fn should_include_sub(full_path: &str, included: &HashSet<String>) -> bool {
    included.contains(full_path)
}

fn filter_object(value: &Value, included: &HashSet<String>) -> Value {
    match value {
        Value::Object(obj) => {
            let mut filtered = Map::new();
            for (key, val) in obj {
                if should_include(key, included) {
                    let projected = if val.is_object() || val.is_array() {
                        filter_complex(key, val, included)
                    } else {
                        val.clone()
                    };
                    filtered.insert(key.clone(), projected);
                }
            }
            Value::Object(filtered)
        }
        other => other.clone(),
    }
}

fn filter_complex(attr_name: &str, value: &Value, included: &HashSet<String>) -> Value {
    match value {
        Value::Object(obj) => Value::Object(filter_sub_attributes(attr_name, obj, included)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(obj) => Value::Object(filter_sub_attributes(attr_name, obj, included)),
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

fn filter_sub_attributes(attr_name: &str, obj: &Map<String, Value>, included: &HashSet<String>) -> Map<String, Value> {
    let mut filtered = Map::new();
    for (sub_key, sub_val) in obj {
        let full_path = format!("{}.{}", attr_name, sub_key);
        if should_include_sub(&full_path, included) {
            filtered.insert(sub_key.clone(), sub_val.clone());
        }
    }
    filtered
}

/// Strips `null` values and empty objects from a response body unconditionally, and
/// empty arrays too unless `show_empty_multi_valued` asks that an empty multi-valued
/// attribute (e.g. a `Group`'s `members`) survive as `[]`.
pub fn remove_null_fields(value: &Value, show_empty_multi_valued: bool) -> Value {
    match value {
        Value::Object(obj) => {
            let mut filtered = Map::new();
            for (key, val) in obj {
                match val {
                    Value::Null => continue,
                    Value::Object(_) => {
                        let cleaned = remove_null_fields(val, show_empty_multi_valued);
                        if let Value::Object(inner) = &cleaned {
                            if !inner.is_empty() {
                                filtered.insert(key.clone(), cleaned);
                            }
                        } else {
                            filtered.insert(key.clone(), cleaned);
                        }
                    }
                    Value::Array(items) => {
                        let cleaned: Vec<Value> = items
                            .iter()
                            .map(|item| remove_null_fields(item, show_empty_multi_valued))
                            .filter(|item| match item {
                                Value::Null => false,
                                Value::Object(obj) => !obj.is_empty(),
                                _ => true,
                            })
                            .collect();
                        if show_empty_multi_valued || !cleaned.is_empty() {
                            filtered.insert(key.clone(), Value::Array(cleaned));
                        }
                    }
                    _ => {
                        filtered.insert(key.clone(), val.clone());
                    }
                }
            }
            Value::Object(filtered)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| remove_null_fields(item, show_empty_multi_valued))
                .filter(|v| !v.is_null())
                .collect(),
        ),
        other => other.clone(),
    }
}
