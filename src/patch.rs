//! PATCH Applicator: applies `add`/`remove`/`replace` operations (RFC 7644 Section 3.5.2)
//! against a [`Document`], including indexed (`valuePath`) targets and the
//! at-most-one-`primary` invariant multi-valued attributes carry.

use crate::config::DispatchConfig;
use crate::document::Document;
use crate::error::{ScimError, ScimResult};
use crate::filter::{evaluate, Filter, FilterOp};
use crate::path::{self, Path, PathSegment};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

/// Applies a single PATCH operation to `doc` in place.
pub fn apply(doc: &mut Document, operation: &PatchOperation, config: &DispatchConfig) -> ScimResult<()> {
    match operation.op {
        PatchOp::Remove => {
            let path_str = operation
                .path
                .as_ref()
                .ok_or_else(|| ScimError::NoTarget("remove requires a path".to_string()))?;
            apply_remove(doc, &path::parse(path_str)?)
        }
        PatchOp::Add | PatchOp::Replace => {
            let value = operation
                .value
                .clone()
                .ok_or_else(|| ScimError::InvalidValue(format!("{:?} requires a value", operation.op)))?;
            match &operation.path {
                Some(path_str) => apply_path_write(
                    doc,
                    &path::parse(path_str)?,
                    value,
                    operation.op,
                    config,
                ),
                None => apply_bare_write(doc, value),
            }
        }
    }
}

/// `add`/`replace` with no `path`: merge top-level keys of an object value into `doc`.
fn apply_bare_write(doc: &mut Document, value: Value) -> ScimResult<()> {
    let incoming = value
        .as_object()
        .ok_or_else(|| ScimError::InvalidValue("value without a path must be an object".to_string()))?
        .clone();
    let obj = doc
        .as_object_mut()
        .ok_or_else(|| ScimError::Internal("document root is not an object".to_string()))?;
    for (key, val) in incoming {
        if let Value::Array(items) = &val {
            let mut items = items.clone();
            enforce_single_primary(&mut items);
            obj.insert(key, Value::Array(items));
        } else {
            obj.insert(key, val);
        }
    }
    Ok(())
}

fn apply_remove(doc: &mut Document, path: &Path) -> ScimResult<()> {
    match path.segments.as_slice() {
        [PathSegment::Attribute(attr)] => {
            doc.remove_path(attr);
            Ok(())
        }
        [PathSegment::Attribute(attr), PathSegment::SubAttribute(sub)] => {
            doc.remove_path(&format!("{}.{}", attr, sub));
            Ok(())
        }
        [PathSegment::IndexedAttribute(attr, filter)] => {
            remove_matching_elements(doc, attr, filter, None)
        }
        [PathSegment::IndexedAttribute(attr, filter), PathSegment::SubAttribute(sub)] => {
            remove_matching_elements(doc, attr, filter, Some(sub))
        }
        _ => Err(ScimError::InvalidPath("unsupported path shape".to_string())),
    }
}

fn remove_matching_elements(
    doc: &mut Document,
    attr: &str,
    filter: &crate::filter::Filter,
    sub_attr: Option<&str>,
) -> ScimResult<()> {
    let Some(Value::Array(items)) = doc.get_path_mut(attr) else {
        // Lenient: removing against a missing or non-array target is a no-op.
        tracing::debug!(attr, "patch remove: indexed target is not an array, skipping");
        return Ok(());
    };

    match sub_attr {
        Some(sub) => {
            for item in items.iter_mut() {
                if evaluate(filter, &Document::new(item.clone())) {
                    if let Some(obj) = item.as_object_mut() {
                        obj.remove(sub);
                    }
                }
            }
        }
        None => {
            let before = items.len();
            items.retain(|item| !evaluate(filter, &Document::new(item.clone())));
            if items.len() == before {
                tracing::debug!(attr, "patch remove: indexed filter matched no elements");
            }
        }
    }
    Ok(())
}

fn apply_path_write(
    doc: &mut Document,
    path: &Path,
    value: Value,
    op: PatchOp,
    config: &DispatchConfig,
) -> ScimResult<()> {
    match path.segments.as_slice() {
        [PathSegment::Attribute(attr)] => write_plain_attribute(doc, attr, value, op, config),
        [PathSegment::Attribute(attr), PathSegment::SubAttribute(sub)] => {
            write_sub_attribute(doc, attr, sub, value, op, config)
        }
        [PathSegment::IndexedAttribute(attr, filter)] => {
            write_matching_elements(doc, attr, filter, None, value, op)
        }
        [PathSegment::IndexedAttribute(attr, filter), PathSegment::SubAttribute(sub)] => {
            write_matching_elements(doc, attr, filter, Some(sub), value, op)
        }
        _ => Err(ScimError::InvalidPath("unsupported path shape".to_string())),
    }
}

fn write_plain_attribute(
    doc: &mut Document,
    attr: &str,
    value: Value,
    op: PatchOp,
    config: &DispatchConfig,
) -> ScimResult<()> {
    let existing = doc.get_path(attr).cloned();
    if op == PatchOp::Replace && config.compatibility.strict_patch_replace && existing.is_none() {
        return Err(ScimError::NoTarget(format!("no existing value at '{}'", attr)));
    }

    let new_value = match (op, existing) {
        (PatchOp::Add, Some(Value::Array(mut current))) => {
            match value {
                Value::Array(added) => current.extend(added),
                other => current.push(other),
            }
            enforce_single_primary(&mut current);
            Value::Array(current)
        }
        (PatchOp::Add, Some(Value::Object(mut current))) => {
            if let Value::Object(added) = value {
                current.extend(added);
            }
            Value::Object(current)
        }
        (_, _) => {
            if let Value::Array(mut items) = value {
                enforce_single_primary(&mut items);
                Value::Array(items)
            } else {
                value
            }
        }
    };

    doc.as_object_mut()
        .ok_or_else(|| ScimError::Internal("document root is not an object".to_string()))?
        .insert(attr.to_string(), new_value);
    Ok(())
}

fn write_sub_attribute(
    doc: &mut Document,
    attr: &str,
    sub: &str,
    value: Value,
    op: PatchOp,
    config: &DispatchConfig,
) -> ScimResult<()> {
    let full_path = format!("{}.{}", attr, sub);
    if op == PatchOp::Replace
        && config.compatibility.strict_patch_replace
        && doc.get_path(&full_path).is_none()
    {
        return Err(ScimError::NoTarget(format!("no existing value at '{}'", full_path)));
    }
    *doc.ensure_path_mut(&full_path)
        .ok_or_else(|| ScimError::Internal("could not navigate to path".to_string()))? = value;
    Ok(())
}

fn write_matching_elements(
    doc: &mut Document,
    attr: &str,
    filter: &crate::filter::Filter,
    sub_attr: Option<&str>,
    value: Value,
    op: PatchOp,
) -> ScimResult<()> {
    let Some(Value::Array(items)) = doc.get_path_mut(attr) else {
        return Err(ScimError::NoTarget(format!("'{}' is not an array", attr)));
    };

    let mut matched = false;
    for item in items.iter_mut() {
        if evaluate(filter, &Document::new(item.clone())) {
            matched = true;
            match sub_attr {
                Some(sub) => {
                    if let Some(obj) = item.as_object_mut() {
                        obj.insert(sub.to_string(), value.clone());
                    }
                }
                None => {
                    if let (Some(obj), Value::Object(incoming)) = (item.as_object_mut(), &value) {
                        for (k, v) in incoming.clone() {
                            obj.insert(k, v);
                        }
                    } else {
                        *item = value.clone();
                    }
                }
            }
        }
    }
    if !matched {
        if op == PatchOp::Replace {
            // §4.4: replace on an indexed path with no matches falls through to
            // creating a new element, seeded with the filter's own equality
            // constraints (e.g. `type eq "home"`) merged with the operation's value.
            tracing::debug!(attr, "patch replace: indexed filter matched no elements, appending new element");
            let mut seeded = filter_seed_fields(filter);
            match sub_attr {
                Some(sub) => {
                    seeded.insert(sub.to_string(), value.clone());
                }
                None => {
                    if let Value::Object(incoming) = &value {
                        for (k, v) in incoming.clone() {
                            seeded.insert(k, v);
                        }
                    }
                }
            }
            items.push(Value::Object(seeded));
        } else {
            tracing::debug!(attr, "patch write: indexed filter matched no elements");
        }
    }
    enforce_single_primary(items);
    Ok(())
}

/// Flattens the equality constraints an indexed path's filter implies (e.g.
/// `type eq "home"`, or `type eq "home" and primary eq true`) into an object, so a
/// `replace` that matches nothing can seed the new element it creates with the fields
/// the filter named instead of just the operation's own value.
fn filter_seed_fields(filter: &Filter) -> serde_json::Map<String, Value> {
    let mut out = serde_json::Map::new();
    collect_filter_seed_fields(filter, &mut out);
    out
}

fn collect_filter_seed_fields(filter: &Filter, out: &mut serde_json::Map<String, Value>) {
    match filter {
        Filter::Attr(path, FilterOp::Eq, literal) => {
            out.insert(path.clone(), literal.clone());
        }
        Filter::And(l, r) => {
            collect_filter_seed_fields(l, out);
            collect_filter_seed_fields(r, out);
        }
        Filter::Group(x) => collect_filter_seed_fields(x, out),
        _ => {}
    }
}

/// Keeps only the first `primary: true` element in a multi-valued complex attribute,
/// clearing the rest — RFC 7644 Section 3.5.2's "at most one primary" invariant.
fn enforce_single_primary(items: &mut [Value]) {
    let mut seen_primary = false;
    for item in items.iter_mut() {
        if let Some(obj) = item.as_object_mut() {
            if obj.get("primary") == Some(&Value::Bool(true)) {
                if seen_primary {
                    obj.remove("primary");
                } else {
                    seen_primary = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> DispatchConfig {
        DispatchConfig::default()
    }

    fn user() -> Document {
        Document::new(json!({
            "id": "1",
            "userName": "bjensen",
            "emails": [
                {"value": "bjensen@example.com", "type": "work", "primary": true},
                {"value": "babs@example.org", "type": "home"}
            ]
        }))
    }

    #[test]
    fn add_without_path_merges_top_level_keys() {
        let mut doc = user();
        let op = PatchOperation {
            op: PatchOp::Add,
            path: None,
            value: Some(json!({"nickName": "Babs"})),
        };
        apply(&mut doc, &op, &config()).unwrap();
        assert_eq!(doc.get_path("nickName"), Some(&json!("Babs")));
    }

    #[test]
    fn replace_plain_attribute_overwrites() {
        let mut doc = user();
        let op = PatchOperation {
            op: PatchOp::Replace,
            path: Some("userName".to_string()),
            value: Some(json!("bjensen2")),
        };
        apply(&mut doc, &op, &config()).unwrap();
        assert_eq!(doc.get_path("userName"), Some(&json!("bjensen2")));
    }

    #[test]
    fn strict_replace_on_missing_path_errors() {
        let mut doc = user();
        let mut cfg = config();
        cfg.compatibility.strict_patch_replace = true;
        let op = PatchOperation {
            op: PatchOp::Replace,
            path: Some("nickName".to_string()),
            value: Some(json!("Babs")),
        };
        let err = apply(&mut doc, &op, &cfg).unwrap_err();
        assert!(matches!(err, ScimError::NoTarget(_)));
    }

    #[test]
    fn lenient_replace_on_missing_path_creates_it() {
        let mut doc = user();
        let op = PatchOperation {
            op: PatchOp::Replace,
            path: Some("nickName".to_string()),
            value: Some(json!("Babs")),
        };
        apply(&mut doc, &op, &config()).unwrap();
        assert_eq!(doc.get_path("nickName"), Some(&json!("Babs")));
    }

    #[test]
    fn add_to_existing_array_appends() {
        let mut doc = user();
        let op = PatchOperation {
            op: PatchOp::Add,
            path: Some("emails".to_string()),
            value: Some(json!({"value": "new@example.com", "type": "other"})),
        };
        apply(&mut doc, &op, &config()).unwrap();
        let emails = doc.get_path("emails").unwrap().as_array().unwrap();
        assert_eq!(emails.len(), 3);
    }

    #[test]
    fn indexed_replace_updates_matching_element_only() {
        let mut doc = user();
        let op = PatchOperation {
            op: PatchOp::Replace,
            path: Some(r#"emails[type eq "home"].value"#.to_string()),
            value: Some(json!("babs2@example.org")),
        };
        apply(&mut doc, &op, &config()).unwrap();
        let emails = doc.get_path("emails").unwrap().as_array().unwrap();
        assert_eq!(emails[1]["value"], json!("babs2@example.org"));
        assert_eq!(emails[0]["value"], json!("bjensen@example.com"));
    }

    #[test]
    fn indexed_remove_deletes_matching_elements() {
        let mut doc = user();
        let op = PatchOperation {
            op: PatchOp::Remove,
            path: Some(r#"emails[type eq "home"]"#.to_string()),
            value: None,
        };
        apply(&mut doc, &op, &config()).unwrap();
        let emails = doc.get_path("emails").unwrap().as_array().unwrap();
        assert_eq!(emails.len(), 1);
    }

    #[test]
    fn indexed_replace_with_no_match_appends_new_element() {
        let mut doc = user();
        let op = PatchOperation {
            op: PatchOp::Replace,
            path: Some(r#"emails[type eq "mobile"].value"#.to_string()),
            value: Some(json!("mobile@example.com")),
        };
        apply(&mut doc, &op, &config()).unwrap();
        let emails = doc.get_path("emails").unwrap().as_array().unwrap();
        assert_eq!(emails.len(), 3);
        assert_eq!(emails[2]["type"], json!("mobile"));
        assert_eq!(emails[2]["value"], json!("mobile@example.com"));
    }

    #[test]
    fn indexed_remove_with_no_matches_is_a_lenient_no_op() {
        let mut doc = user();
        let op = PatchOperation {
            op: PatchOp::Remove,
            path: Some(r#"emails[type eq "mobile"]"#.to_string()),
            value: None,
        };
        apply(&mut doc, &op, &config()).unwrap();
        let emails = doc.get_path("emails").unwrap().as_array().unwrap();
        assert_eq!(emails.len(), 2);
    }

    #[test]
    fn setting_new_primary_clears_previous_primary() {
        let mut doc = user();
        let op = PatchOperation {
            op: PatchOp::Replace,
            path: Some(r#"emails[type eq "home"].primary"#.to_string()),
            value: Some(json!(true)),
        };
        apply(&mut doc, &op, &config()).unwrap();
        let emails = doc.get_path("emails").unwrap().as_array().unwrap();
        assert_eq!(emails[0].get("primary"), None);
        assert_eq!(emails[1]["primary"], json!(true));
    }

    #[test]
    fn remove_requires_a_path() {
        let mut doc = user();
        let op = PatchOperation {
            op: PatchOp::Remove,
            path: None,
            value: None,
        };
        assert!(apply(&mut doc, &op, &config()).is_err());
    }
}
