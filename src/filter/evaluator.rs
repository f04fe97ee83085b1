use super::ast::{Filter, FilterOp};
use crate::document::Document;
use chrono::DateTime;
use serde_json::Value;

/// Evaluates a filter against a document. Dotted attribute paths that cross an array
/// (e.g. `emails.value`) are evaluated existentially: true if any element matches.
pub fn evaluate(filter: &Filter, doc: &Document) -> bool {
    match filter {
        Filter::Empty => true,
        Filter::Attr(path, op, literal) => {
            resolve_candidates(doc.as_value(), &path_parts(path))
                .iter()
                .any(|candidate| compare(candidate, *op, literal))
        }
        Filter::Present(path) => resolve_candidates(doc.as_value(), &path_parts(path))
            .iter()
            .any(is_present),
        Filter::ValuePath(path, inner) => match doc.get_path(path) {
            Some(Value::Array(items)) => items
                .iter()
                .any(|item| evaluate(inner, &Document::new(item.clone()))),
            Some(v @ Value::Object(_)) => evaluate(inner, &Document::new(v.clone())),
            _ => false,
        },
        Filter::IndexedAttr(path, inner, sub, op, literal) => {
            matching_elements(doc.as_value(), path, inner).iter().any(|element| {
                resolve_candidates(element, &path_parts(sub))
                    .iter()
                    .any(|candidate| compare(candidate, *op, literal))
            })
        }
        Filter::IndexedPresent(path, inner, sub) => {
            matching_elements(doc.as_value(), path, inner).iter().any(|element| {
                resolve_candidates(element, &path_parts(sub)).iter().any(is_present)
            })
        }
        Filter::And(l, r) => evaluate(l, doc) && evaluate(r, doc),
        Filter::Or(l, r) => evaluate(l, doc) || evaluate(r, doc),
        Filter::Not(x) => !evaluate(x, doc),
        Filter::Group(x) => evaluate(x, doc),
    }
}

fn path_parts(path: &str) -> Vec<&str> {
    path.split('.').collect()
}

/// The elements of the array (or the single object) at `path` for which `inner` holds,
/// used by both `[inner].sub` filter expressions and the equivalent PATCH value-path
/// target resolution.
fn matching_elements(value: &Value, path: &str, inner: &Filter) -> Vec<Value> {
    let target = Document::new(value.clone()).get_path(path).cloned();
    match target {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter(|item| evaluate(inner, &Document::new(item.clone())))
            .collect(),
        Some(v @ Value::Object(_)) => {
            if evaluate(inner, &Document::new(v.clone())) {
                vec![v]
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        _ => true,
    }
}

/// Walks `parts` against `value`, fanning out over arrays encountered mid-path so a
/// shorthand path like `emails.value` yields one candidate per array element.
fn resolve_candidates(value: &Value, parts: &[&str]) -> Vec<Value> {
    if parts.is_empty() {
        return vec![value.clone()];
    }
    match value {
        Value::Array(items) => items
            .iter()
            .flat_map(|item| resolve_candidates(item, parts))
            .collect(),
        Value::Object(map) => match map.get(parts[0]) {
            Some(next) => resolve_candidates(next, &parts[1..]),
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn compare(candidate: &Value, op: FilterOp, literal: &Value) -> bool {
    // A multi-valued sub-object compared against a scalar literal (no explicit
    // `.value` in the path) descends into its own `value` sub-attribute (§4.2).
    if let (Value::Object(map), false) = (candidate, matches!(literal, Value::Object(_) | Value::Array(_))) {
        if let Some(inner) = map.get("value") {
            return compare(inner, op, literal);
        }
    }
    match op {
        FilterOp::Eq => values_equal(candidate, literal),
        FilterOp::Ne => !values_equal(candidate, literal),
        FilterOp::Co => string_op(candidate, literal, |a, b| a.contains(b.as_str())),
        FilterOp::Sw => string_op(candidate, literal, |a, b| a.starts_with(b.as_str())),
        FilterOp::Ew => string_op(candidate, literal, |a, b| a.ends_with(b.as_str())),
        FilterOp::Gt => ordering(candidate, literal).map(|o| o.is_gt()).unwrap_or(false),
        FilterOp::Ge => ordering(candidate, literal).map(|o| o.is_ge()).unwrap_or(false),
        FilterOp::Lt => ordering(candidate, literal).map(|o| o.is_lt()).unwrap_or(false),
        FilterOp::Le => ordering(candidate, literal).map(|o| o.is_le()).unwrap_or(false),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.eq_ignore_ascii_case(y),
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Bool(x), Value::String(y)) | (Value::String(y), Value::Bool(x)) => {
            y.eq_ignore_ascii_case(&x.to_string())
        }
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Null, Value::Null) => true,
        _ => a == b,
    }
}

fn string_op(candidate: &Value, literal: &Value, f: impl Fn(&str, &str) -> bool) -> bool {
    match (candidate, literal) {
        (Value::String(a), Value::String(b)) => f(&a.to_ascii_lowercase(), &b.to_ascii_lowercase()),
        _ => false,
    }
}

fn ordering(candidate: &Value, literal: &Value) -> Option<std::cmp::Ordering> {
    match (candidate, literal) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => {
            match (DateTime::parse_from_rfc3339(a), DateTime::parse_from_rfc3339(b)) {
                (Ok(da), Ok(db)) => Some(da.cmp(&db)),
                _ => Some(a.cmp(b)),
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::parser::parse;
    use serde_json::json;

    fn doc() -> Document {
        Document::new(json!({
            "userName": "bjensen",
            "active": true,
            "emails": [
                {"value": "bjensen@example.com", "type": "work", "primary": true},
                {"value": "babs@example.org", "type": "home"}
            ],
            "name": {"givenName": "Barbara"}
        }))
    }

    #[test]
    fn eq_is_case_insensitive() {
        let filter = parse(r#"userName eq "BJENSEN""#).unwrap();
        assert!(evaluate(&filter, &doc()));
    }

    #[test]
    fn co_matches_substring_case_insensitively() {
        let filter = parse(r#"userName co "JENS""#).unwrap();
        assert!(evaluate(&filter, &doc()));
    }

    #[test]
    fn dotted_shorthand_is_existential_over_arrays() {
        let filter = parse(r#"emails.value eq "babs@example.org""#).unwrap();
        assert!(evaluate(&filter, &doc()));
        let filter_miss = parse(r#"emails.value eq "nobody@example.com""#).unwrap();
        assert!(!evaluate(&filter_miss, &doc()));
    }

    #[test]
    fn value_path_requires_all_conditions_on_same_element() {
        let filter = parse(r#"emails[type eq "work" and primary eq true]"#).unwrap();
        assert!(evaluate(&filter, &doc()));

        let filter_no_match = parse(r#"emails[type eq "home" and primary eq true]"#).unwrap();
        assert!(!evaluate(&filter_no_match, &doc()));
    }

    #[test]
    fn present_is_false_for_missing_or_null() {
        assert!(evaluate(&parse("userName pr").unwrap(), &doc()));
        assert!(!evaluate(&parse("externalId pr").unwrap(), &doc()));
    }

    #[test]
    fn nested_path_navigates_objects() {
        let filter = parse(r#"name.givenName eq "barbara""#).unwrap();
        assert!(evaluate(&filter, &doc()));
    }

    #[test]
    fn value_path_with_trailing_subattribute_short_circuits_on_first_match() {
        // S2: `emails[type eq "work"].value ew "@example.com"`.
        let filter = parse(r#"emails[type eq "work"].value ew "@example.com""#).unwrap();
        assert!(evaluate(&filter, &doc()));

        let home_only = Document::new(json!({
            "emails": [{"type": "home", "value": "b@other"}]
        }));
        assert!(!evaluate(&filter, &home_only));
    }

    #[test]
    fn bare_complex_attribute_descends_into_value() {
        // `emails co "example"` names the complex attribute itself, not `emails.value`;
        // §4.2 requires the comparison to descend into each element's `value`.
        let filter = parse(r#"emails co "example""#).unwrap();
        assert!(evaluate(&filter, &doc()));

        let filter_miss = parse(r#"emails co "nonexistent""#).unwrap();
        assert!(!evaluate(&filter_miss, &doc()));
    }

    #[test]
    fn not_and_group_compose() {
        let filter = parse(r#"not (userName eq "someoneelse")"#).unwrap();
        assert!(evaluate(&filter, &doc()));
    }

    #[test]
    fn boolean_matches_string_form() {
        let filter = parse(r#"active eq "true""#).unwrap();
        assert!(evaluate(&filter, &doc()));
    }
}
