//! Renders a [`Filter`] AST back to a filter string, and normalizes an AST for
//! equality comparisons that should ignore `Group` wrappers (§8 item 1: filter
//! round-trip idempotence holds "modulo `Group`").

use super::ast::{Filter, FilterOp};
use serde_json::Value;

pub fn unparse(filter: &Filter) -> String {
    match filter {
        Filter::Empty => String::new(),
        Filter::Attr(path, op, literal) => format!("{} {} {}", path, op.as_str(), literal_str(literal)),
        Filter::Present(path) => format!("{} pr", path),
        Filter::ValuePath(path, inner) => format!("{}[{}]", path, unparse(inner)),
        Filter::IndexedAttr(path, inner, sub, op, literal) => format!(
            "{}[{}].{} {} {}",
            path,
            unparse(inner),
            sub,
            op.as_str(),
            literal_str(literal)
        ),
        Filter::IndexedPresent(path, inner, sub) => {
            format!("{}[{}].{} pr", path, unparse(inner), sub)
        }
        Filter::And(l, r) => format!("{} and {}", operand(l), operand(r)),
        Filter::Or(l, r) => format!("{} or {}", operand(l), operand(r)),
        Filter::Not(x) => format!("not ({})", unparse(x)),
        Filter::Group(x) => format!("({})", unparse(x)),
    }
}

/// Any `And`/`Or`/`Not` child is wrapped in explicit parentheses so re-parsing the
/// rendered string can't regroup it under the outer operator's precedence.
fn operand(f: &Filter) -> String {
    match f {
        Filter::And(_, _) | Filter::Or(_, _) | Filter::Not(_) => format!("({})", unparse(f)),
        _ => unparse(f),
    }
}

fn literal_str(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Strips all `Group` wrappers recursively so two ASTs that differ only in
/// parenthesization compare equal.
pub fn normalize(filter: &Filter) -> Filter {
    match filter {
        Filter::Group(inner) => normalize(inner),
        Filter::And(l, r) => Filter::And(Box::new(normalize(l)), Box::new(normalize(r))),
        Filter::Or(l, r) => Filter::Or(Box::new(normalize(l)), Box::new(normalize(r))),
        Filter::Not(x) => Filter::Not(Box::new(normalize(x))),
        Filter::ValuePath(path, inner) => {
            Filter::ValuePath(path.clone(), Box::new(normalize(inner)))
        }
        Filter::IndexedAttr(path, inner, sub, op, lit) => Filter::IndexedAttr(
            path.clone(),
            Box::new(normalize(inner)),
            sub.clone(),
            *op,
            lit.clone(),
        ),
        Filter::IndexedPresent(path, inner, sub) => {
            Filter::IndexedPresent(path.clone(), Box::new(normalize(inner)), sub.clone())
        }
        other @ (Filter::Empty | Filter::Attr(..) | Filter::Present(_)) => other.clone(),
    }
}
