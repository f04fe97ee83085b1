use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Co,
    Sw,
    Ew,
    Gt,
    Ge,
    Lt,
    Le,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Ne => "ne",
            FilterOp::Co => "co",
            FilterOp::Sw => "sw",
            FilterOp::Ew => "ew",
            FilterOp::Gt => "gt",
            FilterOp::Ge => "ge",
            FilterOp::Lt => "lt",
            FilterOp::Le => "le",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "eq" => Some(FilterOp::Eq),
            "ne" => Some(FilterOp::Ne),
            "co" => Some(FilterOp::Co),
            "sw" => Some(FilterOp::Sw),
            "ew" => Some(FilterOp::Ew),
            "gt" => Some(FilterOp::Gt),
            "ge" => Some(FilterOp::Ge),
            "lt" => Some(FilterOp::Lt),
            "le" => Some(FilterOp::Le),
            _ => None,
        }
    }
}

/// A parsed SCIM filter expression (RFC 7644 Section 3.4.2.2).
///
/// `Group` has no effect on evaluation — it exists purely so the parser can round-trip
/// an explicitly parenthesized filter back to the same parenthesization on re-render.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Empty,
    Attr(String, FilterOp, Value),
    Present(String),
    /// `attr[innerFilter]` — true if `attr` is an array with at least one element
    /// satisfying `innerFilter`, or a single complex value satisfying it directly.
    ValuePath(String, Box<Filter>),
    /// `attr[innerFilter].sub Op Value` — select the elements of `attr` matching
    /// `innerFilter`, then compare `sub` of each against `Value`; true on first match.
    IndexedAttr(String, Box<Filter>, String, FilterOp, Value),
    /// `attr[innerFilter].sub pr` — as `IndexedAttr`, but a presence check on `sub`.
    IndexedPresent(String, Box<Filter>, String),
    And(Box<Filter>, Box<Filter>),
    Or(Box<Filter>, Box<Filter>),
    Not(Box<Filter>),
    Group(Box<Filter>),
}
