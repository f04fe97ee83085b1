use crate::filter::Filter;

/// One segment of a PATCH path (RFC 7644 Section 3.5.2).
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    Attribute(String),
    IndexedAttribute(String, Filter),
    SubAttribute(String),
}

/// A parsed PATCH path: either `attr`, `attr.subAttr`, `attr[filter]`, or
/// `attr[filter].subAttr`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub segments: Vec<PathSegment>,
}

impl Path {
    /// The base attribute name the path starts from, ignoring any filter/sub-attribute.
    pub fn base_attribute(&self) -> &str {
        match &self.segments[0] {
            PathSegment::Attribute(name) | PathSegment::IndexedAttribute(name, _) => name,
            PathSegment::SubAttribute(name) => name,
        }
    }

    pub fn value_filter(&self) -> Option<&Filter> {
        self.segments.iter().find_map(|s| match s {
            PathSegment::IndexedAttribute(_, filter) => Some(filter),
            _ => None,
        })
    }

    pub fn sub_attribute(&self) -> Option<&str> {
        self.segments.iter().find_map(|s| match s {
            PathSegment::SubAttribute(name) => Some(name.as_str()),
            _ => None,
        })
    }
}
