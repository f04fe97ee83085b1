//! Resource envelope helpers: the `meta` sub-object every SCIM resource carries, and the
//! registered-resource-type tag used across the schema registry and router.

use crate::document::Document;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    User,
    Group,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::User => write!(f, "User"),
            ResourceType::Group => write!(f, "Group"),
        }
    }
}

impl ResourceType {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ResourceType::User => "Users",
            ResourceType::Group => "Groups",
        }
    }

    pub fn from_endpoint(endpoint: &str) -> Option<Self> {
        match endpoint {
            "Users" => Some(ResourceType::User),
            "Groups" => Some(ResourceType::Group),
            _ => None,
        }
    }
}

/// Formats a timestamp to the SCIM 2.0 XSD dateTime form (RFC 7644 Section 3.3.7),
/// e.g. `"2025-06-14T10:03:54.374Z"`.
pub fn format_scim_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

pub fn current_scim_datetime() -> String {
    format_scim_datetime(Utc::now())
}

/// Renders a weak ETag (RFC 7232 Section 2.3) from a revision counter, e.g. `W/"3"`.
fn weak_etag(revision: u64) -> String {
    format!("W/\"{}\"", revision)
}

/// Parses the revision counter out of a weak ETag produced by `weak_etag`, defaulting to
/// `0` for anything that isn't in that shape (so a corrupt/missing version still bumps
/// forward instead of panicking).
fn revision_of(version: Option<&str>) -> u64 {
    version
        .and_then(|v| v.strip_prefix("W/\""))
        .and_then(|v| v.strip_suffix('"'))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Stamps `id` and `meta.{resourceType,created,lastModified,location,version}` onto a
/// freshly created resource. `version` starts at revision 1.
pub fn stamp_created(doc: &mut Document, resource_type: ResourceType, id: &str, location: &str) {
    let now = current_scim_datetime();
    if let Some(obj) = doc.as_object_mut() {
        obj.insert("id".to_string(), json!(id));
        obj.insert(
            "meta".to_string(),
            json!({
                "resourceType": resource_type.to_string(),
                "created": now,
                "lastModified": now,
                "location": location,
                "version": weak_etag(1),
            }),
        );
    }
}

/// Updates `meta.lastModified` and bumps `meta.version` by one revision, leaving
/// `meta.created`/`meta.location` untouched.
pub fn stamp_modified(doc: &mut Document) {
    let now = current_scim_datetime();
    if let Some(meta) = doc.get_path_mut("meta") {
        if let Some(meta_obj) = meta.as_object_mut() {
            let next = revision_of(meta_obj.get("version").and_then(|v| v.as_str())) + 1;
            meta_obj.insert("lastModified".to_string(), json!(now));
            meta_obj.insert("version".to_string(), json!(weak_etag(next)));
            return;
        }
    }
    if let Some(obj) = doc.as_object_mut() {
        obj.insert("meta".to_string(), json!({"lastModified": now, "version": weak_etag(1)}));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stamp_created_sets_id_and_meta() {
        let mut doc = Document::new(json!({"userName": "bjensen"}));
        stamp_created(&mut doc, ResourceType::User, "123", "/Users/123");
        assert_eq!(doc.get_path("id"), Some(&json!("123")));
        assert_eq!(
            doc.get_path("meta.resourceType"),
            Some(&json!("User"))
        );
        assert_eq!(doc.get_path("meta.location"), Some(&json!("/Users/123")));
        assert_eq!(doc.get_path("meta.version"), Some(&json!("W/\"1\"")));
        assert!(doc.get_path("meta.created").is_some());
    }

    #[test]
    fn stamp_modified_updates_last_modified_and_bumps_version() {
        let mut doc = Document::new(json!({
            "id": "123",
            "meta": {
                "resourceType": "User",
                "created": "2020-01-01T00:00:00.000Z",
                "location": "/Users/123",
                "version": "W/\"1\"",
            }
        }));
        stamp_modified(&mut doc);
        assert_eq!(
            doc.get_path("meta.created"),
            Some(&json!("2020-01-01T00:00:00.000Z"))
        );
        assert_eq!(doc.get_path("meta.location"), Some(&json!("/Users/123")));
        assert_eq!(doc.get_path("meta.version"), Some(&json!("W/\"2\"")));
        assert_ne!(
            doc.get_path("meta.lastModified"),
            Some(&json!("2020-01-01T00:00:00.000Z"))
        );
    }

    #[test]
    fn stamp_modified_twice_keeps_bumping_the_revision() {
        let mut doc = Document::new(json!({"id": "1", "meta": {"version": "W/\"1\""}}));
        stamp_modified(&mut doc);
        stamp_modified(&mut doc);
        assert_eq!(doc.get_path("meta.version"), Some(&json!("W/\"3\"")));
    }

    #[test]
    fn resource_type_endpoint_roundtrip() {
        assert_eq!(ResourceType::from_endpoint("Users"), Some(ResourceType::User));
        assert_eq!(ResourceType::User.endpoint(), "Users");
        assert_eq!(ResourceType::from_endpoint("Widgets"), None);
    }
}
