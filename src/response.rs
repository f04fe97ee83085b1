//! Response Builder: wraps a `Document` or a page of them in the envelopes RFC 7644
//! Sections 3.4.2 (`ListResponse`) and 3.12 (error) require, with the headers a SCIM
//! response carries regardless of transport.

use crate::document::Document;
use crate::error::ScimError;
use crate::handler::SearchResult;
use crate::schema::definitions::SCIM_API_MESSAGES_LIST_RESPONSE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use serde_json::{json, Value};

pub struct ScimResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl ScimResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/scim+json; charset=utf-8"),
        );
        Self { status, headers, body }
    }

    /// Builds a resource response, carrying the `Location` and `ETag` headers RFC 7644
    /// Section 3.3 requires on create/get/replace/patch straight from the resource's own
    /// `meta.location`/`meta.version`.
    pub fn resource(status: StatusCode, doc: Document) -> Self {
        let location = doc.get_path("meta.location").and_then(Value::as_str).map(str::to_string);
        let version = doc.get_path("meta.version").and_then(Value::as_str).map(str::to_string);
        let mut response = Self::new(status, doc.into_value());
        if let Some(location) = location {
            if let Ok(value) = HeaderValue::from_str(&location) {
                response.headers.insert(axum::http::header::LOCATION, value);
            }
        }
        if let Some(version) = version {
            if let Ok(value) = HeaderValue::from_str(&version) {
                response.headers.insert(axum::http::header::ETAG, value);
            }
        }
        response
    }

    pub fn no_content() -> Self {
        Self::new(StatusCode::NO_CONTENT, Value::Null)
    }

    pub fn list(result: SearchResult, start_index: usize, count: usize) -> Self {
        Self::new(StatusCode::OK, list_response_body(result, start_index, count))
    }

    pub fn error(err: &ScimError) -> Self {
        Self::new(err.status(), err.to_envelope())
    }
}

/// Builds a SCIM `ListResponse` body (RFC 7644 Section 3.4.2).
pub fn list_response_body(result: SearchResult, start_index: usize, count: usize) -> Value {
    let _ = count;
    let items_per_page = result.resources.len();
    json!({
        "schemas": [SCIM_API_MESSAGES_LIST_RESPONSE],
        "totalResults": result.total,
        "startIndex": start_index,
        "itemsPerPage": items_per_page,
        "Resources": result.resources.into_iter().map(Document::into_value).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_carries_pagination_fields() {
        let result = SearchResult {
            resources: vec![Document::new(json!({"id": "1"}))],
            total: 5,
        };
        let body = list_response_body(result, 1, 10);
        assert_eq!(body["totalResults"], 5);
        assert_eq!(body["startIndex"], 1);
        assert_eq!(body["schemas"][0], SCIM_API_MESSAGES_LIST_RESPONSE);
    }

    #[test]
    fn resource_response_carries_location_and_etag_from_meta() {
        let doc = Document::new(json!({
            "id": "1",
            "meta": {"location": "/Users/1", "version": "W/\"2\""}
        }));
        let response = ScimResponse::resource(StatusCode::OK, doc);
        assert_eq!(response.headers.get(axum::http::header::LOCATION).unwrap(), "/Users/1");
        assert_eq!(response.headers.get(axum::http::header::ETAG).unwrap(), "W/\"2\"");
    }

    #[test]
    fn error_response_uses_scim_error_status_and_envelope() {
        let err = ScimError::NotFound("User 1".to_string());
        let response = ScimResponse::error(&err);
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["detail"], "User 1");
    }
}
