use axum::http::StatusCode;
use serde_json::{json, Value};
use std::fmt;

/// Errors raised by the filter/path/patch/projector/router engines.
///
/// Variant names follow the SCIM `scimType` values from RFC 7644 Section 3.12 where one
/// exists; `Internal`/`NotFound`/`Conflict`/`Unauthorized`/`Forbidden` have no `scimType`
/// and map straight to a status code.
#[derive(Debug)]
pub enum ScimError {
    InvalidFilter(String),
    InvalidPath(String),
    NoTarget(String),
    InvalidValue(String),
    InvalidSyntax(String),
    Mutability(String),
    TooMany(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl fmt::Display for ScimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScimError::InvalidFilter(e) => write!(f, "invalid filter: {}", e),
            ScimError::InvalidPath(e) => write!(f, "invalid path: {}", e),
            ScimError::NoTarget(e) => write!(f, "no target: {}", e),
            ScimError::InvalidValue(e) => write!(f, "invalid value: {}", e),
            ScimError::InvalidSyntax(e) => write!(f, "invalid syntax: {}", e),
            ScimError::Mutability(e) => write!(f, "mutability violation: {}", e),
            ScimError::TooMany(e) => write!(f, "too many results: {}", e),
            ScimError::Unauthorized(e) => write!(f, "unauthorized: {}", e),
            ScimError::Forbidden(e) => write!(f, "forbidden: {}", e),
            ScimError::NotFound(e) => write!(f, "not found: {}", e),
            ScimError::Conflict(e) => write!(f, "conflict: {}", e),
            ScimError::Internal(e) => write!(f, "internal error: {}", e),
        }
    }
}

impl std::error::Error for ScimError {}

impl From<serde_json::Error> for ScimError {
    fn from(err: serde_json::Error) -> Self {
        ScimError::InvalidValue(err.to_string())
    }
}

pub type ScimResult<T> = Result<T, ScimError>;

impl ScimError {
    /// HTTP status per RFC 7644 Section 3.12's error-status table.
    pub fn status(&self) -> StatusCode {
        match self {
            ScimError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            ScimError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            ScimError::NoTarget(_) => StatusCode::BAD_REQUEST,
            ScimError::InvalidValue(_) => StatusCode::BAD_REQUEST,
            ScimError::InvalidSyntax(_) => StatusCode::BAD_REQUEST,
            ScimError::Mutability(_) => StatusCode::BAD_REQUEST,
            ScimError::TooMany(_) => StatusCode::BAD_REQUEST,
            ScimError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ScimError::Forbidden(_) => StatusCode::FORBIDDEN,
            ScimError::NotFound(_) => StatusCode::NOT_FOUND,
            ScimError::Conflict(_) => StatusCode::CONFLICT,
            ScimError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `scimType` token from RFC 7644 Section 3.12, where one is defined.
    pub fn scim_type(&self) -> Option<&'static str> {
        match self {
            ScimError::InvalidFilter(_) => Some("invalidFilter"),
            ScimError::InvalidPath(_) => Some("invalidPath"),
            ScimError::NoTarget(_) => Some("noTarget"),
            ScimError::InvalidValue(_) => Some("invalidValue"),
            ScimError::InvalidSyntax(_) => Some("invalidSyntax"),
            ScimError::Mutability(_) => Some("mutability"),
            ScimError::TooMany(_) => Some("tooMany"),
            _ => None,
        }
    }

    fn detail(&self) -> String {
        match self {
            ScimError::InvalidFilter(e)
            | ScimError::InvalidPath(e)
            | ScimError::NoTarget(e)
            | ScimError::InvalidValue(e)
            | ScimError::InvalidSyntax(e)
            | ScimError::Mutability(e)
            | ScimError::TooMany(e)
            | ScimError::Unauthorized(e)
            | ScimError::Forbidden(e)
            | ScimError::NotFound(e)
            | ScimError::Conflict(e)
            | ScimError::Internal(e) => e.clone(),
        }
    }

    /// Builds the SCIM error envelope from RFC 7644 Section 3.12.
    pub fn to_envelope(&self) -> Value {
        let mut body = json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:Error"],
            "status": self.status().as_u16().to_string(),
            "detail": self.detail(),
        });
        if let Some(scim_type) = self.scim_type() {
            body["scimType"] = json!(scim_type);
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_maps_to_bad_request_with_scim_type() {
        let err = ScimError::InvalidFilter("unexpected token".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.scim_type(), Some("invalidFilter"));
        let envelope = err.to_envelope();
        assert_eq!(envelope["scimType"], "invalidFilter");
        assert_eq!(envelope["detail"], "unexpected token");
    }

    #[test]
    fn not_found_has_no_scim_type() {
        let err = ScimError::NotFound("User 42".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.scim_type(), None);
        assert!(err.to_envelope().get("scimType").is_none());
    }
}
