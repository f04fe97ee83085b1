//! Authentication seam: verifies a request carries *some* valid identity and hands the
//! dispatcher an opaque context, without prescribing a scheme, credential store, or
//! multi-tenant host-resolution layer — those are transport/deployment concerns the
//! teacher's `auth_middleware` couples to a tenant table, which is out of scope here.

use crate::error::ScimError;
use async_trait::async_trait;
use axum::http::HeaderMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub subject: String,
    pub tenant: Option<String>,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthContext, ScimError>;
}

/// Accepts any request, tagging it with a fixed subject. Useful for tests and the
/// bundled demo; not meant for a real deployment.
pub struct AllowAllAuthenticator;

#[async_trait]
impl Authenticator for AllowAllAuthenticator {
    async fn authenticate(&self, _headers: &HeaderMap) -> Result<AuthContext, ScimError> {
        Ok(AuthContext {
            subject: "anonymous".to_string(),
            tenant: None,
        })
    }
}

/// Validates a static Bearer token, the minimal scheme RFC 7644 Section 2's security
/// considerations call out as a baseline.
pub struct BearerTokenAuthenticator {
    pub token: String,
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthContext, ScimError> {
        let header = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ScimError::Unauthorized("missing Authorization header".to_string()))?;

        let presented = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ScimError::Unauthorized("expected a Bearer token".to_string()))?;

        if presented != self.token {
            return Err(ScimError::Unauthorized("invalid bearer token".to_string()));
        }

        Ok(AuthContext {
            subject: "bearer-client".to_string(),
            tenant: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allow_all_always_succeeds() {
        let ctx = AllowAllAuthenticator.authenticate(&HeaderMap::new()).await.unwrap();
        assert_eq!(ctx.subject, "anonymous");
    }

    #[tokio::test]
    async fn bearer_rejects_missing_header() {
        let auth = BearerTokenAuthenticator { token: "secret".to_string() };
        assert!(auth.authenticate(&HeaderMap::new()).await.is_err());
    }

    #[tokio::test]
    async fn bearer_accepts_matching_token() {
        let auth = BearerTokenAuthenticator { token: "secret".to_string() };
        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::AUTHORIZATION, "Bearer secret".parse().unwrap());
        assert!(auth.authenticate(&headers).await.is_ok());
    }

    #[tokio::test]
    async fn bearer_rejects_mismatched_token() {
        let auth = BearerTokenAuthenticator { token: "secret".to_string() };
        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::AUTHORIZATION, "Bearer wrong".parse().unwrap());
        assert!(auth.authenticate(&headers).await.is_err());
    }
}
