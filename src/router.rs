//! Router / dispatch state machine: turns a parsed path, HTTP method, and query string
//! into a `ResourceHandler` call and a `ScimResponse`, independent of any concrete
//! transport. `src/http.rs` is the only thing that knows about `axum` requests; this
//! module only knows about strings and a `HandlerRegistry`.
//!
//! No single teacher file implements this generically — routes are wired directly as
//! `axum::Router` handler functions per endpoint. This factors the pattern those
//! handlers share (parse path/query -> call backend -> build response) into one
//! reusable state machine.

use crate::auth::AuthContext;
use crate::config::DispatchConfig;
use crate::document::Document;
use crate::error::{ScimError, ScimResult};
use crate::handler::HandlerRegistry;
use crate::patch::PatchOperation;
use crate::projector::Projection;
use crate::query::{Query, QueryParams};
use crate::resource::ResourceType;
use crate::response::ScimResponse;
use crate::schema::definitions::{schema_for, SchemaDefinition};
use axum::http::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Create,
    Get,
    Replace,
    Delete,
    Search,
    Patch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    pub resource_endpoint: String,
    pub id: Option<String>,
    pub is_search: bool,
}

/// Splits a request path into its resource-type endpoint, optional resource id, and
/// whether it targets the `.search` sub-resource (RFC 7644 Section 3.4.3).
///
/// Bulk (`/Bulk`) and a root-level `.search` (`/.search`) are rejected rather than
/// modeled — neither is in scope here.
pub fn parse_path(path: &str) -> ScimResult<ParsedPath> {
    let trimmed = path.trim_start_matches('/').trim_end_matches('/');
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => Err(ScimError::InvalidSyntax("empty path".to_string())),
        [resource] if *resource == "Bulk" => {
            Err(ScimError::InvalidSyntax("bulk operations are not supported".to_string()))
        }
        [resource] if *resource == ".search" => Err(ScimError::InvalidSyntax(
            "root-level .search is not supported".to_string(),
        )),
        [resource] => Ok(ParsedPath {
            resource_endpoint: resource.to_string(),
            id: None,
            is_search: false,
        }),
        [resource, ".search"] => Ok(ParsedPath {
            resource_endpoint: resource.to_string(),
            id: None,
            is_search: true,
        }),
        [resource, id] => Ok(ParsedPath {
            resource_endpoint: resource.to_string(),
            id: Some(id.to_string()),
            is_search: false,
        }),
        _ => Err(ScimError::InvalidSyntax(format!("unsupported path '{}'", path))),
    }
}

pub struct RequestContext<'a> {
    pub method: Method,
    pub path: &'a str,
    pub query: QueryParams<'a>,
    pub body: Option<Document>,
    pub auth: AuthContext,
}

pub struct Router {
    pub registry: HandlerRegistry,
    pub config: DispatchConfig,
}

impl Router {
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            registry: HandlerRegistry::new(),
            config,
        }
    }

    /// Runs the dispatch state machine end to end, never propagating a `ScimError` —
    /// every failure is converted into a SCIM error envelope at this boundary.
    pub async fn dispatch(&self, ctx: RequestContext<'_>) -> ScimResponse {
        match self.dispatch_inner(ctx).await {
            Ok(response) => response,
            Err(err) => ScimResponse::error(&err),
        }
    }

    async fn dispatch_inner(&self, ctx: RequestContext<'_>) -> ScimResult<ScimResponse> {
        let parsed = parse_path(ctx.path)?;
        let handler = self
            .registry
            .get(&parsed.resource_endpoint)
            .await
            .ok_or_else(|| ScimError::NotFound(format!("unknown resource type '{}'", parsed.resource_endpoint)))?;
        let schema = schema_for_endpoint(&parsed.resource_endpoint);
        let projection = Projection::from_params(ctx.query.attributes, ctx.query.excluded_attributes)
            .with_compatibility(self.config.compatibility.show_empty_multi_valued);

        match (ctx.method, parsed.id, parsed.is_search) {
            (Method::Create, None, false) => {
                let body = ctx
                    .body
                    .ok_or_else(|| ScimError::InvalidValue("create requires a body".to_string()))?;
                let created = handler.create(body).await?;
                Ok(projected_resource(StatusCode::CREATED, created, &projection, schema))
            }
            (Method::Get, Some(id), false) => {
                let found = handler.get(&id).await?;
                Ok(projected_resource(StatusCode::OK, found, &projection, schema))
            }
            (Method::Replace, Some(id), false) => {
                let body = ctx
                    .body
                    .ok_or_else(|| ScimError::InvalidValue("replace requires a body".to_string()))?;
                let replaced = handler.replace(&id, body).await?;
                Ok(projected_resource(StatusCode::OK, replaced, &projection, schema))
            }
            (Method::Delete, Some(id), false) => {
                handler.delete(&id).await?;
                Ok(ScimResponse::no_content())
            }
            (Method::Patch, Some(id), false) => {
                let operations: Vec<PatchOperation> = match &ctx.body {
                    Some(doc) => serde_json::from_value(
                        doc.as_value()
                            .get("Operations")
                            .cloned()
                            .ok_or_else(|| ScimError::InvalidValue("missing 'Operations'".to_string()))?,
                    )?,
                    None => return Err(ScimError::InvalidValue("patch requires a body".to_string())),
                };
                let patched = handler.patch(&id, &operations, &self.config).await?;
                Ok(projected_resource(StatusCode::OK, patched, &projection, schema))
            }
            (Method::Search, None, _) => {
                let query = Query::from_params(ctx.query, &self.config)?;
                let mut result = handler
                    .search(&query.filter, query.sort.as_ref(), query.start_index, query.count)
                    .await?;
                result.resources =
                    result.resources.iter().map(|doc| query.projection.apply(doc, schema)).collect();
                Ok(ScimResponse::list(result, query.start_index, query.count))
            }
            (method, id, is_search) => Err(ScimError::InvalidSyntax(format!(
                "unsupported combination: method={:?}, id={:?}, search={}",
                method, id, is_search
            ))),
        }
    }
}

/// Looks up the schema backing an endpoint's attribute projection, falling back to the
/// `User` schema for an endpoint with no known `ResourceType` (only reachable if a
/// handler is registered under a name other than `Users`/`Groups`).
fn schema_for_endpoint(endpoint: &str) -> &'static SchemaDefinition {
    ResourceType::from_endpoint(endpoint).map(schema_for).unwrap_or_else(|| schema_for(ResourceType::User))
}

/// Builds a resource response whose `Location`/`ETag` headers come from the resource's
/// own `meta`, independent of whether `attributes`/`excludedAttributes` narrows `meta`
/// out of the returned body (RFC 7644 Section 3.10's projection applies to the
/// representation, not to the headers that identify it).
fn projected_resource(
    status: StatusCode,
    doc: Document,
    projection: &Projection,
    schema: &SchemaDefinition,
) -> ScimResponse {
    let mut response = ScimResponse::resource(status, doc.clone());
    response.body = projection.apply(&doc, schema).into_value();
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryHandler;
    use serde_json::json;
    use std::sync::Arc;

    fn empty_query<'a>() -> QueryParams<'a> {
        QueryParams {
            filter: None,
            attributes: None,
            excluded_attributes: None,
            sort_by: None,
            sort_order: None,
            start_index: None,
            count: None,
        }
    }

    async fn router_with_users() -> Router {
        let router = Router::new(DispatchConfig::default());
        router.registry.register("Users", Arc::new(InMemoryHandler::new("User"))).await;
        router
    }

    #[tokio::test]
    async fn parse_path_rejects_bulk() {
        assert!(parse_path("/Bulk").is_err());
    }

    #[tokio::test]
    async fn parse_path_rejects_root_search() {
        assert!(parse_path("/.search").is_err());
    }

    #[tokio::test]
    async fn parse_path_recognizes_search_subresource() {
        let parsed = parse_path("/Users/.search").unwrap();
        assert_eq!(parsed.resource_endpoint, "Users");
        assert!(parsed.is_search);
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let router = router_with_users().await;
        let create_ctx = RequestContext {
            method: Method::Create,
            path: "/Users",
            query: empty_query(),
            body: Some(Document::new(json!({"userName": "bjensen"}))),
            auth: AuthContext { subject: "t".to_string(), tenant: None },
        };
        let response = router.dispatch(create_ctx).await;
        assert_eq!(response.status, StatusCode::CREATED);
        let id = response.body["id"].as_str().unwrap().to_string();

        let get_ctx = RequestContext {
            method: Method::Get,
            path: &format!("/Users/{}", id),
            query: empty_query(),
            body: None,
            auth: AuthContext { subject: "t".to_string(), tenant: None },
        };
        let response = router.dispatch(get_ctx).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["userName"], "bjensen");
    }

    #[tokio::test]
    async fn create_response_carries_location_and_etag_headers() {
        let router = router_with_users().await;
        let response = router
            .dispatch(RequestContext {
                method: Method::Create,
                path: "/Users",
                query: empty_query(),
                body: Some(Document::new(json!({"userName": "bjensen"}))),
                auth: AuthContext { subject: "t".to_string(), tenant: None },
            })
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert!(response.headers.get(axum::http::header::LOCATION).is_some());
        assert_eq!(
            response.headers.get(axum::http::header::ETAG).unwrap(),
            "W/\"1\""
        );
    }

    #[tokio::test]
    async fn get_honors_attributes_query_param_but_keeps_headers() {
        let router = router_with_users().await;
        let created = router
            .dispatch(RequestContext {
                method: Method::Create,
                path: "/Users",
                query: empty_query(),
                body: Some(Document::new(json!({"userName": "bjensen", "displayName": "Babs"}))),
                auth: AuthContext { subject: "t".to_string(), tenant: None },
            })
            .await;
        let id = created.body["id"].as_str().unwrap().to_string();

        let mut query = empty_query();
        query.attributes = Some("userName");
        let response = router
            .dispatch(RequestContext {
                method: Method::Get,
                path: &format!("/Users/{}", id),
                query,
                body: None,
                auth: AuthContext { subject: "t".to_string(), tenant: None },
            })
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["userName"], "bjensen");
        assert!(response.body.get("displayName").is_none());
        assert!(response.headers.get(axum::http::header::ETAG).is_some());
        assert!(response.headers.get(axum::http::header::LOCATION).is_some());
    }

    #[tokio::test]
    async fn search_results_are_projected_too() {
        let router = router_with_users().await;
        router
            .dispatch(RequestContext {
                method: Method::Create,
                path: "/Users",
                query: empty_query(),
                body: Some(Document::new(json!({"userName": "bjensen", "displayName": "Babs"}))),
                auth: AuthContext { subject: "t".to_string(), tenant: None },
            })
            .await;

        let mut query = empty_query();
        query.attributes = Some("userName");
        let response = router
            .dispatch(RequestContext {
                method: Method::Search,
                path: "/Users/.search",
                query,
                body: None,
                auth: AuthContext { subject: "t".to_string(), tenant: None },
            })
            .await;
        let resources = response.body["Resources"].as_array().unwrap();
        assert_eq!(resources[0]["userName"], "bjensen");
        assert!(resources[0].get("displayName").is_none());
    }

    #[tokio::test]
    async fn get_unknown_resource_type_is_not_found() {
        let router = router_with_users().await;
        let ctx = RequestContext {
            method: Method::Get,
            path: "/Widgets/1",
            query: empty_query(),
            body: None,
            auth: AuthContext { subject: "t".to_string(), tenant: None },
        };
        let response = router.dispatch(ctx).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_returns_list_envelope() {
        let router = router_with_users().await;
        router
            .dispatch(RequestContext {
                method: Method::Create,
                path: "/Users",
                query: empty_query(),
                body: Some(Document::new(json!({"userName": "bjensen"}))),
                auth: AuthContext { subject: "t".to_string(), tenant: None },
            })
            .await;

        let response = router
            .dispatch(RequestContext {
                method: Method::Search,
                path: "/Users/.search",
                query: empty_query(),
                body: None,
                auth: AuthContext { subject: "t".to_string(), tenant: None },
            })
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["totalResults"], 1);
    }
}
