//! HTTP transport adapter (out-of-scope, demonstration): turns `axum` requests into
//! `router::Router::dispatch` calls and SCIM JSON responses. Anything beyond "translate
//! bytes+headers into a `RequestContext`" belongs in the dispatch state machine, not
//! here — this module stays thin on purpose.

use crate::auth::{AllowAllAuthenticator, AuthContext, Authenticator};
use crate::document::Document;
use crate::error::ScimError;
use crate::query::QueryParams;
use crate::router::{Method as DispatchMethod, RequestContext, Router};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Accepts both `application/json` and `application/scim+json` request bodies, per
/// RFC 7644 Section 3.1.
pub struct ScimJson(pub Value);

impl<S: Send + Sync> FromRequest<S> for ScimJson {
    type Rejection = ScimJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(content_type) = req.headers().get(header::CONTENT_TYPE) {
            let media_type = content_type
                .to_str()
                .map_err(|_| ScimJsonRejection::InvalidContentType)?
                .split(';')
                .next()
                .unwrap_or("")
                .trim()
                .to_lowercase();
            if media_type != "application/json" && media_type != "application/scim+json" {
                return Err(ScimJsonRejection::InvalidContentType);
            }
        }

        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ScimJson(value)),
            Err(rejection) => Err(ScimJsonRejection::Json(rejection)),
        }
    }
}

pub enum ScimJsonRejection {
    InvalidContentType,
    Json(JsonRejection),
}

impl IntoResponse for ScimJsonRejection {
    fn into_response(self) -> Response {
        let detail = match &self {
            ScimJsonRejection::InvalidContentType => {
                "Content-Type must be application/json or application/scim+json".to_string()
            }
            ScimJsonRejection::Json(rejection) => format!("invalid JSON body: {}", rejection),
        };
        let body = Json(json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:Error"],
            "status": "400",
            "scimType": "invalidValue",
            "detail": detail,
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawQuery {
    pub filter: Option<String>,
    pub attributes: Option<String>,
    #[serde(rename = "excludedAttributes")]
    pub excluded_attributes: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
    #[serde(rename = "startIndex")]
    pub start_index: Option<String>,
    pub count: Option<String>,
}

impl RawQuery {
    fn as_params(&self) -> QueryParams<'_> {
        QueryParams {
            filter: self.filter.as_deref(),
            attributes: self.attributes.as_deref(),
            excluded_attributes: self.excluded_attributes.as_deref(),
            sort_by: self.sort_by.as_deref(),
            sort_order: self.sort_order.as_deref(),
            start_index: self.start_index.as_deref(),
            count: self.count.as_deref(),
        }
    }
}

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

pub struct AppState {
    pub router: Arc<Router>,
    pub authenticator: Arc<dyn Authenticator>,
}

pub fn app(router: Arc<Router>) -> axum::Router {
    app_with_authenticator(router, Arc::new(AllowAllAuthenticator))
}

pub fn app_with_authenticator(router: Arc<Router>, authenticator: Arc<dyn Authenticator>) -> axum::Router {
    let state = Arc::new(AppState { router, authenticator });
    axum::Router::new()
        .route("/{resource}", get(collection_handler).post(create_handler))
        .route("/{resource}/.search", post(collection_handler))
        .route(
            "/{resource}/{id}",
            get(item_handler).put(replace_handler).delete(delete_handler).patch(patch_handler),
        )
        .route("/ServiceProviderConfig", get(service_provider_config_handler))
        .route("/ResourceTypes", get(resource_types_handler))
        .route("/ResourceTypes/{id}", get(resource_type_handler))
        .route("/Schemas", get(schemas_handler))
        .route("/Schemas/{id}", get(schema_handler))
        .layer(axum::middleware::from_fn(crate::logging::logging_middleware))
        .with_state(state)
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthContext, Response> {
    state.authenticator.authenticate(headers).await.map_err(|err| scim_error_response(&err))
}

fn scim_error_response(err: &ScimError) -> Response {
    to_response(crate::response::ScimResponse::error(err))
}

fn to_response(response: crate::response::ScimResponse) -> Response {
    (response.status, response.headers, Json(response.body)).into_response()
}

async fn collection_handler(
    State(state): State<Arc<AppState>>,
    Path(resource): Path<String>,
    Query(raw_query): Query<RawQuery>,
    headers: HeaderMap,
) -> Response {
    let auth = match authenticate(&state, &headers).await {
        Ok(auth) => auth,
        Err(resp) => return resp,
    };
    let ctx = RequestContext {
        method: DispatchMethod::Search,
        path: &format!("/{}/.search", resource),
        query: raw_query.as_params(),
        body: None,
        auth,
    };
    to_response(state.router.dispatch(ctx).await)
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    body: ScimJson,
) -> Response {
    let auth = match authenticate(&state, &headers).await {
        Ok(auth) => auth,
        Err(resp) => return resp,
    };
    let ctx = RequestContext {
        method: DispatchMethod::Create,
        path: &format!("/{}", resource),
        query: empty_query(),
        body: Some(Document::new(body.0)),
        auth,
    };
    to_response(state.router.dispatch(ctx).await)
}

async fn item_handler(
    State(state): State<Arc<AppState>>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let auth = match authenticate(&state, &headers).await {
        Ok(auth) => auth,
        Err(resp) => return resp,
    };
    let ctx = RequestContext {
        method: DispatchMethod::Get,
        path: &format!("/{}/{}", resource, id),
        query: empty_query(),
        body: None,
        auth,
    };
    to_response(state.router.dispatch(ctx).await)
}

async fn replace_handler(
    State(state): State<Arc<AppState>>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
    body: ScimJson,
) -> Response {
    let auth = match authenticate(&state, &headers).await {
        Ok(auth) => auth,
        Err(resp) => return resp,
    };
    let ctx = RequestContext {
        method: DispatchMethod::Replace,
        path: &format!("/{}/{}", resource, id),
        query: empty_query(),
        body: Some(Document::new(body.0)),
        auth,
    };
    to_response(state.router.dispatch(ctx).await)
}

async fn patch_handler(
    State(state): State<Arc<AppState>>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
    body: ScimJson,
) -> Response {
    let auth = match authenticate(&state, &headers).await {
        Ok(auth) => auth,
        Err(resp) => return resp,
    };
    let ctx = RequestContext {
        method: DispatchMethod::Patch,
        path: &format!("/{}/{}", resource, id),
        query: empty_query(),
        body: Some(Document::new(body.0)),
        auth,
    };
    to_response(state.router.dispatch(ctx).await)
}

async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let auth = match authenticate(&state, &headers).await {
        Ok(auth) => auth,
        Err(resp) => return resp,
    };
    let ctx = RequestContext {
        method: DispatchMethod::Delete,
        path: &format!("/{}/{}", resource, id),
        query: empty_query(),
        body: None,
        auth,
    };
    to_response(state.router.dispatch(ctx).await)
}

async fn service_provider_config_handler(State(state): State<Arc<AppState>>) -> Response {
    Json(crate::service_provider::service_provider_config(&state.router.config)).into_response()
}

async fn resource_types_handler() -> Response {
    Json(crate::service_provider::resource_types()).into_response()
}

async fn resource_type_handler(Path(id): Path<String>) -> Response {
    match crate::service_provider::resource_type_by_id(&id) {
        Some(body) => Json(body).into_response(),
        None => scim_error_response(&ScimError::NotFound(format!("unknown resource type '{}'", id))),
    }
}

async fn schemas_handler() -> Response {
    Json(crate::service_provider::schemas()).into_response()
}

async fn schema_handler(Path(id): Path<String>) -> Response {
    match crate::service_provider::schema_by_id(&id) {
        Some(body) => Json(body).into_response(),
        None => scim_error_response(&ScimError::NotFound(format!("unknown schema '{}'", id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatchConfig;
    use crate::memory::InMemoryHandler;
    use axum_test::TestServer;
    use serde_json::json;

    async fn test_app() -> TestServer {
        let router = Router::new(DispatchConfig::default());
        router.registry.register("Users", Arc::new(InMemoryHandler::new("User"))).await;
        TestServer::new(app(Arc::new(router))).unwrap()
    }

    #[tokio::test]
    async fn create_then_fetch_user_over_http() {
        let server = test_app().await;
        let created = server.post("/Users").json(&json!({"userName": "bjensen"})).await;
        created.assert_status(StatusCode::CREATED);
        let id = created.json::<Value>()["id"].as_str().unwrap().to_string();

        let fetched = server.get(&format!("/Users/{}", id)).await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<Value>()["userName"], "bjensen");
    }

    #[tokio::test]
    async fn get_missing_user_is_404() {
        let server = test_app().await;
        let response = server.get("/Users/missing").await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn service_provider_config_is_served() {
        let server = test_app().await;
        let response = server.get("/ServiceProviderConfig").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn resource_type_by_id_is_served_and_unknown_is_404() {
        let server = test_app().await;
        server.get("/ResourceTypes/User").await.assert_status_ok();
        server.get("/ResourceTypes/Widget").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn schema_by_id_is_served_and_unknown_is_404() {
        let server = test_app().await;
        server
            .get("/Schemas/urn:ietf:params:scim:schemas:core:2.0:User")
            .await
            .assert_status_ok();
        server.get("/Schemas/nope").await.assert_status_not_found();
    }
}
