use scim_core::config::DispatchConfig;
use scim_core::handler::ResourceHandler;
use scim_core::memory::InMemoryHandler;
use scim_core::router::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Demonstration binary: boots the dispatch state machine behind an `axum` HTTP server
/// with in-memory `User`/`Group` handlers. A real deployment would register
/// `ResourceHandler` impls backed by its own storage instead of `InMemoryHandler`.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let router = Router::new(DispatchConfig::default());
    router.registry.register("Users", Arc::new(InMemoryHandler::new("User")) as Arc<dyn ResourceHandler>).await;
    router.registry.register("Groups", Arc::new(InMemoryHandler::new("Group")) as Arc<dyn ResourceHandler>).await;

    let app = scim_core::http::app(Arc::new(router));

    let listener = TcpListener::bind("0.0.0.0:8080").await.expect("failed to bind port 8080");
    tracing::info!("scim-core listening on 0.0.0.0:8080");
    axum::serve(listener, app).await.expect("server error");
}
