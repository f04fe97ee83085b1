pub mod auth;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod handler;
pub mod http;
pub mod logging;
pub mod memory;
pub mod patch;
pub mod path;
pub mod projector;
pub mod query;
pub mod resource;
pub mod response;
pub mod router;
pub mod schema;
pub mod service_provider;

pub use document::Document;
pub use error::{ScimError, ScimResult};
