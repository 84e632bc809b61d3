//! Product registry service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::{IdStrategy, Product, ProductId, ProductPayload, ProductRegistry};
