//! # HTTP Server Module
//!
//! JSON API for the animal registry, combined into a unified Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/animals/*` - Animal CRUD with paged listing
//! - `/images/*` - Stored image serving
//! - `/session/*` - Session cart and visit-counter demo

pub mod animal_routes;
pub mod config;
pub mod media_routes;
pub mod server;
pub mod session_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
