//! menagerie - a small self-hostable animal registry backed by a JSON file

pub mod cli;
pub mod http_server;
pub mod media;
pub mod observability;
pub mod registry;
pub mod session;
pub mod store;
