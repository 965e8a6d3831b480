pub mod api_doc;
pub mod app;
pub mod config;
pub mod coverage;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod spanner;
pub mod state;
