//! Fuel stop planner server.
//!
//! A web application that answers: "I'm driving from here to there,
//! where should I fill up to spend the least on fuel?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod geocode;
pub mod planner;
pub mod route;
pub mod routing;
pub mod stations;
pub mod trip;
pub mod web;

/// Install the global `tracing` subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
