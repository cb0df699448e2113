pub mod config;
pub mod ingest;
pub mod pipeline;
pub mod session;
pub mod stats;
pub mod tui;
