// Supporting modules
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;

// Storage
pub mod storage;

// Domain layer
pub mod formatter;
pub mod quick_reply;
pub mod template;
pub mod webhook;

// Application layer
pub mod api;
pub mod server;
