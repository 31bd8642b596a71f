// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds terminal setup and the event loop.
pub mod answer;
pub mod app;
pub mod bank;
pub mod config;
pub mod datasets;
pub mod history;
pub mod runtime;
pub mod select;
pub mod session;
pub mod summary;
pub mod ui;
