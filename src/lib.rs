// Library surface for headless/integration tests and reuse.
// The binary in main.rs only owns CLI parsing and terminal setup.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod controller;
pub mod positions;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod ui;
pub mod util;
