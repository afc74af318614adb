/*
[INPUT]:  Configuration and logging modules of the trading CLI
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod logging;

pub use config::AppConfig;
