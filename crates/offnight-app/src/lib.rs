// Library root: re-exports all modules so integration tests and the binary
// share the same code paths.

pub mod app;
pub mod cli;
pub mod config;
pub mod report;
pub mod schedule_file;
