//! Backend worker: owns the HTTP client and runs queued commands off the UI thread.

pub mod commands;
pub mod runtime;
