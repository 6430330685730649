//! UI layer for the desktop GUI: the lookup/update screen and its startup config.

pub mod app;

pub use app::{PokedexApp, StartupConfig};
