//! Command-line client for a remote lyric-generation API
//!
//! Validates a song prompt locally, sends it to the API's `/generate`
//! endpoint, and renders the returned lyrics, reasoning trace and retrieved
//! reference examples as escaped HTML.

pub mod api;
pub mod app;
pub mod cli;
pub mod error;
pub mod models;
pub mod query;
pub mod render;
pub mod templates;
pub mod view;

pub use error::{Error, Result};
