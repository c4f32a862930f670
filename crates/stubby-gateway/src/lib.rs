//! HTTP front end for the stubby shortener.
//!
//! Turns requests into [`Shortener`][stubby_core::Shortener] calls and renders
//! tokens as shortened URLs and redirects.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
