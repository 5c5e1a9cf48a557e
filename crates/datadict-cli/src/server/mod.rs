//! Dashboard web server.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
