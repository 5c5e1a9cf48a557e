//! Request handlers.

mod datasets;
mod pages;

pub use datasets::*;
pub use pages::*;
