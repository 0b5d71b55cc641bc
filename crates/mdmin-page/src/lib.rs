//! Single-page HTML assembly for mdmin.

mod template;

pub use template::{DEFAULT_TEMPLATE, PageError, PageRenderer};
