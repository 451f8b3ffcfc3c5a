//! Helper functions for listings and URL handling

mod filter;
mod pagination;
mod url;

pub use filter::*;
pub use pagination::*;
pub use url::*;
