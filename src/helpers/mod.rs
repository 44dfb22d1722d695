//! Small formatting helpers shared by templates, pages and the generator

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
