//! Prompt domain
//!
//! The prompt catalog that drives the demand scheduler, the templates it
//! holds, and cleanup of what the generator sends back.

pub mod catalog;
mod sanitize;
mod template;

pub use catalog::PromptCatalog;
pub use sanitize::strip_echoed_tags;
pub use template::PromptTemplate;
